//! Storage backend for the export browser

use super::ExportError;
use std::path::Path;

/// Filesystem operations the export flow needs
pub trait ExportStorage {
    /// Names of all subdirectories of `path`, unsorted and unfiltered
    fn list_directories(&self, path: &Path) -> Result<Vec<String>, ExportError>;

    /// Creates or truncates `path` and writes `contents`
    fn write_record(&self, path: &Path, contents: &str) -> Result<(), ExportError>;
}

/// [`ExportStorage`] on the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl ExportStorage for FsStorage {
    fn list_directories(&self, path: &Path) -> Result<Vec<String>, ExportError> {
        let entries = std::fs::read_dir(path).map_err(|source| ExportError::List {
            path: path.to_path_buf(),
            source,
        })?;

        let names = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        Ok(names)
    }

    fn write_record(&self, path: &Path, contents: &str) -> Result<(), ExportError> {
        std::fs::write(path, contents).map_err(|source| ExportError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[test]
    fn lists_directories_but_not_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("roms")).unwrap();
        fs::create_dir(dir.path().join(".hidden")).unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();

        let mut names = FsStorage.list_directories(dir.path()).unwrap();
        names.sort();
        assert_eq!(names, vec![".hidden".to_string(), "roms".to_string()]);
    }

    #[test]
    fn write_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pad.txt");
        fs::write(&path, "a much longer previous record\n").unwrap();

        FsStorage.write_record(&path, "short\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "short\n");
    }

    #[test]
    fn errors_carry_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let err = FsStorage.list_directories(&missing).unwrap_err();
        assert!(err.to_string().contains("missing"));

        let err = FsStorage
            .write_record(&missing.join("pad.txt"), "x")
            .unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }
}
