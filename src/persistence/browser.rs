//! Directory picker for the export step
//!
//! Lists subdirectories only, sorted case-insensitively, with a `..` entry on top
//! (except at the root) and a synthetic "export here" entry at the bottom. The
//! browser never leaves its root: going up from there does nothing.

use super::storage::ExportStorage;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const EXPORT_LABEL: &str = ">> Export here <<";
pub const PARENT_LABEL: &str = "..";
pub const VISIBLE_ROWS: usize = 18;
pub const MAX_ENTRIES: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEntry {
    Parent,
    Directory(String),
    ExportHere,
}

impl BrowserEntry {
    pub fn label(&self) -> &str {
        match self {
            BrowserEntry::Parent => PARENT_LABEL,
            BrowserEntry::Directory(name) => name,
            BrowserEntry::ExportHere => EXPORT_LABEL,
        }
    }

    pub fn is_directory(&self) -> bool {
        !matches!(self, BrowserEntry::ExportHere)
    }
}

#[derive(Debug, Clone)]
pub struct DirBrowser {
    root: PathBuf,
    path: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
    scroll: usize,
}

impl DirBrowser {
    pub fn open(root: &Path, storage: &dyn ExportStorage) -> Self {
        let mut browser = Self {
            root: root.to_path_buf(),
            path: root.to_path_buf(),
            entries: Vec::new(),
            selected: 0,
            scroll: 0,
        };
        browser.load(root.to_path_buf(), storage);
        browser
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    #[cfg(test)]
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_at_root(&self) -> bool {
        self.path == self.root
    }

    /// Entries inside the scroll window, with their absolute index
    pub fn visible(&self) -> impl Iterator<Item = (usize, &BrowserEntry)> {
        self.entries
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(VISIBLE_ROWS)
    }

    /// Replaces the listing with the contents of `path` and resets the cursor.
    ///
    /// A directory that cannot be listed still offers `..` and the export entry.
    pub fn load(&mut self, path: PathBuf, storage: &dyn ExportStorage) {
        let mut names = match storage.list_directories(&path) {
            Ok(names) => names,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        };
        names.retain(|name| !name.starts_with('.'));
        names.sort_by_cached_key(|name| name.to_lowercase());

        self.path = path;
        self.entries.clear();
        if !self.is_at_root() {
            self.entries.push(BrowserEntry::Parent);
        }
        let room = MAX_ENTRIES - 1 - self.entries.len();
        self.entries
            .extend(names.into_iter().take(room).map(BrowserEntry::Directory));
        self.entries.push(BrowserEntry::ExportHere);

        self.selected = 0;
        self.scroll = 0;
        debug!(
            "Browsing {} ({} entries)",
            self.path.display(),
            self.entries.len()
        );
    }

    pub fn move_selection(&mut self, dy: i8) {
        let last = self.entries.len().saturating_sub(1);
        self.selected = match dy {
            d if d < 0 => self.selected.saturating_sub(1),
            d if d > 0 => (self.selected + 1).min(last),
            _ => self.selected,
        };

        if self.selected < self.scroll {
            self.scroll = self.selected;
        }
        if self.selected >= self.scroll + VISIBLE_ROWS {
            self.scroll = self.selected + 1 - VISIBLE_ROWS;
        }
    }

    /// Moves to the parent directory. Returns false when already at the root.
    pub fn go_up(&mut self, storage: &dyn ExportStorage) -> bool {
        if self.is_at_root() {
            return false;
        }
        let parent = self
            .path
            .parent()
            .filter(|parent| parent.starts_with(&self.root))
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        self.load(parent, storage);
        true
    }

    /// Acts on the selected entry.
    ///
    /// Directories are entered. For the export entry the current directory is
    /// returned and the caller performs the write.
    pub fn activate(&mut self, storage: &dyn ExportStorage) -> Option<PathBuf> {
        match self.entries.get(self.selected)?.clone() {
            BrowserEntry::Parent => {
                self.go_up(storage);
                None
            }
            BrowserEntry::Directory(name) => {
                let target = self.path.join(name);
                self.load(target, storage);
                None
            }
            BrowserEntry::ExportHere => Some(self.path.clone()),
        }
    }
}
