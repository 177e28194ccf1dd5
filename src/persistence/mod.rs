//! # Persistence Module
//!
//! ## Why This Module Exists
//! A finished mapping is only useful once it sits on the console's storage as
//! `<guid>.txt`. This module covers that last step: picking a target directory on
//! the mounted media and writing the record there.
//!
//! ## Key Abstractions
//! - **[`browser::DirBrowser`]**: directory-only navigation rooted at the export mount,
//!   with a synthetic "export here" entry
//! - **[`storage::ExportStorage`]**: the two filesystem operations the flow needs,
//!   behind a trait so the wizard can run against in-memory storage
//!
//! ## Error Handling Strategy
//! A listing failure degrades to an empty directory. A write failure is reported to the
//! caller, which keeps the user in the browser to try another location.

pub mod browser;
pub mod storage;

pub use browser::{BrowserEntry, DirBrowser};
pub use storage::{ExportStorage, FsStorage};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to list {}: {source}", path.display())]
    List {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}
