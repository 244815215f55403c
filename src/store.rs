//! Selection Persistence
//!
//! Keeps the last selected budget and step across restarts. The browser
//! backs this with local storage; natively it is a small JSON file.

use std::cell::Cell;
use thiserror::Error;

use crate::state::Selection;

/// Where the last selection lives between sessions
pub trait SelectionStore {
    fn load(&self) -> Result<Selection, StoreError>;
    fn save(&self, selection: &Selection) -> Result<(), StoreError>;
}

/// Selection persistence errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Selection storage unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Process-local store; nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryStore {
    selection: Cell<Selection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(selection: Selection) -> Self {
        Self {
            selection: Cell::new(selection),
        }
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self) -> Result<Selection, StoreError> {
        Ok(self.selection.get())
    }

    fn save(&self, selection: &Selection) -> Result<(), StoreError> {
        self.selection.set(*selection);
        Ok(())
    }
}

/// Load the stored selection, falling back to none
pub fn load_or_default<S: SelectionStore + ?Sized>(store: &S) -> Selection {
    store.load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load saved selection: {}", e);
        Selection::default()
    })
}

/// Save the selection; failures are logged, never fatal
pub fn persist<S: SelectionStore + ?Sized>(store: &S, selection: &Selection) {
    if let Err(e) = store.save(selection) {
        tracing::warn!("Failed to save selection: {}", e);
    }
}

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use std::path::{Path, PathBuf};

    use super::{SelectionStore, StoreError};
    use crate::state::Selection;

    /// File name inside the data directory
    pub const SELECTION_FILE: &str = "selection.json";

    /// JSON file in the data directory
    #[derive(Debug, Clone)]
    pub struct FileStore {
        path: PathBuf,
    }

    impl FileStore {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }

        /// `selection.json` inside `data_dir`
        pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
            Self::new(data_dir.as_ref().join(SELECTION_FILE))
        }

        pub fn path(&self) -> &Path {
            &self.path
        }
    }

    impl SelectionStore for FileStore {
        fn load(&self) -> Result<Selection, StoreError> {
            if !self.path.exists() {
                return Ok(Selection::default());
            }
            let content = std::fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&content)?)
        }

        fn save(&self, selection: &Selection) -> Result<(), StoreError> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(selection)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        }
    }
}
