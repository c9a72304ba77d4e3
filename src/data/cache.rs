use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{load_file, LoadError};
use super::model::PaperDataset;

/// Outcome of a load, shared cheaply between frames.
pub type CachedLoad = Result<Arc<PaperDataset>, Arc<LoadError>>;

/// Memoized dataset load.
///
/// The file is read on the first [`DatasetCache::get_or_load`] call and the
/// result, success or failure, is handed back on every later call until the
/// cache is invalidated or pointed at another file.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    entry: Option<CachedLoad>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entry: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached load, reading the file if nothing is cached yet.
    pub fn get_or_load(&mut self) -> CachedLoad {
        if let Some(entry) = &self.entry {
            return entry.clone();
        }

        let loaded = match load_file(&self.path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} papers from {}",
                    dataset.len(),
                    self.path.display()
                );
                Ok(Arc::new(dataset))
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.path.display());
                Err(Arc::new(e))
            }
        };
        self.entry = Some(loaded.clone());
        loaded
    }

    /// Drop the cached result so the next access re-reads the file.
    pub fn invalidate(&mut self) {
        log::debug!("Invalidating cached load of {}", self.path.display());
        self.entry = None;
    }

    /// Point the cache at another file, dropping any cached result.
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
        self.entry = None;
    }
}
