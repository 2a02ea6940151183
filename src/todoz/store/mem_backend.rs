use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded,
/// which lets `StorageBackend` keep `&self` receivers.
#[derive(Default)]
pub struct MemBackend {
    files: RefCell<HashMap<PathBuf, String>>,
    failing_paths: RefCell<HashSet<PathBuf>>,
    simulate_write_error: RefCell<bool>,
    writes: RefCell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a file, as if it already existed on disk.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Make every write fail.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make writes to one path fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        self.failing_paths.borrow_mut().insert(path.into());
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl StorageBackend for MemBackend {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        Ok(self
            .files
            .borrow()
            .get(path)
            .map(|contents| contents.clone().into_bytes()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() || self.failing_paths.borrow().contains(path) {
            return Err(TodoError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("simulated write error: {}", path.display()),
            )));
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }
}
