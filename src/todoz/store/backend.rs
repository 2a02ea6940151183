use crate::error::Result;
use std::path::Path;

/// Abstract interface for raw file I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while TodoStore handles the "what" (records, validation, summary).
///
/// Files are always read and written whole: no appends, no partial writes.
pub trait StorageBackend {
    /// Read a file's full contents as raw bytes.
    /// Returns Ok(None) if the file does not exist.
    /// Returns Err only on actual I/O errors (permissions, disk failure);
    /// decoding is left to the caller.
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>>;

    /// Replace a file's contents.
    /// MUST NOT leave a half-written file behind on failure.
    fn write(&self, path: &Path, contents: &str) -> Result<()>;
}
