use super::backend::StorageBackend;
use crate::config::DEFAULT_FILE_MODE;
use crate::error::{Result, TodoError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct FsBackend {
    file_mode: u32,
}

impl FsBackend {
    pub fn new(file_mode: u32) -> Self {
        Self { file_mode }
    }

    fn tmp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        path.with_file_name(format!(".{}-{}.tmp", name, Uuid::new_v4()))
    }

    #[cfg(unix)]
    fn apply_mode(&self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(self.file_mode))
            .map_err(TodoError::Io)
    }

    #[cfg(not(unix))]
    fn apply_mode(&self, _path: &Path) -> Result<()> {
        Ok(())
    }
}

impl Default for FsBackend {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_MODE)
    }
}

impl StorageBackend for FsBackend {
    fn read(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match fs::read(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TodoError::Io(e)),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        // Write next to the target, then rename over it
        let tmp_file = Self::tmp_path(path);
        let written = fs::write(&tmp_file, contents)
            .map_err(TodoError::Io)
            .and_then(|_| self.apply_mode(&tmp_file))
            .and_then(|_| fs::rename(&tmp_file, path).map_err(TodoError::Io));

        if written.is_err() {
            let _ = fs::remove_file(&tmp_file);
        }
        written
    }
}
