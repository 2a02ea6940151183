//! Todo files in the storage directory.
//!
//! Each todo list is its own JSON file under [`Config::storage_dir`]. Names
//! given by the user are normalized by [`normalize_file_name`] so `work`,
//! `work.json` and `some/dir/work.JSON` all refer to `work.json`.

use crate::config::Config;
use crate::error::{Result, TodoError};
use crate::validation::ValidationError;
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const JSON_EXT: &str = ".json";

/// One todo file as found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoFile {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Turn user input into a bare `<name>.json` file name.
///
/// ```
/// use todoz::catalog::normalize_file_name;
///
/// assert_eq!(normalize_file_name(" groceries ").unwrap(), "groceries.json");
/// assert_eq!(normalize_file_name("a/b/work.JSON.json").unwrap(), "work.json");
/// assert!(normalize_file_name(".json").is_err());
/// ```
pub fn normalize_file_name(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let mut name = Path::new(trimmed)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    while name.to_ascii_lowercase().ends_with(JSON_EXT) {
        name.truncate(name.len() - JSON_EXT.len());
    }

    if name.trim().is_empty() {
        return Err(ValidationError::InvalidInput(
            "please provide a name for the todo file".to_string(),
        )
        .into());
    }
    Ok(format!("{}{}", name, JSON_EXT))
}

/// Reserve a new todo file name.
///
/// Creates the storage directory if needed and returns the full path of the
/// new file. The file itself is written on the first save.
pub fn create_file(config: &Config, raw_name: &str) -> Result<PathBuf> {
    let name = normalize_file_name(raw_name)?;
    config.ensure_storage_dir()?;

    let path = config.full_path(&name);
    if path.exists() {
        return Err(TodoError::FileExists(path));
    }
    Ok(path)
}

/// Full path of an existing todo file.
pub fn resolve_file(config: &Config, raw_name: &str) -> Result<PathBuf> {
    let name = normalize_file_name(raw_name)?;
    let path = config.full_path(&name);
    if !path.is_file() {
        return Err(TodoError::NotFound(name));
    }
    Ok(path)
}

/// All todo files in the storage directory, sorted by name.
///
/// A storage directory that does not exist yet holds no files.
pub fn list_files(config: &Config) -> Result<Vec<TodoFile>> {
    let entries = match fs::read_dir(&config.storage_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(TodoError::Io(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(TodoError::Io)?;
        let meta = entry.metadata().map_err(TodoError::Io)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !meta.is_file() || !name.ends_with(JSON_EXT) {
            continue;
        }
        files.push(TodoFile {
            name,
            path: entry.path(),
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        });
    }

    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Remove a todo file.
pub fn delete_file(config: &Config, raw_name: &str) -> Result<PathBuf> {
    let path = resolve_file(config, raw_name)?;
    fs::remove_file(&path).map_err(TodoError::Io)?;
    info!("event=file_delete path={}", path.display());
    Ok(path)
}
