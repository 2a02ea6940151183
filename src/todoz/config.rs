use crate::error::{Result, TodoError};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_STORAGE_DIR: &str = "storage";
const DEFAULT_SUMMARY_FILE: &str = "save_todos.json";
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Where todo files live and how they are written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the todo files
    pub storage_dir: PathBuf,

    /// File that receives the task summary after every save
    pub summary_file: PathBuf,

    /// Permission bits for files the store writes, as an octal string in JSON
    #[serde(with = "octal_mode")]
    pub file_mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            summary_file: PathBuf::from(DEFAULT_SUMMARY_FILE),
            file_mode: DEFAULT_FILE_MODE,
        }
    }
}

impl Config {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodoError::Io)?;
        let config: Config = serde_json::from_str(&content).map_err(TodoError::Deserialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodoError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodoError::Serialization)?;
        fs::write(config_path, content).map_err(TodoError::Io)?;
        Ok(())
    }

    /// Platform config directory (e.g. `~/.config/todoz`), if one can be determined
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "todoz", "todoz").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Create the storage directory if it doesn't exist
    pub fn ensure_storage_dir(&self) -> Result<()> {
        if !self.storage_dir.exists() {
            fs::create_dir_all(&self.storage_dir).map_err(TodoError::Io)?;
        }
        Ok(())
    }

    /// Path of `filename` inside the storage directory
    pub fn full_path(&self, filename: &str) -> PathBuf {
        self.storage_dir.join(filename)
    }
}

mod octal_mode {
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Mode {
        Octal(String),
        Bits(u32),
    }

    pub fn serialize<S>(mode: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:o}", mode))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Mode::deserialize(deserializer)? {
            Mode::Bits(bits) => Ok(bits),
            Mode::Octal(raw) => {
                let digits = raw.trim().trim_start_matches("0o");
                u32::from_str_radix(digits, 8)
                    .map_err(|_| de::Error::custom(format!("invalid file mode: {}", raw)))
            }
        }
    }
}
