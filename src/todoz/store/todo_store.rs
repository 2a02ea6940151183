use super::backend::StorageBackend;
use super::fs_backend::FsBackend;
use crate::error::{Result, TodoError};
use crate::model::Todo;
use crate::validation::{validate_task, ValidationError};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{de, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// The in-memory todo collection bound to one backing file.
///
/// Mutations (`save`, `delete`) only touch memory; nothing reaches the file
/// until [`TodoStore::persist`] is called.
///
/// Records are kept in insertion order. Overwriting an existing id keeps its
/// position and deleting one closes the gap, so `list` and the summary are
/// stable between runs.
pub struct TodoStore<B: StorageBackend> {
    todos: IndexMap<String, Todo>,
    file: PathBuf,
    backend: B,
}

impl TodoStore<FsBackend> {
    /// Open a file-backed store, loading whatever is already on disk.
    pub fn open(file: impl Into<PathBuf>, file_mode: u32) -> Result<Self> {
        Self::with_backend(file, FsBackend::new(file_mode))
    }
}

impl<B: StorageBackend> TodoStore<B> {
    pub fn with_backend(file: impl Into<PathBuf>, backend: B) -> Result<Self> {
        let mut store = Self {
            todos: IndexMap::new(),
            file: file.into(),
            backend,
        };
        store.load()?;
        Ok(store)
    }

    pub fn file_path(&self) -> &Path {
        &self.file
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replace the in-memory records with the backing file's contents.
    ///
    /// A missing or blank file, or one holding `null`, yields an empty store.
    /// Content that isn't a valid todo map (bad UTF-8, bad JSON, a key that
    /// differs from its record's `id`) fails with `Deserialization` and the
    /// current records are left as they were.
    pub fn load(&mut self) -> Result<()> {
        let content = match self.backend.read(&self.file)? {
            Some(content) if !content.iter().all(u8::is_ascii_whitespace) => content,
            _ => {
                debug!(
                    "event=store_load status=empty path={}",
                    self.file.display()
                );
                self.todos.clear();
                return Ok(());
            }
        };

        let todos: Option<IndexMap<String, Todo>> =
            serde_json::from_slice(&content).map_err(TodoError::Deserialization)?;
        let todos = todos.unwrap_or_default();
        if let Some((key, todo)) = todos.iter().find(|(key, todo)| **key != todo.id) {
            return Err(TodoError::Deserialization(de::Error::custom(format!(
                "record key '{}' does not match its id '{}'",
                key, todo.id
            ))));
        }

        debug!(
            "event=store_load status=ok path={} count={}",
            self.file.display(),
            todos.len()
        );
        self.todos = todos;
        Ok(())
    }

    /// Overwrite the backing file with every record.
    pub fn persist(&self) -> Result<()> {
        let content = to_indented_json(&self.todos)?;
        self.backend.write(&self.file, &content)?;
        info!(
            "event=store_persist status=ok path={} count={}",
            self.file.display(),
            self.todos.len()
        );
        Ok(())
    }

    /// Insert or overwrite a record, stamping `updated_at` with the current time.
    ///
    /// Records from outside the crate come in through `TodoService`.
    pub(crate) fn save(&mut self, todo: Todo) -> Result<&Todo> {
        self.save_at(todo, Utc::now())
    }

    /// Like [`TodoStore::save`], with an explicit `updated_at`.
    pub(crate) fn save_at(&mut self, mut todo: Todo, at: DateTime<Utc>) -> Result<&Todo> {
        validate_record(&todo)?;
        todo.updated_at = at;
        debug!("event=store_save id={}", todo.id);

        // An existing key keeps its slot
        let (index, _) = self.todos.insert_full(todo.id.clone(), todo);
        Ok(&self.todos[index])
    }

    pub fn get(&self, id: &str) -> Result<&Todo> {
        self.todos
            .get(id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))
    }

    pub fn delete(&mut self, id: &str) -> Result<Todo> {
        let removed = self
            .todos
            .shift_remove(id)
            .ok_or_else(|| TodoError::NotFound(id.to_string()))?;
        debug!("event=store_delete id={}", id);
        Ok(removed)
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.todos.values()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.todos.contains_key(id)
    }

    pub fn count(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Overwrite `summary_file` with `{ "<store path>": [task, ...] }`.
    pub fn save_summary(&self, summary_file: impl AsRef<Path>) -> Result<()> {
        let summary_file = summary_file.as_ref();
        let tasks: Vec<&str> = self.iter().map(|todo| todo.task.trim()).collect();

        let mut summary = BTreeMap::new();
        summary.insert(self.file.display().to_string(), tasks);

        let content = to_indented_json(&summary)?;
        self.backend.write(summary_file, &content)?;
        info!(
            "event=summary_write status=ok path={} source={}",
            summary_file.display(),
            self.file.display()
        );
        Ok(())
    }
}

fn validate_record(todo: &Todo) -> Result<()> {
    validate_task(&todo.task)?;
    if todo.id.trim().is_empty() {
        return Err(ValidationError::InvalidInput("todo id cannot be empty".to_string()).into());
    }
    Ok(())
}

/// Pretty JSON with a single-space indent, the layout of existing todo files.
fn to_indented_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(TodoError::Serialization)?;
    String::from_utf8(buf).map_err(|e| TodoError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}
