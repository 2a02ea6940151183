//! # Todo Service
//!
//! The service is the single entry point for working with todos. Whatever
//! drives it (the bundled CLI, a menu, a test) hands it raw strings; it
//! validates them, builds or edits records, and writes the results out.
//!
//! ## Flow
//!
//! ```text
//! raw input ──▶ validation ──▶ Todo ──▶ TodoStore (memory)
//!                                            │
//!                              save() ───────┴──▶ persist ──▶ summary
//! ```
//!
//! `create_todo`, `update_todo` and `delete_todo` only change memory. Callers
//! follow a successful mutation with [`TodoService::save`], which rewrites the
//! todo file and then the summary file. If the todo file cannot be written
//! the summary is left alone.
//!
//! ## Failure behaviour
//!
//! Every operation fails fast on the first invalid field and leaves the store
//! untouched. Updates are all-or-nothing: all supplied fields are validated
//! before any of them is applied.

use crate::config::Config;
use crate::error::{Result, TodoError};
use crate::id::IdGenerator;
use crate::model::{Priority, Todo};
use crate::store::{FsBackend, StorageBackend, TodoStore};
use crate::validation::{
    validate_completed, validate_date, validate_labels, validate_task, ValidationError,
};
use chrono::Utc;
use log::{error, info};
use std::path::PathBuf;

/// How many times a clashing id is redrawn before giving up.
const MAX_ID_ATTEMPTS: usize = 32;

pub struct TodoService<B: StorageBackend = FsBackend> {
    store: TodoStore<B>,
    config: Config,
    ids: IdGenerator,
}

impl TodoService<FsBackend> {
    /// Open the todo file at `file_path`, loading any existing records.
    pub fn new(file_path: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let store = TodoStore::open(file_path, config.file_mode)?;
        Ok(Self::with_parts(store, config, IdGenerator::from_entropy()))
    }
}

impl<B: StorageBackend> TodoService<B> {
    pub fn with_parts(store: TodoStore<B>, config: Config, ids: IdGenerator) -> Self {
        Self { store, config, ids }
    }

    pub fn store(&self) -> &TodoStore<B> {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate the raw fields and add a new todo.
    ///
    /// A blank `priority` means `LOW`; anything else must be an exact
    /// uppercase priority name.
    pub fn create_todo(
        &mut self,
        task: &str,
        due_date: &str,
        completed: &str,
        priority: &str,
        labels: &str,
    ) -> Result<Todo> {
        let task = validate_task(task)?;
        let due_date = validate_date(due_date)?;
        let completed = validate_completed(completed)?;
        let priority = if priority.trim().is_empty() {
            Priority::Low
        } else {
            priority.parse::<Priority>()?
        };
        let labels = validate_labels(labels);

        let id = self.fresh_id()?;
        let now = Utc::now();
        let mut todo = Todo::new(id, task, due_date);
        todo.labels = labels;
        todo.completed = completed;
        todo.priority = priority;
        todo.created_at = now;

        let saved = self.store.save_at(todo, now)?.clone();
        info!(
            "event=todo_create id={} priority={} labels={}",
            saved.id,
            saved.priority,
            saved.labels.len()
        );
        Ok(saved)
    }

    /// Apply the fields present in `updates` to an existing todo.
    pub fn update_todo(&mut self, id: &str, updates: &TodoUpdate) -> Result<Todo> {
        let mut todo = self.store.get(id)?.clone();

        let task = updates.task.as_deref().map(validate_task).transpose()?;
        let due_date = updates.due_date.as_deref().map(validate_date).transpose()?;
        let priority = updates
            .priority
            .as_deref()
            .map(str::parse::<Priority>)
            .transpose()?;
        let labels = updates.labels.as_deref().map(validate_labels);
        let completed = updates
            .completed
            .as_deref()
            .map(validate_completed)
            .transpose()?;

        if let Some(task) = task {
            todo.task = task;
        }
        if let Some(due_date) = due_date {
            todo.due_date = due_date;
        }
        if let Some(priority) = priority {
            todo.priority = priority;
        }
        if let Some(labels) = labels {
            todo.labels = labels;
        }
        if let Some(completed) = completed {
            todo.completed = completed;
        }

        let saved = self.store.save(todo)?.clone();
        info!(
            "event=todo_update id={} fields={}",
            saved.id,
            updates.field_names().join(",")
        );
        Ok(saved)
    }

    pub fn get_todo(&self, id: &str) -> Result<Todo> {
        self.store.get(id).cloned()
    }

    /// Remove a todo, returning what was removed.
    pub fn delete_todo(&mut self, id: &str) -> Result<Todo> {
        let removed = self.store.delete(id)?;
        info!("event=todo_delete id={}", id);
        Ok(removed)
    }

    pub fn list_todos(&self) -> Vec<Todo> {
        self.store.list()
    }

    /// Write the todo file, then the summary file.
    pub fn save(&self) -> Result<()> {
        if let Err(e) = self.store.persist() {
            error!(
                "event=save status=error step=persist path={} error={}",
                self.store.file_path().display(),
                e
            );
            return Err(e);
        }
        if let Err(e) = self.store.save_summary(&self.config.summary_file) {
            error!(
                "event=save status=error step=summary path={} error={}",
                self.config.summary_file.display(),
                e
            );
            return Err(e);
        }
        Ok(())
    }

    fn fresh_id(&mut self) -> Result<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if !self.store.contains(&id) {
                return Ok(id);
            }
        }
        Err(TodoError::Validation(ValidationError::InvalidInput(format!(
            "could not generate a unique id after {} attempts",
            MAX_ID_ATTEMPTS
        ))))
    }
}

/// The set of fields to change on an existing todo.
///
/// `None` leaves a field alone. Values are raw input and go through the same
/// validation as on creation, except that priority has no blank default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoUpdate {
    pub task: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub labels: Option<String>,
    pub completed: Option<String>,
}

impl TodoUpdate {
    pub const FIELDS: [&'static str; 5] = ["task", "due_date", "priority", "labels", "completed"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, value: impl Into<String>) -> Self {
        self.task = Some(value.into());
        self
    }

    pub fn due_date(mut self, value: impl Into<String>) -> Self {
        self.due_date = Some(value.into());
        self
    }

    pub fn priority(mut self, value: impl Into<String>) -> Self {
        self.priority = Some(value.into());
        self
    }

    pub fn labels(mut self, value: impl Into<String>) -> Self {
        self.labels = Some(value.into());
        self
    }

    pub fn completed(mut self, value: impl Into<String>) -> Self {
        self.completed = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.field_names().is_empty()
    }

    /// Names of the fields this update touches.
    pub fn field_names(&self) -> Vec<&'static str> {
        let present = [
            self.task.is_some(),
            self.due_date.is_some(),
            self.priority.is_some(),
            self.labels.is_some(),
            self.completed.is_some(),
        ];
        Self::FIELDS
            .iter()
            .zip(present)
            .filter_map(|(name, set)| set.then_some(*name))
            .collect()
    }
}
