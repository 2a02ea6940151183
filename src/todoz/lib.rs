//! # Todoz Architecture
//!
//! Todoz is a **file-backed todo library** with a small CLI on top. Each todo
//! list is one JSON file; every save also rewrites a summary file holding just
//! the task titles.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders tables, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (service.rs, catalog.rs)                     │
//! │  - Validates raw input, builds and edits records            │
//! │  - Persists the store and the summary                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - TodoStore: ordered in-memory records for one file        │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `service.rs` inward nothing prints, exits or prompts. Every failure is
//! a [`error::TodoError`] returned to the caller.
//!
//! ## Module Overview
//!
//! - [`service`]: Create, update, delete, list and save todos
//! - [`catalog`]: Create, list and delete todo files
//! - [`store`]: In-memory store and file backends
//! - [`model`]: `Todo` and `Priority`
//! - [`validation`]: Field validation rules
//! - [`id`]: Short random id generation
//! - [`config`]: Storage directory, summary file and file mode
//! - [`error`]: Error types

pub mod catalog;
pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;
