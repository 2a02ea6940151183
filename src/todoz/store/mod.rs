//! # Storage Layer
//!
//! [`TodoStore`] holds every todo of one file in memory and mirrors it to
//! that file on request. The file I/O itself sits behind the
//! [`StorageBackend`] trait so the store logic can be tested without a disk.
//!
//! ## Implementations
//!
//! - [`FsBackend`]: Production backend
//!   - Whole-file reads, missing files read as `None`
//!   - Writes go to a temporary sibling which is then renamed over the target
//!   - New files get the configured permission mode (unix only)
//!
//! - [`MemBackend`]: In-memory backend for testing
//!   - Can simulate write failures, globally or per path
//!
//! ## Storage Format
//!
//! ```text
//! storage/
//! ├── todos.json          # { "<id>": { todo }, ... }
//! └── groceries.json
//! save_todos.json         # { "storage/todos.json": ["task", ...] }
//! ```
//!
//! Nothing is flushed implicitly: `save` and `delete` change memory only,
//! `persist` and `save_summary` write files.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod todo_store;

pub use backend::StorageBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;
pub use todo_store::TodoStore;
