//! AICD Storage Layer
//!
//! Key-value persistence in two scopes:
//! - Persistent: SQLite settings table, survives process exit
//! - Ephemeral: in-memory map, lives as long as the process

mod database;
mod error;
mod memory;
mod schema;
mod store;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, StorageScope};

pub type Result<T> = std::result::Result<T, StorageError>;
