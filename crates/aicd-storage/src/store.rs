//! Key-value capability shared by every storage backend

use std::fmt;

use crate::Result;

/// How long a backend keeps what is written to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    /// Survives process exit
    Persistent,
    /// Lives only as long as the process
    Ephemeral,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Persistent => "persistent",
            StorageScope::Ephemeral => "ephemeral",
        }
    }
}

impl fmt::Display for StorageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait KeyValueStore: Send + Sync {
    fn scope(&self) -> StorageScope;

    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
