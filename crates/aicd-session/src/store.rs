//! Layered session token store
//!
//! Writes go to every backend, reads come from the first backend that has a
//! value. A backend that fails is logged and skipped; an operation only fails
//! when no backend at all accepted it.

use std::sync::Arc;

use aicd_storage::{Database, KeyValueStore, MemoryStore};

use crate::error::SessionError;
use crate::token::SessionToken;
use crate::Result;

/// Key the token is kept under in every backend
pub const SESSION_STORAGE_KEY: &str = "aicd_session_id";

pub struct SessionStore {
    backends: Arc<Vec<Arc<dyn KeyValueStore>>>,
}

impl SessionStore {
    pub fn new(backends: Vec<Arc<dyn KeyValueStore>>) -> Self {
        Self {
            backends: Arc::new(backends),
        }
    }

    /// Persistent database first, then a process-local map
    pub fn layered(db: Database) -> Self {
        Self::new(vec![Arc::new(db), Arc::new(MemoryStore::new())])
    }

    /// Store without persistence, for tests and one-shot runs
    pub fn ephemeral() -> Self {
        Self::new(vec![Arc::new(MemoryStore::new())])
    }

    pub fn stored_session_id(&self) -> Option<SessionToken> {
        for backend in self.backends.iter() {
            match backend.get(SESSION_STORAGE_KEY) {
                Ok(Some(raw)) => match SessionToken::parse(&raw) {
                    Ok(token) => return Some(token),
                    Err(e) => {
                        tracing::warn!(scope = %backend.scope(), "Ignoring stored session token: {}", e);
                    }
                },
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(scope = %backend.scope(), "Failed to read session token: {}", e);
                }
            }
        }
        None
    }

    pub fn store_session_id(&self, token: &SessionToken) -> Result<()> {
        self.for_each_backend("store", |backend| {
            backend.set(SESSION_STORAGE_KEY, token.as_str())
        })?;

        tracing::debug!(session_id = %token, "Stored session token");
        Ok(())
    }

    pub fn clear_session_id(&self) -> Result<()> {
        self.for_each_backend("clear", |backend| backend.remove(SESSION_STORAGE_KEY))?;

        tracing::debug!("Cleared stored session token");
        Ok(())
    }

    fn for_each_backend<F>(&self, action: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&dyn KeyValueStore) -> aicd_storage::Result<()>,
    {
        let mut last_error = None;
        let mut succeeded = 0usize;

        for backend in self.backends.iter() {
            match f(backend.as_ref()) {
                Ok(()) => succeeded += 1,
                Err(e) => {
                    tracing::warn!(scope = %backend.scope(), action, "Session storage failed: {}", e);
                    last_error = Some(e);
                }
            }
        }

        match (succeeded, last_error) {
            (0, Some(e)) => Err(SessionError::Storage(e)),
            (0, None) => Err(SessionError::NoBackends),
            _ => Ok(()),
        }
    }
}

impl Clone for SessionStore {
    fn clone(&self) -> Self {
        Self {
            backends: Arc::clone(&self.backends),
        }
    }
}
