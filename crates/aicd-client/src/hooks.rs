//! Pre-request and post-response hooks
//!
//! The client runs every request hook on the outgoing header set and every
//! response hook on the decoded body, in the order they were installed.

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use aicd_session::{SessionStore, SessionToken};

pub const X_API_KEY: &str = "x-api-key";
pub const X_SESSION_ID: &str = "x-session-id";

/// Server message that marks the sent token as unknown.
///
/// Matched exactly, so a reworded server message silently disables eviction.
pub const SESSION_NOT_FOUND: &str = "Session not found";

pub trait RequestHook: Send + Sync {
    fn before_request(&self, method: &Method, path: &str, headers: &mut HeaderMap);
}

pub trait ResponseHook: Send + Sync {
    fn after_response(&self, method: &Method, path: &str, status: StatusCode, body: &Value);
}

/// Keeps the session token flowing between the server and local storage.
pub struct SessionHook {
    store: SessionStore,
    /// Last token seen in this process, used when storage has nothing
    current: Arc<RwLock<Option<SessionToken>>>,
}

impl SessionHook {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Token the next request will carry
    pub fn session_token(&self) -> Option<SessionToken> {
        self.store
            .stored_session_id()
            .or_else(|| self.current.read().clone())
    }

    pub fn remember(&self, token: SessionToken) {
        if let Err(e) = self.store.store_session_id(&token) {
            tracing::warn!("Failed to persist session token: {}", e);
        }
        *self.current.write() = Some(token);
    }

    pub fn forget(&self) {
        if let Err(e) = self.store.clear_session_id() {
            tracing::warn!("Failed to clear stored session token: {}", e);
        }
        *self.current.write() = None;
    }
}

impl RequestHook for SessionHook {
    fn before_request(&self, method: &Method, path: &str, headers: &mut HeaderMap) {
        let Some(token) = self.session_token() else {
            tracing::debug!(%method, path, "No session token, server will mint one");
            return;
        };

        match HeaderValue::from_str(token.as_str()) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(X_SESSION_ID), value);
            }
            Err(e) => tracing::warn!("Session token is not a valid header value: {}", e),
        }
    }
}

impl ResponseHook for SessionHook {
    fn after_response(&self, method: &Method, path: &str, status: StatusCode, body: &Value) {
        if let Some(raw) = body.get("session_id").and_then(Value::as_str) {
            match SessionToken::parse(raw) {
                Ok(token) => {
                    tracing::debug!(%method, path, session_id = %token, "Session token from response");
                    self.remember(token);
                }
                Err(e) => tracing::warn!(%method, path, "Ignoring session token: {}", e),
            }
        }

        let session_unknown = status == StatusCode::NOT_FOUND
            && body.get("error").and_then(Value::as_str) == Some(SESSION_NOT_FOUND);

        if session_unknown {
            tracing::info!(%method, path, "Server no longer knows this session, clearing token");
            self.forget();
        }
    }
}

impl Clone for SessionHook {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            current: Arc::clone(&self.current),
        }
    }
}

/// Logs request and response metadata at debug level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHook;

impl RequestHook for TracingHook {
    fn before_request(&self, method: &Method, path: &str, headers: &mut HeaderMap) {
        tracing::debug!(
            %method,
            path,
            has_session = headers.contains_key(X_SESSION_ID),
            "Sending request"
        );
    }
}

impl ResponseHook for TracingHook {
    fn after_response(&self, method: &Method, path: &str, status: StatusCode, _body: &Value) {
        tracing::debug!(%method, path, status = status.as_u16(), "Got response");
    }
}
