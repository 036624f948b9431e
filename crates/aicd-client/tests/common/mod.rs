//! In-process stand-in for the detection service.
//!
//! Records every request it receives and answers with scripted replies,
//! falling back to `200 {"status": "ok"}` once the script runs out.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use aicd_client::{ApiClient, ClientConfig};
use aicd_session::SessionStore;
use aicd_storage::{Database, MemoryStore};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;

pub const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub api_key: Option<String>,
    pub session_id: Option<String>,
    pub content_type: Option<String>,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl Recorded {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct Reply {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct FakeService {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<VecDeque<Reply>>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_json(&self, status: u16, body: Value) {
        self.push(status, "application/json", body.to_string(), None);
    }

    pub fn reply_text(&self, status: u16, body: &str) {
        self.push(status, "text/html", body.to_string(), None);
    }

    pub fn reply_after(&self, delay: Duration, status: u16, body: Value) {
        self.push(status, "application/json", body.to_string(), Some(delay));
    }

    fn push(&self, status: u16, content_type: &'static str, body: String, delay: Option<Duration>) {
        self.replies.lock().push_back(Reply {
            status: StatusCode::from_u16(status).unwrap(),
            content_type,
            body,
            delay,
        });
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().clone()
    }

    pub fn last(&self) -> Recorded {
        self.requests.lock().last().cloned().unwrap()
    }

    /// Serve on an ephemeral port, returns the API base URL
    pub async fn spawn(&self) -> String {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{addr}/api")
    }
}

async fn handle(
    State(service): State<FakeService>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    service.requests.lock().push(Recorded {
        method,
        path: uri.path().to_string(),
        api_key: header_str("x-api-key"),
        session_id: header_str("x-session-id"),
        content_type: header_str("content-type"),
        headers: headers.clone(),
        body: body.to_vec(),
    });

    let reply = service.replies.lock().pop_front();
    match reply {
        Some(reply) => {
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            (
                reply.status,
                [(header::CONTENT_TYPE, reply.content_type)],
                reply.body,
            )
                .into_response()
        }
        None => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            r#"{"status":"ok"}"#.to_string(),
        )
            .into_response(),
    }
}

/// Client wired to both storage scopes, with handles to inspect them
pub struct Harness {
    pub client: ApiClient,
    pub persistent: Database,
    pub ephemeral: MemoryStore,
}

impl Harness {
    pub fn new(base_url: &str) -> Self {
        Self::with_config(ClientConfig::new(base_url, API_KEY))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let persistent = Database::open_in_memory().unwrap();
        let ephemeral = MemoryStore::new();
        let store = SessionStore::new(vec![
            Arc::new(persistent.clone()),
            Arc::new(ephemeral.clone()),
        ]);

        Self {
            client: ApiClient::new(config, store).unwrap(),
            persistent,
            ephemeral,
        }
    }

    pub fn seed_token(&self, token: &str) {
        self.persistent
            .set_setting(aicd_session::SESSION_STORAGE_KEY, token)
            .unwrap();
    }

    /// Token as read back from (persistent, ephemeral)
    pub fn stored(&self) -> (Option<String>, Option<String>) {
        use aicd_storage::KeyValueStore;

        (
            self.persistent
                .get(aicd_session::SESSION_STORAGE_KEY)
                .unwrap(),
            self.ephemeral
                .get(aicd_session::SESSION_STORAGE_KEY)
                .unwrap(),
        )
    }
}
