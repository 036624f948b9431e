//! Session-aware API client

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;

use aicd_session::{SessionStore, SessionToken};

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::hooks::{RequestHook, ResponseHook, SessionHook, TracingHook, X_API_KEY};
use crate::upload::Upload;
use crate::Result;

enum Payload {
    Empty,
    Json(Value),
    Multipart(Form),
}

pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    session: SessionHook,
    request_hooks: Arc<Vec<Arc<dyn RequestHook>>>,
    response_hooks: Arc<Vec<Arc<dyn ResponseHook>>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, store: SessionStore) -> Result<Self> {
        config.validate()?;
        HeaderValue::from_str(&config.api_key)
            .map_err(|_| ApiError::Request("API key is not a valid header value".to_string()))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        let session = SessionHook::new(store);
        let tracing_hook = Arc::new(TracingHook);

        tracing::debug!(base_url = %config.base_url, "Created API client");

        Ok(Self {
            http,
            config: Arc::new(config),
            request_hooks: Arc::new(vec![
                Arc::new(session.clone()) as Arc<dyn RequestHook>,
                tracing_hook.clone() as Arc<dyn RequestHook>,
            ]),
            response_hooks: Arc::new(vec![
                Arc::new(session.clone()) as Arc<dyn ResponseHook>,
                tracing_hook as Arc<dyn ResponseHook>,
            ]),
            session,
        })
    }

    /// Install an extra hook, run after the built-in ones
    pub fn with_request_hook(mut self, hook: Arc<dyn RequestHook>) -> Self {
        Arc::make_mut(&mut self.request_hooks).push(hook);
        self
    }

    /// Install an extra hook, run after the built-in ones
    pub fn with_response_hook(mut self, hook: Arc<dyn ResponseHook>) -> Self {
        Arc::make_mut(&mut self.response_hooks).push(hook);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session_store(&self) -> &SessionStore {
        self.session.store()
    }

    pub async fn check_health(&self) -> Result<Value> {
        self.send(Method::GET, &["health"], Payload::Empty).await
    }

    pub async fn detect_text(&self, text: &str, force_single_analysis: bool) -> Result<Value> {
        let body = json!({
            "text": text,
            "force_single_analysis": force_single_analysis,
        });
        self.send(Method::POST, &["detect"], Payload::Json(body)).await
    }

    pub async fn detect_file(&self, upload: Upload, force_single_analysis: bool) -> Result<Value> {
        tracing::debug!(
            file_name = upload.file_name(),
            bytes = upload.len(),
            "Uploading document"
        );

        let mut form = Form::new().part("file", upload.into_part()?);
        if force_single_analysis {
            form = form.text("force_single_analysis", "true");
        }

        self.send(Method::POST, &["detect"], Payload::Multipart(form))
            .await
    }

    pub async fn get_history(&self) -> Result<Value> {
        self.send(Method::GET, &["history"], Payload::Empty).await
    }

    pub async fn get_analysis(&self, id: &str) -> Result<Value> {
        self.send(Method::GET, &["analysis", id], Payload::Empty)
            .await
    }

    pub async fn get_session_info(&self) -> Result<Value> {
        self.send(Method::GET, &["session"], Payload::Empty).await
    }

    pub async fn clear_history(&self) -> Result<Value> {
        self.send(Method::DELETE, &["clear-history"], Payload::Empty)
            .await
    }

    /// Token the next request will carry, no network traffic
    pub fn current_session_id(&self) -> Option<SessionToken> {
        self.session.session_token()
    }

    /// Drop the token locally so the next request starts a new session
    pub fn clear_session(&self) {
        self.session.forget();
        tracing::info!("Cleared session");
    }

    /// Shared headers for JSON requests
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.insert_api_key(&mut headers);
        headers
    }

    /// Independent header set for multipart requests; the content type
    /// (with its boundary) is added by the form itself
    fn upload_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.insert_api_key(&mut headers);
        headers
    }

    fn insert_api_key(&self, headers: &mut HeaderMap) {
        // Checked in `new`
        if let Ok(value) = HeaderValue::from_str(&self.config.api_key) {
            headers.insert(HeaderName::from_static(X_API_KEY), value);
        }
    }

    fn prepare_headers(&self, method: &Method, path: &str, payload: &Payload) -> HeaderMap {
        let mut headers = match payload {
            Payload::Multipart(_) => self.upload_headers(),
            Payload::Empty | Payload::Json(_) => self.default_headers(),
        };

        for hook in self.request_hooks.iter() {
            hook.before_request(method, path, &mut headers);
        }

        headers
    }

    async fn send(&self, method: Method, segments: &[&str], payload: Payload) -> Result<Value> {
        let path = format!("/{}", segments.join("/"));
        let url = self.config.endpoint(segments)?;
        let headers = self.prepare_headers(&method, &path, &payload);

        let request = self.http.request(method.clone(), url).headers(headers);
        let request = match payload {
            Payload::Empty => request,
            Payload::Json(body) => request.json(&body),
            Payload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|e| {
            let err = ApiError::from(e);
            tracing::warn!(%method, path = %path, "Request failed: {}", err);
            err
        })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let body = decode_body(&bytes);

        for hook in self.response_hooks.iter() {
            hook.after_response(&method, &path, status, &body);
        }

        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!(%method, path = %path, status = status.as_u16(), "Server returned an error");
            Err(ApiError::server(status.as_u16(), body))
        }
    }
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
            session: self.session.clone(),
            request_hooks: Arc::clone(&self.request_hooks),
            response_hooks: Arc::clone(&self.response_hooks),
        }
    }
}

/// Bodies are passed through untouched: empty becomes `null`, anything that
/// is not JSON becomes a JSON string
fn decode_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
