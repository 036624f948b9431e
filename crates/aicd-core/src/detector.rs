//! Detector facade
//!
//! Owns the settings database and the API client, and applies input limits
//! before anything is sent.

use serde_json::Value;
use std::path::Path;

use aicd_client::{check_backend_connection, ApiClient, BackendStatus, ClientConfig, Upload};
use aicd_session::{SessionStore, SessionToken};
use aicd_storage::Database;

use crate::config::Config;
use crate::limits::{check_text, check_upload};
use crate::Result;

pub struct Detector {
    db: Database,
    client: ApiClient,
}

impl Detector {
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;

        tracing::info!(
            database = %config.database_path.display(),
            base_url = %config.api.base_url,
            "Opening detector"
        );

        Self::with_database(db, config.api)
    }

    /// Detector whose persistent scope lives only in memory
    pub fn in_memory(api: ClientConfig) -> Result<Self> {
        Self::with_database(Database::open_in_memory()?, api)
    }

    fn with_database(db: Database, api: ClientConfig) -> Result<Self> {
        let store = SessionStore::layered(db.clone());
        let client = ApiClient::new(api, store)?;
        Ok(Self { db, client })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub async fn check_connection(&self) -> BackendStatus {
        check_backend_connection(&self.client).await
    }

    pub async fn analyze_text(&self, text: &str, force_single_analysis: bool) -> Result<Value> {
        check_text(text)?;
        Ok(self.client.detect_text(text, force_single_analysis).await?)
    }

    pub async fn analyze_file(&self, path: &Path, force_single_analysis: bool) -> Result<Value> {
        let upload = Upload::from_path(path).await?;
        check_upload(&upload)?;
        Ok(self.client.detect_file(upload, force_single_analysis).await?)
    }

    pub async fn history(&self) -> Result<Value> {
        Ok(self.client.get_history().await?)
    }

    pub async fn analysis(&self, id: &str) -> Result<Value> {
        Ok(self.client.get_analysis(id).await?)
    }

    pub async fn session_info(&self) -> Result<Value> {
        Ok(self.client.get_session_info().await?)
    }

    pub async fn clear_history(&self) -> Result<Value> {
        Ok(self.client.clear_history().await?)
    }

    pub fn session_id(&self) -> Option<SessionToken> {
        self.client.current_session_id()
    }

    pub fn logout(&self) {
        self.client.clear_session();
    }
}
