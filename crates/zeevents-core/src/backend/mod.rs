//! External collaborator contracts
//!
//! The site delegates all persistence and authentication to a managed
//! backend: a hosted auth service, a record store, and an object
//! storage bucket. This module defines the contracts the submission
//! adapters consume; [`demo`] serves the fully client-side revision of
//! the site with in-memory fakes, [`remote`] talks to the hosted
//! provider over HTTP. The adapters never know which one they got.

pub mod demo;
pub mod remote;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::{AppConfig, BackendMode};
use crate::error::BackendError;

pub use demo::{DemoAuth, DemoRecords, DemoStorage};
pub use remote::RemoteBackend;

/// Record table holding client intake submissions
pub const CLIENTS_TABLE: &str = "clients";

/// Record table holding proposal requests
pub const PROPOSALS_TABLE: &str = "proposals";

/// Record table holding website pages
pub const PAGES_TABLE: &str = "pages";

/// Record table holding contact-form messages
pub const MESSAGES_TABLE: &str = "messages";

/// An authenticated account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,

    /// Profile attributes captured at sign-up (full name, mobile, ...)
    pub profile: HashMap<String, String>,

    pub created_at: DateTime<Utc>,
}

/// A signed-in session handed back by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: AuthUser,
    pub access_token: String,
}

/// Hosted authentication service
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account and sign it in
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: HashMap<String, String>,
    ) -> Result<AuthSession, BackendError>;

    /// Sign in with an email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError>;

    /// The currently signed-in user, if any
    async fn current_user(&self) -> Option<AuthUser>;

    /// Update the signed-in user's password
    async fn update_password(&self, new_password: &str) -> Result<(), BackendError>;

    /// Drop the current session
    async fn sign_out(&self);
}

/// One stored record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,

    /// Record body as a JSON object
    pub fields: serde_json::Value,

    pub created_at: DateTime<Utc>,
}

/// Equality filter over one record field
#[derive(Debug, Clone)]
pub struct RecordFilter {
    pub field: String,
    pub equals: String,
}

impl RecordFilter {
    pub fn eq(field: impl Into<String>, equals: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            equals: equals.into(),
        }
    }
}

/// Sort order for selects
#[derive(Debug, Clone)]
pub struct RecordOrder {
    pub field: String,
    pub ascending: bool,
}

impl RecordOrder {
    pub fn newest_first() -> Self {
        Self {
            field: "created_at".to_string(),
            ascending: false,
        }
    }
}

/// Hosted record store (database tables behind a REST surface)
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn insert(
        &self,
        table: &str,
        record: serde_json::Value,
    ) -> Result<StoredRecord, BackendError>;

    async fn select(
        &self,
        table: &str,
        filter: Option<RecordFilter>,
        order: Option<RecordOrder>,
    ) -> Result<Vec<StoredRecord>, BackendError>;

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<StoredRecord, BackendError>;

    async fn delete(&self, table: &str, id: Uuid) -> Result<(), BackendError>;
}

/// One stored object's listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEntry {
    pub path: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Hosted object storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<(), BackendError>;

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StorageEntry>, BackendError>;

    /// Public URL for a stored object. Pure; performs no I/O.
    fn public_url(&self, bucket: &str, path: &str) -> String;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError>;
}

/// The three collaborators bundled for the adapters
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthService>,
    pub records: Arc<dyn RecordStore>,
    pub storage: Arc<dyn ObjectStorage>,
}

impl Backend {
    /// In-memory backend for the client-side demo revision
    pub fn demo() -> Self {
        Self {
            auth: Arc::new(DemoAuth::new()),
            records: Arc::new(DemoRecords::new()),
            storage: Arc::new(DemoStorage::new()),
        }
    }

    /// Backend chosen by configuration
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.backend {
            BackendMode::Demo => {
                tracing::info!("using in-memory demo backend");
                Self::demo()
            }
            BackendMode::Remote { base_url, api_key } => {
                tracing::info!(base_url, "using remote backend");
                let remote = Arc::new(RemoteBackend::new(base_url, api_key));
                Self {
                    auth: remote.clone(),
                    records: remote.clone(),
                    storage: remote,
                }
            }
        }
    }
}
