//! HTTP client for the hosted backend provider
//!
//! One [`RemoteBackend`] implements all three collaborator traits
//! against the provider's auth (`/auth/v1`), record (`/rest/v1`), and
//! storage (`/storage/v1`) surfaces. Any non-success response is
//! folded into a [`BackendError`] carrying the body text; transport
//! failures are marked retryable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    AuthService, AuthSession, AuthUser, ObjectStorage, RecordFilter, RecordOrder, RecordStore,
    StorageEntry, StoredRecord,
};
use crate::error::BackendError;

/// Client for the hosted auth/record/storage provider
pub struct RemoteBackend {
    http: reqwest::Client,
    base_url: String,
    api_key: String,

    /// Session cache; the bearer token for authenticated calls
    session: RwLock<Option<AuthSession>>,
}

impl RemoteBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            session: RwLock::new(None),
        }
    }

    fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    fn rest_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn storage_endpoint(&self, path: &str) -> String {
        format!("{}/storage/v1/{}", self.base_url, path)
    }

    async fn bearer(&self) -> Option<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    fn apply_headers(
        &self,
        builder: reqwest::RequestBuilder,
        bearer: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let builder = builder.header("apikey", &self.api_key);
        match bearer {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send, surfacing transport failures and non-2xx statuses as
    /// [`BackendError`]s.
    async fn send(builder: reqwest::RequestBuilder) -> Result<reqwest::Response, BackendError> {
        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::transient(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            format!("Backend returned {}", status)
        } else {
            body
        };
        tracing::warn!(%status, "backend call rejected");
        Err(BackendError {
            message,
            retryable: status.is_server_error(),
        })
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::transient(format!("Malformed backend response: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: HashMap<String, String>,
}

#[derive(Debug, Serialize)]
struct PasswordGrantRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct RemoteSession {
    access_token: String,
    user: RemoteUser,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: Uuid,
    email: String,
    #[serde(default)]
    user_metadata: HashMap<String, String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<RemoteUser> for AuthUser {
    fn from(user: RemoteUser) -> Self {
        AuthUser {
            id: user.id,
            email: user.email,
            profile: user.user_metadata,
            created_at: user.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[async_trait]
impl AuthService for RemoteBackend {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: HashMap<String, String>,
    ) -> Result<AuthSession, BackendError> {
        let request = SignUpRequest {
            email,
            password,
            data: profile,
        };
        let builder = self
            .apply_headers(self.http.post(self.auth_endpoint("signup")), None)
            .json(&request);
        let remote: RemoteSession = Self::parse(Self::send(builder).await?).await?;

        let session = AuthSession {
            user: remote.user.into(),
            access_token: remote.access_token,
        };
        *self.session.write().await = Some(session.clone());
        tracing::info!(email, "remote account created");
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let request = PasswordGrantRequest { email, password };
        let builder = self
            .apply_headers(
                self.http
                    .post(self.auth_endpoint("token"))
                    .query(&[("grant_type", "password")]),
                None,
            )
            .json(&request);
        let remote: RemoteSession = Self::parse(Self::send(builder).await?).await?;

        let session = AuthSession {
            user: remote.user.into(),
            access_token: remote.access_token,
        };
        *self.session.write().await = Some(session.clone());
        tracing::info!(email, "remote sign-in");
        Ok(session)
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.session.read().await.as_ref().map(|s| s.user.clone())
    }

    async fn update_password(&self, new_password: &str) -> Result<(), BackendError> {
        let token = self
            .bearer()
            .await
            .ok_or_else(|| BackendError::rejected("No active session."))?;

        let builder = self
            .apply_headers(self.http.put(self.auth_endpoint("user")), Some(&token))
            .json(&serde_json::json!({ "password": new_password }));
        Self::send(builder).await?;
        Ok(())
    }

    async fn sign_out(&self) {
        *self.session.write().await = None;
    }
}

#[derive(Debug, Deserialize)]
struct RemoteRecord {
    id: Uuid,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    fields: serde_json::Map<String, serde_json::Value>,
}

impl From<RemoteRecord> for StoredRecord {
    fn from(record: RemoteRecord) -> Self {
        StoredRecord {
            id: record.id,
            created_at: record.created_at,
            fields: serde_json::Value::Object(record.fields),
        }
    }
}

#[async_trait]
impl RecordStore for RemoteBackend {
    async fn insert(
        &self,
        table: &str,
        record: serde_json::Value,
    ) -> Result<StoredRecord, BackendError> {
        let bearer = self.bearer().await;
        let builder = self
            .apply_headers(self.http.post(self.rest_endpoint(table)), bearer.as_deref())
            .header("Prefer", "return=representation")
            .json(&record);
        let mut rows: Vec<RemoteRecord> = Self::parse(Self::send(builder).await?).await?;

        if rows.is_empty() {
            return Err(BackendError::transient(
                "Backend returned no representation for the inserted record.",
            ));
        }
        Ok(rows.remove(0).into())
    }

    async fn select(
        &self,
        table: &str,
        filter: Option<RecordFilter>,
        order: Option<RecordOrder>,
    ) -> Result<Vec<StoredRecord>, BackendError> {
        let mut query: Vec<(String, String)> = vec![("select".to_string(), "*".to_string())];
        if let Some(filter) = &filter {
            query.push((filter.field.clone(), format!("eq.{}", filter.equals)));
        }
        if let Some(order) = &order {
            let direction = if order.ascending { "asc" } else { "desc" };
            query.push(("order".to_string(), format!("{}.{}", order.field, direction)));
        }

        let bearer = self.bearer().await;
        let builder = self
            .apply_headers(self.http.get(self.rest_endpoint(table)), bearer.as_deref())
            .query(&query);
        let rows: Vec<RemoteRecord> = Self::parse(Self::send(builder).await?).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<StoredRecord, BackendError> {
        let bearer = self.bearer().await;
        let builder = self
            .apply_headers(self.http.patch(self.rest_endpoint(table)), bearer.as_deref())
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch);
        let mut rows: Vec<RemoteRecord> = Self::parse(Self::send(builder).await?).await?;

        if rows.is_empty() {
            return Err(BackendError::rejected("Record not found."));
        }
        Ok(rows.remove(0).into())
    }

    async fn delete(&self, table: &str, id: Uuid) -> Result<(), BackendError> {
        let bearer = self.bearer().await;
        let builder = self
            .apply_headers(self.http.delete(self.rest_endpoint(table)), bearer.as_deref())
            .query(&[("id", format!("eq.{}", id))]);
        Self::send(builder).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct RemoteObject {
    name: String,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    metadata: Option<RemoteObjectMetadata>,
}

#[derive(Debug, Deserialize)]
struct RemoteObjectMetadata {
    #[serde(default)]
    size: u64,
}

#[async_trait]
impl ObjectStorage for RemoteBackend {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<(), BackendError> {
        let bearer = self.bearer().await;
        let endpoint = self.storage_endpoint(&format!("object/{}/{}", bucket, path));
        let builder = self
            .apply_headers(self.http.post(endpoint), bearer.as_deref())
            .header("x-upsert", if upsert { "true" } else { "false" })
            .body(bytes);
        Self::send(builder).await?;
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StorageEntry>, BackendError> {
        let bearer = self.bearer().await;
        let endpoint = self.storage_endpoint(&format!("object/list/{}", bucket));
        let builder = self
            .apply_headers(self.http.post(endpoint), bearer.as_deref())
            .json(&serde_json::json!({ "prefix": prefix }));
        let objects: Vec<RemoteObject> = Self::parse(Self::send(builder).await?).await?;

        Ok(objects
            .into_iter()
            .map(|o| StorageEntry {
                path: o.name,
                size: o.metadata.map(|m| m.size).unwrap_or(0),
                created_at: o.created_at.unwrap_or_else(Utc::now),
            })
            .collect())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        let bearer = self.bearer().await;
        let endpoint = self.storage_endpoint(&format!("object/{}", bucket));
        let builder = self
            .apply_headers(self.http.delete(endpoint), bearer.as_deref())
            .json(&serde_json::json!({ "prefixes": paths }));
        Self::send(builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_trimmed() {
        let backend = RemoteBackend::new("https://api.example.com/", "key");
        assert_eq!(
            backend.auth_endpoint("signup"),
            "https://api.example.com/auth/v1/signup"
        );
        assert_eq!(
            backend.rest_endpoint("pages"),
            "https://api.example.com/rest/v1/pages"
        );
    }

    #[test]
    fn test_public_url_is_pure() {
        let backend = RemoteBackend::new("https://api.example.com", "key");
        assert_eq!(
            backend.public_url("site-media", "gallery/venue.jpg"),
            "https://api.example.com/storage/v1/object/public/site-media/gallery/venue.jpg"
        );
    }

    #[tokio::test]
    async fn test_no_session_means_no_current_user() {
        let backend = RemoteBackend::new("https://api.example.com", "key");
        assert!(backend.current_user().await.is_none());
        assert!(backend.update_password("newpassword").await.is_err());
    }

    #[test]
    fn test_remote_record_flattens_into_fields() {
        let json = serde_json::json!({
            "id": "a4f2dc3e-8b1a-4f4e-9a39-cf3a70f8b5a1",
            "created_at": "2026-01-15T10:00:00Z",
            "title": "Home",
            "content": "Welcome"
        });
        let record: RemoteRecord = serde_json::from_value(json).unwrap();
        let stored: StoredRecord = record.into();
        assert_eq!(stored.fields["title"], "Home");
        assert!(stored.fields.get("id").is_none());
    }
}
