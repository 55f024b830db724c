//! In-memory collaborators for the client-side demo revision
//!
//! The original site shipped a revision with no backend at all:
//! simulated sign-in, hard-coded admin credentials, and toasts instead
//! of persistence. These fakes give that revision real (if ephemeral)
//! semantics and double as substitutable collaborators in adapter
//! tests.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use super::{
    AuthService, AuthSession, AuthUser, ObjectStorage, RecordFilter, RecordOrder, RecordStore,
    StorageEntry, StoredRecord,
};
use crate::error::BackendError;

struct DemoAccount {
    user: AuthUser,
    password: String,
}

/// In-memory auth service
pub struct DemoAuth {
    accounts: RwLock<HashMap<String, DemoAccount>>,
    current: RwLock<Option<AuthUser>>,
}

impl DemoAuth {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            current: RwLock::new(None),
        }
    }
}

impl Default for DemoAuth {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthService for DemoAuth {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        profile: HashMap<String, String>,
    ) -> Result<AuthSession, BackendError> {
        let mut accounts = self.accounts.write();
        if accounts.contains_key(email) {
            return Err(BackendError::rejected(
                "An account with this email already exists.",
            ));
        }

        let user = AuthUser {
            id: Uuid::new_v4(),
            email: email.to_string(),
            profile,
            created_at: Utc::now(),
        };
        accounts.insert(
            email.to_string(),
            DemoAccount {
                user: user.clone(),
                password: password.to_string(),
            },
        );
        *self.current.write() = Some(user.clone());
        tracing::info!(email, "demo account created");

        Ok(AuthSession {
            user,
            access_token: format!("demo:{}", Uuid::new_v4()),
        })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, BackendError> {
        let accounts = self.accounts.read();
        let account = accounts
            .get(email)
            .filter(|a| a.password == password)
            .ok_or_else(|| BackendError::rejected("Invalid email or password."))?;

        let user = account.user.clone();
        drop(accounts);
        *self.current.write() = Some(user.clone());
        tracing::info!(email, "demo sign-in");

        Ok(AuthSession {
            user,
            access_token: format!("demo:{}", Uuid::new_v4()),
        })
    }

    async fn current_user(&self) -> Option<AuthUser> {
        self.current.read().clone()
    }

    async fn update_password(&self, new_password: &str) -> Result<(), BackendError> {
        let current = self.current.read().clone();
        let user = current.ok_or_else(|| BackendError::rejected("No active session."))?;

        let mut accounts = self.accounts.write();
        match accounts.get_mut(&user.email) {
            Some(account) => {
                account.password = new_password.to_string();
                Ok(())
            }
            None => Err(BackendError::rejected("Account no longer exists.")),
        }
    }

    async fn sign_out(&self) {
        *self.current.write() = None;
    }
}

/// In-memory record store
pub struct DemoRecords {
    tables: RwLock<HashMap<String, Vec<StoredRecord>>>,
}

impl DemoRecords {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    fn field_as_string(record: &StoredRecord, field: &str) -> String {
        if field == "created_at" {
            return record.created_at.to_rfc3339();
        }
        match record.fields.get(field) {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }
}

impl Default for DemoRecords {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for DemoRecords {
    async fn insert(
        &self,
        table: &str,
        record: serde_json::Value,
    ) -> Result<StoredRecord, BackendError> {
        if !record.is_object() {
            return Err(BackendError::rejected("Record body must be an object."));
        }
        let stored = StoredRecord {
            id: Uuid::new_v4(),
            fields: record,
            created_at: Utc::now(),
        };
        let mut tables = self.tables.write();
        tables.entry(table.to_string()).or_default().push(stored.clone());
        tracing::debug!(table, id = %stored.id, "demo record inserted");
        Ok(stored)
    }

    async fn select(
        &self,
        table: &str,
        filter: Option<RecordFilter>,
        order: Option<RecordOrder>,
    ) -> Result<Vec<StoredRecord>, BackendError> {
        let tables = self.tables.read();
        let mut rows: Vec<StoredRecord> = tables
            .get(table)
            .map(|rows| rows.clone())
            .unwrap_or_default();

        if let Some(filter) = filter {
            rows.retain(|r| Self::field_as_string(r, &filter.field) == filter.equals);
        }
        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let left = Self::field_as_string(a, &order.field);
                let right = Self::field_as_string(b, &order.field);
                if order.ascending {
                    left.cmp(&right)
                } else {
                    right.cmp(&left)
                }
            });
        }
        Ok(rows)
    }

    async fn update(
        &self,
        table: &str,
        id: Uuid,
        patch: serde_json::Value,
    ) -> Result<StoredRecord, BackendError> {
        let patch = match patch {
            serde_json::Value::Object(map) => map,
            _ => return Err(BackendError::rejected("Patch body must be an object.")),
        };

        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| BackendError::rejected(format!("No such table: {}", table)))?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| BackendError::rejected("Record not found."))?;

        if let serde_json::Value::Object(fields) = &mut row.fields {
            for (key, value) in patch {
                fields.insert(key, value);
            }
        }
        Ok(row.clone())
    }

    async fn delete(&self, table: &str, id: Uuid) -> Result<(), BackendError> {
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(table)
            .ok_or_else(|| BackendError::rejected(format!("No such table: {}", table)))?;
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(BackendError::rejected("Record not found."));
        }
        Ok(())
    }
}

struct StoredObject {
    bytes: Vec<u8>,
    created_at: chrono::DateTime<Utc>,
}

/// In-memory object storage
pub struct DemoStorage {
    buckets: RwLock<HashMap<String, HashMap<String, StoredObject>>>,
}

impl DemoStorage {
    pub fn new() -> Self {
        Self {
            buckets: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for DemoStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStorage for DemoStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        upsert: bool,
    ) -> Result<(), BackendError> {
        let mut buckets = self.buckets.write();
        let objects = buckets.entry(bucket.to_string()).or_default();
        if !upsert && objects.contains_key(path) {
            return Err(BackendError::rejected(format!(
                "An object already exists at '{}'.",
                path
            )));
        }
        objects.insert(
            path.to_string(),
            StoredObject {
                bytes,
                created_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn list(&self, bucket: &str, prefix: &str) -> Result<Vec<StorageEntry>, BackendError> {
        let buckets = self.buckets.read();
        let mut entries: Vec<StorageEntry> = buckets
            .get(bucket)
            .map(|objects| {
                objects
                    .iter()
                    .filter(|(path, _)| path.starts_with(prefix))
                    .map(|(path, object)| StorageEntry {
                        path: path.clone(),
                        size: object.bytes.len() as u64,
                        created_at: object.created_at,
                    })
                    .collect()
            })
            .unwrap_or_default();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("demo://{}/{}", bucket, path)
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), BackendError> {
        let mut buckets = self.buckets.write();
        let objects = buckets
            .get_mut(bucket)
            .ok_or_else(|| BackendError::rejected(format!("No such bucket: {}", bucket)))?;
        for path in paths {
            objects.remove(path);
        }
        Ok(())
    }
}
