//! Site configuration
//!
//! The original site alternates between a fully client-side demo
//! (hard-coded admin credentials, simulated sign-in) and a revision
//! integrated with a hosted backend. That choice is configuration, not
//! design: [`BackendMode`] selects which collaborators get wired in.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Default media bucket name
pub const DEFAULT_MEDIA_BUCKET: &str = "site-media";

/// Which backend the site talks to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum BackendMode {
    /// In-memory collaborators, nothing leaves the process
    Demo,
    /// Hosted provider reached over HTTP
    Remote { base_url: String, api_key: String },
}

/// The fixed admin credential pair.
///
/// A placeholder carried over from the demo revision, compared
/// in-process with no network involved. Not a security design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
        }
    }
}

impl AdminCredentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Main site configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend selection
    pub backend: BackendMode,

    /// Admin console credential pair
    pub admin: AdminCredentials,

    /// Bucket holding gallery and page media
    pub media_bucket: String,

    /// Enable tracing
    pub tracing: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendMode::Demo,
            admin: AdminCredentials::default(),
            media_bucket: DEFAULT_MEDIA_BUCKET.to_string(),
            tracing: true,
        }
    }
}

impl AppConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the site at a hosted backend
    pub fn with_remote(mut self, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        self.backend = BackendMode::Remote {
            base_url: base_url.into(),
            api_key: api_key.into(),
        };
        self
    }

    /// Override the admin credential pair
    pub fn with_admin(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.admin = AdminCredentials {
            username: username.into(),
            password: password.into(),
        };
        self
    }

    /// Override the media bucket
    pub fn with_media_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.media_bucket = bucket.into();
        self
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file(&self, path: &str) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.backend, BackendMode::Demo);
        assert_eq!(config.media_bucket, DEFAULT_MEDIA_BUCKET);
        assert!(config.admin.matches("admin", "admin"));
    }

    #[test]
    fn test_config_builder() {
        let config = AppConfig::new()
            .with_remote("https://api.example.com", "service-key")
            .with_admin("admin", "s3cret")
            .with_media_bucket("wedding-media");

        assert!(matches!(config.backend, BackendMode::Remote { .. }));
        assert!(config.admin.matches("admin", "s3cret"));
        assert!(!config.admin.matches("admin", "admin"));
        assert_eq!(config.media_bucket, "wedding-media");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::new().with_remote("https://api.example.com", "key");
        let json = serde_json::to_string(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
