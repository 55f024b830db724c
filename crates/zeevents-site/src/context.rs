//! Site context
//!
//! Shared environment handed to every view: the configured backend
//! bundle, the admin console flag, and the navigation epoch used to
//! discard submission results that complete after the user has moved
//! on.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use zeevents_core::{AppConfig, Backend, SubmitContext};

/// Shared site environment
pub struct SiteContext {
    config: AppConfig,
    backend: Backend,
    admin_session: AtomicBool,
    epoch: Arc<AtomicU64>,
}

impl SiteContext {
    pub fn new(config: AppConfig) -> Self {
        let backend = Backend::from_config(&config);
        Self {
            config,
            backend,
            admin_session: AtomicBool::new(false),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// Whether the local admin console session is open
    pub fn admin_session(&self) -> bool {
        self.admin_session.load(Ordering::SeqCst)
    }

    pub fn set_admin_session(&self, open: bool) {
        self.admin_session.store(open, Ordering::SeqCst);
    }

    /// Current navigation epoch. A submission captures this before its
    /// collaborator call and discards its result if the epoch moved
    /// while it was in flight.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Advance the epoch. Called on every navigation.
    pub fn bump_epoch(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
    }

    /// Clonable handle onto the epoch counter
    pub fn epoch_handle(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.epoch)
    }

    /// Assemble the per-attempt adapter context. Resolves the current
    /// user once here rather than letting adapters read it ambiently.
    pub async fn submit_context(&self) -> SubmitContext {
        let current_user = self.backend.auth.current_user().await;
        SubmitContext::new(
            self.backend.clone(),
            self.config.admin.clone(),
            self.config.media_bucket.clone(),
        )
        .with_user(current_user)
        .with_admin_session(self.admin_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_advances_on_bump() {
        let ctx = SiteContext::new(AppConfig::new());
        let before = ctx.epoch();
        ctx.bump_epoch();
        assert_eq!(ctx.epoch(), before + 1);
    }

    #[tokio::test]
    async fn test_submit_context_reflects_admin_flag() {
        let ctx = SiteContext::new(AppConfig::new());
        assert!(!ctx.submit_context().await.admin_session);
        ctx.set_admin_session(true);
        assert!(ctx.submit_context().await.admin_session);
    }

    #[tokio::test]
    async fn test_submit_context_resolves_signed_in_user() {
        let ctx = SiteContext::new(AppConfig::new());
        assert!(ctx.submit_context().await.current_user.is_none());

        ctx.backend()
            .auth
            .sign_up("jane@x.com", "password1", Default::default())
            .await
            .unwrap();
        let submit_ctx = ctx.submit_context().await;
        assert_eq!(
            submit_ctx.current_user.map(|u| u.email),
            Some("jane@x.com".to_string())
        );
    }
}
