//! Submission adapters
//!
//! One adapter per form, each mapping a validated session snapshot to
//! exactly one collaborator call and folding the response back into a
//! [`SubmissionOutcome`]. A collaborator failure never escapes as a
//! raw transport error: it becomes a `Failure` outcome with a
//! human-readable message. The single exception is
//! [`CoreError::AuthRequired`], which the view layer turns into
//! navigation to the sign-in screen.

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::backend::{
    AuthUser, Backend, CLIENTS_TABLE, MESSAGES_TABLE, PAGES_TABLE, PROPOSALS_TABLE,
};
use crate::config::AdminCredentials;
use crate::error::BackendError;
use crate::forms::FormKind;
use crate::session::ValidatedForm;
use crate::{CoreError, Result};

/// Outcome of one submit attempt, consumed by the view layer
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success {
        /// Route to navigate to, or `None` for forms that stay on the
        /// page (which reset their session instead)
        navigate_to: Option<String>,
        message: String,
    },
    Failure {
        message: String,
        /// Whether a manual resubmit is worth attempting
        retryable: bool,
    },
}

impl SubmissionOutcome {
    /// Success that stays on the current page
    pub fn stay(message: impl Into<String>) -> Self {
        SubmissionOutcome::Success {
            navigate_to: None,
            message: message.into(),
        }
    }

    /// Success followed by a one-time navigation
    pub fn navigate(route: impl Into<String>, message: impl Into<String>) -> Self {
        SubmissionOutcome::Success {
            navigate_to: Some(route.into()),
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        SubmissionOutcome::Failure {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            SubmissionOutcome::Success { message, .. } => message,
            SubmissionOutcome::Failure { message, .. } => message,
        }
    }
}

impl From<BackendError> for SubmissionOutcome {
    fn from(e: BackendError) -> Self {
        SubmissionOutcome::Failure {
            message: e.message,
            retryable: e.retryable,
        }
    }
}

/// Everything an adapter may depend on, passed explicitly so adapters
/// stay testable against substitutable fake collaborators. The current
/// user is resolved once per submit attempt, never read ambiently.
#[derive(Clone)]
pub struct SubmitContext {
    pub backend: Backend,
    pub current_user: Option<AuthUser>,

    /// Whether the local admin console session is open
    pub admin_session: bool,

    pub admin: AdminCredentials,
    pub media_bucket: String,
}

impl SubmitContext {
    pub fn new(backend: Backend, admin: AdminCredentials, media_bucket: impl Into<String>) -> Self {
        Self {
            backend,
            current_user: None,
            admin_session: false,
            admin,
            media_bucket: media_bucket.into(),
        }
    }

    pub fn with_user(mut self, user: Option<AuthUser>) -> Self {
        self.current_user = user;
        self
    }

    pub fn with_admin_session(mut self, open: bool) -> Self {
        self.admin_session = open;
        self
    }

    /// Signed-in user, or the sign-in redirect
    fn require_user(&self) -> Result<&AuthUser> {
        self.current_user.as_ref().ok_or(CoreError::AuthRequired)
    }

    /// Any authenticated principal: a signed-in user or an open admin
    /// console session.
    fn require_authenticated(&self) -> Result<()> {
        if self.admin_session || self.current_user.is_some() {
            Ok(())
        } else {
            Err(CoreError::AuthRequired)
        }
    }
}

/// Translator between one validated form and one collaborator call
#[async_trait]
pub trait SubmissionAdapter: Send + Sync {
    /// The form this adapter serves
    fn form(&self) -> FormKind;

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome>;
}

/// Create an account with the auth service
pub struct SignUpAdapter;

#[async_trait]
impl SubmissionAdapter for SignUpAdapter {
    fn form(&self) -> FormKind {
        FormKind::SignUp
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        let profile = [
            ("fullName", form.get("fullName")),
            ("mobileCountryCode", form.get("mobileCountryCode")),
            ("mobileNumber", form.get("mobileNumber")),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let result = ctx
            .backend
            .auth
            .sign_up(form.get_trimmed("email"), form.get("password"), profile)
            .await;

        Ok(match result {
            Ok(session) => {
                tracing::info!(email = %session.user.email, "account created");
                SubmissionOutcome::navigate(
                    "/proposal-selection",
                    "Account created! Let's plan your big day.",
                )
            }
            Err(e) => e.into(),
        })
    }
}

/// Sign in with the auth service
pub struct SignInAdapter;

#[async_trait]
impl SubmissionAdapter for SignInAdapter {
    fn form(&self) -> FormKind {
        FormKind::SignIn
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        let result = ctx
            .backend
            .auth
            .sign_in(form.get_trimmed("email"), form.get("password"))
            .await;

        Ok(match result {
            Ok(session) => {
                tracing::info!(email = %session.user.email, "signed in");
                SubmissionOutcome::navigate("/client-info", "Signed in successfully!")
            }
            Err(e) => e.into(),
        })
    }
}

/// In-process admin credential check. No network; explicitly a
/// placeholder, not a security design.
pub struct AdminLoginAdapter;

#[async_trait]
impl SubmissionAdapter for AdminLoginAdapter {
    fn form(&self) -> FormKind {
        FormKind::AdminLogin
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        if ctx
            .admin
            .matches(form.get_trimmed("username"), form.get("password"))
        {
            Ok(SubmissionOutcome::navigate(
                "/control-panel",
                "Welcome, Administrator!",
            ))
        } else {
            tracing::warn!("failed admin login attempt");
            Ok(SubmissionOutcome::failure("Invalid admin credentials."))
        }
    }
}

/// Insert a client intake record
pub struct ClientIntakeAdapter;

#[async_trait]
impl SubmissionAdapter for ClientIntakeAdapter {
    fn form(&self) -> FormKind {
        FormKind::ClientInfo
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        let record = json!({
            "full_name": form.get_trimmed("fullName"),
            "email": form.get_trimmed("emailAddress"),
            "mobile": format!("{} {}", form.get("mobileCountryCode"), form.get_trimmed("mobileNumber")),
            "user_id": ctx.current_user.as_ref().map(|u| u.id),
        });

        Ok(match ctx.backend.records.insert(CLIENTS_TABLE, record).await {
            Ok(_) => SubmissionOutcome::navigate(
                "/proposal-selection",
                "Client information saved! Redirecting to proposal selection.",
            ),
            Err(e) => e.into(),
        })
    }
}

/// Insert a proposal request record. Requires a signed-in user.
pub struct ProposalRequestAdapter;

#[async_trait]
impl SubmissionAdapter for ProposalRequestAdapter {
    fn form(&self) -> FormKind {
        FormKind::ProposalRequest
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        let user = ctx.require_user()?;

        // Guaranteed numeric by the schema's rule.
        let guest_count = match form.get_trimmed("guestCount").parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                return Ok(SubmissionOutcome::failure(
                    "Guest Count must be a non-negative number.",
                ))
            }
        };

        let record = json!({
            "user_id": user.id,
            "wedding_date": form.get_trimmed("weddingDate"),
            "guest_count": guest_count,
            "budget": form.get_trimmed("budget"),
            "preferred_services": form.get("preferredServices"),
            "notes": form.get("notes"),
        });

        Ok(
            match ctx.backend.records.insert(PROPOSALS_TABLE, record).await {
                Ok(stored) => {
                    tracing::info!(id = %stored.id, "proposal request stored");
                    SubmissionOutcome::stay("Proposal request submitted! We'll be in touch soon.")
                }
                Err(e) => e.into(),
            },
        )
    }
}

/// Insert a contact message record. Stays on the page; the view resets
/// the session on success.
pub struct ContactAdapter;

#[async_trait]
impl SubmissionAdapter for ContactAdapter {
    fn form(&self) -> FormKind {
        FormKind::Contact
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        let record = json!({
            "name": form.get_trimmed("name"),
            "email": form.get_trimmed("email"),
            "message": form.get("message"),
        });

        Ok(match ctx.backend.records.insert(MESSAGES_TABLE, record).await {
            Ok(_) => {
                SubmissionOutcome::stay("Your message has been sent! We'll get back to you soon.")
            }
            Err(e) => e.into(),
        })
    }
}

/// Insert or update a page record, depending on whether the editor was
/// opened on an existing page.
pub struct PageSaveAdapter {
    editing: Option<Uuid>,
}

impl PageSaveAdapter {
    /// Adapter for the create-page state
    pub fn create() -> Self {
        Self { editing: None }
    }

    /// Adapter for the edit-page state
    pub fn edit(id: Uuid) -> Self {
        Self { editing: Some(id) }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[async_trait]
impl SubmissionAdapter for PageSaveAdapter {
    fn form(&self) -> FormKind {
        FormKind::PageEditor
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        ctx.require_authenticated()?;

        let body = json!({
            "title": form.get_trimmed("title"),
            "content": form.get("content"),
        });

        let result = match self.editing {
            Some(id) => ctx.backend.records.update(PAGES_TABLE, id, body).await,
            None => ctx.backend.records.insert(PAGES_TABLE, body).await,
        };

        Ok(match result {
            Ok(_) if self.editing.is_some() => SubmissionOutcome::stay("Page updated."),
            Ok(_) => SubmissionOutcome::stay("Page created."),
            Err(e) => e.into(),
        })
    }
}

/// Delete a page record
pub struct PageDeleteAdapter;

#[async_trait]
impl SubmissionAdapter for PageDeleteAdapter {
    fn form(&self) -> FormKind {
        FormKind::PageDelete
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        ctx.require_authenticated()?;

        let id = match form.get_trimmed("pageId").parse::<Uuid>() {
            Ok(id) => id,
            Err(_) => return Ok(SubmissionOutcome::failure("Unknown page.")),
        };

        Ok(match ctx.backend.records.delete(PAGES_TABLE, id).await {
            Ok(()) => SubmissionOutcome::stay("Page deleted."),
            Err(e) => e.into(),
        })
    }
}

/// Upload one media object. The file bytes are supplied when the
/// adapter is built; the form only carries the file name.
pub struct MediaUploadAdapter {
    bytes: Vec<u8>,
}

impl MediaUploadAdapter {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

#[async_trait]
impl SubmissionAdapter for MediaUploadAdapter {
    fn form(&self) -> FormKind {
        FormKind::MediaUpload
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        ctx.require_authenticated()?;

        let path = form.get_trimmed("fileName");
        let result = ctx
            .backend
            .storage
            .upload(&ctx.media_bucket, path, self.bytes.clone(), false)
            .await;

        Ok(match result {
            Ok(()) => SubmissionOutcome::stay("Media uploaded."),
            Err(e) => e.into(),
        })
    }
}

/// Remove one media object
pub struct MediaDeleteAdapter;

#[async_trait]
impl SubmissionAdapter for MediaDeleteAdapter {
    fn form(&self) -> FormKind {
        FormKind::MediaDelete
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        ctx.require_authenticated()?;

        let paths = vec![form.get_trimmed("path").to_string()];
        Ok(
            match ctx.backend.storage.remove(&ctx.media_bucket, &paths).await {
                Ok(()) => SubmissionOutcome::stay("Media deleted."),
                Err(e) => e.into(),
            },
        )
    }
}

/// Change the admin password. The current-password check happens
/// in-process against the configured pair, as the demo revision did;
/// with a signed-in user the new password is also pushed to the auth
/// service.
pub struct PasswordChangeAdapter;

#[async_trait]
impl SubmissionAdapter for PasswordChangeAdapter {
    fn form(&self) -> FormKind {
        FormKind::PasswordChange
    }

    async fn submit(&self, form: &ValidatedForm, ctx: &SubmitContext) -> Result<SubmissionOutcome> {
        ctx.require_authenticated()?;

        if form.get("currentPassword") != ctx.admin.password {
            return Ok(SubmissionOutcome::failure("Incorrect current password."));
        }

        if ctx.current_user.is_some() {
            if let Err(e) = ctx
                .backend
                .auth
                .update_password(form.get("newPassword"))
                .await
            {
                return Ok(e.into());
            }
        }

        Ok(SubmissionOutcome::stay("Admin password updated."))
    }
}
