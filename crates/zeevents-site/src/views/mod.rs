//! View controllers
//!
//! Per-page glue between a form session, its submission adapter and
//! the router. Views never touch the collaborators directly; they go
//! through the adapter and fold its outcome into a [`ViewEffect`] the
//! app layer applies.

mod admin;
mod auth;
mod contact;
mod intake;
mod public;

pub use admin::{DashboardView, MediaView, PagesView, SettingsView};
pub use auth::{AuthMode, AuthView};
pub use contact::ContactView;
pub use intake::{IntakeView, ProposalView};
pub use public::page_copy;

use zeevents_core::{
    CoreError, FormSession, Result, SubmissionAdapter, SubmissionOutcome, SubmitGate,
};

use crate::context::SiteContext;
use crate::handoff::Handoff;
use crate::notify::Notice;
use crate::router::Route;

/// What a submit attempt asks the app layer to do
#[derive(Debug, Default)]
pub struct ViewEffect {
    pub navigate: Option<Route>,
    pub notice: Option<Notice>,
    pub handoff: Option<Handoff>,
}

impl ViewEffect {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }
}

/// One form session bound to its adapter
pub struct FormView {
    session: FormSession,
    adapter: Box<dyn SubmissionAdapter>,
}

impl FormView {
    pub fn new(adapter: Box<dyn SubmissionAdapter>) -> Self {
        let session = FormSession::new(adapter.form().schema());
        Self { session, adapter }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.session.set_field(name, value)
    }

    pub fn prefill(&mut self, name: &str, value: &str) -> Result<()> {
        self.session.prefill(name, value)
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Run one submit attempt. Invalid or in-flight sessions produce
    /// no effect; field errors surface inline through the session. A
    /// result arriving after the navigation epoch has moved is
    /// discarded.
    pub async fn submit(&mut self, ctx: &SiteContext) -> ViewEffect {
        let form = match self.session.submit_attempt() {
            SubmitGate::Ready(form) => form,
            SubmitGate::Rejected | SubmitGate::InFlight => return ViewEffect::none(),
        };

        let started = ctx.epoch();
        let submit_ctx = ctx.submit_context().await;
        let result = self.adapter.submit(&form, &submit_ctx).await;
        self.session.finish();

        if ctx.epoch() != started {
            tracing::debug!(form = form.form_name(), "discarding stale submission result");
            return ViewEffect::none();
        }

        match result {
            Ok(SubmissionOutcome::Success {
                navigate_to,
                message,
            }) => match navigate_to {
                Some(path) => ViewEffect {
                    navigate: Some(Route::parse(&path)),
                    notice: Some(Notice::info(message)),
                    handoff: None,
                },
                None => {
                    self.session.reset();
                    ViewEffect::notice(Notice::info(message))
                }
            },
            Ok(SubmissionOutcome::Failure { message, .. }) => {
                ViewEffect::notice(Notice::error(message))
            }
            Err(CoreError::AuthRequired) => ViewEffect {
                navigate: Some(Route::Auth),
                notice: Some(Notice::info("Please sign in to continue.")),
                handoff: None,
            },
            Err(e) => {
                tracing::error!(form = form.form_name(), error = %e, "submission failed");
                ViewEffect::notice(Notice::error(e.to_string()))
            }
        }
    }
}
