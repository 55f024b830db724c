//! Authentication view
//!
//! One view with three switchable modes: client sign-in, client
//! sign-up, and the local admin console login. Switching modes
//! replaces the form session, so half-typed values never leak from
//! one form into another.

use zeevents_core::adapters::{AdminLoginAdapter, SignInAdapter, SignUpAdapter};
use zeevents_core::{Result, SubmissionAdapter};

use crate::context::SiteContext;
use crate::handoff::Handoff;
use crate::views::{FormView, ViewEffect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
    AdminLogin,
}

impl AuthMode {
    fn adapter(self) -> Box<dyn SubmissionAdapter> {
        match self {
            AuthMode::SignIn => Box::new(SignInAdapter),
            AuthMode::SignUp => Box::new(SignUpAdapter),
            AuthMode::AdminLogin => Box::new(AdminLoginAdapter),
        }
    }
}

pub struct AuthView {
    mode: AuthMode,
    form: FormView,
}

impl AuthView {
    pub fn new() -> Self {
        Self::with_mode(AuthMode::SignIn)
    }

    pub fn with_mode(mode: AuthMode) -> Self {
        Self {
            mode,
            form: FormView::new(mode.adapter()),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// Switch between sign-in, sign-up and admin login, discarding
    /// any values typed into the previous mode's form.
    pub fn switch_mode(&mut self, mode: AuthMode) {
        if mode != self.mode {
            *self = Self::with_mode(mode);
        }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set(name, value)
    }

    pub async fn submit(&mut self, ctx: &SiteContext) -> ViewEffect {
        let email = self.form.session().value("email").trim().to_string();
        let mut effect = self.form.submit(ctx).await;

        // A navigation effect from these adapters only happens on a
        // successful authentication.
        if effect.navigate.is_some() {
            match self.mode {
                AuthMode::AdminLogin => ctx.set_admin_session(true),
                AuthMode::SignIn | AuthMode::SignUp => {
                    effect.handoff = Some(Handoff::with_email(email));
                }
            }
        }
        effect
    }
}

impl Default for AuthView {
    fn default() -> Self {
        Self::new()
    }
}
