//! View-to-view handoff
//!
//! A small immutable payload carried through navigation, so one view
//! can seed the next without shared mutable state. Today this is just
//! the email captured at sign-in, used to prefill the client intake
//! form.

/// Immutable payload passed from one view to the next via the router
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Handoff {
    email: Option<String>,
}

impl Handoff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
