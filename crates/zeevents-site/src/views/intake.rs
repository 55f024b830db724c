//! Client intake and proposal request views

use zeevents_core::adapters::{ClientIntakeAdapter, ProposalRequestAdapter};
use zeevents_core::Result;

use crate::context::SiteContext;
use crate::handoff::Handoff;
use crate::views::{FormView, ViewEffect};

/// Client information form at `/client-info`. The email field is
/// seeded from the handoff payload when the user arrives from a
/// sign-in.
pub struct IntakeView {
    form: FormView,
}

impl IntakeView {
    pub fn new(handoff: &Handoff) -> Self {
        let mut form = FormView::new(Box::new(ClientIntakeAdapter));
        if let Some(email) = handoff.email() {
            // Schema field is known; prefill cannot fail here.
            let _ = form.prefill("emailAddress", email);
        }
        Self { form }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set(name, value)
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    pub async fn submit(&mut self, ctx: &SiteContext) -> ViewEffect {
        self.form.submit(ctx).await
    }
}

/// Proposal request form at `/proposal-selection`. Success stays on
/// the page with a cleared form; a signed-out submit redirects to the
/// sign-in view.
pub struct ProposalView {
    form: FormView,
}

impl ProposalView {
    pub fn new() -> Self {
        Self {
            form: FormView::new(Box::new(ProposalRequestAdapter)),
        }
    }

    pub fn form(&self) -> &FormView {
        &self.form
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set(name, value)
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    pub async fn submit(&mut self, ctx: &SiteContext) -> ViewEffect {
        self.form.submit(ctx).await
    }
}

impl Default for ProposalView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Route;
    use zeevents_core::backend::PROPOSALS_TABLE;
    use zeevents_core::AppConfig;

    #[test]
    fn test_intake_prefills_email_from_handoff() {
        let view = IntakeView::new(&Handoff::with_email("jane@x.com"));
        assert_eq!(view.form().session().value("emailAddress"), "jane@x.com");
        // Prefill must not mark the field touched.
        assert!(view.form().session().visible_errors().is_empty());
    }

    #[tokio::test]
    async fn test_intake_success_navigates_to_proposal_selection() {
        let ctx = SiteContext::new(AppConfig::new());
        let mut view = IntakeView::new(&Handoff::new());
        view.set("fullName", "Jane Doe").unwrap();
        view.set("emailAddress", "jane@x.com").unwrap();
        view.set("mobileNumber", "5551234567").unwrap();

        let effect = view.submit(&ctx).await;
        assert_eq!(effect.navigate, Some(Route::ProposalSelection));
    }

    #[tokio::test]
    async fn test_invalid_guest_count_blocks_record_insert() {
        let ctx = SiteContext::new(AppConfig::new());
        ctx.backend()
            .auth
            .sign_up("jane@x.com", "password1", Default::default())
            .await
            .unwrap();

        let mut view = ProposalView::new();
        view.set("weddingDate", "2027-06-12").unwrap();
        view.set("guestCount", "abc").unwrap();
        view.set("budget", "25000").unwrap();
        view.set("preferredServices", "Full planning").unwrap();

        let effect = view.submit(&ctx).await;
        assert!(effect.navigate.is_none());
        assert!(effect.notice.is_none());

        let rows = ctx
            .backend()
            .records
            .select(PROPOSALS_TABLE, None, None)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_signed_out_proposal_redirects_to_auth() {
        let ctx = SiteContext::new(AppConfig::new());
        let mut view = ProposalView::new();
        view.set("weddingDate", "2027-06-12").unwrap();
        view.set("guestCount", "120").unwrap();
        view.set("budget", "25000").unwrap();
        view.set("preferredServices", "Full planning").unwrap();

        let effect = view.submit(&ctx).await;
        assert_eq!(effect.navigate, Some(Route::Auth));
    }
}
