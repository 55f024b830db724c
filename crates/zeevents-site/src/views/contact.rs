//! Contact form view

use zeevents_core::adapters::ContactAdapter;
use zeevents_core::Result;

use crate::context::SiteContext;
use crate::views::{FormView, ViewEffect};

/// Contact form at `/contact`. Success stays on the page and clears
/// the form.
pub struct ContactView {
    form: FormView,
}

impl ContactView {
    pub fn new() -> Self {
        Self {
            form: FormView::new(Box::new(ContactAdapter)),
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

impl Default for ContactView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zeevents_core::backend::MESSAGES_TABLE;
    use zeevents_core::AppConfig;

    #[tokio::test]
    async fn test_success_clears_form_and_stays() {
        let ctx = SiteContext::new(AppConfig::new());
        let mut view = ContactView::new();
        view.set("name", "John Doe").unwrap();
        view.set("email", "john.doe@example.com").unwrap();
        view.set("message", "Tell me about your packages.").unwrap();

        let effect = view.submit(&ctx).await;
        assert!(effect.navigate.is_none());
        assert!(effect.notice.unwrap().message.contains("sent"));
        assert_eq!(view.form().session().value("name"), "");

        let rows = ctx
            .backend()
            .records
            .select(MESSAGES_TABLE, None, None)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_short_message_surfaces_inline_error() {
        let ctx = SiteContext::new(AppConfig::new());
        let mut view = ContactView::new();
        view.set("name", "John Doe").unwrap();
        view.set("email", "john.doe@example.com").unwrap();
        view.set("message", "Hi").unwrap();

        let effect = view.submit(&ctx).await;
        assert!(effect.notice.is_none());
        let errors = view.form().session().visible_errors();
        assert!(errors.get("message").unwrap().contains("at least 10"));
    }
}
