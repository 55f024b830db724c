//! Site application
//!
//! Owns the router state, the active view controller and the notice
//! log, and applies the effects submissions produce. One instance
//! drives the whole site; views never outlive the navigation that
//! created them.

use std::fmt::Write as _;

use uuid::Uuid;

use zeevents_core::{AppConfig, CoreError, Result};

use crate::context::SiteContext;
use crate::handoff::Handoff;
use crate::notify::{Notice, NoticeLog};
use crate::router::{AdminSection, Route};
use crate::views::{
    page_copy, AuthMode, AuthView, ContactView, DashboardView, FormView, IntakeView, MediaView,
    PagesView, ProposalView, SettingsView, ViewEffect,
};

enum ActiveView {
    Static,
    Auth(AuthView),
    ClientInfo(IntakeView),
    Proposal(ProposalView),
    Contact(ContactView),
    Dashboard,
    Pages(PagesView),
    Media,
    Settings(SettingsView),
}

pub struct SiteApp {
    ctx: SiteContext,
    route: Route,
    active: ActiveView,
    notices: NoticeLog,
}

impl SiteApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            ctx: SiteContext::new(config),
            route: Route::Home,
            active: ActiveView::Static,
            notices: NoticeLog::new(),
        }
    }

    pub fn ctx(&self) -> &SiteContext {
        &self.ctx
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }

    /// Navigate to a path. Admin routes bounce to the auth view when
    /// no admin session is open.
    pub fn navigate(&mut self, path: &str) {
        let route = Route::parse(path);
        if route.requires_admin() && !self.ctx.admin_session() {
            tracing::debug!(%route, "admin route without session, redirecting");
            self.notices
                .push(Notice::info("Please log in to access the control panel."));
            self.goto(Route::Auth, Handoff::new());
            if let ActiveView::Auth(view) = &mut self.active {
                view.switch_mode(AuthMode::AdminLogin);
            }
            return;
        }
        self.goto(route, Handoff::new());
    }

    fn goto(&mut self, route: Route, handoff: Handoff) {
        self.ctx.bump_epoch();
        self.active = match &route {
            Route::Auth => ActiveView::Auth(AuthView::new()),
            Route::ClientInfo => ActiveView::ClientInfo(IntakeView::new(&handoff)),
            Route::ProposalSelection => ActiveView::Proposal(ProposalView::new()),
            Route::Contact => ActiveView::Contact(ContactView::new()),
            Route::ControlPanel(AdminSection::Dashboard) => ActiveView::Dashboard,
            Route::ControlPanel(AdminSection::Pages) => ActiveView::Pages(PagesView::new()),
            Route::ControlPanel(AdminSection::Media) => ActiveView::Media,
            Route::ControlPanel(AdminSection::Settings) => ActiveView::Settings(SettingsView::new()),
            _ => ActiveView::Static,
        };
        tracing::info!(%route, "navigated");
        self.route = route;
    }

    /// Switch the auth view's mode. No-op on other routes.
    pub fn switch_auth_mode(&mut self, mode: AuthMode) {
        if let ActiveView::Auth(view) = &mut self.active {
            view.switch_mode(mode);
        }
    }

    /// Set a field on the active form
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        match &mut self.active {
            ActiveView::Auth(view) => view.set(name, value),
            ActiveView::ClientInfo(view) => view.set(name, value),
            ActiveView::Proposal(view) => view.set(name, value),
            ActiveView::Contact(view) => view.set(name, value),
            ActiveView::Pages(view) => view.set(name, value),
            ActiveView::Settings(view) => view.set(name, value),
            _ => Err(CoreError::UnknownField(name.to_string())),
        }
    }

    /// Reset the active form to its defaults
    pub fn reset(&mut self) {
        match &mut self.active {
            ActiveView::ClientInfo(view) => view.reset(),
            ActiveView::Proposal(view) => view.reset(),
            ActiveView::Contact(view) => view.reset(),
            ActiveView::Pages(view) => view.close_editor(),
            _ => {}
        }
    }

    /// Submit the active form and apply whatever it asks for
    pub async fn submit(&mut self) -> bool {
        let effect = match &mut self.active {
            ActiveView::Auth(view) => view.submit(&self.ctx).await,
            ActiveView::ClientInfo(view) => view.submit(&self.ctx).await,
            ActiveView::Proposal(view) => view.submit(&self.ctx).await,
            ActiveView::Contact(view) => view.submit(&self.ctx).await,
            ActiveView::Pages(view) => view.save(&self.ctx).await,
            ActiveView::Settings(view) => view.submit(&self.ctx).await,
            _ => ViewEffect::none(),
        };
        self.apply(effect)
    }

    /// Open the page editor in create mode
    pub fn open_page_editor(&mut self) {
        if let ActiveView::Pages(view) = &mut self.active {
            view.open_create();
        }
    }

    /// Open the page editor on an existing page
    pub async fn edit_page(&mut self, id: Uuid) -> Result<()> {
        match &mut self.active {
            ActiveView::Pages(view) => view.open_edit(&self.ctx, id).await,
            _ => Ok(()),
        }
    }

    pub async fn delete_page(&mut self, id: Uuid) -> bool {
        let effect = match &mut self.active {
            ActiveView::Pages(view) => view.delete(&self.ctx, id).await,
            _ => ViewEffect::none(),
        };
        self.apply(effect)
    }

    pub async fn upload_media(&mut self, file_name: &str, bytes: Vec<u8>) -> bool {
        let effect = match &self.active {
            ActiveView::Media => MediaView::upload(&self.ctx, file_name, bytes).await,
            _ => ViewEffect::none(),
        };
        self.apply(effect)
    }

    pub async fn delete_media(&mut self, path: &str) -> bool {
        let effect = match &self.active {
            ActiveView::Media => MediaView::delete(&self.ctx, path).await,
            _ => ViewEffect::none(),
        };
        self.apply(effect)
    }

    /// Apply a view effect. Returns true when a navigation happened.
    fn apply(&mut self, effect: ViewEffect) -> bool {
        if let Some(notice) = effect.notice {
            self.notices.push(notice);
        }
        match effect.navigate {
            Some(route) => {
                self.goto(route, effect.handoff.unwrap_or_default());
                true
            }
            None => false,
        }
    }

    /// Render the active view for a text client
    pub async fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "── {} ──", self.route);

        if let Some(copy) = page_copy(&self.route) {
            let _ = writeln!(out, "{}", copy);
        }

        match &self.active {
            ActiveView::Auth(view) => {
                let _ = writeln!(out, "mode: {:?}", view.mode());
                render_form(&mut out, view.form());
            }
            ActiveView::ClientInfo(view) => render_form(&mut out, view.form()),
            ActiveView::Proposal(view) => render_form(&mut out, view.form()),
            ActiveView::Contact(view) => render_form(&mut out, view.form()),
            ActiveView::Settings(view) => render_form(&mut out, view.form()),
            ActiveView::Pages(view) => {
                match PagesView::list(&self.ctx).await {
                    Ok(pages) => {
                        let _ = writeln!(out, "pages: {}", pages.len());
                        for page in pages {
                            let _ = writeln!(out, "  {}  {}", page.id, page.title);
                        }
                    }
                    Err(e) => {
                        let _ = writeln!(out, "pages unavailable: {}", e);
                    }
                }
                if let Some(editor) = view.editor() {
                    let label = if view.is_editing() { "edit" } else { "create" };
                    let _ = writeln!(out, "editor ({})", label);
                    render_form(&mut out, editor);
                }
            }
            ActiveView::Media => match MediaView::list(&self.ctx).await {
                Ok(items) => {
                    let _ = writeln!(out, "media: {}", items.len());
                    for item in items {
                        let _ = writeln!(out, "  {}  {}", item.entry.path, item.url);
                    }
                }
                Err(e) => {
                    let _ = writeln!(out, "media unavailable: {}", e);
                }
            },
            ActiveView::Dashboard => match DashboardView::stats(&self.ctx).await {
                Ok(stats) => {
                    let _ = writeln!(
                        out,
                        "pages: {}  proposals: {}  messages: {}  clients: {}  media: {}",
                        stats.pages, stats.proposals, stats.messages, stats.clients,
                        stats.media_objects
                    );
                }
                Err(e) => {
                    let _ = writeln!(out, "stats unavailable: {}", e);
                }
            },
            ActiveView::Static => {}
        }

        if let Some(notice) = self.notices.latest() {
            let _ = writeln!(out, "[{:?}] {}", notice.level, notice.message);
        }
        out
    }
}

fn render_form(out: &mut String, view: &FormView) {
    let session = view.session();
    let errors = session.visible_errors();
    for field in session.schema().fields() {
        let value = session.value(&field.name);
        let _ = write!(out, "  {}: {}", field.name, value);
        if let Some(error) = errors.get(field.name.as_str()) {
            let _ = write!(out, "  ✗ {}", error);
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "  [{}]",
        if session.last_result().is_valid {
            "ready"
        } else {
            "incomplete"
        }
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::NoticeLevel;

    #[tokio::test]
    async fn test_admin_route_bounces_to_auth_without_session() {
        let mut app = SiteApp::new(AppConfig::new());
        app.navigate("/control-panel/pages");
        assert_eq!(app.route(), &Route::Auth);
        assert!(app.notices().latest().is_some());
    }

    #[tokio::test]
    async fn test_admin_login_then_control_panel() {
        let mut app = SiteApp::new(AppConfig::new());
        app.navigate("/control-panel");
        app.set_field("username", "admin").unwrap();
        app.set_field("password", "admin").unwrap();
        let navigated = app.submit().await;
        assert!(navigated);
        assert_eq!(
            app.route(),
            &Route::ControlPanel(AdminSection::Dashboard)
        );
        app.navigate("/control-panel/pages");
        assert_eq!(app.route(), &Route::ControlPanel(AdminSection::Pages));
    }

    #[tokio::test]
    async fn test_set_field_on_static_page_fails_fast() {
        let mut app = SiteApp::new(AppConfig::new());
        app.navigate("/about");
        assert!(app.set_field("email", "x").is_err());
    }

    #[tokio::test]
    async fn test_failed_submit_records_error_notice() {
        let mut app = SiteApp::new(AppConfig::new());
        app.navigate("/auth");
        app.set_field("email", "nobody@example.com").unwrap();
        app.set_field("password", "password1").unwrap();
        let navigated = app.submit().await;
        assert!(!navigated);
        assert_eq!(app.notices().latest().unwrap().level, NoticeLevel::Error);
    }
}
