//! End-to-end flows through the app layer against the demo backend

use zeevents_core::backend::{MESSAGES_TABLE, PROPOSALS_TABLE};
use zeevents_core::AppConfig;
use zeevents_site::{AdminSection, AuthMode, NoticeLevel, Route, SiteApp};

fn app() -> SiteApp {
    SiteApp::new(AppConfig::new())
}

#[tokio::test]
async fn sign_up_lands_on_proposal_selection() {
    let mut app = app();
    app.navigate("/auth");
    app.switch_auth_mode(AuthMode::SignUp);
    app.set_field("fullName", "Jane Doe").unwrap();
    app.set_field("email", "jane@x.com").unwrap();
    app.set_field("mobileNumber", "5551234567").unwrap();
    app.set_field("password", "password1").unwrap();

    let navigated = app.submit().await;
    assert!(navigated);
    assert_eq!(app.route(), &Route::ProposalSelection);
    assert_eq!(app.notices().latest().unwrap().level, NoticeLevel::Info);
}

#[tokio::test]
async fn sign_in_prefills_intake_email() {
    let mut app = app();
    app.ctx()
        .backend()
        .auth
        .sign_up("jane@x.com", "password1", Default::default())
        .await
        .unwrap();
    app.ctx().backend().auth.sign_out().await;

    app.navigate("/auth");
    app.set_field("email", "jane@x.com").unwrap();
    app.set_field("password", "password1").unwrap();
    app.submit().await;

    assert_eq!(app.route(), &Route::ClientInfo);
    // The handoff payload seeded the intake form's email field.
    assert!(app.render().await.contains("emailAddress: jane@x.com"));
}

#[tokio::test]
async fn invalid_proposal_never_reaches_record_store() {
    let mut app = app();
    app.navigate("/auth");
    app.switch_auth_mode(AuthMode::SignUp);
    app.set_field("fullName", "Jane Doe").unwrap();
    app.set_field("email", "jane@x.com").unwrap();
    app.set_field("mobileNumber", "5551234567").unwrap();
    app.set_field("password", "password1").unwrap();
    app.submit().await;
    assert_eq!(app.route(), &Route::ProposalSelection);

    app.set_field("weddingDate", "2027-06-12").unwrap();
    app.set_field("guestCount", "abc").unwrap();
    app.set_field("budget", "25000").unwrap();
    app.set_field("preferredServices", "Full planning").unwrap();

    let navigated = app.submit().await;
    assert!(!navigated);

    let rows = app
        .ctx()
        .backend()
        .records
        .select(PROPOSALS_TABLE, None, None)
        .await
        .unwrap();
    assert!(rows.is_empty());

    // Fixing the field makes the same session submit cleanly.
    app.set_field("guestCount", "120").unwrap();
    app.submit().await;
    let rows = app
        .ctx()
        .backend()
        .records
        .select(PROPOSALS_TABLE, None, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn wrong_admin_password_stays_on_auth() {
    let mut app = app();
    app.navigate("/control-panel");
    assert_eq!(app.route(), &Route::Auth);

    app.set_field("username", "admin").unwrap();
    app.set_field("password", "wrong").unwrap();
    let navigated = app.submit().await;

    assert!(!navigated);
    assert_eq!(app.route(), &Route::Auth);
    let notice = app.notices().latest().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert!(notice.message.contains("Invalid admin credentials"));
}

#[tokio::test]
async fn contact_form_resets_after_send() {
    let mut app = app();
    app.navigate("/contact");
    app.set_field("name", "John Doe").unwrap();
    app.set_field("email", "john.doe@example.com").unwrap();
    app.set_field("message", "Tell me about your packages.").unwrap();

    let navigated = app.submit().await;
    assert!(!navigated);
    assert_eq!(app.route(), &Route::Contact);

    let rows = app
        .ctx()
        .backend()
        .records
        .select(MESSAGES_TABLE, None, None)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert!(app.render().await.contains("name: \n"));
}

#[tokio::test]
async fn admin_manages_pages_end_to_end() {
    let mut app = app();
    app.navigate("/control-panel");
    app.set_field("username", "admin").unwrap();
    app.set_field("password", "admin").unwrap();
    app.submit().await;
    assert_eq!(app.route(), &Route::ControlPanel(AdminSection::Dashboard));

    app.navigate("/control-panel/pages");
    app.open_page_editor();
    app.set_field("title", "Our Story").unwrap();
    app.set_field("content", "Once upon a time").unwrap();
    app.submit().await;
    assert!(app.render().await.contains("Our Story"));
}
