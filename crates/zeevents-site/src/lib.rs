//! Ze Events Site - Routing and View Controllers
//!
//! This crate wires the form pipeline from `zeevents-core` into a
//! navigable site: a path router, per-page view controllers, the
//! admin console, a transient notice log, and the handoff payload
//! that carries state between views.

pub mod app;
pub mod context;
pub mod handoff;
pub mod notify;
pub mod router;
pub mod views;

pub use app::SiteApp;
pub use context::SiteContext;
pub use handoff::Handoff;
pub use notify::{Notice, NoticeLevel, NoticeLog};
pub use router::{AdminSection, Route};
pub use views::{AuthMode, ViewEffect};

/// Site version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
