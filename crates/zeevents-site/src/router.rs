//! Path routing
//!
//! Maps request paths to the view that should be active. Unmatched
//! paths resolve to [`Route::NotFound`] rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Admin console sub-views under `/control-panel`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSection {
    Dashboard,
    Pages,
    Media,
    Settings,
}

impl AdminSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Pages => "pages",
            AdminSection::Media => "media",
            AdminSection::Settings => "settings",
        }
    }
}

/// One addressable view of the site
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Services,
    Gallery,
    Contact,
    Auth,
    ClientInfo,
    ProposalSelection,
    ControlPanel(AdminSection),
    NotFound(String),
}

impl Route {
    /// Resolve a path to a route. Trailing slashes are ignored;
    /// anything unrecognized becomes `NotFound`.
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim();
        let normalized = if trimmed.len() > 1 {
            trimmed.trim_end_matches('/')
        } else {
            trimmed
        };

        match normalized {
            "/" | "" => Route::Home,
            "/about" => Route::About,
            "/services" => Route::Services,
            "/gallery" => Route::Gallery,
            "/contact" => Route::Contact,
            "/auth" => Route::Auth,
            "/client-info" => Route::ClientInfo,
            "/proposal-selection" => Route::ProposalSelection,
            "/control-panel" | "/control-panel/dashboard" => {
                Route::ControlPanel(AdminSection::Dashboard)
            }
            "/control-panel/pages" => Route::ControlPanel(AdminSection::Pages),
            "/control-panel/media" => Route::ControlPanel(AdminSection::Media),
            "/control-panel/settings" => Route::ControlPanel(AdminSection::Settings),
            other => Route::NotFound(other.to_string()),
        }
    }

    /// Whether this route sits behind the admin console guard
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::ControlPanel(_))
    }

    /// Every addressable route, for listings
    pub fn all() -> Vec<Route> {
        vec![
            Route::Home,
            Route::About,
            Route::Services,
            Route::Gallery,
            Route::Contact,
            Route::Auth,
            Route::ClientInfo,
            Route::ProposalSelection,
            Route::ControlPanel(AdminSection::Dashboard),
            Route::ControlPanel(AdminSection::Pages),
            Route::ControlPanel(AdminSection::Media),
            Route::ControlPanel(AdminSection::Settings),
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::About => write!(f, "/about"),
            Route::Services => write!(f, "/services"),
            Route::Gallery => write!(f, "/gallery"),
            Route::Contact => write!(f, "/contact"),
            Route::Auth => write!(f, "/auth"),
            Route::ClientInfo => write!(f, "/client-info"),
            Route::ProposalSelection => write!(f, "/proposal-selection"),
            Route::ControlPanel(section) => write!(f, "/control-panel/{}", section.as_str()),
            Route::NotFound(path) => write!(f, "{}", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse("/contact"), Route::Contact);
        assert_eq!(Route::parse("/proposal-selection"), Route::ProposalSelection);
        assert_eq!(
            Route::parse("/control-panel"),
            Route::ControlPanel(AdminSection::Dashboard)
        );
        assert_eq!(
            Route::parse("/control-panel/media"),
            Route::ControlPanel(AdminSection::Media)
        );
    }

    #[test]
    fn test_parse_trailing_slash() {
        assert_eq!(Route::parse("/about/"), Route::About);
    }

    #[test]
    fn test_unmatched_path_is_not_found() {
        match Route::parse("/no-such-page") {
            Route::NotFound(path) => assert_eq!(path, "/no-such-page"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_display_round_trips() {
        for route in Route::all() {
            assert_eq!(Route::parse(&route.to_string()), route);
        }
    }

    #[test]
    fn test_admin_guard_flag() {
        assert!(Route::ControlPanel(AdminSection::Pages).requires_admin());
        assert!(!Route::Contact.requires_admin());
    }
}
