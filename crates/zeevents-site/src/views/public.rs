//! Static page copy
//!
//! The brochure pages carry no form state; they render fixed copy.

use crate::router::Route;

/// Copy for the static pages. Form-bearing and admin routes return
/// `None`; unmatched paths get the not-found copy.
pub fn page_copy(route: &Route) -> Option<&'static str> {
    match route {
        Route::Home => Some(
            "Ze Events\n\
             Crafting unforgettable weddings, one celebration at a time.\n\
             From intimate ceremonies to grand receptions, we bring your vision to life.",
        ),
        Route::About => Some(
            "About Us\n\
             Ze Events is a full-service wedding planning studio. Our team handles \
             venues, vendors, timelines and the thousand small details in between, \
             so you can enjoy the day you have been dreaming about.",
        ),
        Route::Services => Some(
            "Our Services\n\
             Full planning, partial planning and day-of coordination. Venue \
             scouting, vendor management, styling and design, guest logistics \
             and budget tracking.",
        ),
        Route::Gallery => Some(
            "Gallery\n\
             A selection of celebrations we have had the honour of planning.",
        ),
        Route::NotFound(_) => Some(
            "Page Not Found\n\
             The page you are looking for does not exist.",
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_routes_have_copy() {
        for route in [Route::Home, Route::About, Route::Services, Route::Gallery] {
            assert!(page_copy(&route).is_some());
        }
    }

    #[test]
    fn test_form_routes_have_no_static_copy() {
        assert!(page_copy(&Route::Contact).is_none());
        assert!(page_copy(&Route::Auth).is_none());
    }

    #[test]
    fn test_not_found_copy() {
        let copy = page_copy(&Route::NotFound("/missing".to_string())).unwrap();
        assert!(copy.contains("Page Not Found"));
    }
}
