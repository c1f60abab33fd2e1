//! Navigation guard decision.
//!
//! DESIGN
//! ======
//! The decision is a pure function of the target, its metadata and the
//! authentication flag. Applying the decision and updating the window title
//! is left to [`super::Router`].

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::Location;
use super::routes::{DEFAULT_LANDING_PATH, LOGIN_PATH, RouteMeta, normalize_path};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Continue to the requested target unchanged.
    Proceed,
    /// Cancel the requested target and navigate here instead.
    Redirect(Location),
}

/// Decide whether navigation to `target` may continue.
#[must_use]
pub fn decide(target: &Location, meta: &RouteMeta, is_login: bool) -> GuardDecision {
    if meta.requires_auth {
        if is_login {
            return GuardDecision::Proceed;
        }
        return GuardDecision::Redirect(Location::login_redirect(&target.full_path()));
    }

    if is_login && normalize_path(&target.path) == LOGIN_PATH {
        return GuardDecision::Redirect(Location::new(DEFAULT_LANDING_PATH));
    }

    GuardDecision::Proceed
}

/// Window title for a route, if it declares one.
#[must_use]
pub fn window_title(meta: &RouteMeta, app_title: &str) -> Option<String> {
    meta.title.map(|title| format!("{title} - {app_title}"))
}
