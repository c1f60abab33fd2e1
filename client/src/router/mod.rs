//! Client-side routing: locations, the route table and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Commands enter "screens" by pushing a [`Location`] through [`Router`],
//! which runs the guard before every transition. The HTTP client reaches the
//! router only through the [`Navigator`] seam when a `401` forces a login.

pub mod guard;
pub mod routes;


use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::state::session::Session;
use guard::GuardDecision;
use routes::{LOGIN_PATH, ROOT_PATH, RouteMeta};

/// Query key carrying the path to return to after logging in.
pub const REDIRECT_QUERY_KEY: &str = "redirect";

/// Guard redirects followed before a navigation is abandoned.
const MAX_REDIRECTS: usize = 8;

// =============================================================================
// LOCATION
// =============================================================================

/// A route path plus its query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into(), query: BTreeMap::new() }
    }

    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// `/login?redirect=<full_path>`.
    #[must_use]
    pub fn login_redirect(full_path: &str) -> Self {
        Self::new(LOGIN_PATH).with_query(REDIRECT_QUERY_KEY, full_path)
    }

    /// Parse `path?query` into a location.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let query = url::form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        let path = if path.is_empty() { ROOT_PATH } else { path };
        Self { path: path.to_owned(), query }
    }

    /// Path with the encoded query string appended, if any.
    #[must_use]
    pub fn full_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish();
        format!("{}?{query}", self.path)
    }

    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.full_path())
    }
}

// =============================================================================
// SEAMS
// =============================================================================

/// Navigation hooks the HTTP client needs for a forced login.
pub trait Navigator: Send + Sync {
    /// Where the user currently is.
    fn current_location(&self) -> Location;

    /// Start a navigation to `to`, running the guard.
    fn navigate(&self, to: Location);
}

/// Receives window-title changes.
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    #[error("too many redirects while navigating to {0}")]
    RedirectLoop(String),
}

/// Outcome of a completed navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigation {
    /// What the caller asked for.
    pub requested: Location,
    /// Where navigation ended up after redirects.
    pub location: Location,
}

impl Navigation {
    #[must_use]
    pub fn redirected(&self) -> bool {
        self.requested != self.location
    }
}

// =============================================================================
// ROUTER
// =============================================================================

#[derive(Debug)]
struct RouterState {
    current: Location,
    title: Option<String>,
}

/// Stateful router: tracks the current location and window title.
pub struct Router {
    session: Session,
    app_title: String,
    title_sink: Option<Arc<dyn TitleSink>>,
    state: Mutex<RouterState>,
}

impl Router {
    #[must_use]
    pub fn new(session: Session, app_title: impl Into<String>) -> Self {
        Self {
            session,
            app_title: app_title.into(),
            title_sink: None,
            state: Mutex::new(RouterState { current: Location::new(ROOT_PATH), title: None }),
        }
    }

    #[must_use]
    pub fn with_title_sink(mut self, sink: Arc<dyn TitleSink>) -> Self {
        self.title_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn current(&self) -> Location {
        self.lock_state().current.clone()
    }

    #[must_use]
    pub fn title(&self) -> Option<String> {
        self.lock_state().title.clone()
    }

    /// Navigate to `target`, following static and guard redirects.
    ///
    /// # Errors
    ///
    /// Returns an error if redirects do not settle.
    pub fn push(&self, target: Location) -> Result<Navigation, RouterError> {
        let requested = target.clone();
        let mut target = target;

        for _ in 0..MAX_REDIRECTS {
            let record = routes::resolve(&target.path);
            if let Some(redirect) = record.and_then(|route| route.redirect) {
                target = Location::new(redirect);
                continue;
            }

            let meta = record.map_or_else(RouteMeta::default, |route| route.meta.clone());
            if let Some(title) = guard::window_title(&meta, &self.app_title) {
                self.apply_title(title);
            }

            match guard::decide(&target, &meta, self.session.is_login()) {
                GuardDecision::Proceed => {
                    self.lock_state().current = target.clone();
                    tracing::debug!(to = %target, "navigation complete");
                    return Ok(Navigation { requested, location: target });
                }
                GuardDecision::Redirect(next) => {
                    tracing::debug!(from = %target, to = %next, "navigation redirected");
                    target = next;
                }
            }
        }

        Err(RouterError::RedirectLoop(requested.full_path()))
    }

    fn apply_title(&self, title: String) {
        if let Some(sink) = &self.title_sink {
            sink.set_title(&title);
        }
        self.lock_state().title = Some(title);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, RouterState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Navigator for Router {
    fn current_location(&self) -> Location {
        self.current()
    }

    fn navigate(&self, to: Location) {
        if let Err(e) = self.push(to) {
            tracing::warn!(error = %e, "navigation failed");
        }
    }
}
