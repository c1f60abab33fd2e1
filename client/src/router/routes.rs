//! Static route table.

/// Per-route metadata consulted by the navigation guard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    /// Window title shown while the route is active.
    pub title: Option<&'static str>,
    /// Whether a session token is needed to enter the route.
    pub requires_auth: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub path: &'static str,
    pub name: Option<&'static str>,
    /// Static redirect applied before the guard runs.
    pub redirect: Option<&'static str>,
    pub meta: RouteMeta,
}

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const USERS_PATH: &str = "/users";
pub const USER_EDIT_PATH: &str = "/users/edit";

/// Where authenticated users land when no other target applies.
pub const DEFAULT_LANDING_PATH: &str = DASHBOARD_PATH;

pub const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: LOGIN_PATH,
        name: Some("Login"),
        redirect: None,
        meta: RouteMeta { title: Some("Login"), requires_auth: false },
    },
    RouteRecord {
        path: ROOT_PATH,
        name: None,
        redirect: Some(DASHBOARD_PATH),
        meta: RouteMeta { title: None, requires_auth: true },
    },
    RouteRecord {
        path: DASHBOARD_PATH,
        name: Some("Dashboard"),
        redirect: None,
        meta: RouteMeta { title: Some("Dashboard"), requires_auth: true },
    },
    RouteRecord {
        path: USERS_PATH,
        name: Some("Users"),
        redirect: None,
        meta: RouteMeta { title: Some("User Management"), requires_auth: true },
    },
    RouteRecord {
        path: USER_EDIT_PATH,
        name: Some("UserEdit"),
        redirect: None,
        meta: RouteMeta { title: Some("Edit User"), requires_auth: true },
    },
];

/// Find the record for `path`, ignoring a trailing slash.
#[must_use]
pub fn resolve(path: &str) -> Option<&'static RouteRecord> {
    let normalized = normalize_path(path);
    ROUTES.iter().find(|route| route.path == normalized)
}

/// Drop trailing slashes except on the root path.
#[must_use]
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}
