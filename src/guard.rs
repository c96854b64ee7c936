//! Route guards for the dashboard's pages.
//!
//! Pure decisions over a [`SessionSnapshot`]: render the page or redirect.
//! A 401 from any API call lands the user on the login route through
//! [`redirect_for_error`].

use crate::error::AppError;
use crate::services::SessionSnapshot;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Access level of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone may view.
    Public,
    /// Requires a session.
    Protected,
    /// Requires an admin session.
    AdminOnly,
    /// The login page: sends authenticated users home.
    Login,
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(&'static str),
}

/// Decide whether a route renders for the given session.
pub fn guard(access: RouteAccess, session: &SessionSnapshot) -> GuardDecision {
    match access {
        RouteAccess::Public => GuardDecision::Render,
        RouteAccess::Login if session.is_authenticated() => GuardDecision::Redirect(HOME_PATH),
        RouteAccess::Login => GuardDecision::Render,
        RouteAccess::Protected | RouteAccess::AdminOnly if !session.is_authenticated() => {
            GuardDecision::Redirect(LOGIN_PATH)
        }
        RouteAccess::AdminOnly if !session.is_admin() => GuardDecision::Redirect(HOME_PATH),
        RouteAccess::Protected | RouteAccess::AdminOnly => GuardDecision::Render,
    }
}

/// Access level of a known dashboard path, `None` for unknown paths.
pub fn access_for_path(path: &str) -> Option<RouteAccess> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let trimmed = path.trim_end_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Some(RouteAccess::Protected),
        ["login"] => Some(RouteAccess::Login),
        ["users"] => Some(RouteAccess::AdminOnly),
        ["groups"] | ["pipelines"] | ["profile"] => Some(RouteAccess::Protected),
        ["applications"] | ["features"] | ["test-cases"] | ["requests"] => {
            Some(RouteAccess::Protected)
        }
        ["applications", _] | ["features", _] | ["test-cases", _] | ["requests", _] => {
            Some(RouteAccess::Protected)
        }
        _ => None,
    }
}

/// Route a navigation attempt: unknown paths go home, known ones are guarded.
pub fn resolve(path: &str, session: &SessionSnapshot) -> GuardDecision {
    match access_for_path(path) {
        Some(access) => guard(access, session),
        None => GuardDecision::Redirect(HOME_PATH),
    }
}

/// Where the user should be sent after a failed API call, if anywhere.
///
/// Only an expired or rejected session triggers navigation; every other
/// error is for the caller to surface.
pub fn redirect_for_error(err: &AppError) -> Option<&'static str> {
    if err.is_unauthorized() {
        Some(LOGIN_PATH)
    } else {
        None
    }
}
