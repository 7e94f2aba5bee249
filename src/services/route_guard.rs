//! Access decision for navigable paths.
//!
//! Paths fall into four classes, matched by prefix (the prefix itself or the
//! prefix followed by `/`). A failed claims lookup is treated exactly like
//! absent claims.

use serde::Serialize;

pub const LOGIN_PATH: &str = "/auth/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Pages only meaningful to anonymous visitors.
const AUTH_ONLY_PREFIXES: [&str; 3] = ["/auth/login", "/auth/sign-up", "/auth/forgot-password"];

/// Reachable mid password-reset, whether or not a session exists.
const PASSWORD_UPDATE_PREFIX: &str = "/auth/update-password";

const PROTECTED_PREFIXES: [&str; 3] = ["/dashboard", "/protected", "/api"];

/// API routes that stay open to anonymous callers.
const PUBLIC_API_PREFIXES: [&str; 1] = ["/api/health"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PathClass {
    AuthOnly,
    PasswordUpdate,
    Protected,
    Public,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectToDashboard,
}

impl GuardDecision {
    /// Path the request should be redirected to, if any.
    pub fn target(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectToDashboard => Some(DASHBOARD_PATH),
        }
    }
}

/// `true` when `path` equals `prefix` or continues it with a `/`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

pub fn classify(path: &str) -> PathClass {
    if AUTH_ONLY_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::AuthOnly
    } else if matches_prefix(path, PASSWORD_UPDATE_PREFIX) {
        PathClass::PasswordUpdate
    } else if PUBLIC_API_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Public
    } else if PROTECTED_PREFIXES.iter().any(|p| matches_prefix(path, p)) {
        PathClass::Protected
    } else {
        PathClass::Public
    }
}

pub fn decide(path: &str, authenticated: bool) -> GuardDecision {
    match (classify(path), authenticated) {
        (PathClass::AuthOnly, true) => GuardDecision::RedirectToDashboard,
        (PathClass::Protected, false) => GuardDecision::RedirectToLogin,
        _ => GuardDecision::Allow,
    }
}
