//! Environment-driven settings for the HTTP layer

use std::sync::LazyLock;

/// Mount point of the authentication endpoints.
/// Default: "/api/auth"
pub static AUTH_ROUTE_PREFIX: LazyLock<String> = LazyLock::new(|| {
    std::env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/api/auth".to_string())
});

pub(crate) const PROFILE_ROUTE: &str = "/api/profile";

/// Base URL of the browser-facing frontend; OAuth callbacks redirect here.
/// Default: "http://localhost:3000"
pub static FRONTEND_URL: LazyLock<String> = LazyLock::new(|| {
    let url = std::env::var("FRONTEND_URL")
        .or_else(|_| std::env::var("SERVER_FRONTEND_URL"))
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    url.trim_end_matches('/').to_string()
});

/// Forces the `Secure` cookie attribute on or off. Unset means "detect per request".
pub static AUTH_COOKIE_SECURE: LazyLock<Option<bool>> =
    LazyLock::new(|| parse_bool_flag(std::env::var("AUTH_COOKIE_SECURE").ok().as_deref()));

fn parse_bool_flag(value: Option<&str>) -> Option<bool> {
    match value?.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
