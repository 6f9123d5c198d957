use std::sync::LazyLock;

pub static CSRF_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("CSRF_COOKIE_NAME")
        .ok()
        .unwrap_or("csrf_token".to_string())
});

pub const CSRF_HEADER_NAME: &str = "X-CSRF-Token";

pub const CSRF_COOKIE_MAX_AGE: i64 = 24 * 60 * 60;

pub(crate) const CSRF_TOKEN_BYTES: usize = 32;
