use axum_extra::headers::{Cookie, HeaderMapExt};
use http::header::{HeaderMap, HeaderValue, SET_COOKIE};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct CookieOptions {
    pub(crate) http_only: bool,
    pub(crate) secure: bool,
}

pub(crate) fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .typed_get::<Cookie>()
        .and_then(|cookies| cookies.get(name).map(str::to_string))
}

fn format_cookie(name: &str, value: &str, max_age: i64, options: CookieOptions) -> String {
    let mut cookie = format!("{name}={value}; Path=/; Max-Age={max_age}; SameSite=Lax");
    if max_age <= 0 {
        cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    if options.http_only {
        cookie.push_str("; HttpOnly");
    }
    cookie
}

pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    max_age: i64,
    options: CookieOptions,
) -> Result<(), ApiError> {
    let cookie = format_cookie(name, value, max_age, options);
    let value = HeaderValue::from_str(&cookie).map_err(|_| {
        tracing::error!("Failed to build Set-Cookie header for {}", name);
        ApiError::internal("internal server error")
    })?;
    headers.append(SET_COOKIE, value);
    Ok(())
}

pub(crate) fn header_clear_cookie(
    headers: &mut HeaderMap,
    name: &str,
    options: CookieOptions,
) -> Result<(), ApiError> {
    header_set_cookie(headers, name, "", 0, options)
}
