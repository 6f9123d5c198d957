mod config;
mod errors;
mod service;

pub use config::{CSRF_COOKIE_MAX_AGE, CSRF_COOKIE_NAME, CSRF_HEADER_NAME};
pub use errors::CsrfError;
pub use service::{CsrfService, CsrfTokenGenerator, RandomTokenGenerator, is_safe_method};
