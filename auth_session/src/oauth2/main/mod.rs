mod callback;
mod google;

pub use callback::validate_oauth_callback;
pub use google::GoogleOAuthGateway;
