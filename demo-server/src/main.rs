use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_session::{
    AuthUseCase, CsrfService, GoogleOAuthConfig, GoogleOAuthGateway, InMemorySessionStore,
    ProfileUseCase, RandomTokenGenerator, SessionStore, SqliteUserStore,
};
use auth_session_axum::{AUTH_COOKIE_SECURE, AppState, auth_session_router};

mod config;
mod server;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Install default CryptoProvider for rustls to prevent:
    // "no process-level CryptoProvider available -- call CryptoProvider::install_default() before this point"
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install default CryptoProvider");

    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,auth_session=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let users = Arc::new(SqliteUserStore::connect(&config.database_url).await?);
    let google = Arc::new(GoogleOAuthGateway::new(GoogleOAuthConfig::from_env()?)?);
    let (store, sweeper) = InMemorySessionStore::start();
    let sessions: Arc<dyn SessionStore> = store;

    let auth = AuthUseCase::new(
        users.clone(),
        sessions.clone(),
        google,
        Arc::new(RandomTokenGenerator),
    );
    let mut state = AppState::new(
        auth,
        ProfileUseCase::new(users),
        sessions,
        CsrfService::default(),
    );
    if config.tls.is_some() && AUTH_COOKIE_SECURE.is_none() {
        state = state.with_cookie_secure(true);
    }

    let app = auth_session_router(state);

    let handle = axum_server::Handle::new();
    tokio::spawn(server::shutdown_signal(handle.clone()));
    let served = server::serve(&config, app, handle).await;

    tracing::info!("Stopping session sweeper");
    sweeper.shutdown().await;

    served?;
    tracing::info!("Shutdown complete");
    Ok(())
}
