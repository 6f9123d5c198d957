use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Listener settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServerConfig {
    pub(crate) addr: SocketAddr,
    pub(crate) database_url: String,
    pub(crate) tls: Option<TlsPaths>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TlsPaths {
    pub(crate) cert: PathBuf,
    pub(crate) key: PathBuf,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let host: IpAddr = lookup("SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse()?;
        let port: u16 = lookup("PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite::memory:".to_string());

        let tls = match (lookup("TLS_CERT_PATH"), lookup("TLS_KEY_PATH")) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.into(),
                key: key.into(),
            }),
            (None, None) => None,
            _ => return Err("TLS_CERT_PATH and TLS_KEY_PATH must be set together".into()),
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            database_url,
            tls,
        })
    }
}
