use base64::{Engine as _, engine::general_purpose::STANDARD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

pub(crate) fn gen_random_bytes(len: usize) -> Result<Vec<u8>, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(bytes)
}

/// Random token encoded with the standard (padded) base64 alphabet.
pub fn gen_random_string(len: usize) -> Result<String, UtilError> {
    Ok(STANDARD.encode(gen_random_bytes(len)?))
}
