use super::errors::AuthError;

/// Hashes on the blocking pool; bcrypt is deliberately slow.
pub(super) async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::Internal(format!("password hashing task failed: {e}")))?
        .map_err(|e| AuthError::Internal(format!("failed to generate password hash: {e}")))
}

/// False for a wrong password and for a missing or malformed hash.
pub(super) async fn verify_password(password: &str, hash: Option<&str>) -> Result<bool, AuthError> {
    let Some(hash) = hash.filter(|h| !h.is_empty()) else {
        return Ok(false);
    };
    let password = password.to_owned();
    let hash = hash.to_owned();

    let result = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::Internal(format!("password check task failed: {e}")))?;

    match result {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!("Stored password hash could not be checked: {}", e);
            Ok(false)
        }
    }
}
