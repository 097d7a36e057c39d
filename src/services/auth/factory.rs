/// Factory: build `JwtVerifier` from application `Config`.
use crate::config::AuthConfig;
use crate::services::auth::{AuthConfigError, JwtVerifier};

/// `Ok(None)` when no secret is configured (authentication disabled).
pub fn build_verifier(config: &AuthConfig) -> Result<Option<JwtVerifier>, AuthConfigError> {
    let Some(secret) = config.secret.as_deref() else {
        return Ok(None);
    };

    let verifier = JwtVerifier::hmac(
        secret.as_bytes(),
        config.algorithm,
        config.leeway_seconds,
    )?;

    Ok(Some(verifier))
}
