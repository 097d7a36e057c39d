use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use super::error::{AuthConfigError, AuthError};
use super::identity::{Claims, Identity};

/// HMAC bearer-token verifier.
///
/// Checks run in a fixed order and stop at the first failure:
/// presence → structure → declared algorithm → signature → `exp` → `nbf`.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl std::fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("algorithm", &self.algorithm)
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    pub fn hmac(
        secret: &[u8],
        algorithm: Algorithm,
        leeway_seconds: u64,
    ) -> Result<Self, AuthConfigError> {
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AuthConfigError::UnsupportedAlgorithm(algorithm));
        }
        if secret.is_empty() {
            return Err(AuthConfigError::EmptySecret);
        }

        let mut validation = Validation::new(algorithm);
        // Tokens without `exp` are accepted; `exp`/`nbf` are enforced when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.validate_aud = false;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Turn the raw bearer token (if any) into an [`Identity`].
    pub fn verify(&self, token: Option<&str>) -> Result<Identity, AuthError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::TokenMissing)?;

        let header = match jsonwebtoken::decode_header(token) {
            Ok(header) => header,
            Err(e) => {
                tracing::debug!(error = %e, "bearer token header could not be decoded");
                // `none` and unknown algorithms fail header parsing before the alg check.
                return Err(match declared_algorithm(token) {
                    Some(alg) if alg != format!("{:?}", self.algorithm) => {
                        AuthError::UnexpectedSigningMethod
                    }
                    _ => AuthError::TokenMalformed,
                });
            }
        };

        if header.alg != self.algorithm {
            return Err(AuthError::UnexpectedSigningMethod);
        }

        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "bearer token rejected");
                AuthError::from(e)
            })?;

        Ok(Identity::new(data.claims))
    }
}

/// Raw `alg` of a three-segment token whose header is base64url JSON.
fn declared_algorithm(token: &str) -> Option<String> {
    let mut segments = token.split('.');
    let header = segments.next()?;
    if segments.count() != 2 {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(header).ok()?;
    let header: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    header.get("alg")?.as_str().map(str::to_string)
}
