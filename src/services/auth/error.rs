use jsonwebtoken::Algorithm;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

/// Why a bearer token was rejected.
///
/// The display text is the exact message written to the `err` field of the
/// 401 response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("token up for parsing was not passed through the context")]
    TokenMissing,
    #[error("JWT Token is malformed")]
    TokenMalformed,
    #[error("unexpected signing method")]
    UnexpectedSigningMethod,
    #[error("signature is invalid")]
    SignatureInvalid,
    #[error("JWT Token is expired")]
    TokenExpired,
    #[error("token is not valid yet")]
    TokenNotActive,
    #[error("JWT Token was invalid")]
    GenericInvalid,
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => Self::TokenMalformed,
            ErrorKind::InvalidAlgorithm => Self::UnexpectedSigningMethod,
            ErrorKind::InvalidSignature => Self::SignatureInvalid,
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            ErrorKind::ImmatureSignature => Self::TokenNotActive,
            _ => Self::GenericInvalid,
        }
    }
}

/// Verifier construction errors (start-up only).
#[derive(Debug, Error)]
pub enum AuthConfigError {
    #[error("unsupported signing algorithm {0:?} (expected HS256, HS384 or HS512)")]
    UnsupportedAlgorithm(Algorithm),
    #[error("empty signing secret")]
    EmptySecret,
}
