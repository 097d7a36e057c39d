/*
 * Responsibility
 * - 検証済みトークンの claims と、下流 (logging / metrics / engine) が参照する Identity
 * - subject の取り出しは型で行う (実行時のフィールド探索はしない)
 */
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claims used by verification, plus whatever else the token carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The verified caller. Only produced by [`super::JwtVerifier::verify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    claims: Claims,
}

impl Identity {
    pub(crate) fn new(claims: Claims) -> Self {
        Self { claims }
    }

    /// `sub` claim, or empty when the token carried none.
    pub fn subject(&self) -> &str {
        self.claims.sub.as_deref().unwrap_or_default()
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }
}
