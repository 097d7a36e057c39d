use crate::services::auth::Identity;

/// Subject reported when no verified identity is present.
pub const NOT_AUTHENTICATED: &str = "Not Authenticated";

/// Per-request values passed down the decorator chain.
///
/// Each layer receives the context by value and hands it (possibly extended)
/// to the next one. Nothing here outlives the request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: Option<String>,
    identity: Option<Identity>,
    request_id: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub(crate) fn with_identity(mut self, identity: Identity) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Raw bearer token as received, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Verified subject, or [`NOT_AUTHENTICATED`].
    pub fn subject(&self) -> &str {
        self.identity
            .as_ref()
            .map(Identity::subject)
            .unwrap_or(NOT_AUTHENTICATED)
    }
}
