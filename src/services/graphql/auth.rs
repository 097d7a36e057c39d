use std::sync::Arc;

use async_trait::async_trait;

use crate::services::auth::JwtVerifier;
use crate::services::blacklist::Blacklist;

use super::context::RequestContext;
use super::service::{ExecError, GraphqlService};
use super::types::{GraphqlRequest, GraphqlResponse};

/// Requires a verified bearer token unless the operation is in the bypass list.
///
/// On success the [`Identity`](crate::services::auth::Identity) is attached to
/// the context handed to `next`. On failure `next` is never called.
pub struct AuthenticatingService {
    verifier: JwtVerifier,
    bypass: Blacklist,
    next: Arc<dyn GraphqlService>,
}

impl AuthenticatingService {
    pub fn new(verifier: JwtVerifier, bypass: Blacklist, next: Arc<dyn GraphqlService>) -> Self {
        Self {
            verifier,
            bypass,
            next,
        }
    }
}

#[async_trait]
impl GraphqlService for AuthenticatingService {
    async fn exec(
        &self,
        ctx: RequestContext,
        req: GraphqlRequest,
    ) -> Result<GraphqlResponse, ExecError> {
        let operation = req.resolved_operation_name().into_owned();
        if self.bypass.contains(&operation) {
            return self.next.exec(ctx, req).await;
        }

        let identity = match self.verifier.verify(ctx.token()) {
            Ok(identity) => identity,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    method = %operation,
                    request_id = ctx.request_id(),
                    "access token verification failed"
                );
                return Err(err.into());
            }
        };

        self.next.exec(ctx.with_identity(identity), req).await
    }
}
