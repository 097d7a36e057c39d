use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::services::auth::AuthError;

use super::context::RequestContext;
use super::engine::Engine;
use super::types::{GraphqlRequest, GraphqlResponse};

/// Transport-level failures a layer can produce. Query-level errors travel
/// inside [`GraphqlResponse::errors`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// The execution contract shared by the base service and every decorator.
#[async_trait]
pub trait GraphqlService: Send + Sync {
    async fn exec(
        &self,
        ctx: RequestContext,
        req: GraphqlRequest,
    ) -> Result<GraphqlResponse, ExecError>;
}

/// Innermost link: forwards to the engine unchanged.
pub struct BaseService {
    engine: Arc<dyn Engine>,
}

impl BaseService {
    pub fn new(engine: Arc<dyn Engine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl GraphqlService for BaseService {
    async fn exec(
        &self,
        ctx: RequestContext,
        req: GraphqlRequest,
    ) -> Result<GraphqlResponse, ExecError> {
        Ok(self
            .engine
            .execute(
                &ctx,
                &req.query,
                &req.operation_name,
                req.variables.as_ref(),
            )
            .await)
    }
}
