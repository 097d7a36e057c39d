use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::services::operation_name;

use super::context::RequestContext;
use super::types::GraphqlResponse;

/// Query-execution collaborator (schema, resolvers, result shaping).
///
/// May block for arbitrarily long; cancellation happens by dropping the future.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn execute(
        &self,
        ctx: &RequestContext,
        query: &str,
        operation_name: &str,
        variables: Option<&Map<String, Value>>,
    ) -> GraphqlResponse;
}

/// Development engine: answers every request with its variables under the
/// operation name, e.g. `{"data":{"login":{"user":"a"}}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoEngine;

#[async_trait]
impl Engine for EchoEngine {
    async fn execute(
        &self,
        _ctx: &RequestContext,
        query: &str,
        operation_name: &str,
        variables: Option<&Map<String, Value>>,
    ) -> GraphqlResponse {
        let field = if operation_name.is_empty() {
            operation_name::extract(query)
        } else {
            operation_name.to_string()
        };
        let echoed = variables.cloned().map(Value::Object).unwrap_or(Value::Null);

        let mut data = Map::new();
        data.insert(field, echoed);
        GraphqlResponse::data(Value::Object(data))
    }
}
