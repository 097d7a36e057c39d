use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::services::operation_name;

/// Canonical request: `{query, operationName, variables}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlRequest {
    #[serde(default)]
    pub query: String,
    #[serde(
        rename = "operationName",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub operation_name: String,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl GraphqlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = operation_name.into();
        self
    }

    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }

    /// The supplied operation name, or the one derived from the query text
    /// when none was supplied. Never modifies the request.
    pub fn resolved_operation_name(&self) -> Cow<'_, str> {
        if self.operation_name.is_empty() {
            Cow::Owned(operation_name::extract(&self.query))
        } else {
            Cow::Borrowed(&self.operation_name)
        }
    }
}

/// Query-level error reported by the engine. Not a transport failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl GraphqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }
}

/// Execution result: `{data, errors}`. Empty `errors` means success.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphqlError>,
}

impl GraphqlResponse {
    pub fn data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    pub fn errors(errors: Vec<GraphqlError>) -> Self {
        Self { data: None, errors }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}
