//! GraphQL execution pipeline: the execution contract, its decorators and
//! the builder that composes them.

pub mod auth;
pub mod context;
pub mod engine;
pub mod handlers;
pub mod instrumenting;
pub mod logging;
pub mod service;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{NOT_AUTHENTICATED, RequestContext};
pub use engine::{EchoEngine, Engine};
pub use handlers::{BuildError, GraphqlHandlers};
pub use service::{ExecError, GraphqlService};
pub use types::{GraphqlError, GraphqlRequest, GraphqlResponse};
