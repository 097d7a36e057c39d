//! Transport layers wrapped around every GraphQL, health and metrics route.
//!
//! The GraphQL decorator chain never sees these: a request rejected here
//! (oversized body, timed out) is neither authenticated, audited nor counted.
//!
//! Layers, outermost first:
//! - `X-Request-Id` assignment; the id is echoed on the response and copied
//!   into the audit record
//! - request body cap (`HTTP_BODY_LIMIT_BYTES`)
//! - deadline for the whole pipeline including the engine (`HTTP_TIMEOUT_SECONDS`)
//! - `tower_http` request spans

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::v1::extractors::REQUEST_ID_HEADER;
use crate::config::HttpConfig;

pub fn apply(router: Router, config: &HttpConfig) -> Router {
    let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            transport_status(&err)
        }))
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(config.body_limit_bytes))
        // A cancelled request drops every decorator and the engine future with it.
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeout_seconds)))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

/// Status for a request the transport gave up on.
fn transport_status(err: &BoxError) -> StatusCode {
    if err.is::<tower::timeout::error::Elapsed>() {
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "graphql transport failure");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
