/*
 * Responsibility
 * - Config読み込み → 依存生成 (decorator chain / metrics) → Router 組み立て
 * - Middleware の適用 (request-id / trace / limit / timeout)
 * - axum::serve() で起動
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::{Config, HttpConfig};
use crate::middleware;
use crate::services::audit::TracingAuditLogger;
use crate::services::auth::build_verifier;
use crate::services::graphql::{EchoEngine, Engine, GraphqlHandlers};
use crate::services::metrics::PrometheusMetrics;
use crate::state::AppState;

fn init_tracing() {
    // Audit records go out on the `graphql_kit::audit` target, so they can be
    // filtered apart from request spans:
    // RUST_LOG=warn,graphql_kit::audit=info,tower_http=debug
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic while serving graphql");

        // Development: a panicking engine takes the server down. Production
        // only loses the connection that panicked.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting graphql service in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config, Arc::new(EchoEngine))?;
    let app = build_router(state, &config.http);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Wire the decorator chain from configuration around `engine`.
pub fn build_state(config: &Config, engine: Arc<dyn Engine>) -> Result<AppState> {
    let mut handlers = GraphqlHandlers::new();
    handlers.add_graphql_service(engine);

    if config.logging.enabled {
        handlers
            .add_logging_service(Arc::new(TracingAuditLogger))
            .add_logging_blacklist(config.logging.blacklist.iter().cloned())
            .add_logging_full_blacklist(config.logging.full_blacklist.iter().cloned())
            .add_logging_variables_blacklist(config.logging.variables_blacklist.clone());
    }

    let metrics = match &config.metrics.namespace {
        Some(namespace) => {
            let metrics = Arc::new(
                PrometheusMetrics::new(namespace, &config.metrics.subsystem)
                    .context("failed to register request metrics")?,
            );
            handlers.add_instrumenting_service(metrics.clone(), metrics.clone());
            Some(metrics)
        }
        None => None,
    };

    if let Some(verifier) = build_verifier(&config.auth)? {
        tracing::info!(algorithm = ?verifier.algorithm(), "bearer authentication enabled");
        handlers
            .add_authentication_service(verifier)
            .add_auth_blacklist(config.auth.blacklist.iter().cloned());
    }

    let service = handlers.build()?;
    Ok(AppState::new(service, metrics))
}

pub fn build_router(state: AppState, http: &HttpConfig) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .merge(api::v1::routes())
        .with_state(state);

    middleware::http::apply(router, http)
}
