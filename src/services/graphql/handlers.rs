/*
 * Responsibility
 * - 設定値 (engine / logger / metrics / auth / 各 blacklist) を集める
 * - build() で immutable な decorator chain を組み立てる
 *   順序 (外側から): Authentication → Instrumenting → Logging → Base
 * - build 後は再構成しない
 */
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::services::audit::AuditLogger;
use crate::services::auth::JwtVerifier;
use crate::services::blacklist::{Blacklist, VariableRedaction};
use crate::services::metrics::{Counter, Histogram};

use super::auth::AuthenticatingService;
use super::engine::Engine;
use super::instrumenting::InstrumentingService;
use super::logging::{LoggingRules, LoggingService};
use super::service::{BaseService, GraphqlService};

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("no execution engine configured")]
    MissingEngine,
}

struct Instruments {
    request_count: Arc<dyn Counter>,
    request_latency: Arc<dyn Histogram>,
}

/// Collects the services and lists that make up a pipeline.
///
/// List setters append; calling one twice accumulates both lists.
#[derive(Default)]
pub struct GraphqlHandlers {
    engine: Option<Arc<dyn Engine>>,
    logger: Option<Arc<dyn AuditLogger>>,
    instruments: Option<Instruments>,
    verifier: Option<JwtVerifier>,
    log_blacklist: Vec<String>,
    log_full_blacklist: Vec<String>,
    log_variables_blacklist: HashMap<String, Vec<String>>,
    auth_blacklist: Vec<String>,
}

impl GraphqlHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_graphql_service(&mut self, engine: Arc<dyn Engine>) -> &mut Self {
        self.engine = Some(engine);
        self
    }

    pub fn add_logging_service(&mut self, logger: Arc<dyn AuditLogger>) -> &mut Self {
        self.logger = Some(logger);
        self
    }

    pub fn add_instrumenting_service(
        &mut self,
        request_count: Arc<dyn Counter>,
        request_latency: Arc<dyn Histogram>,
    ) -> &mut Self {
        self.instruments = Some(Instruments {
            request_count,
            request_latency,
        });
        self
    }

    pub fn add_authentication_service(&mut self, verifier: JwtVerifier) -> &mut Self {
        self.verifier = Some(verifier);
        self
    }

    /// Operations logged only when they fail.
    pub fn add_logging_blacklist<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log_blacklist.extend(methods.into_iter().map(Into::into));
        self
    }

    /// Operations never logged, with or without errors.
    pub fn add_logging_full_blacklist<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.log_full_blacklist
            .extend(methods.into_iter().map(Into::into));
        self
    }

    /// Variables redacted from the log, per operation.
    pub fn add_logging_variables_blacklist<I, K, V, S>(&mut self, entries: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (method, variables) in entries {
            self.log_variables_blacklist
                .entry(method.into())
                .or_default()
                .extend(variables.into_iter().map(Into::into));
        }
        self
    }

    /// Operations that skip authentication.
    pub fn add_auth_blacklist<I, S>(&mut self, methods: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auth_blacklist.extend(methods.into_iter().map(Into::into));
        self
    }

    /// Freeze the configuration into the decorator chain.
    pub fn build(&self) -> Result<Arc<dyn GraphqlService>, BuildError> {
        let engine = self.engine.clone().ok_or(BuildError::MissingEngine)?;
        let mut service: Arc<dyn GraphqlService> = Arc::new(BaseService::new(engine));

        if let Some(logger) = &self.logger {
            let rules = LoggingRules {
                suppress_on_success: Blacklist::new(&self.log_blacklist),
                suppress_always: Blacklist::new(&self.log_full_blacklist),
                redaction: VariableRedaction::new(
                    self.log_variables_blacklist
                        .iter()
                        .map(|(method, vars)| (method, vars.iter().cloned())),
                ),
            };
            service = Arc::new(LoggingService::new(logger.clone(), rules, service));
        }

        if let Some(instruments) = &self.instruments {
            service = Arc::new(InstrumentingService::new(
                instruments.request_count.clone(),
                instruments.request_latency.clone(),
                service,
            ));
        }

        if let Some(verifier) = &self.verifier {
            service = Arc::new(AuthenticatingService::new(
                verifier.clone(),
                Blacklist::new(&self.auth_blacklist),
                service,
            ));
        }

        tracing::debug!(
            logging = self.logger.is_some(),
            instrumenting = self.instruments.is_some(),
            authentication = self.verifier.is_some(),
            "graphql pipeline built"
        );

        Ok(service)
    }
}
