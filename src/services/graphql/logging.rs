use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::services::audit::{AuditLogger, AuditRecord};
use crate::services::blacklist::{Blacklist, VariableRedaction};

use super::context::RequestContext;
use super::service::{ExecError, GraphqlService};
use super::types::{GraphqlRequest, GraphqlResponse};

/// Suppression tiers and redaction rules for [`LoggingService`].
#[derive(Debug, Clone, Default)]
pub struct LoggingRules {
    /// Logged only when the call fails.
    pub suppress_on_success: Blacklist,
    /// Never logged.
    pub suppress_always: Blacklist,
    pub redaction: VariableRedaction,
}

/// Writes one audit record per request, after the result is known.
pub struct LoggingService {
    logger: Arc<dyn AuditLogger>,
    rules: LoggingRules,
    next: Arc<dyn GraphqlService>,
}

impl LoggingService {
    pub fn new(
        logger: Arc<dyn AuditLogger>,
        rules: LoggingRules,
        next: Arc<dyn GraphqlService>,
    ) -> Self {
        Self {
            logger,
            rules,
            next,
        }
    }

    fn should_log(&self, operation: &str, succeeded: bool) -> bool {
        if self.rules.suppress_always.contains(operation) {
            return false;
        }
        !(succeeded && self.rules.suppress_on_success.contains(operation))
    }

    fn record(
        &self,
        operation: String,
        subject: String,
        request_id: Option<String>,
        req: &GraphqlRequest,
        result: &Result<GraphqlResponse, ExecError>,
        begin: Instant,
    ) -> AuditRecord {
        let variables = req
            .variables
            .as_ref()
            .map(|vars| self.rules.redaction.redact(&operation, vars));
        let variables = serde_json::to_string(&variables)
            .unwrap_or_else(|e| format!("error marshaling variables to json: {e}"));

        let (error, response) = match result {
            Ok(res) => {
                let error = (!res.errors.is_empty()).then(|| {
                    let messages = res
                        .errors
                        .iter()
                        .map(|e| e.message.as_str())
                        .collect::<Vec<_>>();
                    format!("request error: [{}]", messages.join(", "))
                });
                let response = serde_json::to_string(res)
                    .unwrap_or_else(|e| format!("error marshaling response to json: {e}"));
                (error, response)
            }
            Err(err) => (Some(err.to_string()), "null".to_string()),
        };

        AuditRecord {
            user: subject,
            method: operation,
            query: req.query.clone(),
            variables,
            took: begin.elapsed(),
            error,
            response,
            request_id,
        }
    }
}

#[async_trait]
impl GraphqlService for LoggingService {
    async fn exec(
        &self,
        ctx: RequestContext,
        req: GraphqlRequest,
    ) -> Result<GraphqlResponse, ExecError> {
        let begin = Instant::now();
        let subject = ctx.subject().to_string();
        let request_id = ctx.request_id().map(str::to_string);

        let result = self.next.exec(ctx, req.clone()).await;

        let succeeded = matches!(&result, Ok(res) if res.is_success());
        let operation = req.resolved_operation_name().into_owned();
        if self.should_log(&operation, succeeded) {
            let record = self.record(operation, subject, request_id, &req, &result, begin);
            self.logger.log(&record);
        }

        result
    }
}
