//! Recording fakes shared by the decorator tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::services::audit::{AuditLogger, AuditRecord};
use crate::services::metrics::{Counter, Histogram, RequestLabels};

use super::context::RequestContext;
use super::engine::Engine;
use super::types::GraphqlResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineCall {
    pub subject: String,
    pub query: String,
    pub operation_name: String,
    pub variables: Option<Map<String, Value>>,
}

#[derive(Clone, Default)]
pub struct RecordingEngine {
    pub response: GraphqlResponse,
    pub calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl RecordingEngine {
    pub fn answering(response: GraphqlResponse) -> Self {
        Self {
            response,
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Engine for RecordingEngine {
    async fn execute(
        &self,
        ctx: &RequestContext,
        query: &str,
        operation_name: &str,
        variables: Option<&Map<String, Value>>,
    ) -> GraphqlResponse {
        self.calls.lock().unwrap().push(EngineCall {
            subject: ctx.subject().to_string(),
            query: query.to_string(),
            operation_name: operation_name.to_string(),
            variables: variables.cloned(),
        });
        self.response.clone()
    }
}

#[derive(Clone, Default)]
pub struct RecordingAuditLogger {
    pub records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl RecordingAuditLogger {
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl AuditLogger for RecordingAuditLogger {
    fn log(&self, record: &AuditRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

#[derive(Clone, Default)]
pub struct RecordingMetrics {
    pub counts: Arc<Mutex<Vec<(RequestLabels, f64)>>>,
    pub latencies: Arc<Mutex<Vec<(RequestLabels, f64)>>>,
}

impl Counter for RecordingMetrics {
    fn add(&self, labels: &RequestLabels, value: f64) {
        self.counts.lock().unwrap().push((labels.clone(), value));
    }
}

impl Histogram for RecordingMetrics {
    fn observe(&self, labels: &RequestLabels, seconds: f64) {
        self.latencies.lock().unwrap().push((labels.clone(), seconds));
    }
}
