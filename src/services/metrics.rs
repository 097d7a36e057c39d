//! Request metrics sinks.
//!
//! The instrumenting layer only sees the [`Counter`] / [`Histogram`] traits;
//! [`PrometheusMetrics`] is the production backend and owns its own registry
//! (one per service, so several pipelines can coexist in one process).

use prometheus::{CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Label names, in the order values are supplied.
pub const FIELD_KEYS: [&str; 3] = ["method", "client", "query"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLabels {
    /// `operationName` exactly as supplied by the caller (may be empty).
    pub method: String,
    pub client: String,
    pub query: String,
}

impl RequestLabels {
    pub fn values(&self) -> [&str; 3] {
        [&self.method, &self.client, &self.query]
    }
}

/// Must tolerate concurrent use.
pub trait Counter: Send + Sync {
    fn add(&self, labels: &RequestLabels, value: f64);
}

/// Must tolerate concurrent use.
pub trait Histogram: Send + Sync {
    fn observe(&self, labels: &RequestLabels, seconds: f64);
}

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("metrics exposition is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Clone)]
pub struct PrometheusMetrics {
    registry: Registry,
    request_count: CounterVec,
    request_latency: HistogramVec,
}

impl std::fmt::Debug for PrometheusMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusMetrics").finish_non_exhaustive()
    }
}

impl PrometheusMetrics {
    pub fn new(namespace: &str, subsystem: &str) -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let request_count = CounterVec::new(
            Opts::new("request_count", "Number of requests received.")
                .namespace(namespace)
                .subsystem(subsystem),
            &FIELD_KEYS,
        )?;
        let request_latency = HistogramVec::new(
            HistogramOpts::new(
                "request_latency_seconds",
                "Total duration of requests in seconds.",
            )
            .namespace(namespace)
            .subsystem(subsystem),
            &FIELD_KEYS,
        )?;

        registry.register(Box::new(request_count.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;

        Ok(Self {
            registry,
            request_count,
            request_latency,
        })
    }

    /// Prometheus text exposition of everything in this registry.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl Counter for PrometheusMetrics {
    fn add(&self, labels: &RequestLabels, value: f64) {
        match self
            .request_count
            .get_metric_with_label_values(&labels.values())
        {
            Ok(counter) => counter.inc_by(value),
            Err(e) => tracing::warn!(error = %e, "request_count label mismatch"),
        }
    }
}

impl Histogram for PrometheusMetrics {
    fn observe(&self, labels: &RequestLabels, seconds: f64) {
        match self
            .request_latency
            .get_metric_with_label_values(&labels.values())
        {
            Ok(histogram) => histogram.observe(seconds),
            Err(e) => tracing::warn!(error = %e, "request_latency label mismatch"),
        }
    }
}
