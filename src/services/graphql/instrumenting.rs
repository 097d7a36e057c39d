use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::services::metrics::{Counter, Histogram, RequestLabels};

use super::context::RequestContext;
use super::service::{ExecError, GraphqlService};
use super::types::{GraphqlRequest, GraphqlResponse};

/// Counts requests and observes their latency.
///
/// Labels use the operation name as supplied, never a derived one.
pub struct InstrumentingService {
    request_count: Arc<dyn Counter>,
    request_latency: Arc<dyn Histogram>,
    next: Arc<dyn GraphqlService>,
}

impl InstrumentingService {
    pub fn new(
        request_count: Arc<dyn Counter>,
        request_latency: Arc<dyn Histogram>,
        next: Arc<dyn GraphqlService>,
    ) -> Self {
        Self {
            request_count,
            request_latency,
            next,
        }
    }
}

#[async_trait]
impl GraphqlService for InstrumentingService {
    async fn exec(
        &self,
        ctx: RequestContext,
        req: GraphqlRequest,
    ) -> Result<GraphqlResponse, ExecError> {
        let begin = Instant::now();
        let labels = RequestLabels {
            method: req.operation_name.clone(),
            client: ctx.subject().to_string(),
            query: req.query.clone(),
        };

        let result = self.next.exec(ctx, req).await;

        self.request_count.add(&labels, 1.0);
        self.request_latency
            .observe(&labels, begin.elapsed().as_secs_f64());

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::graphql::service::BaseService;
    use crate::services::graphql::testing::{RecordingEngine, RecordingMetrics};

    fn service(metrics: &RecordingMetrics) -> InstrumentingService {
        InstrumentingService::new(
            Arc::new(metrics.clone()),
            Arc::new(metrics.clone()),
            Arc::new(BaseService::new(Arc::new(RecordingEngine::default()))),
        )
    }

    #[tokio::test]
    async fn records_one_count_and_one_latency() {
        let metrics = RecordingMetrics::default();
        let req = GraphqlRequest::new("{ anyMethod }").with_operation_name("AnyOp");

        service(&metrics).exec(RequestContext::new(), req).await.unwrap();

        let counts = metrics.counts.lock().unwrap().clone();
        let latencies = metrics.latencies.lock().unwrap().clone();
        assert_eq!(counts.len(), 1);
        assert_eq!(latencies.len(), 1);
        assert_eq!(counts[0].1, 1.0);
        assert!(latencies[0].1 >= 0.0);
        assert_eq!(
            counts[0].0,
            RequestLabels {
                method: "AnyOp".into(),
                client: "Not Authenticated".into(),
                query: "{ anyMethod }".into(),
            }
        );
    }

    #[tokio::test]
    async fn does_not_derive_operation_name() {
        let metrics = RecordingMetrics::default();

        service(&metrics)
            .exec(RequestContext::new(), GraphqlRequest::new("{ anyMethod }"))
            .await
            .unwrap();

        assert_eq!(metrics.counts.lock().unwrap()[0].0.method, "");
    }
}
