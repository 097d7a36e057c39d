/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - service: 組み立て済みの decorator chain (immutable)
 *   - metrics: /metrics で公開する registry (instrumenting 有効時のみ)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::graphql::GraphqlService;
use crate::services::metrics::PrometheusMetrics;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn GraphqlService>,
    pub metrics: Option<Arc<PrometheusMetrics>>,
}

impl AppState {
    pub fn new(service: Arc<dyn GraphqlService>, metrics: Option<Arc<PrometheusMetrics>>) -> Self {
        Self { service, metrics }
    }
}
