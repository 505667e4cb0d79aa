//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use metrics::{
    create_metrics_router, init_metrics, record_cache_invalidation, record_cache_lookup,
    record_http_request, PrometheusMetrics,
};
