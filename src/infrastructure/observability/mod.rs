//! Observability infrastructure - Prometheus metrics

mod metrics;

pub use self::metrics::{init_metrics, record_chat_payload, record_http_request, PrometheusMetrics};
