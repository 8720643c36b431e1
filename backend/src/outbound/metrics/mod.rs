//! Outbound adapters for metrics exporting.
//!
//! Prometheus-backed implementations of domain metrics ports, all
//! feature-gated behind the `metrics` feature.

mod prometheus_checkout;

pub use prometheus_checkout::PrometheusCheckoutMetrics;
