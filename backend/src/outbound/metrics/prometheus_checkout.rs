//! Prometheus adapter for checkout outcome metrics.
//!
//! Outcomes are exported as one counter with an `outcome` label and exposed
//! through the `/metrics` endpoint registered by the server.

use async_trait::async_trait;
use prometheus::{CounterVec, Opts, Registry};

use crate::domain::ports::{CheckoutMetrics, CheckoutMetricsError, CheckoutOutcome};

/// Prometheus-backed checkout outcome recorder.
///
/// # Metric Specification
///
/// - **Name**: `box_office_checkouts_total`
/// - **Type**: Counter
/// - **Labels**: `outcome` is `completed`, `rejected`, or `failed`
pub struct PrometheusCheckoutMetrics {
    checkouts_total: CounterVec,
}

impl PrometheusCheckoutMetrics {
    /// Create and register the counter with the given registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the metric cannot be registered, for example when
    /// a metric with the same name already exists in the registry.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let checkouts_total = CounterVec::new(
            Opts::new("box_office_checkouts_total", "Checkout attempts by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(checkouts_total.clone()))?;
        Ok(Self { checkouts_total })
    }
}

#[async_trait]
impl CheckoutMetrics for PrometheusCheckoutMetrics {
    async fn record(&self, outcome: CheckoutOutcome) -> Result<(), CheckoutMetricsError> {
        self.checkouts_total
            .get_metric_with_label_values(&[outcome.as_label()])
            .map_err(|err| CheckoutMetricsError::export(err.to_string()))?
            .inc();
        Ok(())
    }
}
