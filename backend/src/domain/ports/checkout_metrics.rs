//! Port for recording checkout outcomes.

use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors exposed when recording checkout metrics.
    pub enum CheckoutMetricsError {
        /// Metric exporter rejected the write.
        Export { message: String } => "checkout metrics exporter failed: {message}",
    }
}

/// Final state of a checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutOutcome {
    /// Everything committed and the receipt checked out.
    Completed,
    /// Refused before any write: bad cart or unknown offers.
    Rejected,
    /// The write sequence failed or the store was unavailable.
    Failed,
}

impl CheckoutOutcome {
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutMetrics: Send + Sync {
    async fn record(&self, outcome: CheckoutOutcome) -> Result<(), CheckoutMetricsError>;
}

/// Discards every outcome; used when metrics are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpCheckoutMetrics;

#[async_trait]
impl CheckoutMetrics for NoOpCheckoutMetrics {
    async fn record(&self, _outcome: CheckoutOutcome) -> Result<(), CheckoutMetricsError> {
        Ok(())
    }
}
