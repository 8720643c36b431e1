//! HTTP server configuration object.

use box_office::inbound::http::state::HttpState;

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

/// Everything `create_server` needs: where to listen and which adapters
/// back the handlers.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) http_state: HttpState,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: (String, u16), http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state,
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[cfg(feature = "metrics")]
    /// Attach Prometheus middleware to the configuration.
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}
