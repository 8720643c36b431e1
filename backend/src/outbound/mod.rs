//! Outbound adapters implementing the domain's driven ports.
//!
//! - `persistence`: PostgreSQL through Diesel.
//! - `memory`: in-process tables for fixture mode and tests.
//! - `identity`: GoTrue-compatible HTTP client and a fixture provider.
//! - `tickets`: QR scan reference generation.
//! - `metrics`: Prometheus exporters (behind the `metrics` feature).

pub mod identity;
pub mod memory;
#[cfg(feature = "metrics")]
pub mod metrics;
pub mod persistence;
pub mod tickets;
