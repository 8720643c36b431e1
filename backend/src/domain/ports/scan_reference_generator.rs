//! Driven port producing scannable ticket references.

use crate::domain::ScanReference;

/// Source of fresh, globally unique scan references.
///
/// Kept separate from settlement so the encoding (QR service URL, signed
/// token, barcode payload) can change without touching checkout.
#[cfg_attr(test, mockall::automock)]
pub trait ScanReferenceGenerator: Send + Sync {
    fn next_reference(&self) -> ScanReference;
}
