//! Scan reference generation for issued tickets.
//!
//! References are links to a QR rendering service with a random UUID token
//! as payload, so a ticket can be displayed and scanned without any extra
//! lookup on our side.

use url::Url;
use uuid::Uuid;

use crate::domain::ScanReference;
use crate::domain::ports::ScanReferenceGenerator;

/// Public QR code rendering endpoint used when none is configured.
pub const DEFAULT_QR_BASE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
/// Rendered image size used when none is configured.
pub const DEFAULT_QR_SIZE: &str = "100x100";

/// Builds `{base}?data={token}&size={size}` references.
#[derive(Debug, Clone)]
pub struct QrCodeReferenceGenerator {
    base_url: Url,
    size: String,
}

impl QrCodeReferenceGenerator {
    pub fn new(base_url: Url, size: impl Into<String>) -> Self {
        Self {
            base_url,
            size: size.into(),
        }
    }

    /// Render the reference for a given token.
    #[must_use]
    pub fn reference_for(&self, token: Uuid) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("data", &token.to_string())
            .append_pair("size", &self.size);
        url
    }
}

impl ScanReferenceGenerator for QrCodeReferenceGenerator {
    fn next_reference(&self) -> ScanReference {
        ScanReference::from_url(&self.reference_for(Uuid::new_v4()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn default_generator() -> QrCodeReferenceGenerator {
        let base = Url::parse(DEFAULT_QR_BASE_URL).expect("default base url parses");
        QrCodeReferenceGenerator::new(base, DEFAULT_QR_SIZE)
    }

    #[test]
    fn default_reference_matches_qr_service_shape() {
        let generator = default_generator();
        let url = generator.reference_for(Uuid::nil());
        assert_eq!(
            url.as_str(),
            "https://api.qrserver.com/v1/create-qr-code/?data=00000000-0000-0000-0000-000000000000&size=100x100"
        );
    }

    #[test]
    fn custom_base_and_size_are_used() {
        let base = Url::parse("https://qr.example.test/render").expect("valid url");
        let generator = QrCodeReferenceGenerator::new(base, "250x250");
        let reference = generator.next_reference();
        let parsed = Url::parse(reference.as_str()).expect("reference is a url");
        assert_eq!(parsed.host_str(), Some("qr.example.test"));
        let size = parsed
            .query_pairs()
            .find(|(key, _)| key == "size")
            .map(|(_, value)| value.into_owned());
        assert_eq!(size.as_deref(), Some("250x250"));
    }

    #[test]
    fn references_are_unique() {
        let generator = default_generator();
        let references: HashSet<_> = (0..64).map(|_| generator.next_reference()).collect();
        assert_eq!(references.len(), 64);
    }
}
