//! Purchasable offers and their admin-side drafts.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use super::ids::OfferId;
use super::money::{Money, MoneyValidationError};

/// Maximum length of an offer name.
pub const OFFER_NAME_MAX: usize = 200;

/// Largest capacity an `INT4` column holds.
pub const OFFER_CAPACITY_MAX: u32 = i32::MAX.unsigned_abs();

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfferValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
    #[error("capacity must be at most {max}")]
    CapacityTooLarge { max: u32 },
    #[error("price is invalid: {0}")]
    Price(#[from] MoneyValidationError),
    #[error("update must change at least one field")]
    EmptyPatch,
}

/// Offer as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub id: OfferId,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Free-form category tag such as `pass` or `workshop`.
    #[serde(rename = "type")]
    pub category: String,
    pub image_url: Option<String>,
    /// Capacity limit; enforced by catalogue management, not checkout.
    pub max_attendees: u32,
    pub features: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Validated input for creating an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: String,
    pub image_url: Option<String>,
    pub max_attendees: u32,
    pub features: Vec<String>,
}

/// Raw creation fields as received from an adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferDraftParts {
    pub name: String,
    pub description: String,
    pub price: rust_decimal::Decimal,
    pub category: String,
    pub image_url: Option<String>,
    pub max_attendees: u32,
    pub features: Vec<String>,
}

impl OfferDraft {
    /// Validate raw offer fields.
    pub fn try_from_parts(parts: OfferDraftParts) -> Result<Self, OfferValidationError> {
        Ok(Self {
            name: validate_name(&parts.name)?,
            description: parts.description.trim().to_owned(),
            price: Money::new(parts.price)?,
            category: validate_category(&parts.category)?,
            image_url: normalise_optional(parts.image_url),
            max_attendees: validate_capacity(parts.max_attendees)?,
            features: normalise_features(parts.features),
        })
    }
}

/// Partial offer update. At least one field must be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub max_attendees: Option<u32>,
    pub features: Option<Vec<String>>,
}

/// Raw update fields as received from an adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferPatchParts {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<rust_decimal::Decimal>,
    pub category: Option<String>,
    pub image_url: Option<String>,
    pub max_attendees: Option<u32>,
    pub features: Option<Vec<String>>,
}

impl OfferPatch {
    /// Validate the present fields and reject an empty update.
    pub fn try_from_parts(parts: OfferPatchParts) -> Result<Self, OfferValidationError> {
        let patch = Self {
            name: parts.name.as_deref().map(validate_name).transpose()?,
            description: parts.description.map(|value| value.trim().to_owned()),
            price: parts.price.map(Money::new).transpose()?,
            category: parts.category.as_deref().map(validate_category).transpose()?,
            image_url: parts.image_url.map(|value| value.trim().to_owned()),
            max_attendees: parts.max_attendees.map(validate_capacity).transpose()?,
            features: parts.features.map(normalise_features),
        };
        if patch.is_empty() {
            return Err(OfferValidationError::EmptyPatch);
        }
        Ok(patch)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.image_url.is_none()
            && self.max_attendees.is_none()
            && self.features.is_none()
    }
}

fn validate_name(raw: &str) -> Result<String, OfferValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OfferValidationError::EmptyName);
    }
    if trimmed.chars().count() > OFFER_NAME_MAX {
        return Err(OfferValidationError::NameTooLong {
            max: OFFER_NAME_MAX,
        });
    }
    Ok(trimmed.to_owned())
}

fn validate_category(raw: &str) -> Result<String, OfferValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(OfferValidationError::EmptyCategory);
    }
    Ok(trimmed.to_owned())
}

const fn validate_capacity(value: u32) -> Result<u32, OfferValidationError> {
    if value == 0 {
        Err(OfferValidationError::ZeroCapacity)
    } else if value > OFFER_CAPACITY_MAX {
        Err(OfferValidationError::CapacityTooLarge {
            max: OFFER_CAPACITY_MAX,
        })
    } else {
        Ok(value)
    }
}

fn normalise_optional(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

fn normalise_features(features: Vec<String>) -> Vec<String> {
    features
        .into_iter()
        .map(|feature| feature.trim().to_owned())
        .filter(|feature| !feature.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn parts() -> OfferDraftParts {
        OfferDraftParts {
            name: " Festival pass ".to_owned(),
            description: "Three days".to_owned(),
            price: dec!(50.00),
            category: "pass".to_owned(),
            image_url: Some("  ".to_owned()),
            max_attendees: 500,
            features: vec!["Main stage".to_owned(), " ".to_owned()],
        }
    }

    #[rstest]
    fn draft_normalises_fields(parts: OfferDraftParts) {
        let draft = OfferDraft::try_from_parts(parts).expect("valid draft");
        assert_eq!(draft.name, "Festival pass");
        assert_eq!(draft.image_url, None);
        assert_eq!(draft.features, vec!["Main stage".to_owned()]);
        assert_eq!(draft.price.amount(), dec!(50.00));
    }

    #[rstest]
    fn draft_rejects_zero_capacity(mut parts: OfferDraftParts) {
        parts.max_attendees = 0;
        assert_eq!(
            OfferDraft::try_from_parts(parts),
            Err(OfferValidationError::ZeroCapacity)
        );
    }

    #[rstest]
    fn draft_rejects_capacity_beyond_storage(mut parts: OfferDraftParts) {
        parts.max_attendees = OFFER_CAPACITY_MAX + 1;
        assert_eq!(
            OfferDraft::try_from_parts(parts),
            Err(OfferValidationError::CapacityTooLarge {
                max: OFFER_CAPACITY_MAX
            })
        );
    }

    #[rstest]
    fn draft_accepts_capacity_at_storage_limit(mut parts: OfferDraftParts) {
        parts.max_attendees = OFFER_CAPACITY_MAX;
        let draft = OfferDraft::try_from_parts(parts).expect("valid draft");
        assert_eq!(draft.max_attendees, 2_147_483_647);
    }

    #[rstest]
    fn draft_rejects_price_beyond_storage(mut parts: OfferDraftParts) {
        parts.price = dec!(100000000.00);
        assert!(matches!(
            OfferDraft::try_from_parts(parts),
            Err(OfferValidationError::Price(MoneyValidationError::TooLarge { .. }))
        ));
    }

    #[rstest]
    fn draft_rejects_negative_price(mut parts: OfferDraftParts) {
        parts.price = dec!(-1);
        assert_eq!(
            OfferDraft::try_from_parts(parts),
            Err(OfferValidationError::Price(MoneyValidationError::Negative))
        );
    }

    #[test]
    fn patch_rejects_empty_update() {
        assert_eq!(
            OfferPatch::try_from_parts(OfferPatchParts::default()),
            Err(OfferValidationError::EmptyPatch)
        );
    }

    #[test]
    fn patch_rejects_capacity_beyond_storage() {
        let parts = OfferPatchParts {
            max_attendees: Some(u32::MAX),
            ..OfferPatchParts::default()
        };
        assert!(matches!(
            OfferPatch::try_from_parts(parts),
            Err(OfferValidationError::CapacityTooLarge { .. })
        ));
    }

    #[test]
    fn patch_validates_present_fields() {
        let parts = OfferPatchParts {
            name: Some("  ".to_owned()),
            ..OfferPatchParts::default()
        };
        assert_eq!(
            OfferPatch::try_from_parts(parts),
            Err(OfferValidationError::EmptyName)
        );
    }
}
