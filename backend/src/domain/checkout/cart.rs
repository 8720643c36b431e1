//! Cart validation.
//!
//! Everything here runs before the store is touched: a cart that fails these
//! checks never causes a read or a write.

use std::collections::HashSet;

use crate::domain::OfferId;

/// Upper bound on tickets issued by a single checkout.
pub const MAX_TICKETS_PER_CHECKOUT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartValidationError {
    #[error("cart must contain at least one item")]
    Empty,
    #[error("item {index} must have a quantity greater than zero")]
    NonPositiveQuantity { index: usize },
    #[error("item {index} repeats offer {offer_id}; combine it into one line")]
    DuplicateOffer { index: usize, offer_id: OfferId },
    #[error("a checkout may issue at most {max} tickets")]
    TooManyTickets { max: u32 },
}

impl CartValidationError {
    /// Index of the offending line, when the error concerns one line.
    #[must_use]
    pub const fn line_index(&self) -> Option<usize> {
        match self {
            Self::NonPositiveQuantity { index } | Self::DuplicateOffer { index, .. } => {
                Some(*index)
            }
            Self::Empty | Self::TooManyTickets { .. } => None,
        }
    }
}

/// Raw cart line as received from a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLineDraft {
    pub offer_id: OfferId,
    pub quantity: i64,
}

/// Validated cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    offer_id: OfferId,
    quantity: u32,
}

impl CartLine {
    #[must_use]
    pub const fn offer_id(&self) -> OfferId {
        self.offer_id
    }

    /// Always greater than zero.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Non-empty cart with distinct offers and a bounded ticket count.
///
/// # Examples
/// ```
/// use box_office::domain::{Cart, CartLineDraft, OfferId};
///
/// let offer_id = OfferId::random();
/// let cart = Cart::try_from_drafts(vec![CartLineDraft { offer_id, quantity: 2 }]).unwrap();
/// assert_eq!(cart.ticket_count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Validate client input, preserving line order.
    ///
    /// A repeated offer id is rejected here as invalid input, before any
    /// catalogue lookup, rather than surfacing later as an unknown offer.
    ///
    /// # Errors
    /// Returns [`CartValidationError`] for empty carts, non-positive
    /// quantities, repeated offers, or more than
    /// [`MAX_TICKETS_PER_CHECKOUT`] tickets.
    pub fn try_from_drafts(drafts: Vec<CartLineDraft>) -> Result<Self, CartValidationError> {
        if drafts.is_empty() {
            return Err(CartValidationError::Empty);
        }

        let mut seen = HashSet::with_capacity(drafts.len());
        let mut total: u32 = 0;
        let mut lines = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.into_iter().enumerate() {
            if draft.quantity <= 0 {
                return Err(CartValidationError::NonPositiveQuantity { index });
            }
            if !seen.insert(draft.offer_id) {
                return Err(CartValidationError::DuplicateOffer {
                    index,
                    offer_id: draft.offer_id,
                });
            }
            let too_many = CartValidationError::TooManyTickets {
                max: MAX_TICKETS_PER_CHECKOUT,
            };
            let quantity = u32::try_from(draft.quantity).map_err(|_| too_many.clone())?;
            total = total
                .checked_add(quantity)
                .filter(|sum| *sum <= MAX_TICKETS_PER_CHECKOUT)
                .ok_or(too_many)?;
            lines.push(CartLine {
                offer_id: draft.offer_id,
                quantity,
            });
        }

        Ok(Self { lines })
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Distinct offer ids in line order.
    #[must_use]
    pub fn offer_ids(&self) -> Vec<OfferId> {
        self.lines.iter().map(CartLine::offer_id).collect()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn ticket_count(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft(offer_id: OfferId, quantity: i64) -> CartLineDraft {
        CartLineDraft { offer_id, quantity }
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(Cart::try_from_drafts(vec![]), Err(CartValidationError::Empty));
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn non_positive_quantities_are_rejected(#[case] quantity: i64) {
        let drafts = vec![draft(OfferId::random(), 1), draft(OfferId::random(), quantity)];
        let err = Cart::try_from_drafts(drafts).expect_err("quantity must be positive");
        assert_eq!(err, CartValidationError::NonPositiveQuantity { index: 1 });
        assert_eq!(err.line_index(), Some(1));
    }

    #[test]
    fn repeated_offers_are_rejected() {
        let offer_id = OfferId::random();
        let err = Cart::try_from_drafts(vec![draft(offer_id, 1), draft(offer_id, 2)])
            .expect_err("duplicates must fail");
        assert_eq!(err, CartValidationError::DuplicateOffer { index: 1, offer_id });
    }

    #[rstest]
    #[case(vec![101])]
    #[case(vec![60, 41])]
    #[case(vec![i64::from(u32::MAX) + 1])]
    fn oversized_carts_are_rejected(#[case] quantities: Vec<i64>) {
        let drafts = quantities
            .into_iter()
            .map(|quantity| draft(OfferId::random(), quantity))
            .collect();
        assert_eq!(
            Cart::try_from_drafts(drafts),
            Err(CartValidationError::TooManyTickets {
                max: MAX_TICKETS_PER_CHECKOUT
            })
        );
    }

    #[test]
    fn valid_cart_keeps_line_order() {
        let first = OfferId::random();
        let second = OfferId::random();
        let cart = Cart::try_from_drafts(vec![draft(first, 2), draft(second, 1)])
            .expect("valid cart");
        assert_eq!(cart.offer_ids(), vec![first, second]);
        assert_eq!(cart.ticket_count(), 3);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn exactly_the_limit_is_accepted() {
        let cart = Cart::try_from_drafts(vec![draft(OfferId::random(), 100)])
            .expect("limit is inclusive");
        assert_eq!(cart.ticket_count(), MAX_TICKETS_PER_CHECKOUT);
    }
}
