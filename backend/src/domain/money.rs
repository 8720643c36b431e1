//! Exact currency amounts.
//!
//! Prices and totals never touch floating point. Amounts are non-negative,
//! carry at most [`MAX_SCALE`] fractional digits, and never exceed
//! [`MAX_AMOUNT`], the largest value a `NUMERIC(10, 2)` column stores.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of fractional digits accepted for an amount.
pub const MAX_SCALE: u32 = 2;

/// Largest representable amount: 99,999,999.99.
// `Decimal::new` is not `const`; these parts encode mantissa 9_999_999_999, scale 2.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyValidationError {
    #[error("amount must not be negative")]
    Negative,
    #[error("amount must have at most {max} decimal places")]
    TooPrecise { max: u32 },
    #[error("amount must not exceed {max}")]
    TooLarge { max: Decimal },
}

/// Non-negative monetary amount.
///
/// # Examples
/// ```
/// use box_office::domain::Money;
/// use rust_decimal::Decimal;
///
/// let price = Money::new(Decimal::new(5000, 2)).unwrap();
/// let line = price.checked_times(2).unwrap();
/// assert_eq!(line.amount(), Decimal::new(10000, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    /// Validate an amount.
    ///
    /// # Errors
    /// Rejects negative amounts, amounts with more than two decimals, and
    /// amounts above [`MAX_AMOUNT`].
    pub fn new(amount: Decimal) -> Result<Self, MoneyValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyValidationError::Negative);
        }
        if amount.normalize().scale() > MAX_SCALE {
            return Err(MoneyValidationError::TooPrecise { max: MAX_SCALE });
        }
        if amount > MAX_AMOUNT {
            return Err(MoneyValidationError::TooLarge { max: MAX_AMOUNT });
        }
        Ok(Self(amount))
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, or `None` above [`MAX_AMOUNT`].
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0
            .checked_mul(Decimal::from(quantity))
            .and_then(Self::bounded)
    }

    /// Sum of two amounts, or `None` above [`MAX_AMOUNT`].
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).and_then(Self::bounded)
    }

    fn bounded(amount: Decimal) -> Option<Self> {
        (amount <= MAX_AMOUNT).then_some(Self(amount))
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(-0.01), MoneyValidationError::Negative)]
    #[case(dec!(1.005), MoneyValidationError::TooPrecise { max: MAX_SCALE })]
    #[case(dec!(100000000.00), MoneyValidationError::TooLarge { max: MAX_AMOUNT })]
    fn rejects_invalid_amounts(#[case] amount: Decimal, #[case] expected: MoneyValidationError) {
        assert_eq!(Money::new(amount), Err(expected));
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(50.00))]
    #[case(dec!(19.5))]
    #[case(dec!(30.100))]
    #[case(dec!(99999999.99))]
    fn accepts_valid_amounts(#[case] amount: Decimal) {
        assert_eq!(Money::new(amount).map(Money::amount), Ok(amount));
    }

    #[test]
    fn arithmetic_is_exact() {
        let tenth = Money::new(dec!(0.10)).expect("valid amount");
        let total = (0..3).try_fold(Money::zero(), |acc, _| acc.checked_add(tenth));
        assert_eq!(total.map(Money::amount), Some(dec!(0.30)));
    }

    #[test]
    fn max_amount_is_the_numeric_column_limit() {
        assert_eq!(MAX_AMOUNT, dec!(99999999.99));
    }

    #[test]
    fn multiplication_beyond_max_amount_is_reported() {
        let top = Money::new(MAX_AMOUNT).expect("valid amount");
        assert!(top.checked_times(100).is_none());
        assert_eq!(top.checked_times(1), Some(top));
    }

    #[test]
    fn addition_beyond_max_amount_is_reported() {
        let top = Money::new(MAX_AMOUNT).expect("valid amount");
        let cent = Money::new(dec!(0.01)).expect("valid amount");
        assert!(top.checked_add(cent).is_none());
    }

    #[test]
    fn displays_two_decimals() {
        let price = Money::new(dec!(130)).expect("valid amount");
        assert_eq!(price.to_string(), "130.00");
    }

    #[test]
    fn serialises_as_decimal_string() {
        let price = Money::new(dec!(50.00)).expect("valid amount");
        let json = serde_json::to_string(&price).expect("serialise");
        assert_eq!(json, "\"50.00\"");
    }
}
