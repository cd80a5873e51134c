//! Value object trait: equality by value, not identity.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// Non-negative catalog price.
///
/// Stored as a decimal so `50` and `50.00` compare equal; rendered with two
/// fractional digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "price cannot be negative: {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Price from minor currency units (e.g. cents).
    ///
    /// Takes `u32` so the amount always fits the decimal mantissa as a
    /// non-negative value.
    pub fn from_minor_units(minor: u32) -> Self {
        Self(Decimal::new(i64::from(minor), 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(value: Price) -> Self {
        value.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::validation(format!("price: {e}")))?;
        Self::new(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn price_renders_two_decimals() {
        let price = Price::new(Decimal::from(50)).unwrap();
        assert_eq!(price.to_string(), "50.00");
    }

    #[test]
    fn equal_amounts_with_different_scale_are_equal() {
        let a: Price = "50".parse().unwrap();
        let b: Price = "50.00".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn negative_price_is_rejected() {
        let err = "-1.00".parse::<Price>().unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn largest_minor_amount_stays_non_negative() {
        let price = Price::from_minor_units(u32::MAX);
        assert!(!price.amount().is_sign_negative());
        assert_eq!(price.to_string(), "42949672.95");
        assert_eq!(Price::new(price.amount()), Ok(price));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any minor-unit amount renders back to the same cents.
        #[test]
        fn minor_units_render_exactly(minor in 0u32..10_000_000u32) {
            let price = Price::from_minor_units(minor);
            prop_assert_eq!(price.to_string(), format!("{}.{:02}", minor / 100, minor % 100));
        }
    }
}
