//! Salary Model

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Salary as received on the wire
///
/// JSON carries salaries as plain numbers. A number that has no non-zero
/// [`Decimal`] form (magnitude above ~7.9e28, or a non-zero value that
/// rounds away below 1e-28) is kept as `OutOfRange` so validation can
/// reject it for what it is instead of treating it as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Salary {
    Amount(Decimal),
    OutOfRange(f64),
}

impl Salary {
    pub const ZERO: Salary = Salary::Amount(Decimal::ZERO);

    pub fn from_f64(value: f64) -> Self {
        if value == 0.0 {
            return Self::ZERO;
        }
        match Decimal::from_f64(value) {
            Some(amount) if !amount.is_zero() => Self::Amount(amount),
            _ => Self::OutOfRange(value),
        }
    }

    /// The decimal amount, if representable
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Amount(amount) => Some(*amount),
            Self::OutOfRange(_) => None,
        }
    }

    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Amount(amount) => amount.to_f64().unwrap_or(f64::NAN),
            Self::OutOfRange(value) => *value,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Amount(amount) if amount.is_zero())
    }
}

impl Default for Salary {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<Decimal> for Salary {
    fn from(amount: Decimal) -> Self {
        Self::Amount(amount)
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(amount) => write!(f, "{amount}"),
            Self::OutOfRange(value) => write!(f, "{value}"),
        }
    }
}

impl Serialize for Salary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Salary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_integers_and_floats() {
        let s: Salary = serde_json::from_str("50000").unwrap();
        assert_eq!(s, Salary::Amount(Decimal::from(50000)));
        let s: Salary = serde_json::from_str("1234.5").unwrap();
        assert_eq!(s, Salary::Amount(Decimal::new(12345, 1)));
        let s: Salary = serde_json::from_str("-0.5").unwrap();
        assert_eq!(s.amount(), Some(Decimal::new(-5, 1)));
        assert!(serde_json::from_str::<Salary>("\"a lot\"").is_err());
    }

    #[test]
    fn test_zero_stays_zero() {
        assert!(Salary::from_f64(0.0).is_zero());
        assert!(Salary::from_f64(-0.0).is_zero());
        assert!(Salary::default().is_zero());
    }

    #[test]
    fn test_unrepresentable_values_are_kept_out_of_range() {
        let tiny: Salary = serde_json::from_str("1e-30").unwrap();
        assert_eq!(tiny, Salary::OutOfRange(1e-30));
        assert!(!tiny.is_zero());

        let huge: Salary = serde_json::from_str("1e29").unwrap();
        assert_eq!(huge, Salary::OutOfRange(1e29));
        assert_eq!(huge.amount(), None);
    }

    #[test]
    fn test_encodes_as_number() {
        let value = serde_json::to_value(Salary::Amount(Decimal::new(12345, 1))).unwrap();
        assert_eq!(value, serde_json::json!(1234.5));
        let value = serde_json::to_value(Salary::OutOfRange(1e29)).unwrap();
        assert_eq!(value, serde_json::json!(1e29));
    }
}
