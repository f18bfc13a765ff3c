//! Asset amounts.
//!
//! Hosts hand amounts over as decimal strings. The ledger only accepts
//! non-negative signed 64-bit integers, so parsing happens once at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A non-negative amount of some asset, in the asset's smallest unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Largest amount the ledger stores.
    pub const MAX: Self = Self(i64::MAX as u64);

    pub fn new(units: u64) -> Self {
        Self(units)
    }

    pub fn units(&self) -> u64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(TypesError::EmptyAmount);
        }
        let invalid = |reason: String| TypesError::InvalidAmount {
            input: s.to_string(),
            reason,
        };
        let units = trimmed.parse::<u64>().map_err(|e| invalid(e.to_string()))?;
        if units > Self::MAX.0 {
            return Err(invalid(format!("exceeds the maximum amount {}", Self::MAX)));
        }
        Ok(Self(units))
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimal() {
        assert_eq!("100".parse::<Amount>().unwrap(), Amount::new(100));
        assert_eq!(" 42 ".parse::<Amount>().unwrap(), Amount::new(42));
    }

    #[test]
    fn rejects_negative_and_garbage() {
        assert!(matches!(
            "-5".parse::<Amount>(),
            Err(TypesError::InvalidAmount { .. })
        ));
        assert!("12.5".parse::<Amount>().is_err());
        assert!("ten".parse::<Amount>().is_err());
        assert_eq!("".parse::<Amount>(), Err(TypesError::EmptyAmount));
        assert_eq!("   ".parse::<Amount>(), Err(TypesError::EmptyAmount));
    }

    #[test]
    fn bounded_by_signed_64_bit_range() {
        assert_eq!("9223372036854775807".parse::<Amount>().unwrap(), Amount::MAX);
        let err = "9223372036854775808".parse::<Amount>().unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum amount"), "{err}");
        assert!("18446744073709551615".parse::<Amount>().is_err());
    }

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&Amount::new(1500)).unwrap();
        assert_eq!(json, "1500");
        let back: Amount = serde_json::from_str("1500").unwrap();
        assert_eq!(back.units(), 1500);
    }
}
