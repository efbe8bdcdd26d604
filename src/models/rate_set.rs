//! Consumption-tax rate set.
//!
//! This module defines the [`RateSet`] holding the simulated CBS and IBS
//! percentages that the operator can adjust and persist.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The default CBS percentage (12%).
pub const DEFAULT_CBS_RATE: Decimal = Decimal::from_parts(1200, 0, 0, false, 2);

/// The default IBS percentage (8%).
pub const DEFAULT_IBS_RATE: Decimal = Decimal::from_parts(800, 0, 0, false, 2);

/// The highest percentage accepted for either rate.
pub const MAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places a rate may carry.
pub const RATE_DECIMAL_PLACES: u32 = 2;

/// The simulated consumption-tax rates, expressed as percentages.
///
/// Both rates are written to the rates file as plain JSON numbers
/// (`{"cbs_rate": 0.9, "ibs_rate": 2.0}`).
///
/// # Example
///
/// ```
/// use payroll_engine::models::RateSet;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rates = RateSet::new(
///     Decimal::from_str("0.9").unwrap(),
///     Decimal::from_str("2.0").unwrap(),
/// )
/// .unwrap();
/// assert_eq!(rates.cbs_rate, Decimal::from_str("0.9").unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateSet {
    /// CBS (Contribuição sobre Bens e Serviços) percentage.
    #[serde(with = "percent")]
    pub cbs_rate: Decimal,
    /// IBS (Imposto sobre Bens e Serviços) percentage.
    #[serde(with = "percent")]
    pub ibs_rate: Decimal,
}

impl Default for RateSet {
    fn default() -> Self {
        Self {
            cbs_rate: DEFAULT_CBS_RATE,
            ibs_rate: DEFAULT_IBS_RATE,
        }
    }
}

impl RateSet {
    /// Creates a validated rate set.
    ///
    /// Returns `InvalidRate` if either percentage is negative or above 100.
    pub fn new(cbs_rate: Decimal, ibs_rate: Decimal) -> EngineResult<Self> {
        let rates = Self { cbs_rate, ibs_rate };
        rates.validate()?;
        Ok(rates)
    }

    /// Checks that both percentages lie within `0..=100` and carry at most
    /// two decimal places.
    pub fn validate(&self) -> EngineResult<()> {
        validate_rate("cbs_rate", self.cbs_rate)?;
        validate_rate("ibs_rate", self.ibs_rate)
    }

    /// Returns the combined CBS + IBS percentage.
    pub fn combined(&self) -> Decimal {
        self.cbs_rate + self.ibs_rate
    }
}

fn validate_rate(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            message: format!("must not be negative (got {})", value),
        });
    }
    if value > MAX_RATE {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            message: format!("must not exceed {} (got {})", MAX_RATE, value),
        });
    }
    // The rates file stores JSON numbers, which only round-trip at this precision.
    if value.normalize().scale() > RATE_DECIMAL_PLACES {
        return Err(EngineError::InvalidRate {
            field: field.to_string(),
            message: format!(
                "must have at most {} decimal places (got {})",
                RATE_DECIMAL_PLACES, value
            ),
        });
    }
    Ok(())
}

/// Serializes a percentage as a JSON number instead of a decimal string.
///
/// Going through the decimal's canonical text keeps `0.9` as `0.9` rather
/// than the nearest binary fraction.
pub(crate) mod percent {
    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let number: f64 = value
            .normalize()
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(number)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_rates_are_twelve_and_eight_percent() {
        let rates = RateSet::default();
        assert_eq!(rates.cbs_rate, dec("12.00"));
        assert_eq!(rates.ibs_rate, dec("8.00"));
        assert_eq!(rates.combined(), dec("20"));
    }

    #[test]
    fn test_new_accepts_zero_and_hundred() {
        assert!(RateSet::new(Decimal::ZERO, MAX_RATE).is_ok());
    }

    #[test]
    fn test_negative_rate_is_rejected() {
        let result = RateSet::new(dec("-0.01"), dec("2.0"));
        match result {
            Err(EngineError::InvalidRate { field, message }) => {
                assert_eq!(field, "cbs_rate");
                assert!(message.contains("negative"));
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_above_hundred_is_rejected() {
        let result = RateSet::new(dec("1.0"), dec("100.01"));
        match result {
            Err(EngineError::InvalidRate { field, .. }) => assert_eq!(field, "ibs_rate"),
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_finer_than_cents_is_rejected() {
        let result = RateSet::new(dec("12.345678901234567891"), dec("2"));
        match result {
            Err(EngineError::InvalidRate { field, message }) => {
                assert_eq!(field, "cbs_rate");
                assert!(message.contains("decimal places"));
            }
            other => panic!("Expected InvalidRate, got {:?}", other),
        }
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let rates = RateSet::new(dec("12.500000"), dec("8.0")).unwrap();
        assert_eq!(rates.cbs_rate, dec("12.5"));
    }

    #[test]
    fn test_serializes_rates_as_json_numbers() {
        let rates = RateSet::new(dec("0.9"), dec("2.0")).unwrap();
        let json = serde_json::to_string(&rates).unwrap();
        assert_eq!(json, r#"{"cbs_rate":0.9,"ibs_rate":2.0}"#);
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let rates: RateSet = serde_json::from_str(r#"{"cbs_rate": 0.9, "ibs_rate": "2.5"}"#).unwrap();
        assert_eq!(rates.cbs_rate, dec("0.9"));
        assert_eq!(rates.ibs_rate, dec("2.5"));

        let rates: RateSet = serde_json::from_str(r#"{"cbs_rate": 1, "ibs_rate": 3}"#).unwrap();
        assert_eq!(rates.cbs_rate, dec("1"));
        assert_eq!(rates.ibs_rate, dec("3"));
    }
}
