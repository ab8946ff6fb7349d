//! Amount type for handling monetary values with optional currency symbols.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles parsing values that may
//! or may not include a currency symbol and thousands separators.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Currency symbols that are stripped when parsing.
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£'];

/// Represents a monetary amount.
///
/// Amounts entered into the ledger are non-negative; the sign carries no meaning because the kind
/// of the owning collection already says whether money comes in or goes out. `Amount` does not
/// enforce this, it is the input layer's job.
///
/// # Examples
///
/// Parsing with a currency symbol and commas:
/// ```
/// # use fintrack::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str("₹2,500").unwrap();
/// assert_eq!(amount.to_string(), "2500");
/// ```
///
/// Rendering for display:
/// ```
/// # use fintrack::model::Amount;
/// let amount = Amount::from(5_000_000_u64);
/// assert_eq!(amount.currency("₹"), "₹5,000,000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Wraps `value` if its magnitude does not exceed `MAX_AMOUNT`.
    pub fn checked(value: Decimal) -> Result<Self, AmountError> {
        if value.abs() > MAX_AMOUNT {
            return Err(AmountError(AmountErrorKind::TooLarge(value)));
        }
        Ok(Amount(value))
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Renders whole currency units with thousands separators and no fraction digits, prefixed by
    /// `symbol`, e.g. `₹75,000` or `-₹3,350,000`.
    pub fn currency(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let whole = self.0.abs().round().to_f64().unwrap_or_default();
        format!("{sign}{symbol}{}", format_num::format_num!(",.0f", whole))
    }
}

/// The largest magnitude an `Amount` parsed from text or JSON may have. Sums of any realistic number
/// of such amounts stay far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// An error that can occur when parsing strings into `Amount` values.
pub struct AmountError(AmountErrorKind);

enum AmountErrorKind {
    Blank,
    Decimal(rust_decimal::Error),
    TooLarge(Decimal),
}

impl Debug for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            AmountErrorKind::Blank => f.write_str("Blank"),
            AmountErrorKind::Decimal(e) => Debug::fmt(e, f),
            AmountErrorKind::TooLarge(v) => write!(f, "TooLarge({v})"),
        }
    }
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.0 {
            AmountErrorKind::Blank => f.write_str("An amount is required"),
            AmountErrorKind::Decimal(e) => Display::fmt(e, f),
            AmountErrorKind::TooLarge(v) => {
                write!(f, "The amount {v} is larger than the maximum of {MAX_AMOUNT}")
            }
        }
    }
}

impl std::error::Error for AmountError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.0 {
            AmountErrorKind::Decimal(e) => Some(e),
            _ => None,
        }
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(AmountError(AmountErrorKind::Blank));
        }

        // "-₹50" and "₹-50" both mean negative fifty
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let without_symbol = unsigned.trim_start_matches(CURRENCY_SYMBOLS).trim_start();
        let without_commas = without_symbol.replace(',', "");

        let value = Decimal::from_str(&without_commas)
            .map_err(|e| AmountError(AmountErrorKind::Decimal(e)))?;
        Amount::checked(if negative { -value } else { value })
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0.normalize(), f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Accepts `"2500.50"` as well as the bare JSON numbers a hand-written ledger file tends to have.
struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Amount::from_str(v).map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Amount::checked(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Amount::checked(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        let value = Decimal::from_f64_retain(v)
            .ok_or_else(|| E::custom(format!("{v} is not a finite amount")))?;
        Amount::checked(value.normalize()).map_err(E::custom)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Amount(Decimal::from(value))
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Self) -> Self::Output {
        Amount(self.0 + rhs.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        let amount = Amount::from_str("2500").unwrap();
        assert_eq!(amount.value(), dec("2500"));
    }

    #[test]
    fn test_parse_with_rupee_sign() {
        let amount = Amount::from_str("₹2500.50").unwrap();
        assert_eq!(amount.value(), dec("2500.50"));
    }

    #[test]
    fn test_parse_with_dollar_sign_and_commas() {
        let amount = Amount::from_str("$1,234,567.89").unwrap();
        assert_eq!(amount.value(), dec("1234567.89"));
    }

    #[test]
    fn test_parse_negative_with_symbol() {
        let amount = Amount::from_str("-₹50").unwrap();
        assert_eq!(amount.value(), dec("-50"));
        assert!(amount.is_negative());
    }

    #[test]
    fn test_parse_blank_is_rejected() {
        let err = Amount::from_str("   ").unwrap_err();
        assert_eq!(err.to_string(), "An amount is required");
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_parse_rejects_amounts_above_max() {
        assert!(Amount::from_str("50000000000000000000000000000").is_err());
        assert!(Amount::from_str("-1,000,000,000,000,001").is_err());
        let max = Amount::from_str("1,000,000,000,000,000").unwrap();
        assert_eq!(max.value(), MAX_AMOUNT);
    }

    #[test]
    fn test_deserialize_rejects_amounts_above_max() {
        assert!(serde_json::from_str::<Amount>("\"50000000000000000000000000000\"").is_err());
        assert!(serde_json::from_str::<Amount>("18446744073709551615").is_err());
        assert!(serde_json::from_str::<Amount>("1e20").is_err());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Amount::from_str("twelve").is_err());
        assert!(Amount::from_str("12abc").is_err());
    }

    #[test]
    fn test_display_is_plain_decimal() {
        assert_eq!(Amount::from(2500_u64).to_string(), "2500");
        assert_eq!(Amount::from_str("2500.00").unwrap().to_string(), "2500");
        assert_eq!(Amount::from_str("19.90").unwrap().to_string(), "19.9");
    }

    #[test]
    fn test_currency() {
        assert_eq!(Amount::from(75000_u64).currency("₹"), "₹75,000");
        assert_eq!(Amount::from(800_u64).currency("₹"), "₹800");
        assert_eq!(Amount::ZERO.currency("₹"), "₹0");
    }

    #[test]
    fn test_currency_negative() {
        let amount = Amount::new(dec("-3350000"));
        assert_eq!(amount.currency("₹"), "-₹3,350,000");
    }

    #[test]
    fn test_currency_rounds_fraction() {
        let amount = Amount::from_str("1499.6").unwrap();
        assert_eq!(amount.currency("$"), "$1,500");
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&Amount::from(2500_u64)).unwrap();
        assert_eq!(json, "\"2500\"");
    }

    #[test]
    fn test_deserialize_string() {
        let amount: Amount = serde_json::from_str("\"2,500.25\"").unwrap();
        assert_eq!(amount.value(), dec("2500.25"));
    }

    #[test]
    fn test_deserialize_numbers() {
        let amount: Amount = serde_json::from_str("2500").unwrap();
        assert_eq!(amount.value(), dec("2500"));
        let amount: Amount = serde_json::from_str("12.5").unwrap();
        assert_eq!(amount.value(), dec("12.5"));
    }

    #[test]
    fn test_sum() {
        let amounts = [Amount::from(2500_u64), Amount::from(3000_u64), Amount::from(800_u64)];
        let total: Amount = amounts.iter().sum();
        assert_eq!(total, Amount::from(6300_u64));
    }
}
