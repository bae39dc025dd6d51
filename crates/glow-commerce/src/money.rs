//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront
//! sells in South African Rand only.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::CommerceError;

/// Symbol prefixed to displayed prices.
pub const CURRENCY_SYMBOL: &str = "R";

/// Amounts at or above this many whole units get thousands separators.
const GROUPING_THRESHOLD_CENTS: u64 = 1000 * 100;

/// A monetary value in Rand.
///
/// Amounts are stored in cents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Money {
    /// Amount in cents.
    pub amount_cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64) -> Self {
        Self { amount_cents }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// The amount is rounded to cents half away from zero, using the
    /// shortest decimal text of the float (so `1.005` rounds up even
    /// though its binary value sits just below the midpoint). Non-finite
    /// input is treated as zero; out-of-range input saturates.
    ///
    /// ```
    /// use glow_commerce::money::Money;
    /// assert_eq!(Money::from_decimal(49.99).amount_cents, 4999);
    /// assert_eq!(Money::from_decimal(1.005).amount_cents, 101);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() {
            return Self::zero();
        }

        let saturated = if amount < 0.0 { i64::MIN } else { i64::MAX };
        let decimal = amount
            .to_string()
            .parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_f64(amount));

        let cents = decimal
            .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .and_then(|d| d.checked_mul(Decimal::from(100)))
            .and_then(|d| d.to_i64())
            .unwrap_or(saturated);

        Self::new(cents)
    }

    /// Parse a price as it appears in markup (`data-price="250"`).
    pub fn parse(text: &str) -> Result<Self, CommerceError> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix(CURRENCY_SYMBOL).unwrap_or(trimmed);
        let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();

        let amount: f64 = cleaned
            .trim()
            .parse()
            .map_err(|_| CommerceError::InvalidPrice(text.to_string()))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(text.to_string()));
        }
        Ok(Self::from_decimal(amount))
    }

    /// Create a zero amount.
    pub fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "R1,550.00").
    pub fn display(&self) -> String {
        self.display_with(CURRENCY_SYMBOL)
    }

    /// Format with a caller-chosen currency symbol.
    pub fn display_with(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}", symbol, Money::new(self.amount_cents.saturating_neg()).display_amount())
        } else {
            format!("{}{}", symbol, self.display_amount())
        }
    }

    /// Format as a display string without symbol (e.g., "1,550.00").
    ///
    /// Thousands separators appear only once the amount reaches 1000.
    pub fn display_amount(&self) -> String {
        let magnitude = self.amount_cents.unsigned_abs();
        let whole = magnitude / 100;
        let fraction = magnitude % 100;

        let whole_text = if magnitude >= GROUPING_THRESHOLD_CENTS {
            group_thousands(whole)
        } else {
            whole.to_string()
        };

        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}.{:02}", sign, whole_text, fraction)
    }

    /// Try to add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_cents
            .checked_add(other.amount_cents)
            .map(Money::new)
    }

    /// Try to multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_cents.checked_mul(factor).map(Money::new)
    }

    /// Multiply by a decimal factor (e.g., for percentages).
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount)
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        self.multiply_decimal(percent / 100.0)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

/// Insert a comma between every group of three digits.
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a decimal amount with two places and thousands separators.
///
/// ```
/// use glow_commerce::money::format_price;
/// assert_eq!(format_price(550.0), "550.00");
/// assert_eq!(format_price(1550.0), "1,550.00");
/// ```
pub fn format_price(amount: f64) -> String {
    Money::from_decimal(amount).display_amount()
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_add(other.amount_cents))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_cents.saturating_sub(other.amount_cents))
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        Money::new(self.amount_cents.saturating_mul(factor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter storing Money as a plain decimal number (`"price": 250.5`).
///
/// Reads also accept numeric strings and `null`, which older saved carts
/// may hold.
pub mod decimal {
    use super::Money;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    /// `null` (what a NaN price serializes to) reads as zero.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        match Option::<RawPrice>::deserialize(deserializer)? {
            None => Ok(Money::zero()),
            Some(RawPrice::Number(n)) => Ok(Money::from_decimal(n)),
            Some(RawPrice::Text(s)) => Money::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}
