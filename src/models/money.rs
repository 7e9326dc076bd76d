//! Money type for representing rupee amounts
//!
//! Internally stores amounts in paise (i64) to avoid floating-point drift when
//! summing many records. On the wire an amount is a plain rupee number
//! (`1500`, `1500.5`), which is how records have always been exchanged with
//! backups and the remote sheet.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A monetary amount stored as paise (hundredths of a rupee)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from paise
    ///
    /// # Examples
    /// ```
    /// use sitebook::models::Money;
    /// let amount = Money::from_paise(1050); // ₹10.50
    /// assert_eq!(amount.rupees(), 10);
    /// ```
    pub const fn from_paise(paise: i64) -> Self {
        Self(paise)
    }

    /// Create a Money amount from whole rupees
    pub const fn from_rupees(rupees: i64) -> Self {
        Self(rupees * 100)
    }

    /// Like [`Money::from_rupees`], but `None` when the amount does not fit
    /// in paise
    pub const fn checked_from_rupees(rupees: i64) -> Option<Self> {
        match rupees.checked_mul(100) {
            Some(paise) => Some(Self(paise)),
            None => None,
        }
    }

    /// Create a Money amount from a fractional rupee value, rounded to the
    /// nearest paisa
    pub fn from_rupees_f64(rupees: f64) -> Self {
        Self((rupees * 100.0).round() as i64)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Whole rupees (truncated toward zero)
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// The paise portion (0-99)
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub fn as_rupees_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from user input
    ///
    /// Accepts "1500", "1500.5", "1,500.50", "₹1500", "Rs 1500", "-200".
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = if let Some(stripped) = s.strip_prefix('-') {
            (true, stripped.trim_start())
        } else {
            (false, s)
        };

        let s = s
            .strip_prefix('₹')
            .or_else(|| s.strip_prefix("Rs."))
            .or_else(|| s.strip_prefix("Rs"))
            .unwrap_or(s)
            .trim();
        let cleaned: String = s.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let paise = match cleaned.split_once('.') {
            Some((whole, fraction)) => {
                let rupees: i64 = if whole.is_empty() {
                    0
                } else {
                    whole
                        .parse()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                };
                if !fraction.chars().all(|c| c.is_ascii_digit()) {
                    return Err(MoneyParseError::InvalidFormat(s.to_string()));
                }
                let paise: i64 = match fraction.len() {
                    0 => 0,
                    1 => {
                        fraction
                            .parse::<i64>()
                            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                            * 10
                    }
                    _ => fraction[..2]
                        .parse()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
                };
                rupees
                    .checked_mul(100)
                    .and_then(|whole| whole.checked_add(paise))
                    .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?
            }
            None => cleaned
                .parse::<i64>()
                .ok()
                .and_then(|rupees| rupees.checked_mul(100))
                .ok_or_else(|| MoneyParseError::InvalidFormat(s.to_string()))?,
        };

        Ok(Self(if negative { -paise } else { paise }))
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.rupees().abs(), self.paise_part())
        } else {
            format!("{}{}.{:02}", symbol, self.rupees(), self.paise_part())
        }
    }

    /// Plain decimal rendering without a symbol, as used in CSV cells
    pub fn to_decimal_string(&self) -> String {
        self.format_with_symbol("")
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol("₹"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % 100 == 0 {
            serializer.serialize_i64(self.rupees())
        } else {
            serializer.serialize_f64(self.as_rupees_f64())
        }
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a rupee amount as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::checked_from_rupees(v).ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(Money::checked_from_rupees)
            .ok_or_else(|| E::custom("amount out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom("amount must be finite"));
        }
        // `as i64` would saturate silently
        if v.abs() >= (i64::MAX / 100) as f64 {
            return Err(E::custom("amount out of range"));
        }
        Ok(Money::from_rupees_f64(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let m = Money::from_paise(1050);
        assert_eq!(m.paise(), 1050);
        assert_eq!(m.rupees(), 10);
        assert_eq!(m.paise_part(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_paise(1050).to_string(), "₹10.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
        assert_eq!(Money::from_paise(-1050).to_string(), "-₹10.50");
        assert_eq!(Money::from_paise(5).to_string(), "₹0.05");
        assert_eq!(Money::from_rupees(1200).to_decimal_string(), "1200.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);
        assert_eq!((-a).paise(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().paise(), 1050);
        assert_eq!(Money::parse("₹10.50").unwrap().paise(), 1050);
        assert_eq!(Money::parse("Rs 1,500").unwrap().paise(), 150000);
        assert_eq!(Money::parse("-10.50").unwrap().paise(), -1050);
        assert_eq!(Money::parse("10").unwrap().paise(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().paise(), 1050);
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.x").is_err());
        assert!(Money::parse("92233720368547759").is_err());
        assert!(Money::parse("92233720368547758.99").is_err());
        assert_eq!(
            Money::parse("92233720368547757").unwrap().paise(),
            9_223_372_036_854_775_700
        );
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_rupees(1), Money::from_rupees(2), Money::from_rupees(3)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_rupees(6));
    }

    #[test]
    fn test_wire_format_is_rupees() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(1500)).unwrap(), "1500");
        assert_eq!(serde_json::to_string(&Money::from_paise(150050)).unwrap(), "1500.5");

        let whole: Money = serde_json::from_str("1500").unwrap();
        assert_eq!(whole.paise(), 150000);
        let fractional: Money = serde_json::from_str("1500.25").unwrap();
        assert_eq!(fractional.paise(), 150025);
        let text: Money = serde_json::from_str("\"750\"").unwrap();
        assert_eq!(text.paise(), 75000);
    }

    #[test]
    fn test_wire_amount_out_of_range() {
        assert_eq!(Money::checked_from_rupees(5), Some(Money::from_paise(500)));
        assert_eq!(Money::checked_from_rupees(i64::MAX / 10), None);

        assert!(serde_json::from_str::<Money>("100000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("-100000000000000000").is_err());
        assert!(serde_json::from_str::<Money>("18446744073709551615").is_err());
        assert!(serde_json::from_str::<Money>("1e18").is_err());
        assert!(serde_json::from_str::<Money>("\"100000000000000000\"").is_err());
    }
}
