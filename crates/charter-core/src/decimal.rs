//! # Exact Decimal
//!
//! Monetary and ratio figures (public debt, GDP) as a signed `i128`
//! mantissa and a base-10 scale of at most 18 digits. There is no binary
//! floating point anywhere: values are parsed from strings, compared
//! exactly, and multiplied by integers with checked arithmetic. An
//! overflow is an error, never a rounded answer.
//!
//! The precision is bounded, not arbitrary: about 38 significant digits
//! in total, at most [`DECIMAL_SCALE_MAX`] of them after the point. Budget
//! figures stated to the grosz sit many orders of magnitude inside that
//! range. An input that does not fit fails to parse.
//!
//! Values are normalized on construction (trailing fractional zeros are
//! dropped), so `"1.50"` and `"1.5"` are the same value and compare equal
//! under the derived `PartialEq`.
//!
//! Serialized as a string. Deserialization accepts a string or an integer;
//! a floating-point literal is rejected.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CharterError;

/// Maximum number of fractional digits.
pub const DECIMAL_SCALE_MAX: u32 = 18;

/// An exact base-10 number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DecimalRepr", into = "String")]
pub struct Decimal {
    mantissa: i128,
    scale: u32,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Text(String),
    Integer(i64),
}

impl Decimal {
    /// Zero.
    pub const ZERO: Decimal = Decimal {
        mantissa: 0,
        scale: 0,
    };

    /// Build from a mantissa and a scale: the value is `mantissa / 10^scale`.
    pub fn new(mantissa: i128, scale: u32) -> Result<Self, CharterError> {
        if scale > DECIMAL_SCALE_MAX {
            return Err(CharterError::Decimal(format!(
                "scale {scale} exceeds maximum {DECIMAL_SCALE_MAX}"
            )));
        }
        Ok(Self { mantissa, scale }.normalized())
    }

    /// The unscaled integer.
    pub fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of fractional digits.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// `true` if the value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa == 0
    }

    /// `true` if the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.mantissa < 0
    }

    /// `true` if the value is above zero.
    pub fn is_positive(&self) -> bool {
        self.mantissa > 0
    }

    /// Multiply by an integer factor.
    pub fn checked_mul_int(&self, factor: i128) -> Result<Self, CharterError> {
        let mantissa = self.mantissa.checked_mul(factor).ok_or_else(|| {
            CharterError::Decimal(format!("{self} * {factor} overflows"))
        })?;
        Ok(Self {
            mantissa,
            scale: self.scale,
        }
        .normalized())
    }

    fn normalized(mut self) -> Self {
        while self.scale > 0 && self.mantissa % 10 == 0 {
            self.mantissa /= 10;
            self.scale -= 1;
        }
        if self.mantissa == 0 {
            self.scale = 0;
        }
        self
    }

    /// Integer part and fractional remainder, both truncated toward zero.
    fn split(&self) -> (i128, i128) {
        let unit = pow10(self.scale);
        (self.mantissa / unit, self.mantissa % unit)
    }
}

fn pow10(exp: u32) -> i128 {
    10i128.pow(exp)
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (int_a, frac_a) = self.split();
        let (int_b, frac_b) = other.split();
        match int_a.cmp(&int_b) {
            Ordering::Equal => {
                // |frac| < 10^18, so aligning to 18 digits stays below 10^36.
                let aligned_a = frac_a * pow10(DECIMAL_SCALE_MAX - self.scale);
                let aligned_b = frac_b * pow10(DECIMAL_SCALE_MAX - other.scale);
                aligned_a.cmp(&aligned_b)
            }
            ordering => ordering,
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Self {
            mantissa: i128::from(value),
            scale: 0,
        }
    }
}

impl FromStr for Decimal {
    type Err = CharterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, f),
            None => (digits, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CharterError::Decimal(format!("not a decimal: {s:?}")));
        }
        let scale = u32::try_from(frac_part.len())
            .ok()
            .filter(|scale| *scale <= DECIMAL_SCALE_MAX)
            .ok_or_else(|| {
                CharterError::Decimal(format!(
                    "{s:?} has more than {DECIMAL_SCALE_MAX} fractional digits"
                ))
            })?;

        let mut mantissa: i128 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| CharterError::Decimal(format!("not a decimal: {s:?}")))?;
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit)))
                .ok_or_else(|| CharterError::Decimal(format!("{s:?} overflows")))?;
        }
        if negative {
            mantissa = -mantissa;
        }
        Self::new(mantissa, scale)
    }
}

impl TryFrom<DecimalRepr> for Decimal {
    type Error = CharterError;

    fn try_from(value: DecimalRepr) -> Result<Self, Self::Error> {
        match value {
            DecimalRepr::Text(s) => s.parse(),
            DecimalRepr::Integer(i) => Ok(Self::from(i)),
        }
    }
}

impl From<Decimal> for String {
    fn from(value: Decimal) -> Self {
        value.to_string()
    }
}

impl std::fmt::Display for Decimal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }
        let unit = pow10(self.scale).unsigned_abs();
        let magnitude = self.mantissa.unsigned_abs();
        let sign = if self.mantissa < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:0width$}",
            magnitude / unit,
            magnitude % unit,
            width = self.scale as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(dec("1234.56").to_string(), "1234.56");
        assert_eq!(dec("-0.05").to_string(), "-0.05");
        assert_eq!(dec("+7").to_string(), "7");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("3.").to_string(), "3");
    }

    #[test]
    fn test_normalization_makes_equal_values_equal() {
        assert_eq!(dec("1.50"), dec("1.5"));
        assert_eq!(dec("0.000"), Decimal::ZERO);
        assert_eq!(dec("-0"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "-", ".", "1e5", "1.2.3", "abc", "1,5"] {
            assert!(bad.parse::<Decimal>().is_err(), "{bad:?} should be rejected");
        }
        assert!("0.1234567890123456789".parse::<Decimal>().is_err());
        assert!("9".repeat(40).parse::<Decimal>().is_err());
    }

    #[test]
    fn test_ordering_is_exact() {
        assert!(dec("0.6") > dec("0.599999999999999999"));
        assert!(dec("-1.5") < dec("-1.2"));
        assert!(dec("-0.5") < dec("0.3"));
        assert!(dec("-0.9") > dec("-1"));
        assert!(dec("100") > dec("99.99"));
        assert_eq!(dec("2.000").cmp(&dec("2")), Ordering::Equal);
    }

    #[test]
    fn test_checked_mul_int() {
        assert_eq!(dec("0.5").checked_mul_int(2).unwrap(), dec("1"));
        assert_eq!(dec("600").checked_mul_int(5).unwrap(), dec("3000"));
        assert!(Decimal::new(i128::MAX, 0).unwrap().checked_mul_int(2).is_err());
    }

    #[test]
    fn test_scale_limit() {
        assert!(Decimal::new(1, 18).is_ok());
        assert!(Decimal::new(1, 19).is_err());
    }

    #[test]
    fn test_precision_is_bounded_at_38_digits() {
        assert!("9".repeat(38).parse::<Decimal>().is_ok());
        assert!("9".repeat(39).parse::<Decimal>().is_err());
        let widest = format!("-{}.{}", "9".repeat(20), "9".repeat(18));
        assert_eq!(widest.parse::<Decimal>().unwrap().scale(), DECIMAL_SCALE_MAX);
        assert!(format!("{}.{}", "9".repeat(21), "9".repeat(18))
            .parse::<Decimal>()
            .is_err());
    }

    #[test]
    fn test_serde_accepts_string_and_integer_rejects_float() {
        let from_str: Decimal = serde_json::from_str("\"12.5\"").unwrap();
        assert_eq!(from_str, dec("12.5"));
        let from_int: Decimal = serde_json::from_str("12").unwrap();
        assert_eq!(from_int, dec("12"));
        assert!(serde_json::from_str::<Decimal>("12.5").is_err());
        assert_eq!(serde_json::to_string(&dec("12.50")).unwrap(), "\"12.5\"");
    }
}
