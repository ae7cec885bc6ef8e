use std::fmt;
use std::str::FromStr;

use fixed_decimal::{Decimal, FloatPrecision, Sign};
use num_bigint::BigInt;

use crate::error::{FormatError, Result};

/// A number to be formatted: an exact decimal, a signed infinity, or NaN.
///
/// Finite values keep every digit they were written with, so two endpoints
/// are only ever compared through their rendered text and never through a
/// lossy binary float.
#[derive(Clone, Debug)]
pub enum NumericValue {
    Finite(Decimal),
    Infinity { negative: bool },
    NaN,
}

impl NumericValue {
    pub const INFINITY: NumericValue = NumericValue::Infinity { negative: false };
    pub const NEG_INFINITY: NumericValue = NumericValue::Infinity { negative: true };

    pub fn is_nan(&self) -> bool {
        matches!(self, NumericValue::NaN)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, NumericValue::Finite(_))
    }

    /// True for values carrying a negative sign, including `-0`.
    pub fn is_negative(&self) -> bool {
        match self {
            NumericValue::Finite(d) => d.sign == Sign::Negative,
            NumericValue::Infinity { negative } => *negative,
            NumericValue::NaN => false,
        }
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            NumericValue::Finite(d) => Some(d),
            _ => None,
        }
    }

    /// Exact input identity: `3` and `3.00` are the same value, `0` and `-0`
    /// are not, and NaN is never the same as anything.
    pub fn same_value(&self, other: &NumericValue) -> bool {
        match (self, other) {
            (NumericValue::Finite(a), NumericValue::Finite(b)) => {
                (a.sign == Sign::Negative) == (b.sign == Sign::Negative)
                    && canonical_digits(a) == canonical_digits(b)
            }
            (
                NumericValue::Infinity { negative: a },
                NumericValue::Infinity { negative: b },
            ) => a == b,
            _ => false,
        }
    }
}

fn canonical_digits(d: &Decimal) -> String {
    let mut abs = d.absolute.clone();
    abs.trim_start();
    abs.trim_end();
    abs.to_string()
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl FromStr for NumericValue {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed {
            "NaN" => Ok(NumericValue::NaN),
            "Infinity" | "+Infinity" => Ok(NumericValue::INFINITY),
            "-Infinity" => Ok(NumericValue::NEG_INFINITY),
            _ => Decimal::try_from_str(trimmed)
                .map(NumericValue::Finite)
                .map_err(|_| FormatError::InvalidNumber(s.to_string())),
        }
    }
}

impl From<Decimal> for NumericValue {
    fn from(d: Decimal) -> Self {
        NumericValue::Finite(d)
    }
}

impl From<i32> for NumericValue {
    fn from(n: i32) -> Self {
        NumericValue::Finite(Decimal::from(n))
    }
}

impl From<i64> for NumericValue {
    fn from(n: i64) -> Self {
        NumericValue::Finite(Decimal::from(n))
    }
}

impl From<u64> for NumericValue {
    fn from(n: u64) -> Self {
        NumericValue::Finite(Decimal::from(n))
    }
}

/// Uses the shortest digit string that round-trips the float.
impl From<f64> for NumericValue {
    fn from(v: f64) -> Self {
        if v.is_nan() {
            return NumericValue::NaN;
        }
        if v.is_infinite() {
            return NumericValue::Infinity {
                negative: v < 0.0,
            };
        }
        match Decimal::try_from_f64(v, FloatPrecision::RoundTrip) {
            Ok(d) => NumericValue::Finite(d),
            Err(_) => NumericValue::NaN,
        }
    }
}

impl TryFrom<&BigInt> for NumericValue {
    type Error = FormatError;

    fn try_from(bi: &BigInt) -> Result<Self> {
        let s = bi.to_string();
        Decimal::try_from_str(&s)
            .map(NumericValue::Finite)
            .map_err(|_| FormatError::InvalidNumber(s))
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Finite(d) => write!(f, "{d}"),
            NumericValue::Infinity { negative: true } => write!(f, "-Infinity"),
            NumericValue::Infinity { negative: false } => write!(f, "Infinity"),
            NumericValue::NaN => write!(f, "NaN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> NumericValue {
        s.parse().unwrap()
    }

    #[test]
    fn parse_special_values() {
        assert!(v("NaN").is_nan());
        assert_eq!(v("Infinity"), NumericValue::INFINITY);
        assert_eq!(v(" -Infinity "), NumericValue::NEG_INFINITY);
        assert!(v("-Infinity").is_negative());
        assert!(matches!(
            "abc".parse::<NumericValue>(),
            Err(FormatError::InvalidNumber(_))
        ));
    }

    #[test]
    fn same_value_ignores_padding() {
        assert_eq!(v("3"), v("3.00"));
        assert_eq!(v("-10"), NumericValue::from(-10));
        assert_ne!(v("3"), v("3.01"));
        assert_ne!(v("0"), v("-0"));
        assert_ne!(v("3"), v("-3"));
        assert_ne!(NumericValue::NaN, NumericValue::NaN);
        assert_ne!(NumericValue::INFINITY, NumericValue::NEG_INFINITY);
    }

    #[test]
    fn finite_values_expose_their_decimal() {
        let n = v("-2.50");
        assert!(n.is_finite());
        let d = n.as_decimal().unwrap();
        assert_eq!(d.sign, Sign::Negative);
        assert_eq!(d.to_string(), "-2.50");

        for special in [NumericValue::NaN, NumericValue::INFINITY] {
            assert!(!special.is_finite());
            assert!(special.as_decimal().is_none());
        }
    }

    #[test]
    fn keeps_exact_digits() {
        let big = v("12345678901234567890.123456789");
        assert_eq!(big.to_string(), "12345678901234567890.123456789");
        assert_ne!(big, v("12345678901234567890.12345679"));
    }

    #[test]
    fn from_float_and_bigint() {
        assert_eq!(NumericValue::from(0.1).to_string(), "0.1");
        assert!(NumericValue::from(f64::NAN).is_nan());
        assert_eq!(NumericValue::from(f64::NEG_INFINITY), NumericValue::NEG_INFINITY);

        let bi: BigInt = "-98765432109876543210".parse().unwrap();
        let n = NumericValue::try_from(&bi).unwrap();
        assert!(n.is_negative());
        assert_eq!(n.to_string(), "-98765432109876543210");
    }
}
