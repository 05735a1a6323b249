use crate::error::CalcError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use tracing::warn;

/// A signed monetary value in dollars.
///
/// Wraps `rust_decimal::Decimal` so fee arithmetic stays exact. Values keep
/// their full precision internally and are only rounded to cents when
/// displayed or serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

/// A fraction in `[0, 1]`, such as a profit rate or a revenue share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Rate(pub(crate) Decimal);

impl Rate {
    pub fn new(value: Decimal) -> Result<Self, CalcError> {
        if value >= Decimal::ZERO && value <= Decimal::ONE {
            Ok(Self(value))
        } else {
            Err(CalcError::ValidationError(format!(
                "Rate must be between 0 and 1, got {value}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Rate {
    type Error = CalcError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rate> for Decimal {
    fn from(rate: Rate) -> Self {
        rate.0
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Multiplies a per-unit amount by a unit count, saturating at the
    /// bounds of `Decimal`.
    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(count)))
    }

    /// Clamps negative amounts to zero.
    pub fn non_negative(self) -> Self {
        if self.0.is_sign_negative() {
            Self::ZERO
        } else {
            self
        }
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Rounds half away from zero to exactly two decimal places.
    pub fn to_cents(self) -> Decimal {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        cents
    }
}

// Arithmetic saturates instead of panicking on overflow.
impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Mul<Rate> for Money {
    type Output = Self;
    fn mul(self, rhs: Rate) -> Self::Output {
        Self(self.0.saturating_mul(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// Reports carry cents, not the raw engine precision.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.to_cents())
    }
}

impl fmt::Display for Money {
    /// Formats as `$1,234.50`, or `-$1,234.50` for negative amounts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = self.to_cents();
        let digits = cents.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if cents.is_sign_negative() && !cents.is_zero() {
            "-"
        } else {
            ""
        };
        write!(f, "{sign}${grouped}.{fraction}")
    }
}

/// Parses user-typed dollar text such as `"$1,234.50"`.
///
/// Strips `$`, `,` and surrounding whitespace. Empty or unparseable text
/// yields zero. Numbers beyond the range of `Decimal` saturate to
/// `Decimal::MAX` or `Decimal::MIN`. This never fails.
pub fn parse_currency(text: &str) -> Decimal {
    let cleaned: String = text.chars().filter(|c| *c != ',' && *c != '$').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    let parsed = Decimal::from_str(cleaned).or_else(|_| Decimal::from_scientific(cleaned));
    if let Ok(value) = parsed {
        return value;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value.abs() >= 1.0 => {
            warn!(input = text, "currency amount out of range, saturated");
            if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        }
        Ok(value) if value.is_finite() => Decimal::ZERO,
        _ => {
            warn!(input = text, "unparseable currency amount treated as zero");
            Decimal::ZERO
        }
    }
}
