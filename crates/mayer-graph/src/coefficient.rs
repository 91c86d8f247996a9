use std::fmt;

use mayer_core::MayerError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Rational diagram weight `numerator / denominator`.
///
/// Arithmetic is checked: a result that does not fit `i64` sets the sticky
/// `overflow` flag instead of wrapping. Once the flag is set the stored
/// fraction is no longer meaningful.
///
/// Deserialized values are reduced the same way as [`Coefficient::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coefficient {
    numerator: i64,
    denominator: i64,
    overflow: bool,
}

#[derive(Deserialize)]
struct RawCoefficient {
    numerator: i64,
    denominator: i64,
    #[serde(default)]
    overflow: bool,
}

impl<'de> Deserialize<'de> for Coefficient {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawCoefficient::deserialize(deserializer)?;
        let mut coefficient =
            Coefficient::new(raw.numerator, raw.denominator).map_err(D::Error::custom)?;
        coefficient.overflow |= raw.overflow;
        Ok(coefficient)
    }
}

impl Coefficient {
    /// Creates a reduced fraction with a positive denominator.
    pub fn new(numerator: i64, denominator: i64) -> Result<Self, MayerError> {
        if denominator == 0 {
            return Err(MayerError::graph(
                "zero-denominator",
                "coefficient denominator must be non-zero",
            )
            .with_context("numerator", numerator));
        }
        Ok(reduce(numerator as i128, denominator as i128, false))
    }

    /// The coefficient `1`.
    pub const fn one() -> Self {
        Self {
            numerator: 1,
            denominator: 1,
            overflow: false,
        }
    }

    /// The coefficient `0`.
    pub const fn zero() -> Self {
        Self {
            numerator: 0,
            denominator: 1,
            overflow: false,
        }
    }

    /// Numerator of the reduced fraction.
    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    /// Denominator of the reduced fraction (always positive).
    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    /// Returns whether any operation producing this value overflowed.
    pub fn has_overflow(&self) -> bool {
        self.overflow
    }

    /// Floating point approximation.
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Sum of two coefficients.
    pub fn add(&self, other: &Coefficient) -> Coefficient {
        let num = self.numerator as i128 * other.denominator as i128
            + other.numerator as i128 * self.denominator as i128;
        let den = self.denominator as i128 * other.denominator as i128;
        reduce(num, den, self.overflow || other.overflow)
    }

    /// Product of two coefficients.
    pub fn multiply(&self, other: &Coefficient) -> Coefficient {
        let num = self.numerator as i128 * other.numerator as i128;
        let den = self.denominator as i128 * other.denominator as i128;
        reduce(num, den, self.overflow || other.overflow)
    }

    /// Quotient of two coefficients; dividing by zero is reported as overflow.
    pub fn divide(&self, other: &Coefficient) -> Coefficient {
        if other.numerator == 0 {
            return Coefficient {
                overflow: true,
                ..*self
            };
        }
        let num = self.numerator as i128 * other.denominator as i128;
        let den = self.denominator as i128 * other.numerator as i128;
        reduce(num, den, self.overflow || other.overflow)
    }

    /// Additive inverse.
    pub fn negate(&self) -> Coefficient {
        reduce(
            -(self.numerator as i128),
            self.denominator as i128,
            self.overflow,
        )
    }
}

impl Default for Coefficient {
    fn default() -> Self {
        Self::one()
    }
}

impl PartialOrd for Coefficient {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coefficient {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
            .then(self.denominator.cmp(&other.denominator))
            .then(self.overflow.cmp(&other.overflow))
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)?;
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)?;
        }
        if self.overflow {
            write!(f, " (overflow)")?;
        }
        Ok(())
    }
}

fn reduce(num: i128, den: i128, overflow: bool) -> Coefficient {
    let divisor = gcd(num.unsigned_abs(), den.unsigned_abs()).max(1) as i128;
    let (mut num, mut den) = (num / divisor, den / divisor);
    if den < 0 {
        num = -num;
        den = -den;
    }
    match (i64::try_from(num), i64::try_from(den)) {
        (Ok(numerator), Ok(denominator)) => Coefficient {
            numerator,
            denominator,
            overflow,
        },
        _ => Coefficient {
            numerator: num.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
            denominator: den.clamp(1, i64::MAX as i128) as i64,
            overflow: true,
        },
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
