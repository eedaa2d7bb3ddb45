use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul},
    str::FromStr,
};

use serde::{Serialize, Serializer};
use thiserror::Error;

/// The device reports every amount in minor units (satang). There are 100 of them in a major unit (baht).
const MINOR_UNITS_PER_MAJOR: f64 = 100.0;

/// Amounts closer than this to a whole number are treated as whole.
const WHOLE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Value cannot be read as a currency amount: {0}")]
pub struct UnitParseError(String);

//--------------------------------------     MinorUnits       ---------------------------------------------------------
/// An amount in minor currency units, exactly as the cash device reports it.
///
/// Face values are usually integral, but the device protocol allows decimal strings, so the value is kept as a float.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct MinorUnits(f64);

impl MinorUnits {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn to_major(self) -> MajorUnits {
        MajorUnits(self.0 / MINOR_UNITS_PER_MAJOR)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self(value as f64)
    }
}

impl From<f64> for MinorUnits {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

/// Device payloads carry amounts as numbers or as numeric strings. A string containing a decimal point is read as a
/// float; anything else must be a valid integer.
impl FromStr for MinorUnits {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('.') {
            s.parse::<f64>().map(Self).map_err(|e| UnitParseError(format!("{s}: {e}")))
        } else {
            s.parse::<i64>().map(Self::from).map_err(|e| UnitParseError(format!("{s}: {e}")))
        }
    }
}

impl Add for MinorUnits {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for MinorUnits {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<i64> for MinorUnits {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        #[allow(clippy::cast_precision_loss)]
        Self(self.0 * rhs as f64)
    }
}

impl Sum for MinorUnits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

//--------------------------------------     MajorUnits       ---------------------------------------------------------
/// An amount in major currency units (baht).
///
/// Serializes as a JSON integer when the amount is whole, and as a float otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct MajorUnits(f64);

impl MajorUnits {
    pub const ZERO: MajorUnits = MajorUnits(0.0);

    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    pub fn is_whole(&self) -> bool {
        (self.0 - self.0.trunc()).abs() < WHOLE_EPSILON
    }

    /// The whole-unit part of the amount, truncated toward zero.
    #[allow(clippy::cast_possible_truncation)]
    pub fn whole(&self) -> i64 {
        self.0.trunc() as i64
    }

    /// A fixed two-decimal label, e.g. `"20.00"`.
    pub fn label(&self) -> String {
        format!("{:.2}", self.0)
    }
}

impl From<f64> for MajorUnits {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Serialize for MajorUnits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_whole() {
            serializer.serialize_i64(self.whole())
        } else {
            serializer.serialize_f64(self.0)
        }
    }
}

impl Display for MajorUnits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
