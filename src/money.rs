//! Fixed-point money type shared by the ledger and the settlement planner.
//!
//! Uses `rust_decimal` internally at full precision. Values are only rounded
//! to cents when displayed or serialized, so shares such as `100 / 3` do not
//! compound rounding errors across a ledger.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount in the trip's storage currency.
///
/// Arithmetic is exact up to 28 significant digits. Comparisons against zero
/// that must absorb division noise go through [`Money::is_negligible`], which
/// applies [`Money::TOLERANCE`].
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use trip_settle::Money;
///
/// let amount = Money::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.50");
///
/// let share = Money::from_str("100").unwrap().split(3).unwrap();
/// assert_eq!(share.to_string(), "33.33");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

impl Money {
    /// Decimal places used when displaying or serializing.
    pub const DISPLAY_SCALE: u32 = 2;

    /// Zero value.
    pub const ZERO: Self = Money(Decimal::ZERO);

    /// One cent. Balances and transfers below this are treated as zero.
    pub const TOLERANCE: Self = Money(Decimal::from_parts(1, 0, 0, false, 2));

    /// Wraps a `Decimal` without changing its scale.
    pub fn new(value: Decimal) -> Self {
        Money(value)
    }

    /// Creates an amount from a whole number of cents.
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, Self::DISPLAY_SCALE))
    }

    /// Returns the underlying decimal at full precision.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if this value is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if `|self| < TOLERANCE`.
    pub fn is_negligible(&self) -> bool {
        self.0.abs() < Self::TOLERANCE.0
    }

    /// Returns `true` if the value is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Returns `true` if the value is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn abs(self) -> Self {
        Money(self.0.abs())
    }

    /// Divides the amount into `parts` equal shares.
    ///
    /// Returns `None` for zero parts instead of dividing by zero.
    pub fn split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Money(self.0 / Decimal::from(parts)))
    }

    /// Returns `true` if the two amounts differ by less than the tolerance.
    pub fn approx_eq(self, other: Self) -> bool {
        (self - other).is_negligible()
    }

    /// Rounds half away from zero to whole cents.
    pub fn round_cents(self) -> Self {
        let mut rounded = self
            .0
            .round_dp_with_strategy(Self::DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(Self::DISPLAY_SCALE);
        Money(rounded)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Money(value)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Money(Decimal::from(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_cents();
        // -0.004 rounds to a signed zero
        if rounded.is_zero() {
            return f.write_str("0.00");
        }
        write!(f, "{}", rounded.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// Accepts JSON numbers as well as decimal strings.
struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a monetary amount as a number or decimal string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Money, E> {
        Ok(Money(Decimal::from(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Money, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("amount {} is not finite", v)));
        }
        // Display yields the shortest round-trip form, so 0.1 stays 0.1
        Money::from_str(&v.to_string()).map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Money, E> {
        Money::from_str(v).map_err(E::custom)
    }
}
