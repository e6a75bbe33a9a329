//! # Money Module
//!
//! Provides the `Money` type for handling prices and cart totals safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The CMS sends prices as JSON numbers:                                 │
//! │    { "price": 249.9 }                                                  │
//! │                                                                         │
//! │  Summing those as floats drifts:                                       │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                     │
//! │    249.9 → 24990 minor units, converted ONCE at the wire boundary      │
//! │    Every subtotal after that is exact integer math                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_major(250);          // 250.00
//! let line = price.multiply_quantity(3);        // 750.00
//! assert_eq!(line, Money::from_minor(75_000));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

/// Minor units per major unit (paisa per rupee, cents per dollar).
pub const MINOR_PER_MAJOR: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences can go negative even though prices cannot
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ordered**: The Filter/Sort Engine compares prices directly
/// - **Transparent on the wire**: serializes as the bare minor-unit integer,
///   so Rs.450 goes out as `45000`. Pair it with a formatted string when a
///   human reads it.
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  ProductRecord.price (f64) ──► Product.price ──┬──► PriceRange bounds  │
/// │                                                │                        │
/// │                                                └──► CartLine.line_total │
/// │                                                          │              │
/// │                                     Cart.subtotal ◄──────┘              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // 10.99
    /// assert_eq!(price.minor_units(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from whole major units.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * MINOR_PER_MAJOR)
    }

    /// Creates a Money value from major and minor parts.
    ///
    /// ## Note
    /// For negative amounts only the major part should be negative:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Converts a decimal major-unit amount (as the CMS sends it).
    ///
    /// Rounds half away from zero to the nearest minor unit. Returns `None`
    /// for NaN, infinities, and values outside the i64 range.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_f64(249.9), Some(Money::from_minor(24990)));
    /// assert_eq!(Money::from_major_f64(f64::NAN), None);
    /// ```
    pub fn from_major_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        let minor = (amount * MINOR_PER_MAJOR as f64).round();
        if minor < i64::MIN as f64 || minor > i64::MAX as f64 {
            return None;
        }
        Some(Money(minor as i64))
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % MINOR_PER_MAJOR).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// Saturates instead of overflowing: cart quantities have no upper bound.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(299);
    /// assert_eq!(unit_price.multiply_quantity(3).minor_units(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let price = Money::from_major(100);
    /// assert_eq!(price.apply_percentage_discount(1000), Money::from_major(90));
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let bps = discount_bps.min(10_000) as i128;
        let discount = (self.0 as i128 * bps + 5000) / 10_000;
        Money((self.0 as i128 - discount) as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering without a currency symbol.
///
/// ## Note
/// Symbol and digit grouping are presentation concerns, see
/// `ConfigState::format_money` in the app crate.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
