//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Payout balances summed over thousands of orders drift by cents        │
//! │  when computed with floats, and sellers notice.                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10000 - 500 + 5000 - 250 = 14250 cents, every time                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use bazaar_core::money::Money;
//!
//! let payment = Money::from_cents(10000); // $100.00
//! let fee = Money::from_cents(500);       // $5.00
//!
//! let settled = payment.checked_sub(fee).unwrap();
//! assert_eq!(settled.to_string(), "$95.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: a settled amount can go negative when a platform fee
///   exceeds the payment, and the ledger must show that rather than hide it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serializes as a bare integer**: the JSON API speaks cents
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Payment.amount_cents ─┬─► settled = amount - platform_fee              │
/// │                        │                                                │
/// │  Payment.platform_fee ─┘        │                                       │
/// │                                 ▼                                       │
/// │                     Σ settled (unclaimed orders)                        │
/// │                                 │                                       │
/// │                                 ▼                                       │
/// │              pending_payout_cents / pending_payout_display             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion, truncated toward zero.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Adds two amounts, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let total = Money::from_cents(9500).checked_add(Money::from_cents(4750));
    /// assert_eq!(total, Some(Money::from_cents(14250)));
    ///
    /// assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    /// ```
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtracts `other`, returning `None` on overflow.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Sums an iterator of amounts, returning `None` on overflow.
    ///
    /// ## Usage
    /// This is what ledger code should reach for. The `Sum` impl is kept for
    /// small, bounded sums (tests, fixtures).
    pub fn checked_sum<I>(amounts: I) -> Option<Money>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::zero(), |acc, amount| acc.checked_add(amount))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders `$D.CC` using integer division and modulo only.
///
/// ## Note
/// The seller dashboard shows this string verbatim as
/// `pending_payout_display`, so the format is part of the API contract.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        // unsigned_abs keeps i64::MIN representable
        let magnitude = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, magnitude / 100, magnitude % 100)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Commission Rate
// =============================================================================

/// Platform commission rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1000 bps = 10% (the default marketplace commission)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommissionRate(u32);

impl CommissionRate {
    /// Default marketplace commission: 10%.
    pub const DEFAULT: CommissionRate = CommissionRate(1000);

    /// Creates a commission rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        CommissionRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Commission owed on `amount`, rounded half up in integer math.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::{CommissionRate, Money};
    ///
    /// let fee = CommissionRate::from_bps(250).fee_on(Money::from_cents(1999));
    /// // 1999 × 2.5% = 49.975 → 50 cents
    /// assert_eq!(fee.cents(), 50);
    /// ```
    pub fn fee_on(&self, amount: Money) -> Money {
        // i128 so large orders cannot overflow the intermediate product
        let fee = (amount.cents() as i128 * self.0 as i128 + 5000) / 10000;
        Money::from_cents(fee as i64)
    }
}

impl Default for CommissionRate {
    fn default() -> Self {
        CommissionRate::DEFAULT
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
        assert_eq!(format!("{}", Money::from_cents(7)), "$0.07");
        assert_eq!(format!("{}", Money::from_cents(14250)), "$142.50");
    }

    #[test]
    fn test_display_extremes_do_not_panic() {
        assert_eq!(
            Money::from_cents(i64::MIN).to_string(),
            "-$92233720368547758.08"
        );
        assert_eq!(
            Money::from_cents(i64::MAX).to_string(),
            "$92233720368547758.07"
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_cents(250);
        assert_eq!(c.cents(), 1250);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(
            Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)),
            None
        );
        assert_eq!(
            Money::from_cents(100).checked_sub(Money::from_cents(250)),
            Some(Money::from_cents(-150))
        );
    }

    #[test]
    fn test_checked_sum() {
        let amounts = [9500, 4750, 1].map(Money::from_cents);
        assert_eq!(Money::checked_sum(amounts), Some(Money::from_cents(14251)));
        assert_eq!(Money::checked_sum(Vec::new()), Some(Money::zero()));

        let overflowing = [Money::from_cents(i64::MAX), Money::from_cents(1)];
        assert_eq!(Money::checked_sum(overflowing), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_cents(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().cents(), 100);
    }

    #[test]
    fn test_serializes_as_integer_cents() {
        let json = serde_json::to_string(&Money::from_cents(14250)).unwrap();
        assert_eq!(json, "14250");
    }

    #[test]
    fn test_commission_fee_rounding() {
        let rate = CommissionRate::from_bps(1000);
        assert_eq!(rate.fee_on(Money::from_cents(10000)).cents(), 1000);
        assert_eq!(rate.fee_on(Money::from_cents(5)).cents(), 1); // 0.5 → 1
        assert_eq!(CommissionRate::default().bps(), 1000);
    }
}
