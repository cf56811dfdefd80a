//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A tag balance that drifts by a paisa after a few hundred toll         │
//! │  deductions no longer matches the ledger.                              │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise (1 ₹ = 100 paise)                         │
//! │    ₹425 + ₹500 = 42500 + 50000 = 92500 paise, exactly                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tollpay_core::money::Money;
//!
//! let balance = Money::from_rupees(425);
//! let topped_up = balance + Money::from_rupees(500);
//! assert_eq!(topped_up.paise(), 92_500);
//! assert_eq!(topped_up.to_string(), "₹925.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount stored in paise (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction can be checked for a negative result
///   before a deduction is committed
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serialized as paise**: the dashboard divides by 100 for display
///
/// ## Where Money is Used
/// ```text
/// FasTag.balance ──► Transaction.resulting_balance ──► Balance chart
///        ▲
///        │ recharge / deduction
/// Transaction.amount
///
/// AutoRechargeSettings.min_threshold ──► low-balance check
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use tollpay_core::money::Money;
    ///
    /// let fare = Money::from_paise(7_550); // ₹75.50
    /// assert_eq!(fare.rupees(), 75);
    /// assert_eq!(fare.paise_part(), 50);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// Every amount the dashboard offers (thresholds, quick top-ups, toll
    /// fares in the seed history) is a whole rupee figure.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
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

    /// Subtracts `other`, returning `None` if the result would be negative.
    ///
    /// ## Example
    /// ```rust
    /// use tollpay_core::money::Money;
    ///
    /// let balance = Money::from_rupees(100);
    /// assert_eq!(balance.checked_debit(Money::from_rupees(75)), Some(Money::from_rupees(25)));
    /// assert_eq!(balance.checked_debit(Money::from_rupees(150)), None);
    /// ```
    #[inline]
    pub const fn checked_debit(&self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(remaining) if remaining >= 0 => Some(Money(remaining)),
            _ => None,
        }
    }

    /// Adds `other`, returning `None` on i64 overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tollpay_core::money::Money;
    ///
    /// let balance = Money::from_rupees(425);
    /// assert_eq!(balance.checked_add(Money::from_rupees(500)), Some(Money::from_rupees(925)));
    /// assert_eq!(balance.checked_add(Money::from_paise(i64::MAX)), None);
    /// ```
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(sum) => Some(Money(sum)),
            None => None,
        }
    }

    /// Plain decimal form without currency symbol or padding.
    ///
    /// Whole rupee amounts render without a fraction ("500"), otherwise two
    /// decimal places are shown ("75.50"). Transaction search matches
    /// against this form, so typing "500" finds a ₹500 recharge.
    ///
    /// ## Example
    /// ```rust
    /// use tollpay_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(500).to_plain_string(), "500");
    /// assert_eq!(Money::from_paise(7_550).to_plain_string(), "75.50");
    /// ```
    pub fn to_plain_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        if self.paise_part() == 0 {
            format!("{}{}", sign, self.rupees().abs())
        } else {
            format!("{}{}.{:02}", sign, self.rupees().abs(), self.paise_part())
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display ("₹425.00"). The dashboard does its own
/// locale-aware formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}₹{}.{:02}",
            sign,
            self.rupees().abs(),
            self.paise_part()
        )
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
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
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

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        let money = Money::from_rupees(425);
        assert_eq!(money.paise(), 42_500);
        assert_eq!(money.rupees(), 425);
        assert_eq!(money.paise_part(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_rupees(425).to_string(), "₹425.00");
        assert_eq!(Money::from_paise(7_550).to_string(), "₹75.50");
        assert_eq!(Money::from_paise(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(Money::from_rupees(75).to_plain_string(), "75");
        assert_eq!(Money::from_rupees(1000).to_plain_string(), "1000");
        assert_eq!(Money::from_paise(5).to_plain_string(), "0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(425);
        let b = Money::from_rupees(500);

        assert_eq!(a + b, Money::from_rupees(925));
        assert_eq!(b - a, Money::from_rupees(75));

        let mut c = a;
        c += b;
        c -= Money::from_rupees(25);
        assert_eq!(c, Money::from_rupees(900));
    }

    #[test]
    fn test_checked_debit_boundary() {
        let balance = Money::from_rupees(75);
        assert_eq!(balance.checked_debit(Money::from_rupees(75)), Some(Money::zero()));
        assert_eq!(balance.checked_debit(Money::from_paise(7_501)), None);
        assert_eq!(balance.checked_debit(Money::from_paise(i64::MIN)), None);
    }

    #[test]
    fn test_checked_add_overflow() {
        let balance = Money::from_rupees(425);
        assert_eq!(balance.checked_add(Money::from_rupees(75)), Some(Money::from_rupees(500)));
        assert_eq!(balance.checked_add(Money::from_paise(i64::MAX)), None);
        assert_eq!(Money::from_paise(i64::MAX).checked_add(Money::zero()), Some(Money::from_paise(i64::MAX)));
    }

    #[test]
    fn test_ordering_is_by_amount() {
        assert!(Money::from_rupees(200) < Money::from_rupees(300));
        assert!(!(Money::from_rupees(300) < Money::from_rupees(300)));
    }
}
