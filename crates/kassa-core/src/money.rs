//! # Money Module
//!
//! Canonical rounding and minor-unit conversion for monetary amounts.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │    10.00 × 100 can land at 999.9999… → 999 cents → off by one cent     │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal everywhere                                  │
//! │    10.00 × 100 = 1000.00 exactly, truncation to 1000 is safe           │
//! │                                                                         │
//! │  The display template shows the rounded decimal total.                  │
//! │  The provider charges the minor-unit integer derived from THAT SAME    │
//! │  total. If the two ever diverge, a customer is charged an amount       │
//! │  they were not shown.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kassa_core::money::{round_money, to_minor_units, from_minor_units};
//! use kassa_core::Currency;
//! use rust_decimal::Decimal;
//!
//! let total = round_money(Decimal::new(10005, 3)); // 10.005 → 10.01
//! assert_eq!(total, Decimal::new(1001, 2));
//!
//! let cents = to_minor_units(total, Currency::Usd).unwrap();
//! assert_eq!(cents, 1001);
//!
//! assert_eq!(from_minor_units(cents, Currency::Usd), total);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult};
use crate::MONEY_SCALE;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds an amount to the canonical money scale (2 fractional digits),
/// half-up (midpoints round away from zero).
///
/// This is the ONLY rounding rule in the engine. A computed total of
/// exactly 10.005 becomes 10.01, never 10.00.
///
/// ## Example
/// ```rust
/// use kassa_core::money::round_money;
/// use rust_decimal::Decimal;
///
/// assert_eq!(round_money(Decimal::new(10005, 3)), Decimal::new(1001, 2));
/// assert_eq!(round_money(Decimal::new(10004, 3)), Decimal::new(1000, 2));
/// ```
#[inline]
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

// =============================================================================
// Minor-Unit Conversion
// =============================================================================

/// Converts a decimal amount into the integer minor-unit amount the payment
/// provider expects (cents for USD, kopecks for RUB).
///
/// ## Contract
/// Multiplies the *decimal* amount by 100 and truncates. The input is
/// expected to already carry at most 2 fractional digits (everything the
/// pricing engine emits does), so truncation after the multiplication is
/// exact: `10.00 × 100 = 1000`, never 999 or 1001.
///
/// Amounts with stray sub-cent digits are truncated toward zero, mirroring
/// integer conversion of an exact decimal; rounding sub-cent inputs is the
/// job of [`round_money`], not this function.
///
/// ## Errors
/// Returns [`CoreError::AmountOutOfRange`] if the scaled amount does not
/// fit in an `i64`.
///
/// ## Example
/// ```rust
/// use kassa_core::money::to_minor_units;
/// use kassa_core::Currency;
/// use rust_decimal::Decimal;
///
/// let amount = Decimal::new(1050, 2); // 10.50
/// assert_eq!(to_minor_units(amount, Currency::Usd).unwrap(), 1050);
/// ```
pub fn to_minor_units(amount: Decimal, currency: Currency) -> CoreResult<i64> {
    let scaled = amount
        .checked_mul(Decimal::from(currency.minor_units_per_major()))
        .ok_or(CoreError::AmountOutOfRange { amount })?;
    scaled
        .trunc()
        .to_i64()
        .ok_or(CoreError::AmountOutOfRange { amount })
}

/// Converts an integer minor-unit amount back into a decimal amount.
///
/// Used for display reconciliation of provider-reported amounts; the
/// charge path never needs it.
///
/// ## Example
/// ```rust
/// use kassa_core::money::from_minor_units;
/// use kassa_core::Currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(from_minor_units(1050, Currency::Usd), Decimal::new(1050, 2));
/// ```
#[inline]
pub fn from_minor_units(minor: i64, currency: Currency) -> Decimal {
    // Both supported currencies carry 2 fractional digits; constructing at
    // scale 2 divides by the minor factor exactly.
    debug_assert_eq!(currency.minor_units_per_major(), 100);
    Decimal::new(minor, MONEY_SCALE)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_money_half_up() {
        // The .005 boundary rounds UP, away from zero
        assert_eq!(round_money(dec!(10.005)), dec!(10.01));
        assert_eq!(round_money(dec!(10.004)), dec!(10.00));
        assert_eq!(round_money(dec!(10.0049999)), dec!(10.00));
        assert_eq!(round_money(dec!(0.005)), dec!(0.01));
        // Half-even would give 2.34 here; half-up must give 2.35
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
    }

    #[test]
    fn test_round_money_is_stable_on_two_dp_input() {
        assert_eq!(round_money(dec!(156.75)), dec!(156.75));
        assert_eq!(round_money(dec!(0.00)), dec!(0.00));
    }

    #[test]
    fn test_to_minor_units_exact() {
        assert_eq!(to_minor_units(dec!(10.00), Currency::Usd).unwrap(), 1000);
        assert_eq!(to_minor_units(dec!(10.50), Currency::Usd).unwrap(), 1050);
        assert_eq!(to_minor_units(dec!(0.01), Currency::Rub).unwrap(), 1);
        assert_eq!(to_minor_units(dec!(0), Currency::Usd).unwrap(), 0);
        assert_eq!(
            to_minor_units(dec!(19999999.99), Currency::Usd).unwrap(),
            1_999_999_999
        );
    }

    #[test]
    fn test_to_minor_units_no_drift_across_range() {
        // Sweep a band of 2-dp amounts: scaling must equal the integer
        // number of cents exactly, with no ±1 drift anywhere.
        for cents in 0..10_000i64 {
            let amount = Decimal::new(cents, 2);
            assert_eq!(to_minor_units(amount, Currency::Usd).unwrap(), cents);
        }
        for cents in (0..1_000_000_000i64).step_by(98_765_431) {
            let amount = Decimal::new(cents, 2);
            assert_eq!(to_minor_units(amount, Currency::Rub).unwrap(), cents);
        }
    }

    #[test]
    fn test_to_minor_units_truncates_sub_cent_digits() {
        // Sub-cent digits are cut, not rounded (rounding happened upstream)
        assert_eq!(to_minor_units(dec!(10.009), Currency::Usd).unwrap(), 1000);
        assert_eq!(to_minor_units(dec!(10.001), Currency::Usd).unwrap(), 1000);
    }

    #[test]
    fn test_to_minor_units_overflow_is_an_error() {
        let huge = Decimal::MAX;
        assert!(matches!(
            to_minor_units(huge, Currency::Usd),
            Err(CoreError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_minor_units() {
        assert_eq!(from_minor_units(1050, Currency::Usd), dec!(10.50));
        assert_eq!(from_minor_units(0, Currency::Rub), dec!(0.00));
        assert_eq!(from_minor_units(1, Currency::Usd), dec!(0.01));
    }

    #[test]
    fn test_minor_units_inverse_on_two_dp_amounts() {
        let amounts = [dec!(0.00), dec!(0.01), dec!(10.50), dec!(156.75)];
        for amount in amounts {
            let minor = to_minor_units(amount, Currency::Usd).unwrap();
            assert_eq!(from_minor_units(minor, Currency::Usd), amount);
        }
    }
}
