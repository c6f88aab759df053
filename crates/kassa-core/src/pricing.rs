//! # Order Pricing Engine
//!
//! The deterministic computation at the center of Kassa: item prices plus
//! an optional percentage discount and percentage tax become one monetary
//! total, rounded half-up to 2 fractional digits.
//!
//! ## The Five-Step Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. items_total      = Σ item.unit_price          (0 if no items)      │
//! │  2. discount_amount  = items_total × discount% ÷ 100                   │
//! │  3. subtotal         = items_total − discount_amount                   │
//! │  4. tax_amount       = subtotal × tax% ÷ 100                           │
//! │  5. total            = subtotal + tax_amount                           │
//! │                                                                         │
//! │  then: round(total, 2, half-up)                                        │
//! │                                                                         │
//! │  NO reordering. NO floats. NO short-circuits: a 0% policy runs         │
//! │  through the same arithmetic as a 20% one, so the two call sites       │
//! │  (display and charge) can never diverge numerically.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Call Sites
//! This engine is invoked twice per order: once to render the total a
//! buyer sees, once to derive the integer minor-unit amount the provider
//! charges. Both go through [`compute_total`]; the charge path continues
//! through [`charge_amount`], the single canonical pipeline to minor units.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::{round_money, to_minor_units};
use crate::types::Order;

/// Divisor turning a percentage into a fraction. Shared by both policy
/// stages so the formula reads exactly like the contract.
const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

// =============================================================================
// Order Totals
// =============================================================================

/// The itemized result of pricing one order.
///
/// Intermediate amounts are exact (unrounded) decimals so a display layer
/// can show the same breakdown the formula produced; `total` is the only
/// field carrying the final half-up 2-digit rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of the attached items' unit prices.
    pub items_total: Decimal,

    /// Amount removed by the discount stage (0 when no discount).
    pub discount_amount: Decimal,

    /// Item total after discount, before tax.
    pub subtotal: Decimal,

    /// Amount added by the tax stage (0 when no tax).
    pub tax_amount: Decimal,

    /// Final total: subtotal + tax, rounded to 2 digits half-up.
    pub total: Decimal,
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices an order, returning the full breakdown.
///
/// Pure function of the order snapshot: no side effects, no I/O, and two
/// calls with the same snapshot return identical values. Assumes the
/// currency-match invariant already holds (enforced at item attachment)
/// and that prices/percents passed data-entry validation.
///
/// ## Example
/// ```rust
/// use kassa_core::pricing::price_order;
/// use kassa_core::{CatalogItem, Currency, Order, PercentPolicy};
/// use rust_decimal::Decimal;
///
/// let order = Order::new(Currency::Usd)
///     .with_items(vec![
///         CatalogItem::new("A", Decimal::new(10000, 2), Currency::Usd),
///         CatalogItem::new("B", Decimal::new(5000, 2), Currency::Usd),
///     ])
///     .with_discount(PercentPolicy::new("Promo", Decimal::new(5, 0)))
///     .with_tax(PercentPolicy::new("VAT", Decimal::new(10, 0)));
///
/// let totals = price_order(&order);
/// assert_eq!(totals.items_total, Decimal::new(15000, 2));
/// assert_eq!(totals.discount_amount, Decimal::new(750, 2));
/// assert_eq!(totals.subtotal, Decimal::new(14250, 2));
/// assert_eq!(totals.tax_amount, Decimal::new(1425, 2));
/// assert_eq!(totals.total, Decimal::new(15675, 2));
/// ```
pub fn price_order(order: &Order) -> OrderTotals {
    // Missing policies resolve to 0% up front; the formula below stays
    // linear and total regardless of which policies are present.
    let discount_percent = order
        .discount
        .as_ref()
        .map(|d| d.percent)
        .unwrap_or(Decimal::ZERO);
    let tax_percent = order
        .tax
        .as_ref()
        .map(|t| t.percent)
        .unwrap_or(Decimal::ZERO);

    let items_total: Decimal = order.items.iter().map(|item| item.unit_price).sum();

    let discount_amount = items_total * discount_percent / ONE_HUNDRED;
    let subtotal = items_total - discount_amount;

    let tax_amount = subtotal * tax_percent / ONE_HUNDRED;
    let total = subtotal + tax_amount;

    OrderTotals {
        items_total,
        discount_amount,
        subtotal,
        tax_amount,
        total: round_money(total),
    }
}

/// Computes the order total: a decimal with exactly 2 fractional digits,
/// rounded half-up, in the order's currency.
///
/// Shorthand for `price_order(order).total`; both the display path and the
/// charge path use this.
#[inline]
pub fn compute_total(order: &Order) -> Decimal {
    price_order(order).total
}

/// The canonical charge pipeline: `compute_total` followed by minor-unit
/// conversion.
///
/// This is the ONLY path from an order to the integer amount handed to the
/// payment provider. Keeping it a single function removes any chance of a
/// second, independently-rounded conversion disagreeing with the display.
///
/// ## Example
/// ```rust
/// use kassa_core::pricing::charge_amount;
/// use kassa_core::{CatalogItem, Currency, Order};
/// use rust_decimal::Decimal;
///
/// let order = Order::new(Currency::Usd)
///     .with_items(vec![CatalogItem::new("A", Decimal::new(1050, 2), Currency::Usd)]);
/// assert_eq!(charge_amount(&order).unwrap(), 1050);
/// ```
pub fn charge_amount(order: &Order) -> CoreResult<i64> {
    to_minor_units(compute_total(order), order.currency)
}

// =============================================================================
// Unit Tests
// =============================================================================
