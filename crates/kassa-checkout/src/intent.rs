//! # Payment Intents
//!
//! The pre-folded charge flow: instead of itemizing, the engine computes
//! the total and the provider charges exactly that amount.
//!
//! The amount on every order intent comes from
//! [`kassa_core::pricing::charge_amount`], the single canonical
//! `compute_total` → `to_minor_units` pipeline. There is deliberately no
//! second conversion path here that could round differently from what the
//! display layer showed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use kassa_core::money::to_minor_units;
use kassa_core::pricing::{charge_amount, price_order, OrderTotals};
use kassa_core::{CatalogItem, Order};

use crate::config::CurrencyConfig;
use crate::error::CheckoutResult;

// =============================================================================
// Request Type
// =============================================================================

/// A payment-intent creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentRequest {
    /// Amount to charge, in minor units.
    pub amount: i64,

    /// Lowercase currency code.
    pub currency: String,

    /// Reconciliation metadata ("order_id" or "item_id").
    pub metadata: BTreeMap<String, String>,
}

// =============================================================================
// Request Building
// =============================================================================

/// Builds a payment intent for an order, returning the totals breakdown
/// alongside so the display layer can itemize the same numbers the charge
/// was derived from.
///
/// The supported-currency gate runs before any pricing.
pub fn intent_for_order(
    order: &Order,
    config: &CurrencyConfig,
) -> CheckoutResult<(IntentRequest, OrderTotals)> {
    config.keys_for(order.currency)?;

    let totals = price_order(order);
    let amount = charge_amount(order)?;
    debug!(order_id = %order.id, amount, "Built payment intent request");

    let mut metadata = BTreeMap::new();
    metadata.insert("order_id".to_string(), order.id.to_string());

    Ok((
        IntentRequest {
            amount,
            currency: order.currency.provider_code().to_string(),
            metadata,
        },
        totals,
    ))
}

/// Builds a payment intent for buying a single catalog item directly.
pub fn intent_for_item(
    item: &CatalogItem,
    config: &CurrencyConfig,
) -> CheckoutResult<IntentRequest> {
    config.keys_for(item.currency)?;

    let amount = to_minor_units(item.unit_price, item.currency)?;

    let mut metadata = BTreeMap::new();
    metadata.insert("item_id".to_string(), item.id.to_string());

    Ok(IntentRequest {
        amount,
        currency: item.currency.provider_code().to_string(),
        metadata,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
