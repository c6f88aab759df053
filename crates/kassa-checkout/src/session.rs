//! # Hosted-Checkout Sessions
//!
//! Builds the itemized session request the provider folds discount and tax
//! into on its side.
//!
//! ## Itemization Rules (provider-facing)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  One line item per catalog item, quantity 1, amount in minor units     │
//! │  (each item's unit_price through to_minor_units, exact).               │
//! │                                                                         │
//! │  Discount attached AND percent > 0  → CouponSpec { name, percent_off } │
//! │  Tax attached AND percent > 0       → TaxRateSpec { name, percentage,  │
//! │                                        country, inclusive: false }     │
//! │                                                                         │
//! │  A 0% policy is folded into the total by the pricing engine as usual,  │
//! │  but never becomes a provider-side object: providers reject empty      │
//! │  coupons, and a 0% coupon/rate changes nothing.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use kassa_core::money::to_minor_units;
use kassa_core::{CatalogItem, Currency, Order};

use crate::config::CurrencyConfig;
use crate::error::CheckoutResult;
use crate::provider::{CheckoutProvider, CheckoutSession};

// =============================================================================
// Request Types
// =============================================================================

/// One provider line item: a catalog item priced in minor units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name shown on the provider's checkout page.
    pub name: String,

    /// Unit amount in minor units (cents/kopecks).
    pub unit_amount: i64,

    /// Quantity. Orders reference an item at most once, so this is 1.
    pub quantity: u32,
}

/// A provider-side percentage coupon (the discount role, itemized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponSpec {
    /// Coupon display name.
    pub name: String,

    /// Percentage off the order, in (0, 100].
    pub percent_off: Decimal,
}

/// A provider-side tax rate (the tax role, itemized).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRateSpec {
    /// Tax display name.
    pub name: String,

    /// Percentage applied on top of the discounted amount, in (0, 100].
    pub percentage: Decimal,

    /// Country the rate is registered in ("US", "RU").
    pub country: String,

    /// Whether the rate is included in the line amounts. Always false:
    /// line items carry pre-tax prices.
    pub inclusive: bool,
}

/// Where the provider sends the buyer after checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnUrls {
    /// Redirect target after successful payment.
    pub success_url: String,

    /// Redirect target when the buyer cancels.
    pub cancel_url: String,
}

/// A complete hosted-checkout session request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Lowercase currency code, the form providers expect on the wire.
    pub currency: String,

    /// One entry per catalog item on the order.
    pub line_items: Vec<LineItem>,

    /// Present only when a discount with percent > 0 is attached.
    pub coupon: Option<CouponSpec>,

    /// Present only when a tax with percent > 0 is attached.
    pub tax_rate: Option<TaxRateSpec>,

    /// Post-checkout redirects.
    pub success_url: String,

    /// Cancellation redirect.
    pub cancel_url: String,
}

// =============================================================================
// Request Building
// =============================================================================

/// Builds a session request for a whole order.
///
/// The supported-currency gate runs first; only then are line items
/// converted. Assumes the order snapshot satisfies the currency-match
/// invariant (the store enforced it at attachment).
pub fn order_session_request(
    order: &Order,
    config: &CurrencyConfig,
    urls: &ReturnUrls,
) -> CheckoutResult<SessionRequest> {
    // Gate before any conversion or provider work
    config.keys_for(order.currency)?;

    let line_items = order
        .items
        .iter()
        .map(|item| line_item(item, order.currency))
        .collect::<CheckoutResult<Vec<_>>>()?;

    let coupon = order
        .discount
        .as_ref()
        .filter(|discount| discount.percent > Decimal::ZERO)
        .map(|discount| CouponSpec {
            name: discount.name.clone(),
            percent_off: discount.percent,
        });

    let tax_rate = order
        .tax
        .as_ref()
        .filter(|tax| tax.percent > Decimal::ZERO)
        .map(|tax| TaxRateSpec {
            name: tax.name.clone(),
            percentage: tax.percent,
            country: order.currency.country().to_string(),
            inclusive: false,
        });

    debug!(
        order_id = %order.id,
        lines = line_items.len(),
        has_coupon = coupon.is_some(),
        has_tax_rate = tax_rate.is_some(),
        "Built checkout session request"
    );

    Ok(SessionRequest {
        currency: order.currency.provider_code().to_string(),
        line_items,
        coupon,
        tax_rate,
        success_url: urls.success_url.clone(),
        cancel_url: urls.cancel_url.clone(),
    })
}

/// Builds a session request for buying a single catalog item directly.
pub fn item_session_request(
    item: &CatalogItem,
    config: &CurrencyConfig,
    urls: &ReturnUrls,
) -> CheckoutResult<SessionRequest> {
    config.keys_for(item.currency)?;

    Ok(SessionRequest {
        currency: item.currency.provider_code().to_string(),
        line_items: vec![line_item(item, item.currency)?],
        coupon: None,
        tax_rate: None,
        success_url: urls.success_url.clone(),
        cancel_url: urls.cancel_url.clone(),
    })
}

fn line_item(item: &CatalogItem, currency: Currency) -> CheckoutResult<LineItem> {
    Ok(LineItem {
        name: item.name.clone(),
        unit_amount: to_minor_units(item.unit_price, currency)?,
        quantity: 1,
    })
}

// =============================================================================
// Orchestration
// =============================================================================

/// Opens a hosted-checkout session for an order.
///
/// Gate → build → provider call; a provider failure propagates as an
/// opaque [`crate::CheckoutError::Provider`], untouched and unretried.
pub fn checkout_order(
    provider: &impl CheckoutProvider,
    config: &CurrencyConfig,
    order: &Order,
    urls: &ReturnUrls,
) -> CheckoutResult<CheckoutSession> {
    let request = order_session_request(order, config, urls)?;
    let keys = config.keys_for(order.currency)?;
    provider.create_session(keys, &request)
}

/// Opens a hosted-checkout session for a single item.
pub fn checkout_item(
    provider: &impl CheckoutProvider,
    config: &CurrencyConfig,
    item: &CatalogItem,
    urls: &ReturnUrls,
) -> CheckoutResult<CheckoutSession> {
    let request = item_session_request(item, config, urls)?;
    let keys = config.keys_for(item.currency)?;
    provider.create_session(keys, &request)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKeys;
    use crate::error::CheckoutError;
    use kassa_core::PercentPolicy;
    use rust_decimal_macros::dec;

    fn config() -> CurrencyConfig {
        CurrencyConfig::new().with_keys(
            Currency::Usd,
            ProviderKeys {
                publishable: "pk_test".to_string(),
                secret: "sk_test".to_string(),
            },
        )
    }

    fn urls() -> ReturnUrls {
        ReturnUrls {
            success_url: "https://shop.example/success".to_string(),
            cancel_url: "https://shop.example/cancel".to_string(),
        }
    }

    fn usd_order() -> Order {
        Order::new(Currency::Usd).with_items(vec![
            CatalogItem::new("Item 1", dec!(100.00), Currency::Usd),
            CatalogItem::new("Item 2", dec!(50.00), Currency::Usd),
        ])
    }

    #[test]
    fn test_line_items_in_minor_units() {
        let request = order_session_request(&usd_order(), &config(), &urls()).unwrap();
        assert_eq!(request.currency, "usd");
        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].unit_amount, 10000);
        assert_eq!(request.line_items[1].unit_amount, 5000);
        assert!(request.line_items.iter().all(|line| line.quantity == 1));
    }

    #[test]
    fn test_coupon_and_tax_rate_specs() {
        let order = usd_order()
            .with_discount(PercentPolicy::new("Black Friday", dec!(5)))
            .with_tax(PercentPolicy::new("VAT", dec!(10)));
        let request = order_session_request(&order, &config(), &urls()).unwrap();

        let coupon = request.coupon.unwrap();
        assert_eq!(coupon.name, "Black Friday");
        assert_eq!(coupon.percent_off, dec!(5));

        let tax_rate = request.tax_rate.unwrap();
        assert_eq!(tax_rate.percentage, dec!(10));
        assert_eq!(tax_rate.country, "US");
        assert!(!tax_rate.inclusive);
    }

    #[test]
    fn test_zero_percent_policies_never_become_provider_objects() {
        let order = usd_order()
            .with_discount(PercentPolicy::new("Nothing off", dec!(0)))
            .with_tax(PercentPolicy::new("No tax", dec!(0)));
        let request = order_session_request(&order, &config(), &urls()).unwrap();
        assert!(request.coupon.is_none());
        assert!(request.tax_rate.is_none());
    }

    #[test]
    fn test_unsupported_currency_rejected_before_building() {
        let order = Order::new(Currency::Rub)
            .with_items(vec![CatalogItem::new("X", dec!(1.00), Currency::Rub)]);
        let err = order_session_request(&order, &config(), &urls()).unwrap_err();
        assert!(matches!(
            err,
            CheckoutError::UnsupportedCurrency { ref code } if code == "RUB"
        ));
    }

    #[test]
    fn test_item_session_request() {
        let item = CatalogItem::new("Solo", dec!(10.50), Currency::Usd);
        let request = item_session_request(&item, &config(), &urls()).unwrap();
        assert_eq!(request.line_items.len(), 1);
        assert_eq!(request.line_items[0].unit_amount, 1050);
        assert!(request.coupon.is_none());
        assert!(request.tax_rate.is_none());
    }

    #[test]
    fn test_provider_failure_propagates_opaquely() {
        struct FailingProvider;
        impl CheckoutProvider for FailingProvider {
            fn create_session(
                &self,
                _keys: &ProviderKeys,
                _request: &SessionRequest,
            ) -> CheckoutResult<CheckoutSession> {
                Err(CheckoutError::Provider {
                    message: "rate_limited".to_string(),
                })
            }
            fn create_intent(
                &self,
                _keys: &ProviderKeys,
                _request: &crate::intent::IntentRequest,
            ) -> CheckoutResult<crate::provider::PaymentIntent> {
                unreachable!("session flow never creates intents")
            }
        }

        let err = checkout_order(&FailingProvider, &config(), &usd_order(), &urls()).unwrap_err();
        assert_eq!(err.to_string(), "Charge creation failed: rate_limited");
    }
}
