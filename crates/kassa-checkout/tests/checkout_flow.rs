//! End-to-end flow: store → pricing engine → checkout seam.
//!
//! Mirrors how a request handler uses the stack: records go into the
//! repositories, the order repository resolves a snapshot, and the
//! checkout layer builds provider requests from that snapshot. The
//! provider is a recording fake.

use std::cell::RefCell;
use std::sync::Arc;

use rust_decimal_macros::dec;
use uuid::Uuid;

use kassa_checkout::{
    checkout_order, intent_for_order, CheckoutError, CheckoutProvider, CheckoutResult,
    CheckoutSession, CurrencyConfig, IntentRequest, PaymentIntent, ProviderKeys, ReturnUrls,
    SessionRequest,
};
use kassa_core::{compute_total, Currency};
use kassa_store::{CatalogRepository, OrderRepository, PolicyRepository, PolicyRole, StoreError};

// =============================================================================
// Recording Provider
// =============================================================================

#[derive(Default)]
struct RecordingProvider {
    sessions: RefCell<Vec<SessionRequest>>,
    intents: RefCell<Vec<IntentRequest>>,
}

impl CheckoutProvider for RecordingProvider {
    fn create_session(
        &self,
        keys: &ProviderKeys,
        request: &SessionRequest,
    ) -> CheckoutResult<CheckoutSession> {
        assert!(keys.secret.starts_with("sk_"));
        self.sessions.borrow_mut().push(request.clone());
        Ok(CheckoutSession {
            id: "sess_123".to_string(),
        })
    }

    fn create_intent(
        &self,
        _keys: &ProviderKeys,
        request: &IntentRequest,
    ) -> CheckoutResult<PaymentIntent> {
        self.intents.borrow_mut().push(request.clone());
        Ok(PaymentIntent {
            id: "pi_123".to_string(),
            client_secret: "pi_123_secret".to_string(),
        })
    }
}

// =============================================================================
// Fixtures
// =============================================================================

struct Stack {
    catalog: Arc<CatalogRepository>,
    policies: Arc<PolicyRepository>,
    orders: OrderRepository,
    config: CurrencyConfig,
    urls: ReturnUrls,
}

fn stack() -> Stack {
    let catalog = Arc::new(CatalogRepository::new());
    let policies = Arc::new(PolicyRepository::new());
    let orders = OrderRepository::new(catalog.clone(), policies.clone());
    let config = CurrencyConfig::new().with_keys(
        Currency::Usd,
        ProviderKeys {
            publishable: "pk_test_usd".to_string(),
            secret: "sk_test_usd".to_string(),
        },
    );
    let urls = ReturnUrls {
        success_url: "https://shop.example/success".to_string(),
        cancel_url: "https://shop.example/cancel".to_string(),
    };
    Stack {
        catalog,
        policies,
        orders,
        config,
        urls,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn full_order_checkout_session_flow() {
    let s = stack();
    let a = s.catalog.create("Item 1", dec!(100.00), Currency::Usd).unwrap();
    let b = s.catalog.create("Item 2", dec!(50.00), Currency::Usd).unwrap();
    let discount = s
        .policies
        .create(PolicyRole::Discount, "Black Friday", dec!(5))
        .unwrap();
    let tax = s.policies.create(PolicyRole::Tax, "VAT", dec!(10)).unwrap();

    let order = s.orders.create(Currency::Usd);
    s.orders.set_items(order.id, &[a.id, b.id]).unwrap();
    s.orders.attach_discount(order.id, discount.id).unwrap();
    s.orders.attach_tax(order.id, tax.id).unwrap();

    let snapshot = s.orders.resolve(order.id).unwrap();
    let provider = RecordingProvider::default();
    let session = checkout_order(&provider, &s.config, &snapshot, &s.urls).unwrap();
    assert_eq!(session.id, "sess_123");

    let recorded = provider.sessions.borrow();
    let request = &recorded[0];
    assert_eq!(request.currency, "usd");
    assert_eq!(request.line_items.len(), 2);
    assert_eq!(
        request.line_items.iter().map(|l| l.unit_amount).sum::<i64>(),
        15000
    );
    assert_eq!(request.coupon.as_ref().unwrap().percent_off, dec!(5));
    assert_eq!(request.tax_rate.as_ref().unwrap().country, "US");
}

#[test]
fn display_total_and_charged_amount_agree() {
    let s = stack();
    let a = s.catalog.create("Odd", dec!(6.67), Currency::Usd).unwrap();
    let tax = s.policies.create(PolicyRole::Tax, "Tax", dec!(50)).unwrap();

    let order = s.orders.create(Currency::Usd);
    s.orders.set_items(order.id, &[a.id]).unwrap();
    s.orders.attach_tax(order.id, tax.id).unwrap();

    let snapshot = s.orders.resolve(order.id).unwrap();

    // Display path: 6.67 + 50% = 10.005 → rounds half-up to 10.01
    assert_eq!(compute_total(&snapshot), dec!(10.01));

    // Charge path: the intent amount is the same rounding, in minor units
    let provider = RecordingProvider::default();
    let (request, totals) = intent_for_order(&snapshot, &s.config).unwrap();
    let keys = s.config.keys_for(Currency::Usd).unwrap();
    provider.create_intent(keys, &request).unwrap();

    assert_eq!(totals.total, dec!(10.01));
    assert_eq!(provider.intents.borrow()[0].amount, 1001);
}

#[test]
fn currency_mismatch_blocks_attachment_and_order_stays_priceable() {
    let s = stack();
    let usd = s.catalog.create("USD item", dec!(10.00), Currency::Usd).unwrap();
    let rub = s.catalog.create("RUB item", dec!(900.00), Currency::Rub).unwrap();

    let order = s.orders.create(Currency::Usd);
    s.orders.set_items(order.id, &[usd.id]).unwrap();

    let err = s.orders.set_items(order.id, &[usd.id, rub.id]).unwrap_err();
    assert!(matches!(err, StoreError::Core(_)));

    // The surviving order prices exactly as before the failed attempt
    let snapshot = s.orders.resolve(order.id).unwrap();
    assert_eq!(compute_total(&snapshot), dec!(10.00));
}

#[test]
fn unconfigured_currency_is_rejected_before_the_provider_sees_anything() {
    let s = stack(); // only USD is configured
    let item = s.catalog.create("RUB only", dec!(500.00), Currency::Rub).unwrap();
    let order = s.orders.create(Currency::Rub);
    s.orders.set_items(order.id, &[item.id]).unwrap();

    let snapshot = s.orders.resolve(order.id).unwrap();
    let provider = RecordingProvider::default();
    let err = checkout_order(&provider, &s.config, &snapshot, &s.urls).unwrap_err();

    assert!(matches!(
        err,
        CheckoutError::UnsupportedCurrency { ref code } if code == "RUB"
    ));
    assert!(provider.sessions.borrow().is_empty());
}

#[test]
fn unknown_order_id_is_a_typed_not_found() {
    let s = stack();
    let err = s.orders.resolve(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, StoreError::NotFound { entity: "Order", .. }));
}
