//! # kassa-checkout: The Payment-Provider Seam
//!
//! Turns priced orders into the requests a hosted-checkout / payment-intent
//! provider consumes, without ever talking to the network itself.
//!
//! ## Two Charge Flows
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SESSION FLOW (hosted checkout)                                         │
//! │    Order ──► line items (minor units per item)                          │
//! │          ──► coupon spec      (discount attached, percent > 0)          │
//! │          ──► tax-rate spec    (tax attached, percent > 0)               │
//! │          ──► SessionRequest ──► CheckoutProvider::create_session        │
//! │    The provider itemizes and folds discount/tax on its side.            │
//! │                                                                         │
//! │  INTENT FLOW (payment intent)                                           │
//! │    Order ──► charge_amount (compute_total → to_minor_units)             │
//! │          ──► IntentRequest ──► CheckoutProvider::create_intent          │
//! │    We fold the total ourselves; the provider charges one amount.        │
//! │                                                                         │
//! │  EITHER WAY: the supported-currency gate (CurrencyConfig) runs FIRST,   │
//! │  before any pricing or provider work.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Currency → provider-credentials mapping (the gate)
//! - [`session`] - Hosted-checkout session requests and orchestration
//! - [`intent`] - Payment-intent requests and orchestration
//! - [`provider`] - The `CheckoutProvider` trait a transport client implements
//! - [`error`] - Checkout error types
//!
//! Provider failures propagate as opaque [`CheckoutError::Provider`]
//! values carrying the provider's message; this crate never retries.

pub mod config;
pub mod error;
pub mod intent;
pub mod provider;
pub mod session;

pub use config::{CurrencyConfig, ProviderKeys};
pub use error::{CheckoutError, CheckoutResult};
pub use intent::{intent_for_item, intent_for_order, IntentRequest};
pub use provider::{CheckoutProvider, CheckoutSession, PaymentIntent};
pub use session::{
    checkout_item, checkout_order, item_session_request, order_session_request, CouponSpec,
    LineItem, ReturnUrls, SessionRequest, TaxRateSpec,
};
