//! # kassa-core: Pure Pricing Logic for Kassa
//!
//! This crate is the **heart** of Kassa. It turns an order (catalog items
//! plus an optional percentage discount and percentage tax) into a single
//! monetary total, and that total into the integer minor-unit amount a
//! payment provider charges. Everything here is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Kassa Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Calling Layer (external)                       │   │
//! │  │    order display ──► charge creation ──► reconciliation        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ kassa-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ currency  │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │ Currency  │  │ minor     │  │ compute_  │  │ currency  │  │   │
//! │  │   │ USD, RUB  │  │ units     │  │ total     │  │ match     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            kassa-store / kassa-checkout (siblings)              │   │
//! │  │     in-memory repositories, provider request building           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - The closed set of supported currencies (USD, RUB)
//! - [`money`] - Minor-unit conversion and the canonical rounding rule
//! - [`types`] - Domain types (CatalogItem, PercentPolicy, Order)
//! - [`pricing`] - The order pricing engine (`compute_total`)
//! - [`validation`] - Currency-match precondition and data-entry checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: pricing the same order twice yields bit-identical
//!    results. The display path and the charge path call the same engine.
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Exact Decimals**: all money and percents are `rust_decimal::Decimal`.
//!    Binary floating point never touches an amount.
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kassa_core::money::to_minor_units;
//! use kassa_core::pricing::compute_total;
//! use kassa_core::{CatalogItem, Currency, Order, PercentPolicy};
//! use rust_decimal::Decimal;
//!
//! let order = Order::new(Currency::Usd)
//!     .with_items(vec![
//!         CatalogItem::new("Keyboard", Decimal::new(10000, 2), Currency::Usd),
//!         CatalogItem::new("Mouse", Decimal::new(5000, 2), Currency::Usd),
//!     ])
//!     .with_discount(PercentPolicy::new("Black Friday", Decimal::new(500, 2)))
//!     .with_tax(PercentPolicy::new("VAT", Decimal::new(1000, 2)));
//!
//! // 150.00 - 5% = 142.50, + 10% tax = 156.75
//! let total = compute_total(&order);
//! assert_eq!(total, Decimal::new(15675, 2));
//!
//! // The provider charges exactly what was displayed
//! assert_eq!(to_minor_units(total, Currency::Usd).unwrap(), 15675);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod currency;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kassa_core::Currency` instead of
// `use kassa_core::currency::Currency`

pub use currency::Currency;
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{charge_amount, compute_total, price_order, OrderTotals};
pub use types::{CatalogItem, Order, PercentPolicy};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of fractional digits every monetary amount carries.
///
/// Both supported currencies (USD, RUB) display two fractional digits and
/// use 100 minor units per major unit. Every total leaving the pricing
/// engine is rounded to this scale, half-up.
pub const MONEY_SCALE: u32 = 2;

/// Maximum length of an entity name (catalog items, percent policies).
///
/// Mirrors the data-entry boundary: names longer than this are rejected
/// before a record is created, never truncated silently.
pub const MAX_NAME_LEN: usize = 255;
