//! # Domain Types
//!
//! Core domain types used throughout Kassa.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │ PercentPolicy   │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  name           │   │  currency       │       │
//! │  │  unit_price     │   │  percent        │   │  items[]        │       │
//! │  │  currency       │   │  (0..=100)      │   │  discount?      │       │
//! │  └─────────────────┘   └─────────────────┘   │  tax?           │       │
//! │                                              └─────────────────┘       │
//! │                                                                         │
//! │  INVARIANT: item.currency == order.currency for every attached item    │
//! │  (enforced when items are attached, not recomputed lazily)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! An `Order` here is the *resolved snapshot* the storage layer hands to
//! the pricing engine: item and policy values are frozen copies of shared
//! records, taken under one read snapshot. Orders never own the catalog
//! records themselves; many orders may reference the same item.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Currency;

// =============================================================================
// Catalog Item
// =============================================================================

/// An item in the catalog, immutable once created.
///
/// Created by catalog management and *referenced* by orders; the price an
/// order sees is the item's current `unit_price`, always a non-negative
/// decimal with at most 2 fractional digits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Display name shown to buyers and on provider line items.
    pub name: String,

    /// Optional long-form description.
    pub description: Option<String>,

    /// Price per unit. Non-negative, at most 2 fractional digits.
    pub unit_price: Decimal,

    /// Currency the price is denominated in.
    pub currency: Currency,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Creates a new catalog item with a fresh UUID and timestamps.
    ///
    /// Validation of the name and price happens at the data-entry boundary
    /// (see [`crate::validation`]), before this constructor is reached.
    pub fn new(name: impl Into<String>, unit_price: Decimal, currency: Currency) -> Self {
        let now = Utc::now();
        CatalogItem {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            unit_price,
            currency,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Percent Policy
// =============================================================================

/// A named percentage, used identically for the discount role (applied to
/// the item total, once, before tax) and the tax role (applied to the
/// post-discount subtotal).
///
/// `percent` is always within [0, 100]; a policy of exactly 0 percent is a
/// numeric no-op but still flows through the full pricing formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentPolicy {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Display name ("Black Friday", "VAT", ...), also shown on
    /// provider-side coupon/tax-rate objects.
    pub name: String,

    /// Percentage in [0, 100], at most 2 fractional digits.
    pub percent: Decimal,
}

impl PercentPolicy {
    /// Creates a new percent policy with a fresh UUID.
    pub fn new(name: impl Into<String>, percent: Decimal) -> Self {
        PercentPolicy {
            id: Uuid::new_v4(),
            name: name.into(),
            percent,
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A resolved order snapshot: everything the pricing engine needs, frozen.
///
/// ## Snapshot Semantics
/// The storage layer resolves item and policy references into owned values
/// under a single read snapshot before pricing. The engine assumes the
/// snapshot is stable for the duration of one computation and does no
/// locking of its own. Two calls on the same snapshot return bit-identical
/// totals.
///
/// ## Invariants
/// - Every item's currency equals `currency` (enforced at attachment)
/// - Zero items is valid and prices to 0.00
/// - `discount` and `tax` are independently optional; a missing policy
///   behaves as 0 percent at that stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Currency of the order; every attached item matches it.
    pub currency: Currency,

    /// Items attached to the order (frozen copies of shared records).
    pub items: Vec<CatalogItem>,

    /// Optional discount policy, applied once before tax.
    pub discount: Option<PercentPolicy>,

    /// Optional tax policy, applied to the post-discount subtotal.
    pub tax: Option<PercentPolicy>,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new empty order in the given currency.
    pub fn new(currency: Currency) -> Self {
        let now = Utc::now();
        Order {
            id: Uuid::new_v4(),
            currency,
            items: Vec::new(),
            discount: None,
            tax: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the item set (builder style, used in tests and snapshots).
    ///
    /// The currency-match invariant is the caller's responsibility; the
    /// storage layer runs [`crate::validation::validate_item_currency`]
    /// over the whole candidate set before building a snapshot.
    pub fn with_items(mut self, items: Vec<CatalogItem>) -> Self {
        self.items = items;
        self
    }

    /// Attaches a discount policy (builder style).
    pub fn with_discount(mut self, discount: PercentPolicy) -> Self {
        self.discount = Some(discount);
        self
    }

    /// Attaches a tax policy (builder style).
    pub fn with_tax(mut self, tax: PercentPolicy) -> Self {
        self.tax = Some(tax);
        self
    }

    /// True when no items are attached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
