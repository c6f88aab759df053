//! # Validation Module
//!
//! Preconditions for order mutation and data-entry checks for catalog
//! items and percent policies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Data entry (operator creates items/policies)                 │
//! │  ├── validate_item_name / validate_unit_price / validate_percent       │
//! │  └── Rejected input never becomes a record                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Order mutation (items attached to an order)                  │
//! │  ├── THIS IS THE CURRENCY GATE: validate_item_currency                 │
//! │  ├── The WHOLE candidate set is checked before anything commits        │
//! │  └── All-or-nothing: a mid-set mismatch leaves the order untouched     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing engine                                               │
//! │  └── Assumes valid inputs; pure computation, no re-validation          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kassa_core::validation::{validate_item_currency, validate_percent};
//! use kassa_core::{CatalogItem, Currency};
//! use rust_decimal::Decimal;
//!
//! let items = vec![CatalogItem::new("A", Decimal::new(100, 2), Currency::Usd)];
//! validate_item_currency(Currency::Usd, &items).unwrap();
//! assert!(validate_item_currency(Currency::Rub, &items).is_err());
//!
//! validate_percent("percent", Decimal::new(250, 1)).unwrap(); // 25.0
//! ```

use rust_decimal::Decimal;

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::CatalogItem;
use crate::{MAX_NAME_LEN, MONEY_SCALE};

/// Result type for data-entry validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Order Mutation Precondition
// =============================================================================

/// Checks that every candidate item is denominated in the order's currency.
///
/// ## Contract
/// Runs over the WHOLE candidate set before any association is persisted.
/// The first mismatching item fails the entire attachment with
/// [`CoreError::CurrencyMismatch`] naming the item and both currencies;
/// the caller commits nothing on failure (all-or-nothing).
///
/// This is a pure precondition check: no retries, no state.
pub fn validate_item_currency(
    order_currency: Currency,
    candidates: &[CatalogItem],
) -> CoreResult<()> {
    for item in candidates {
        if item.currency != order_currency {
            return Err(CoreError::CurrencyMismatch {
                item_name: item.name.clone(),
                item_currency: item.currency,
                order_currency,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Data-Entry Validators
// =============================================================================

/// Validates a catalog item or policy name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 255 characters
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items exist)
/// - At most 2 fractional digits (trailing zeros are fine: 10.50 and
///   10.5000 are the same value)
///
/// ## Example
/// ```rust
/// use kassa_core::validation::validate_unit_price;
/// use rust_decimal::Decimal;
///
/// assert!(validate_unit_price(Decimal::new(1099, 2)).is_ok());  // 10.99
/// assert!(validate_unit_price(Decimal::ZERO).is_ok());
/// assert!(validate_unit_price(Decimal::new(-100, 2)).is_err());
/// assert!(validate_unit_price(Decimal::new(10999, 3)).is_err()); // 10.999
/// ```
pub fn validate_unit_price(unit_price: Decimal) -> ValidationResult<()> {
    if unit_price < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount {
            field: "unit_price".to_string(),
        });
    }

    if unit_price.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::TooPrecise {
            field: "unit_price".to_string(),
            max_scale: MONEY_SCALE,
        });
    }

    Ok(())
}

/// Validates a policy percentage.
///
/// ## Rules
/// - Must be within [0, 100] inclusive (0 is a valid no-op policy)
/// - At most 2 fractional digits
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::PercentOutOfRange {
            field: field.to_string(),
            percent,
        });
    }

    if percent.normalize().scale() > MONEY_SCALE {
        return Err(ValidationError::TooPrecise {
            field: field.to_string(),
            max_scale: MONEY_SCALE,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
