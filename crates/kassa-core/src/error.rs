//! # Error Types
//!
//! Domain-specific error types for kassa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kassa-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing/currency domain errors                 │
//! │  └── ValidationError  - Data-entry validation failures                 │
//! │                                                                         │
//! │  kassa-store errors (separate crate)                                   │
//! │  └── StoreError       - Repository operation failures                  │
//! │                                                                         │
//! │  kassa-checkout errors (separate crate)                                │
//! │  └── CheckoutError    - Provider configuration/charge failures         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError/CheckoutError → caller │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item name, currency codes, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::Currency;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing-domain errors.
///
/// These errors are deterministic and local: no partial state is ever left
/// behind when one is raised. Validation is all-or-nothing and pricing is
/// side-effect-free.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An item's currency disagrees with its order's currency.
    ///
    /// ## When This Occurs
    /// - Attaching items to an order whose currency differs
    /// - Raised at attachment time, never coerced or converted
    ///
    /// ## User Workflow
    /// ```text
    /// Attach [Item "Mouse" (RUB)] to Order (USD)
    ///      │
    ///      ▼
    /// validate_item_currency(...)
    ///      │
    ///      ▼
    /// CurrencyMismatch { item_name: "Mouse", item_currency: RUB,
    ///                    order_currency: USD }
    ///      │
    ///      ▼
    /// Operator sees: "Item 'Mouse' is priced in RUB but the order is in USD"
    /// ```
    #[error(
        "Item '{item_name}' is priced in {item_currency} but the order is in {order_currency}"
    )]
    CurrencyMismatch {
        item_name: String,
        item_currency: Currency,
        order_currency: Currency,
    },

    /// A currency code outside the supported set was presented.
    ///
    /// ## When This Occurs
    /// - Parsing an unknown code at the data-entry boundary
    /// - Looking up provider credentials for a currency that has none
    ///
    /// Checked BEFORE any pricing computation or provider call.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    /// An amount cannot be represented as i64 minor units.
    ///
    /// Practically unreachable for real prices; kept as a typed error so
    /// the converter never panics on pathological input.
    #[error("Amount {amount} is out of range for minor-unit conversion")]
    AmountOutOfRange { amount: Decimal },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Data-entry validation errors.
///
/// These errors occur when operator input doesn't meet requirements.
/// Used at the boundary where catalog items and percent policies are
/// created, before any record exists.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A monetary amount is negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },

    /// A percentage is outside [0, 100].
    #[error("{field} must be between 0 and 100, got {percent}")]
    PercentOutOfRange { field: String, percent: Decimal },

    /// A decimal value carries more fractional digits than allowed.
    #[error("{field} must have at most {max_scale} decimal places")]
    TooPrecise { field: String, max_scale: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_mismatch_message() {
        let err = CoreError::CurrencyMismatch {
            item_name: "Mouse".to_string(),
            item_currency: Currency::Rub,
            order_currency: Currency::Usd,
        };
        assert_eq!(
            err.to_string(),
            "Item 'Mouse' is priced in RUB but the order is in USD"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::PercentOutOfRange {
            field: "percent".to_string(),
            percent: dec!(101),
        };
        assert_eq!(err.to_string(), "percent must be between 0 and 100, got 101");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NegativeAmount {
            field: "unit_price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
