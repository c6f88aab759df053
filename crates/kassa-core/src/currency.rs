//! # Currency
//!
//! The closed set of currencies Kassa can price and charge in.
//!
//! ## Why a Closed Enum?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  An order and every item attached to it share ONE currency.             │
//! │                                                                         │
//! │  Currency enters the system as a string code ("USD", "RUB", ...).      │
//! │  Parsing happens ONCE, at the boundary, via `Currency::from_code`.     │
//! │  An unknown code is rejected there with UnsupportedCurrency BEFORE     │
//! │  any pricing computation or provider call is attempted.                │
//! │                                                                         │
//! │  Inside the engine a `Currency` value is therefore always valid,       │
//! │  and mismatches reduce to a cheap enum comparison.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Multi-currency baskets and currency conversion are deliberately not
//! supported: a mismatch is rejected, never converted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Currency
// =============================================================================

/// A currency supported by the pricing engine.
///
/// Both variants use two fractional digits: 100 minor units (cents,
/// kopecks) per major unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar.
    Usd,
    /// Russian Ruble.
    Rub,
}

impl Currency {
    /// Returns the ISO 4217 code ("USD", "RUB").
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Rub => "RUB",
        }
    }

    /// Returns the lowercase code the payment provider expects on the wire.
    #[inline]
    pub const fn provider_code(&self) -> &'static str {
        match self {
            Currency::Usd => "usd",
            Currency::Rub => "rub",
        }
    }

    /// Returns the country code used when creating provider-side tax rates.
    #[inline]
    pub const fn country(&self) -> &'static str {
        match self {
            Currency::Usd => "US",
            Currency::Rub => "RU",
        }
    }

    /// Minor units per major unit (100 for both supported currencies).
    #[inline]
    pub const fn minor_units_per_major(&self) -> i64 {
        100
    }

    /// Parses a currency code.
    ///
    /// This is the boundary check for the whole engine: every external
    /// currency string must pass through here before an order or item is
    /// created.
    ///
    /// ## Errors
    /// Returns [`CoreError::UnsupportedCurrency`] carrying the offending
    /// code when it is not in the supported set.
    ///
    /// ## Example
    /// ```rust
    /// use kassa_core::Currency;
    ///
    /// assert_eq!(Currency::from_code("USD").unwrap(), Currency::Usd);
    /// assert!(Currency::from_code("EUR").is_err());
    /// ```
    pub fn from_code(code: &str) -> CoreResult<Currency> {
        match code {
            "USD" => Ok(Currency::Usd),
            "RUB" => Ok(Currency::Rub),
            other => Err(CoreError::UnsupportedCurrency {
                code: other.to_string(),
            }),
        }
    }

    /// All supported currencies, in a stable order.
    pub const fn all() -> [Currency; 2] {
        [Currency::Usd, Currency::Rub]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_roundtrip() {
        for currency in Currency::all() {
            assert_eq!(Currency::from_code(currency.code()).unwrap(), currency);
        }
    }

    #[test]
    fn test_from_code_rejects_unknown() {
        let err = Currency::from_code("EUR").unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnsupportedCurrency { ref code } if code == "EUR"
        ));
        assert_eq!(err.to_string(), "Unsupported currency: EUR");

        // Codes are case-sensitive: the boundary normalizes, we don't guess
        assert!(Currency::from_code("usd").is_err());
        assert!(Currency::from_code("").is_err());
    }

    #[test]
    fn test_provider_mappings() {
        assert_eq!(Currency::Usd.provider_code(), "usd");
        assert_eq!(Currency::Rub.provider_code(), "rub");
        assert_eq!(Currency::Usd.country(), "US");
        assert_eq!(Currency::Rub.country(), "RU");
    }

    #[test]
    fn test_serde_uses_iso_codes() {
        assert_eq!(serde_json::to_string(&Currency::Usd).unwrap(), "\"USD\"");
        assert_eq!(
            serde_json::from_str::<Currency>("\"RUB\"").unwrap(),
            Currency::Rub
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Currency::Usd.to_string(), "USD");
        assert_eq!(Currency::Rub.to_string(), "RUB");
    }
}
