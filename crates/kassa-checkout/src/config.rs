//! # Currency Configuration
//!
//! The mapping from currency to payment-provider credentials, and with it
//! the definition of "supported": a currency the engine can price but no
//! provider account can charge is rejected here, before any other work.
//!
//! Credentials are loaded from environment variables with explicit absence
//! handling; a currency whose keys are missing is simply not supported.

use std::collections::HashMap;
use std::env;

use tracing::debug;

use kassa_core::Currency;

use crate::error::{CheckoutError, CheckoutResult};

// =============================================================================
// Provider Keys
// =============================================================================

/// Provider credentials for one currency.
///
/// The publishable key is safe to hand to a browser; the secret key signs
/// provider API calls and never leaves the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderKeys {
    /// Publishable (client-side) key.
    pub publishable: String,

    /// Secret (server-side) key.
    pub secret: String,
}

// =============================================================================
// Currency Config
// =============================================================================

/// Maps each supported currency to its provider credentials.
///
/// ## Usage
/// ```rust
/// use kassa_checkout::{CurrencyConfig, ProviderKeys};
/// use kassa_core::Currency;
///
/// let config = CurrencyConfig::new().with_keys(
///     Currency::Usd,
///     ProviderKeys {
///         publishable: "pk_test_usd".into(),
///         secret: "sk_test_usd".into(),
///     },
/// );
///
/// assert!(config.supports(Currency::Usd));
/// assert!(!config.supports(Currency::Rub));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CurrencyConfig {
    keys: HashMap<Currency, ProviderKeys>,
}

impl CurrencyConfig {
    /// Creates an empty configuration (no currency supported).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds credentials for a currency (builder style).
    pub fn with_keys(mut self, currency: Currency, keys: ProviderKeys) -> Self {
        self.keys.insert(currency, keys);
        self
    }

    /// Loads credentials from environment variables.
    ///
    /// For each supported currency CODE, reads:
    /// - `KASSA_{CODE}_PUBLISHABLE_KEY`
    /// - `KASSA_{CODE}_SECRET_KEY`
    ///
    /// A currency is configured only when BOTH variables are present;
    /// anything else leaves it unsupported rather than half-configured.
    pub fn from_env() -> Self {
        let mut config = CurrencyConfig::new();
        for currency in Currency::all() {
            let publishable = env::var(format!("KASSA_{}_PUBLISHABLE_KEY", currency.code())).ok();
            let secret = env::var(format!("KASSA_{}_SECRET_KEY", currency.code())).ok();
            if let (Some(publishable), Some(secret)) = (publishable, secret) {
                debug!(%currency, "Provider keys configured");
                config.keys.insert(currency, ProviderKeys { publishable, secret });
            }
        }
        config
    }

    /// True when the currency has provider credentials.
    pub fn supports(&self, currency: Currency) -> bool {
        self.keys.contains_key(&currency)
    }

    /// Returns the credentials for a currency.
    ///
    /// This is the supported-currency gate: every checkout flow calls it
    /// before pricing anything or contacting the provider.
    ///
    /// ## Errors
    /// [`CheckoutError::UnsupportedCurrency`] carrying the currency code.
    pub fn keys_for(&self, currency: Currency) -> CheckoutResult<&ProviderKeys> {
        self.keys
            .get(&currency)
            .ok_or_else(|| CheckoutError::UnsupportedCurrency {
                code: currency.code().to_string(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
