//! # Checkout Error Types
//!
//! Errors raised at the provider seam.
//!
//! ## Design Principles
//! - The unsupported-currency rejection is checked before any pricing or
//!   provider call and surfaces as a user-visible error, not a crash
//! - Provider failures are opaque: the provider's message is attached and
//!   propagated to the caller unchanged, with no retry

use thiserror::Error;

use kassa_core::CoreError;

/// Errors from checkout request building and provider calls.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The currency has no provider configuration.
    ///
    /// ## When This Occurs
    /// - An order or item is denominated in a currency for which no
    ///   provider credentials are configured
    ///
    /// Checked BEFORE line items are built or the provider is contacted.
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency { code: String },

    /// Charge creation failed on the provider side.
    ///
    /// Network or provider errors land here with the provider's own
    /// message attached. Not retried by this layer.
    #[error("Charge creation failed: {message}")]
    Provider { message: String },

    /// Domain error from kassa-core (mismatch, conversion, validation).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
