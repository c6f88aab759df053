//! # Checkout Provider Trait
//!
//! The seam a transport-layer client implements. Everything above this
//! trait is pure request building; everything below it is somebody else's
//! network code.
//!
//! Implementations authenticate with the [`ProviderKeys`] they are handed
//! (credentials are per-currency) and translate transport or provider
//! failures into [`CheckoutError::Provider`] with the provider's message
//! attached. This layer never retries.

use serde::{Deserialize, Serialize};

use crate::config::ProviderKeys;
use crate::error::CheckoutResult;
use crate::intent::IntentRequest;
use crate::session::SessionRequest;

/// A hosted-checkout session created on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider-assigned session id, handed to the client-side redirect.
    pub id: String,
}

/// A payment intent created on the provider side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned intent id.
    pub id: String,

    /// Client secret the payment form confirms against.
    pub client_secret: String,
}

/// A payment provider that can open checkout sessions and payment intents.
///
/// ## Implementing
/// ```rust
/// use kassa_checkout::{
///     CheckoutProvider, CheckoutResult, CheckoutSession, IntentRequest,
///     PaymentIntent, ProviderKeys, SessionRequest,
/// };
///
/// struct FakeProvider;
///
/// impl CheckoutProvider for FakeProvider {
///     fn create_session(
///         &self,
///         _keys: &ProviderKeys,
///         _request: &SessionRequest,
///     ) -> CheckoutResult<CheckoutSession> {
///         Ok(CheckoutSession { id: "sess_123".into() })
///     }
///
///     fn create_intent(
///         &self,
///         _keys: &ProviderKeys,
///         _request: &IntentRequest,
///     ) -> CheckoutResult<PaymentIntent> {
///         Ok(PaymentIntent {
///             id: "pi_123".into(),
///             client_secret: "pi_123_secret".into(),
///         })
///     }
/// }
/// ```
pub trait CheckoutProvider {
    /// Creates a hosted-checkout session.
    fn create_session(
        &self,
        keys: &ProviderKeys,
        request: &SessionRequest,
    ) -> CheckoutResult<CheckoutSession>;

    /// Creates a payment intent.
    fn create_intent(
        &self,
        keys: &ProviderKeys,
        request: &IntentRequest,
    ) -> CheckoutResult<PaymentIntent>;
}
