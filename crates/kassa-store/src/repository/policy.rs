//! # Policy Repository
//!
//! Discount and tax percent policies.
//!
//! One `PercentPolicy` shape serves both roles, but the store keeps the
//! two namespaces separate: a discount id can never be attached where a
//! tax id is expected. Policies are shared records, reusable across any
//! number of orders.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use kassa_core::validation::{validate_item_name, validate_percent};
use kassa_core::PercentPolicy;

use crate::error::{StoreError, StoreResult};

/// Which stage of the pricing formula a policy participates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRole {
    /// Applied to the item total, once, before tax.
    Discount,
    /// Applied to the post-discount subtotal.
    Tax,
}

impl PolicyRole {
    const fn entity(&self) -> &'static str {
        match self {
            PolicyRole::Discount => "Discount",
            PolicyRole::Tax => "Tax",
        }
    }
}

/// Repository for percent policies, split by role.
///
/// ## Usage
/// ```rust
/// use kassa_store::{PolicyRepository, PolicyRole};
/// use rust_decimal::Decimal;
///
/// let policies = PolicyRepository::new();
/// let vat = policies
///     .create(PolicyRole::Tax, "VAT", Decimal::new(2000, 2))
///     .unwrap();
/// assert_eq!(policies.get(PolicyRole::Tax, vat.id).unwrap().name, "VAT");
/// ```
#[derive(Debug, Default)]
pub struct PolicyRepository {
    discounts: RwLock<HashMap<Uuid, PercentPolicy>>,
    taxes: RwLock<HashMap<Uuid, PercentPolicy>>,
}

impl PolicyRepository {
    /// Creates an empty policy store.
    pub fn new() -> Self {
        Self::default()
    }

    fn map(&self, role: PolicyRole) -> &RwLock<HashMap<Uuid, PercentPolicy>> {
        match role {
            PolicyRole::Discount => &self.discounts,
            PolicyRole::Tax => &self.taxes,
        }
    }

    /// Creates a policy after validating its name and percent.
    ///
    /// ## Errors
    /// - `ValidationError::Required` / `TooLong` for a bad name
    /// - `ValidationError::PercentOutOfRange` / `TooPrecise` for a percent
    ///   outside [0, 100] or finer than 2 decimal places
    pub fn create(&self, role: PolicyRole, name: &str, percent: Decimal) -> StoreResult<PercentPolicy> {
        validate_item_name(name)?;
        validate_percent("percent", percent)?;

        let policy = PercentPolicy::new(name.trim(), percent);
        debug!(
            policy_id = %policy.id,
            role = role.entity(),
            %percent,
            "Creating percent policy"
        );

        let mut policies = self.map(role).write().expect("policy lock poisoned");
        policies.insert(policy.id, policy.clone());
        Ok(policy)
    }

    /// Fetches a policy by role and id.
    pub fn get(&self, role: PolicyRole, id: Uuid) -> StoreResult<PercentPolicy> {
        let policies = self.map(role).read().expect("policy lock poisoned");
        policies.get(&id).cloned().ok_or(StoreError::NotFound {
            entity: role.entity(),
            id: id.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_and_get_by_role() {
        let policies = PolicyRepository::new();
        let discount = policies
            .create(PolicyRole::Discount, "Black Friday", dec!(5))
            .unwrap();
        let tax = policies.create(PolicyRole::Tax, "VAT", dec!(10)).unwrap();

        assert_eq!(
            policies.get(PolicyRole::Discount, discount.id).unwrap().percent,
            dec!(5)
        );
        assert_eq!(policies.get(PolicyRole::Tax, tax.id).unwrap().percent, dec!(10));
    }

    #[test]
    fn test_roles_are_separate_namespaces() {
        let policies = PolicyRepository::new();
        let discount = policies
            .create(PolicyRole::Discount, "Promo", dec!(15))
            .unwrap();

        // A discount id does not resolve as a tax
        let err = policies.get(PolicyRole::Tax, discount.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Tax", .. }));
    }

    #[test]
    fn test_create_rejects_invalid_percent() {
        let policies = PolicyRepository::new();
        assert!(policies.create(PolicyRole::Tax, "Bad", dec!(-1)).is_err());
        assert!(policies.create(PolicyRole::Tax, "Bad", dec!(100.5)).is_err());
        assert!(policies.create(PolicyRole::Discount, "", dec!(5)).is_err());
        // Zero percent is a valid, if pointless, policy
        assert!(policies.create(PolicyRole::Discount, "Nothing", dec!(0)).is_ok());
    }
}
