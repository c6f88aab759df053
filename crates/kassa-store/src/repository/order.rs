//! # Order Repository
//!
//! Orders and the gated mutation of their item/policy associations.
//!
//! ## The Currency Gate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  set_items(order, [a, b, c])                                            │
//! │       │                                                                 │
//! │       ├── resolve a, b, c against the catalog  → NotFound? abort       │
//! │       │                                                                 │
//! │       ├── validate_item_currency(order.currency, [a, b, c])            │
//! │       │        → mismatch anywhere? abort, order UNCHANGED             │
//! │       │                                                                 │
//! │       └── commit the whole set atomically                              │
//! │                                                                         │
//! │  There is no partial application: either every candidate becomes a     │
//! │  member or the previous item set survives intact.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshots
//! [`OrderRepository::resolve`] copies the order graph (record + items +
//! policies) out under read locks and hands the engine an owned
//! [`Order`]. The engine prices that snapshot with no lock held, so a
//! concurrent mutation can never tear a computation in half.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use kassa_core::validation::validate_item_currency;
use kassa_core::{Currency, Order, PercentPolicy};

use crate::error::{StoreError, StoreResult};
use crate::repository::catalog::CatalogRepository;
use crate::repository::policy::{PolicyRepository, PolicyRole};

// =============================================================================
// Order Record
// =============================================================================

/// The stored form of an order: references, not copies.
///
/// Items are a *set* of catalog references (an order lists an item at most
/// once); discount and tax are optional references into their respective
/// policy namespaces. The resolved [`Order`] snapshot is built on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    /// Unique identifier (UUID v4).
    pub id: Uuid,

    /// Currency of the order, fixed at creation.
    pub currency: Currency,

    /// Ids of attached catalog items.
    pub item_ids: BTreeSet<Uuid>,

    /// Optional discount policy reference.
    pub discount_id: Option<Uuid>,

    /// Optional tax policy reference.
    pub tax_id: Option<Uuid>,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was last mutated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order Repository
// =============================================================================

/// Repository for orders.
///
/// Holds shared handles to the catalog and policy repositories so every
/// attachment can resolve and validate its candidates before committing.
#[derive(Debug)]
pub struct OrderRepository {
    orders: RwLock<HashMap<Uuid, OrderRecord>>,
    catalog: Arc<CatalogRepository>,
    policies: Arc<PolicyRepository>,
}

impl OrderRepository {
    /// Creates an order repository over the given catalog and policies.
    pub fn new(catalog: Arc<CatalogRepository>, policies: Arc<PolicyRepository>) -> Self {
        OrderRepository {
            orders: RwLock::new(HashMap::new()),
            catalog,
            policies,
        }
    }

    /// Creates a new empty order in the given currency.
    pub fn create(&self, currency: Currency) -> OrderRecord {
        let now = Utc::now();
        let record = OrderRecord {
            id: Uuid::new_v4(),
            currency,
            item_ids: BTreeSet::new(),
            discount_id: None,
            tax_id: None,
            created_at: now,
            updated_at: now,
        };
        debug!(order_id = %record.id, %currency, "Creating order");

        let mut orders = self.orders.write().expect("order lock poisoned");
        orders.insert(record.id, record.clone());
        record
    }

    /// Fetches an order record by id.
    pub fn get(&self, id: Uuid) -> StoreResult<OrderRecord> {
        let orders = self.orders.read().expect("order lock poisoned");
        orders.get(&id).cloned().ok_or(StoreError::NotFound {
            entity: "Order",
            id: id.to_string(),
        })
    }

    /// Replaces an order's item set, all-or-nothing.
    ///
    /// Every candidate id must resolve against the catalog and every
    /// resolved item must share the order's currency. A failure at any
    /// point leaves the previously stored item set untouched.
    ///
    /// ## Errors
    /// - [`StoreError::NotFound`] for the order or any candidate id
    /// - [`kassa_core::CoreError::CurrencyMismatch`] naming the first
    ///   offending item
    pub fn set_items(&self, order_id: Uuid, item_ids: &[Uuid]) -> StoreResult<()> {
        let record = self.get(order_id)?;

        // Materialize and validate the WHOLE candidate set before touching
        // the stored record.
        let candidates = self.catalog.resolve_many(item_ids)?;
        if let Err(err) = validate_item_currency(record.currency, &candidates) {
            warn!(order_id = %order_id, %err, "Rejecting item attachment");
            return Err(err.into());
        }

        let mut orders = self.orders.write().expect("order lock poisoned");
        let stored = orders.get_mut(&order_id).ok_or(StoreError::NotFound {
            entity: "Order",
            id: order_id.to_string(),
        })?;
        stored.item_ids = item_ids.iter().copied().collect();
        stored.updated_at = Utc::now();
        debug!(order_id = %order_id, count = stored.item_ids.len(), "Order items committed");
        Ok(())
    }

    /// Attaches a discount policy to an order.
    pub fn attach_discount(&self, order_id: Uuid, policy_id: Uuid) -> StoreResult<()> {
        // Resolve first so a bad id cannot be committed
        self.policies.get(PolicyRole::Discount, policy_id)?;
        self.update(order_id, |record| record.discount_id = Some(policy_id))
    }

    /// Detaches the discount policy, if any.
    pub fn detach_discount(&self, order_id: Uuid) -> StoreResult<()> {
        self.update(order_id, |record| record.discount_id = None)
    }

    /// Attaches a tax policy to an order.
    pub fn attach_tax(&self, order_id: Uuid, policy_id: Uuid) -> StoreResult<()> {
        self.policies.get(PolicyRole::Tax, policy_id)?;
        self.update(order_id, |record| record.tax_id = Some(policy_id))
    }

    /// Detaches the tax policy, if any.
    pub fn detach_tax(&self, order_id: Uuid) -> StoreResult<()> {
        self.update(order_id, |record| record.tax_id = None)
    }

    /// Resolves an order into the snapshot the pricing engine consumes.
    ///
    /// Items and policies are copied out under read locks; the returned
    /// [`Order`] is owned and stable, so pricing runs with no lock held.
    /// Item order in the snapshot follows the id set's stable ordering.
    pub fn resolve(&self, order_id: Uuid) -> StoreResult<Order> {
        let record = self.get(order_id)?;

        let ids: Vec<Uuid> = record.item_ids.iter().copied().collect();
        let items = self.catalog.resolve_many(&ids)?;

        let discount: Option<PercentPolicy> = record
            .discount_id
            .map(|id| self.policies.get(PolicyRole::Discount, id))
            .transpose()?;
        let tax: Option<PercentPolicy> = record
            .tax_id
            .map(|id| self.policies.get(PolicyRole::Tax, id))
            .transpose()?;

        Ok(Order {
            id: record.id,
            currency: record.currency,
            items,
            discount,
            tax,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// Applies a mutation to a stored order record and touches updated_at.
    fn update(&self, order_id: Uuid, mutate: impl FnOnce(&mut OrderRecord)) -> StoreResult<()> {
        let mut orders = self.orders.write().expect("order lock poisoned");
        let record = orders.get_mut(&order_id).ok_or(StoreError::NotFound {
            entity: "Order",
            id: order_id.to_string(),
        })?;
        mutate(record);
        record.updated_at = Utc::now();
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kassa_core::{compute_total, CoreError};
    use rust_decimal_macros::dec;

    fn repos() -> (Arc<CatalogRepository>, Arc<PolicyRepository>, OrderRepository) {
        let catalog = Arc::new(CatalogRepository::new());
        let policies = Arc::new(PolicyRepository::new());
        let orders = OrderRepository::new(catalog.clone(), policies.clone());
        (catalog, policies, orders)
    }

    #[test]
    fn test_set_items_commits_matching_currency() {
        let (catalog, _policies, orders) = repos();
        let a = catalog.create("A", dec!(100.00), Currency::Usd).unwrap();
        let b = catalog.create("B", dec!(50.00), Currency::Usd).unwrap();
        let order = orders.create(Currency::Usd);

        orders.set_items(order.id, &[a.id, b.id]).unwrap();
        let stored = orders.get(order.id).unwrap();
        assert_eq!(stored.item_ids.len(), 2);
    }

    #[test]
    fn test_set_items_is_all_or_nothing_on_mismatch() {
        let (catalog, _policies, orders) = repos();
        let good = catalog.create("Good", dec!(10.00), Currency::Usd).unwrap();
        let other = catalog.create("Other", dec!(20.00), Currency::Usd).unwrap();
        let bad = catalog.create("Bad", dec!(500.00), Currency::Rub).unwrap();

        let order = orders.create(Currency::Usd);
        orders.set_items(order.id, &[good.id]).unwrap();

        // One mismatching candidate poisons the whole attachment
        let err = orders
            .set_items(order.id, &[other.id, bad.id])
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Core(CoreError::CurrencyMismatch { ref item_name, .. })
                if item_name == "Bad"
        ));

        // Re-read: the previous item set survived intact
        let stored = orders.get(order.id).unwrap();
        assert_eq!(stored.item_ids.len(), 1);
        assert!(stored.item_ids.contains(&good.id));
    }

    #[test]
    fn test_set_items_unknown_id_aborts() {
        let (catalog, _policies, orders) = repos();
        let a = catalog.create("A", dec!(1.00), Currency::Usd).unwrap();
        let order = orders.create(Currency::Usd);

        let err = orders
            .set_items(order.id, &[a.id, Uuid::new_v4()])
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "CatalogItem", .. }));
        assert!(orders.get(order.id).unwrap().item_ids.is_empty());
    }

    #[test]
    fn test_attach_policies_and_resolve() {
        let (catalog, policies, orders) = repos();
        let a = catalog.create("Item 1", dec!(100.00), Currency::Usd).unwrap();
        let b = catalog.create("Item 2", dec!(50.00), Currency::Usd).unwrap();
        let discount = policies
            .create(PolicyRole::Discount, "Black Friday", dec!(5))
            .unwrap();
        let tax = policies.create(PolicyRole::Tax, "VAT", dec!(10)).unwrap();

        let order = orders.create(Currency::Usd);
        orders.set_items(order.id, &[a.id, b.id]).unwrap();
        orders.attach_discount(order.id, discount.id).unwrap();
        orders.attach_tax(order.id, tax.id).unwrap();

        let snapshot = orders.resolve(order.id).unwrap();
        assert_eq!(snapshot.items.len(), 2);
        assert_eq!(compute_total(&snapshot), dec!(156.75));
    }

    #[test]
    fn test_attach_discount_rejects_tax_id() {
        let (_catalog, policies, orders) = repos();
        let tax = policies.create(PolicyRole::Tax, "VAT", dec!(10)).unwrap();
        let order = orders.create(Currency::Usd);

        // Policy roles are separate namespaces
        let err = orders.attach_discount(order.id, tax.id).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "Discount", .. }));
        assert!(orders.get(order.id).unwrap().discount_id.is_none());
    }

    #[test]
    fn test_detach_policies() {
        let (_catalog, policies, orders) = repos();
        let discount = policies
            .create(PolicyRole::Discount, "Promo", dec!(50))
            .unwrap();
        let order = orders.create(Currency::Rub);

        orders.attach_discount(order.id, discount.id).unwrap();
        assert!(orders.get(order.id).unwrap().discount_id.is_some());

        orders.detach_discount(order.id).unwrap();
        assert!(orders.get(order.id).unwrap().discount_id.is_none());
    }

    #[test]
    fn test_resolve_empty_order_prices_to_zero() {
        let (_catalog, _policies, orders) = repos();
        let order = orders.create(Currency::Rub);
        let snapshot = orders.resolve(order.id).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(compute_total(&snapshot), dec!(0.00));
    }

    #[test]
    fn test_snapshot_is_stable_across_later_mutation() {
        let (catalog, _policies, orders) = repos();
        let a = catalog.create("A", dec!(10.00), Currency::Usd).unwrap();
        let b = catalog.create("B", dec!(5.00), Currency::Usd).unwrap();
        let order = orders.create(Currency::Usd);
        orders.set_items(order.id, &[a.id]).unwrap();

        let snapshot = orders.resolve(order.id).unwrap();
        orders.set_items(order.id, &[a.id, b.id]).unwrap();

        // The engine prices the snapshot it was handed, not live state
        assert_eq!(compute_total(&snapshot), dec!(10.00));
        assert_eq!(
            compute_total(&orders.resolve(order.id).unwrap()),
            dec!(15.00)
        );
    }
}
