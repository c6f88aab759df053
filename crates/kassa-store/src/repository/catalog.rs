//! # Catalog Repository
//!
//! Creation and lookup of catalog items.
//!
//! Items are immutable once created: orders hold references to them, and a
//! price that could change underneath a priced order would break the
//! "same snapshot, same total" guarantee. The data-entry validators run
//! here, so an invalid name or price never becomes a record.

use std::collections::HashMap;
use std::sync::RwLock;

use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use kassa_core::validation::{validate_item_name, validate_unit_price};
use kassa_core::{CatalogItem, Currency};

use crate::error::{StoreError, StoreResult};

/// Repository for catalog items.
///
/// ## Usage
/// ```rust
/// use kassa_store::CatalogRepository;
/// use kassa_core::Currency;
/// use rust_decimal::Decimal;
///
/// let catalog = CatalogRepository::new();
/// let item = catalog
///     .create("Keyboard", Decimal::new(10000, 2), Currency::Usd)
///     .unwrap();
/// assert_eq!(catalog.get(item.id).unwrap().name, "Keyboard");
/// ```
#[derive(Debug, Default)]
pub struct CatalogRepository {
    items: RwLock<HashMap<Uuid, CatalogItem>>,
}

impl CatalogRepository {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog item after running the data-entry validators.
    ///
    /// ## Errors
    /// - `ValidationError::Required` / `TooLong` for a bad name
    /// - `ValidationError::NegativeAmount` / `TooPrecise` for a bad price
    pub fn create(
        &self,
        name: &str,
        unit_price: Decimal,
        currency: Currency,
    ) -> StoreResult<CatalogItem> {
        validate_item_name(name)?;
        validate_unit_price(unit_price)?;

        let item = CatalogItem::new(name.trim(), unit_price, currency);
        debug!(item_id = %item.id, name = %item.name, %currency, "Creating catalog item");

        let mut items = self.items.write().expect("catalog lock poisoned");
        items.insert(item.id, item.clone());
        Ok(item)
    }

    /// Inserts a pre-built item (e.g. replicated from another system).
    ///
    /// The same validators apply; the item keeps its id.
    pub fn insert(&self, item: CatalogItem) -> StoreResult<()> {
        validate_item_name(&item.name)?;
        validate_unit_price(item.unit_price)?;

        let mut items = self.items.write().expect("catalog lock poisoned");
        if items.contains_key(&item.id) {
            return Err(StoreError::Duplicate {
                entity: "CatalogItem",
                id: item.id.to_string(),
            });
        }
        items.insert(item.id, item);
        Ok(())
    }

    /// Fetches an item by id.
    pub fn get(&self, id: Uuid) -> StoreResult<CatalogItem> {
        let items = self.items.read().expect("catalog lock poisoned");
        items.get(&id).cloned().ok_or(StoreError::NotFound {
            entity: "CatalogItem",
            id: id.to_string(),
        })
    }

    /// Resolves a list of ids into items, failing on the first unknown id.
    ///
    /// Used by the order repository to materialize a candidate set before
    /// currency validation; resolution failure means nothing is attached.
    pub fn resolve_many(&self, ids: &[Uuid]) -> StoreResult<Vec<CatalogItem>> {
        let items = self.items.read().expect("catalog lock poisoned");
        ids.iter()
            .map(|id| {
                items.get(id).cloned().ok_or(StoreError::NotFound {
                    entity: "CatalogItem",
                    id: id.to_string(),
                })
            })
            .collect()
    }

    /// Lists all items, newest first.
    pub fn list(&self) -> Vec<CatalogItem> {
        let items = self.items.read().expect("catalog lock poisoned");
        let mut all: Vec<CatalogItem> = items.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        all
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
