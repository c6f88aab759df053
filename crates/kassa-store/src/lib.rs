//! # kassa-store: Catalog, Policy and Order State
//!
//! In-memory repositories for the records the pricing engine consumes.
//! This crate is the layer that *mutates* orders, and therefore the layer
//! that enforces the currency-match invariant: items are validated as a
//! whole set before any association is committed.
//!
//! ## Layer Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Calling layer (request handler, operator tooling)                      │
//! │       │                                                                 │
//! │       │  orders.set_items(order_id, &[item_a, item_b])                 │
//! │       ▼                                                                 │
//! │  kassa-store (THIS CRATE)                                              │
//! │  ├── resolve every candidate id          → StoreError::NotFound        │
//! │  ├── validate_item_currency(whole set)   → CurrencyMismatch            │
//! │  └── commit all-or-nothing                                             │
//! │       │                                                                 │
//! │       │  orders.resolve(order_id) → Order (single read snapshot)       │
//! │       ▼                                                                 │
//! │  kassa-core pricing (pure, no locking of its own)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Each repository guards its own map with an `RwLock`; `resolve` takes
//! read locks only long enough to copy the order graph out, so the engine
//! prices a stable snapshot with no lock held. Distinct orders can be
//! priced concurrently; records are read-only from the engine's view.

pub mod error;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use repository::catalog::CatalogRepository;
pub use repository::order::{OrderRecord, OrderRepository};
pub use repository::policy::{PolicyRepository, PolicyRole};
