//! # Repository Module
//!
//! Repository implementations for Kassa's in-memory store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The Repository pattern abstracts record access behind a clean API.    │
//! │                                                                         │
//! │  Caller                                                                 │
//! │    │  catalog.create("Keyboard", 100.00, USD)                          │
//! │    │  orders.set_items(order_id, &ids)                                 │
//! │    ▼                                                                    │
//! │  Repository (validates, locks its own map, commits atomically)         │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  RwLock<HashMap<Uuid, Record>>                                          │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Validation cannot be bypassed by callers                            │
//! │  • Easy to test (no database fixture needed)                           │
//! │  • A persistent implementation can keep the same API                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`catalog::CatalogRepository`] - Catalog item creation and lookup
//! - [`policy::PolicyRepository`] - Discount/tax percent policies
//! - [`order::OrderRepository`] - Orders, gated mutation, snapshot resolve

pub mod catalog;
pub mod order;
pub mod policy;
