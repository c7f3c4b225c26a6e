//! Item catalog subsystem.
//!
//! # Data Flow
//! ```text
//! POST /items body
//!     → model.rs (NewItem, fields kept as untyped JSON)
//!     → validation.rs (type and field rules, all errors collected)
//!     → ValidItem::into_item (server assigns id + created_at)
//!     → store.rs (append under write lock)
//!
//! GET /items
//!     → store.rs (snapshot under read lock, insertion order)
//! ```
//!
//! # Design Decisions
//! - Items are immutable once stored; there is no update or delete
//! - The store is shared behind `Arc<RwLock<_>>`; locks are never held across `.await`
//! - Nothing is persisted; a restart empties the catalog

pub mod model;
pub mod store;
pub mod validation;

pub use model::{Item, NewItem, ValidItem};
pub use store::ItemStore;
pub use validation::{validate_new_item, ErrorKind, FieldError, ValidationErrors};
