//! SQLite data access layer for the ordering store
//!
//! # Architecture
//!
//! ```text
//! Shared pieces (config.rs, filter.rs, loader.rs)
//!     ↓
//! sqlite/
//!     ├── schema.rs        table definitions, create / drop
//!     ├── customer_impl.rs one statement per customer operation
//!     ├── item_impl.rs
//!     ├── order_impl.rs
//!     ├── import_impl.rs   transactional bulk load
//!     └── backend_impl.rs  SqliteBackend wiring the above together
//! ```

pub mod config;
pub mod filter;
pub mod loader;
pub mod sqlite;

pub use config::DatabaseBackendConfig;
pub use filter::{CustomerFilter, ItemFilter, OrderFilter};
pub use sqlite::SqliteBackend;
