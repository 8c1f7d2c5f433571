use crate::backend::database::filter::{CustomerFilter, ItemFilter, OrderFilter};
use crate::error::AppResult;
use crate::models::{
    Customer, CustomerInput, ImportSummary, Item, ItemInput, Order, OrderGroup, OrderInput,
};
use async_trait::async_trait;
use std::sync::Arc;

pub mod database;

/// Result of an update or delete that does not look the row up first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The statement changed this many rows (always at least one)
    Applied(u64),
    /// No row matched the identity
    NoMatch,
}

impl WriteOutcome {
    pub fn from_rows_affected(rows: u64) -> Self {
        if rows == 0 {
            WriteOutcome::NoMatch
        } else {
            WriteOutcome::Applied(rows)
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, WriteOutcome::NoMatch)
    }
}

/// Core backend abstraction for the ordering store
///
/// Handlers only ever see this through `Arc<dyn StoreBackend>`, so tests can
/// inject an in-memory store.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Connect and initialize the storage backend
    async fn connect(config: &crate::backend::database::DatabaseBackendConfig) -> AppResult<Self>
    where
        Self: Sized;

    /// Check if the storage backend is healthy and accessible
    async fn health_check(&self) -> AppResult<()>;

    /// Create the customers, items and orders tables if they are missing
    async fn init_schema(&self) -> AppResult<()>;

    /// Drop all three tables and create them again, empty
    async fn reset_schema(&self) -> AppResult<()>;
}

/// Customer CRUD operations
#[async_trait]
pub trait CustomerBackend: Backend {
    /// Insert a customer; a duplicate phone yields `AppError::Conflict`
    async fn create_customer(&self, customer: &CustomerInput) -> AppResult<Customer>;

    async fn find_customer_by_id(&self, id: i64) -> AppResult<Option<Customer>>;

    async fn find_customers(&self, filter: &CustomerFilter) -> AppResult<Vec<Customer>>;

    async fn update_customer(&self, id: i64, customer: &CustomerInput) -> AppResult<WriteOutcome>;

    /// Delete a customer; orders referencing it are left untouched
    async fn delete_customer(&self, id: i64) -> AppResult<WriteOutcome>;
}

/// Menu item CRUD operations
#[async_trait]
pub trait ItemBackend: Backend {
    async fn create_item(&self, item: &ItemInput) -> AppResult<Item>;

    async fn find_item_by_id(&self, id: i64) -> AppResult<Option<Item>>;

    async fn find_items(&self, filter: &ItemFilter) -> AppResult<Vec<Item>>;

    async fn update_item(&self, id: i64, item: &ItemInput) -> AppResult<WriteOutcome>;

    async fn delete_item(&self, id: i64) -> AppResult<WriteOutcome>;
}

/// Order CRUD operations
///
/// Referential integrity is left to the store; nothing here checks that the
/// customer or item exists before writing.
#[async_trait]
pub trait OrderBackend: Backend {
    async fn create_order(&self, order: &OrderInput) -> AppResult<Order>;

    async fn find_order_by_id(&self, id: i64) -> AppResult<Option<Order>>;

    async fn find_orders(&self, filter: &OrderFilter) -> AppResult<Vec<Order>>;

    async fn update_order(&self, id: i64, order: &OrderInput) -> AppResult<WriteOutcome>;

    async fn delete_order(&self, id: i64) -> AppResult<WriteOutcome>;
}

/// One-shot bulk loading of order documents
#[async_trait]
pub trait ImportBackend: Backend {
    /// Insert every grouping in one transaction, deduplicating customers by
    /// (name, phone) and items by (name, price) within this call only
    async fn import_orders(&self, groups: &[OrderGroup]) -> AppResult<ImportSummary>;
}

/// Combined interface used by the HTTP layer and the loader
pub trait StoreBackend: CustomerBackend + ItemBackend + OrderBackend + ImportBackend {}

impl<T> StoreBackend for T where T: CustomerBackend + ItemBackend + OrderBackend + ImportBackend {}

/// Factory for creating backend instances
pub struct BackendFactory;

impl BackendFactory {
    /// Create a backend based on configuration
    pub async fn create(
        config: &crate::backend::database::DatabaseBackendConfig,
    ) -> AppResult<Arc<dyn StoreBackend>> {
        let backend = crate::backend::database::sqlite::SqliteBackend::connect(config).await?;
        Ok(Arc::new(backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_outcome_from_rows() {
        assert_eq!(WriteOutcome::from_rows_affected(0), WriteOutcome::NoMatch);
        assert_eq!(WriteOutcome::from_rows_affected(1), WriteOutcome::Applied(1));
        assert!(WriteOutcome::NoMatch.is_no_match());
        assert!(!WriteOutcome::Applied(2).is_no_match());
    }
}
