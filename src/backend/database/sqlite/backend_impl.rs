use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use super::super::config::DatabaseBackendConfig;
use super::{SqliteCustomerStore, SqliteItemStore, SqliteOrderImporter, SqliteOrderStore};
use crate::backend::database::filter::{CustomerFilter, ItemFilter, OrderFilter};
use crate::backend::{
    Backend, CustomerBackend, ImportBackend, ItemBackend, OrderBackend, WriteOutcome,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    Customer, CustomerInput, ImportSummary, Item, ItemInput, Order, OrderGroup, OrderInput,
};

/// SQLite database backend implementation
///
/// Every statement checks a connection out of the pool and hands it back when
/// the query future finishes, whether it succeeded or not.
pub struct SqliteBackend {
    pool: SqlitePool,
    customers: SqliteCustomerStore,
    items: SqliteItemStore,
    orders: SqliteOrderStore,
    importer: SqliteOrderImporter,
}

impl SqliteBackend {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            customers: SqliteCustomerStore::new(pool.clone()),
            items: SqliteItemStore::new(pool.clone()),
            orders: SqliteOrderStore::new(pool.clone()),
            importer: SqliteOrderImporter::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn connect(config: &DatabaseBackendConfig) -> AppResult<Self> {
        config
            .validate()
            .map_err(|e| AppError::Configuration(format!("Invalid backend config: {}", e)))?;

        let options = SqliteConnectOptions::from_str(&config.sqlx_url())
            .map_err(|e| AppError::Configuration(format!("Invalid SQLite URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(config.foreign_keys);

        let mut pool_options = SqlitePoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connection_timeout));

        // Each in-memory connection is its own database, so keep exactly one alive
        if config.is_memory_database() {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            pool_options = pool_options.max_connections(config.max_connections);
        }

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        tracing::info!(
            url = %config.connection_url,
            foreign_keys = config.foreign_keys,
            "connected to SQLite"
        );

        Ok(Self::new(pool))
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;

        Ok(())
    }

    async fn init_schema(&self) -> AppResult<()> {
        super::schema::init_schema(&self.pool).await
    }

    async fn reset_schema(&self) -> AppResult<()> {
        super::schema::reset_schema(&self.pool).await
    }
}

#[async_trait]
impl CustomerBackend for SqliteBackend {
    async fn create_customer(&self, customer: &CustomerInput) -> AppResult<Customer> {
        self.customers.insert(customer).await
    }

    async fn find_customer_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        self.customers.fetch_by_id(id).await
    }

    async fn find_customers(&self, filter: &CustomerFilter) -> AppResult<Vec<Customer>> {
        self.customers.fetch_filtered(filter).await
    }

    async fn update_customer(&self, id: i64, customer: &CustomerInput) -> AppResult<WriteOutcome> {
        self.customers.update(id, customer).await
    }

    async fn delete_customer(&self, id: i64) -> AppResult<WriteOutcome> {
        self.customers.delete(id).await
    }
}

#[async_trait]
impl ItemBackend for SqliteBackend {
    async fn create_item(&self, item: &ItemInput) -> AppResult<Item> {
        self.items.insert(item).await
    }

    async fn find_item_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        self.items.fetch_by_id(id).await
    }

    async fn find_items(&self, filter: &ItemFilter) -> AppResult<Vec<Item>> {
        self.items.fetch_filtered(filter).await
    }

    async fn update_item(&self, id: i64, item: &ItemInput) -> AppResult<WriteOutcome> {
        self.items.update(id, item).await
    }

    async fn delete_item(&self, id: i64) -> AppResult<WriteOutcome> {
        self.items.delete(id).await
    }
}

#[async_trait]
impl OrderBackend for SqliteBackend {
    async fn create_order(&self, order: &OrderInput) -> AppResult<Order> {
        self.orders.insert(order).await
    }

    async fn find_order_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        self.orders.fetch_by_id(id).await
    }

    async fn find_orders(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        self.orders.fetch_filtered(filter).await
    }

    async fn update_order(&self, id: i64, order: &OrderInput) -> AppResult<WriteOutcome> {
        self.orders.update(id, order).await
    }

    async fn delete_order(&self, id: i64) -> AppResult<WriteOutcome> {
        self.orders.delete(id).await
    }
}

#[async_trait]
impl ImportBackend for SqliteBackend {
    async fn import_orders(&self, groups: &[OrderGroup]) -> AppResult<ImportSummary> {
        self.importer.import(groups).await
    }
}
