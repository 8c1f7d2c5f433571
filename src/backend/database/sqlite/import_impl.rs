use sqlx::{Sqlite, SqlitePool, Transaction};

use super::map_database_error;
use crate::backend::database::loader::{customer_key, item_key, DedupCache};
use crate::error::{AppError, AppResult};
use crate::models::{ImportSummary, OrderGroup};

/// Transactional bulk loader for the SQLite store
pub struct SqliteOrderImporter {
    pool: SqlitePool,
}

impl SqliteOrderImporter {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert all groupings in a single transaction.
    ///
    /// A customer or item whose natural key is already in the cache resolves to
    /// the cached identity and is not written again.
    pub async fn import(&self, groups: &[OrderGroup]) -> AppResult<ImportSummary> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(format!("Failed to start transaction: {}", e)))?;

        let mut cache = DedupCache::new();
        let mut summary = ImportSummary::default();

        for group in groups {
            let key = customer_key(group);
            let customer_id = match cache.customer(&key) {
                Some(id) => id,
                None => {
                    let id = insert_customer(&mut tx, &group.name, &group.phone).await?;
                    cache.remember_customer(key, id);
                    id
                }
            };

            for item in &group.items {
                let key = item_key(item);
                let item_id = match cache.item(&key) {
                    Some(id) => id,
                    None => {
                        let id = insert_item(&mut tx, &item.name, item.price).await?;
                        cache.remember_item(key, id);
                        id
                    }
                };

                insert_order(&mut tx, customer_id, item_id, item.quantity).await?;
                summary.orders += 1;
            }
        }

        summary.customers = cache.customer_count() as u64;
        summary.items = cache.item_count() as u64;

        tx.commit()
            .await
            .map_err(|e| AppError::Database(format!("Failed to commit transaction: {}", e)))?;

        tracing::info!(
            customers = summary.customers,
            items = summary.items,
            orders = summary.orders,
            "bulk load finished"
        );

        Ok(summary)
    }
}

async fn insert_customer(
    tx: &mut Transaction<'_, Sqlite>,
    name: &str,
    phone: &str,
) -> AppResult<i64> {
    let result = sqlx::query("INSERT INTO customers (name, phone) VALUES (?1, ?2)")
        .bind(name)
        .bind(phone)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_database_error(e, "load customer"))?;

    Ok(result.last_insert_rowid())
}

async fn insert_item(tx: &mut Transaction<'_, Sqlite>, name: &str, price: f64) -> AppResult<i64> {
    let result = sqlx::query("INSERT INTO items (name, price) VALUES (?1, ?2)")
        .bind(name)
        .bind(price)
        .execute(&mut **tx)
        .await
        .map_err(|e| map_database_error(e, "load item"))?;

    Ok(result.last_insert_rowid())
}

async fn insert_order(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: i64,
    item_id: i64,
    quantity: i64,
) -> AppResult<i64> {
    let result =
        sqlx::query("INSERT INTO orders (customer_id, item_id, quantity) VALUES (?1, ?2, ?3)")
            .bind(customer_id)
            .bind(item_id)
            .bind(quantity)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_database_error(e, "load order"))?;

    Ok(result.last_insert_rowid())
}
