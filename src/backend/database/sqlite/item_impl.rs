use sqlx::SqlitePool;

use super::{bind_values, map_database_error};
use crate::backend::database::filter::ItemFilter;
use crate::backend::WriteOutcome;
use crate::error::AppResult;
use crate::models::{Item, ItemInput};

const SELECT_ITEMS: &str = "SELECT id, name, price FROM items";
const SELECT_ITEM_BY_ID: &str = "SELECT id, name, price FROM items WHERE id = ?1";

/// SQLite statements for the items table
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, item: &ItemInput) -> AppResult<Item> {
        let result = sqlx::query("INSERT INTO items (name, price) VALUES (?1, ?2)")
            .bind(&item.name)
            .bind(item.price)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "create item"))?;

        let id = result.last_insert_rowid();
        tracing::debug!(item_id = id, "created item");

        Ok(Item::from_input(id, item))
    }

    pub async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Item>> {
        sqlx::query_as::<_, Item>(SELECT_ITEM_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "find item"))
    }

    pub async fn fetch_filtered(&self, filter: &ItemFilter) -> AppResult<Vec<Item>> {
        let compiled = filter.to_query(SELECT_ITEMS);
        let query = bind_values(sqlx::query_as::<_, Item>(&compiled.sql), compiled.binds);

        let items = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "list items"))?;

        Ok(items)
    }

    pub async fn update(&self, id: i64, item: &ItemInput) -> AppResult<WriteOutcome> {
        let result = sqlx::query("UPDATE items SET name = ?1, price = ?2 WHERE id = ?3")
            .bind(&item.name)
            .bind(item.price)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "update item"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(item_id = id, ?outcome, "updated item");
        Ok(outcome)
    }

    pub async fn delete(&self, id: i64) -> AppResult<WriteOutcome> {
        let result = sqlx::query("DELETE FROM items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "delete item"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(item_id = id, ?outcome, "deleted item");
        Ok(outcome)
    }
}
