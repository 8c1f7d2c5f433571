use sqlx::SqlitePool;

use super::{bind_values, map_database_error};
use crate::backend::database::filter::OrderFilter;
use crate::backend::WriteOutcome;
use crate::error::AppResult;
use crate::models::{Order, OrderInput};

const SELECT_ORDERS: &str = "SELECT id, customer_id, item_id, quantity FROM orders";
const SELECT_ORDER_BY_ID: &str =
    "SELECT id, customer_id, item_id, quantity FROM orders WHERE id = ?1";

/// SQLite statements for the orders table
///
/// Existence of the referenced customer and item is not checked here. When the
/// connection enforces foreign keys a dangling reference comes back as
/// `AppError::InvalidReference`; otherwise the row is written as given.
pub struct SqliteOrderStore {
    pool: SqlitePool,
}

impl SqliteOrderStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, order: &OrderInput) -> AppResult<Order> {
        let result =
            sqlx::query("INSERT INTO orders (customer_id, item_id, quantity) VALUES (?1, ?2, ?3)")
                .bind(order.customer_id)
                .bind(order.item_id)
                .bind(order.quantity)
                .execute(&self.pool)
                .await
                .map_err(|e| map_database_error(e, "create order"))?;

        let id = result.last_insert_rowid();
        tracing::debug!(
            order_id = id,
            customer_id = order.customer_id,
            item_id = order.item_id,
            "created order"
        );

        Ok(Order::from_input(id, order))
    }

    pub async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Order>> {
        sqlx::query_as::<_, Order>(SELECT_ORDER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "find order"))
    }

    pub async fn fetch_filtered(&self, filter: &OrderFilter) -> AppResult<Vec<Order>> {
        let compiled = filter.to_query(SELECT_ORDERS);
        let query = bind_values(sqlx::query_as::<_, Order>(&compiled.sql), compiled.binds);

        let orders = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "list orders"))?;

        Ok(orders)
    }

    pub async fn update(&self, id: i64, order: &OrderInput) -> AppResult<WriteOutcome> {
        let result = sqlx::query(
            "UPDATE orders SET customer_id = ?1, item_id = ?2, quantity = ?3 WHERE id = ?4",
        )
        .bind(order.customer_id)
        .bind(order.item_id)
        .bind(order.quantity)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_database_error(e, "update order"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(order_id = id, ?outcome, "updated order");
        Ok(outcome)
    }

    pub async fn delete(&self, id: i64) -> AppResult<WriteOutcome> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "delete order"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(order_id = id, ?outcome, "deleted order");
        Ok(outcome)
    }
}
