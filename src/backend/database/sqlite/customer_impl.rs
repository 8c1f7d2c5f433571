use sqlx::SqlitePool;

use super::{bind_values, map_database_error};
use crate::backend::database::filter::CustomerFilter;
use crate::backend::WriteOutcome;
use crate::error::AppResult;
use crate::models::{Customer, CustomerInput};

const SELECT_CUSTOMERS: &str = "SELECT id, name, phone FROM customers";
const SELECT_CUSTOMER_BY_ID: &str = "SELECT id, name, phone FROM customers WHERE id = ?1";

/// SQLite statements for the customers table
pub struct SqliteCustomerStore {
    pool: SqlitePool,
}

impl SqliteCustomerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, customer: &CustomerInput) -> AppResult<Customer> {
        let result = sqlx::query("INSERT INTO customers (name, phone) VALUES (?1, ?2)")
            .bind(&customer.name)
            .bind(&customer.phone)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "create customer"))?;

        let id = result.last_insert_rowid();
        tracing::debug!(customer_id = id, "created customer");

        Ok(Customer::from_input(id, customer))
    }

    pub async fn fetch_by_id(&self, id: i64) -> AppResult<Option<Customer>> {
        sqlx::query_as::<_, Customer>(SELECT_CUSTOMER_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "find customer"))
    }

    pub async fn fetch_filtered(&self, filter: &CustomerFilter) -> AppResult<Vec<Customer>> {
        let compiled = filter.to_query(SELECT_CUSTOMERS);
        let query = bind_values(sqlx::query_as::<_, Customer>(&compiled.sql), compiled.binds);

        let customers = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "list customers"))?;

        Ok(customers)
    }

    pub async fn update(&self, id: i64, customer: &CustomerInput) -> AppResult<WriteOutcome> {
        let result = sqlx::query("UPDATE customers SET name = ?1, phone = ?2 WHERE id = ?3")
            .bind(&customer.name)
            .bind(&customer.phone)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "update customer"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(customer_id = id, ?outcome, "updated customer");
        Ok(outcome)
    }

    pub async fn delete(&self, id: i64) -> AppResult<WriteOutcome> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_database_error(e, "delete customer"))?;

        let outcome = WriteOutcome::from_rows_affected(result.rows_affected());
        tracing::debug!(customer_id = id, ?outcome, "deleted customer");
        Ok(outcome)
    }
}
