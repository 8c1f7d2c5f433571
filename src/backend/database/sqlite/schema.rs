use crate::error::{AppError, AppResult};
use sqlx::SqlitePool;

const CUSTOMERS_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        phone TEXT NOT NULL UNIQUE
    )
"#;

const ITEMS_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price REAL NOT NULL
    )
"#;

// No ON DELETE action: deleting a referenced row never cascades.
const ORDERS_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER NOT NULL,
        item_id INTEGER NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 1,
        FOREIGN KEY (customer_id) REFERENCES customers (id),
        FOREIGN KEY (item_id) REFERENCES items (id)
    )
"#;

/// Create the customers, items and orders tables if they do not exist
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    for (table, sql) in [
        ("customers", CUSTOMERS_SQL),
        ("items", ITEMS_SQL),
        ("orders", ORDERS_SQL),
    ] {
        sqlx::query(sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to create {} table: {}", table, e)))?;
    }

    Ok(())
}

/// Drop all tables, dependents first
pub async fn drop_schema(pool: &SqlitePool) -> AppResult<()> {
    for table in ["orders", "items", "customers"] {
        let sql = format!("DROP TABLE IF EXISTS {}", table);
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(|e| AppError::Database(format!("Failed to drop table {}: {}", table, e)))?;
    }

    Ok(())
}

/// Drop and recreate every table; identities restart from 1
pub async fn reset_schema(pool: &SqlitePool) -> AppResult<()> {
    drop_schema(pool).await?;
    init_schema(pool).await
}
