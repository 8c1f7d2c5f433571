pub mod backend_impl;
pub mod customer_impl;
pub mod import_impl;
pub mod item_impl;
pub mod order_impl;
pub mod schema;

use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::Sqlite;

use super::filter::BindValue;
use crate::error::AppError;

pub use backend_impl::SqliteBackend;
pub use customer_impl::SqliteCustomerStore;
pub use import_impl::SqliteOrderImporter;
pub use item_impl::SqliteItemStore;
pub use order_impl::SqliteOrderStore;

/// Bind compiled filter values in placeholder order
pub(crate) fn bind_values<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    binds: Vec<BindValue>,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for value in binds {
        query = match value {
            BindValue::Text(text) => query.bind(text),
            BindValue::Integer(number) => query.bind(number),
        };
    }
    query
}

/// Map constraint violations to client-facing errors, everything else to a database error
pub fn map_database_error(error: sqlx::Error, operation: &str) -> AppError {
    match &error {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            if db_err.message().contains("customers.phone") {
                tracing::warn!(operation, "rejected duplicate customer phone");
                AppError::Conflict("Customer with this phone already exists.".to_string())
            } else {
                AppError::Conflict(format!("Duplicate value while trying to {}", operation))
            }
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::InvalidReference(format!(
                "Foreign key constraint failed while trying to {}",
                operation
            ))
        }
        _ => AppError::Database(format!("Failed to {}: {}", operation, error)),
    }
}
