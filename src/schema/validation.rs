use crate::error::{AppError, AppResult};
use crate::models::{CustomerInput, CustomerListQuery, ItemInput};
use lazy_static::lazy_static;
use regex::Regex;

/// Default number of customers returned when `limit` is absent
pub const DEFAULT_CUSTOMER_LIMIT: i64 = 10;
pub const MIN_CUSTOMER_LIMIT: i64 = 1;
pub const MAX_CUSTOMER_LIMIT: i64 = 100;

lazy_static! {
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\d{3}-\d{3}-\d{4}$").unwrap();
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Validates a phone number of the form `NNN-NNN-NNNN`
pub fn validate_phone(phone: &str) -> AppResult<()> {
    require_non_empty("phone", phone)?;

    if !PHONE_PATTERN.is_match(phone) {
        return Err(AppError::Validation(format!(
            "phone '{}' must match the format NNN-NNN-NNNN",
            phone
        )));
    }

    Ok(())
}

pub fn validate_customer(customer: &CustomerInput) -> AppResult<()> {
    require_non_empty("name", &customer.name)?;
    validate_phone(&customer.phone)
}

/// Validates an item body.
///
/// Negative prices are accepted; only non-finite values are rejected.
pub fn validate_item(item: &ItemInput) -> AppResult<()> {
    require_non_empty("name", &item.name)?;

    if !item.price.is_finite() {
        return Err(AppError::Validation(
            "price must be a finite number".to_string(),
        ));
    }

    Ok(())
}

/// Resolves the effective customer list limit, rejecting values outside `[1, 100]`
pub fn resolve_customer_limit(query: &CustomerListQuery) -> AppResult<i64> {
    match query.limit {
        None => Ok(DEFAULT_CUSTOMER_LIMIT),
        Some(limit) if (MIN_CUSTOMER_LIMIT..=MAX_CUSTOMER_LIMIT).contains(&limit) => Ok(limit),
        Some(limit) => Err(AppError::Validation(format!(
            "limit must be between {} and {}, got {}",
            MIN_CUSTOMER_LIMIT, MAX_CUSTOMER_LIMIT, limit
        ))),
    }
}
