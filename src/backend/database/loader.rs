use std::collections::HashMap;

use crate::error::{AppError, AppResult};
use crate::models::{OrderGroup, OrderGroupItem};

/// Natural key of a customer in a bulk-load document
pub type CustomerKey = (String, String);

/// Natural key of an item; the price is keyed by its bit pattern so it can be hashed
pub type ItemKey = (String, u64);

pub fn customer_key(group: &OrderGroup) -> CustomerKey {
    (group.name.clone(), group.phone.clone())
}

pub fn item_key(item: &OrderGroupItem) -> ItemKey {
    // 0.0 and -0.0 compare equal but differ in bits
    let price = if item.price == 0.0 { 0.0 } else { item.price };
    (item.name.clone(), price.to_bits())
}

/// Identities assigned during a single load pass, keyed by natural key
///
/// Only lives for one call to `import_orders`; nothing carries over between runs.
#[derive(Debug, Default)]
pub struct DedupCache {
    customers: HashMap<CustomerKey, i64>,
    items: HashMap<ItemKey, i64>,
}

impl DedupCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn customer(&self, key: &CustomerKey) -> Option<i64> {
        self.customers.get(key).copied()
    }

    pub fn remember_customer(&mut self, key: CustomerKey, id: i64) {
        self.customers.insert(key, id);
    }

    pub fn item(&self, key: &ItemKey) -> Option<i64> {
        self.items.get(key).copied()
    }

    pub fn remember_item(&mut self, key: ItemKey, id: i64) {
        self.items.insert(key, id);
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Parse a bulk-load document: a JSON array of order groupings
pub fn parse_document(content: &str) -> AppResult<Vec<OrderGroup>> {
    serde_json::from_str(content).map_err(|e| {
        AppError::Validation(format!("Invalid order document: {}", e))
    })
}
