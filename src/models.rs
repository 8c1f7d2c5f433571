use serde::{Deserialize, Serialize};

/// A customer row as stored in the `customers` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone: String,
}

/// Body of `POST /customers` and `PUT /customers/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInput {
    pub name: String,
    pub phone: String,
}

/// A menu item row as stored in the `items` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    pub name: String,
    pub price: f64,
}

/// An order row linking a customer to an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInput {
    pub customer_id: i64,
    pub item_id: i64,
    pub quantity: i64,
}

impl Customer {
    pub fn from_input(id: i64, input: &CustomerInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            phone: input.phone.clone(),
        }
    }
}

impl Item {
    pub fn from_input(id: i64, input: &ItemInput) -> Self {
        Self {
            id,
            name: input.name.clone(),
            price: input.price,
        }
    }
}

impl Order {
    pub fn from_input(id: i64, input: &OrderInput) -> Self {
        Self {
            id,
            customer_id: input.customer_id,
            item_id: input.item_id,
            quantity: input.quantity,
        }
    }
}

/// Query string accepted by `GET /customers`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerListQuery {
    pub limit: Option<i64>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// Query string accepted by `GET /items`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemListQuery {
    pub name: Option<String>,
}

/// Query string accepted by `GET /orders`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub customer_id: Option<i64>,
}

/// Acknowledgement body returned by update and delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One grouping in a bulk-load document: a customer and the items they ordered
#[derive(Debug, Clone, Deserialize)]
pub struct OrderGroup {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub items: Vec<OrderGroupItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderGroupItem {
    pub name: String,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Row counts written by a bulk load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub customers: u64,
    pub items: u64,
    pub orders: u64,
}
