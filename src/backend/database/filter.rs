//! Allow-listed WHERE clause construction for list queries
//!
//! List endpoints accept a handful of optional filters. Rather than letting
//! callers name columns, every predicate is one variant of [`Predicate`] with
//! a fixed SQL template; values are always bound as parameters.

use crate::models::{CustomerListQuery, ItemListQuery, OrderListQuery};

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Text(String),
    Integer(i64),
}

/// The closed set of predicates a list query may use
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `name` contains the given substring (literal match, storage-default case folding)
    NameContains(String),
    PhoneEquals(String),
    CustomerIdEquals(i64),
}

impl Predicate {
    fn template(&self) -> &'static str {
        match self {
            Predicate::NameContains(_) => "name LIKE ? ESCAPE '\\'",
            Predicate::PhoneEquals(_) => "phone = ?",
            Predicate::CustomerIdEquals(_) => "customer_id = ?",
        }
    }

    fn bind_value(&self) -> BindValue {
        match self {
            Predicate::NameContains(fragment) => {
                BindValue::Text(format!("%{}%", escape_like(fragment)))
            }
            Predicate::PhoneEquals(phone) => BindValue::Text(phone.clone()),
            Predicate::CustomerIdEquals(id) => BindValue::Integer(*id),
        }
    }
}

/// Escape LIKE wildcards so the fragment matches literally
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Filter for the customers table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub limit: Option<i64>,
}

/// Filter for the items table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    pub name: Option<String>,
}

/// Filter for the orders table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    pub customer_id: Option<i64>,
}

impl CustomerFilter {
    pub fn from_query(query: &CustomerListQuery, limit: i64) -> Self {
        Self {
            name: query.name.clone(),
            phone: query.phone.clone(),
            limit: Some(limit),
        }
    }

    pub fn to_query(&self, select: &str) -> CompiledQuery {
        ListQueryBuilder::new(select)
            .predicate(self.name.clone().map(Predicate::NameContains))
            .predicate(self.phone.clone().map(Predicate::PhoneEquals))
            .limit(self.limit)
            .build()
    }
}

impl ItemFilter {
    pub fn from_query(query: &ItemListQuery) -> Self {
        Self {
            name: query.name.clone(),
        }
    }

    pub fn to_query(&self, select: &str) -> CompiledQuery {
        ListQueryBuilder::new(select)
            .predicate(self.name.clone().map(Predicate::NameContains))
            .build()
    }
}

impl OrderFilter {
    pub fn from_query(query: &OrderListQuery) -> Self {
        Self {
            customer_id: query.customer_id,
        }
    }

    pub fn to_query(&self, select: &str) -> CompiledQuery {
        ListQueryBuilder::new(select)
            .predicate(self.customer_id.map(Predicate::CustomerIdEquals))
            .build()
    }
}

/// SQL text plus the values to bind, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub binds: Vec<BindValue>,
}

/// Builds `SELECT ... [WHERE ...] [LIMIT ?]` from allow-listed predicates
pub struct ListQueryBuilder {
    select: String,
    predicates: Vec<Predicate>,
    limit: Option<i64>,
}

impl ListQueryBuilder {
    /// `select` is a fixed statement prefix owned by the caller, never user input
    pub fn new(select: &str) -> Self {
        Self {
            select: select.to_string(),
            predicates: Vec::new(),
            limit: None,
        }
    }

    /// Append a predicate when present; `None` is ignored
    pub fn predicate(mut self, predicate: Option<Predicate>) -> Self {
        if let Some(predicate) = predicate {
            self.predicates.push(predicate);
        }
        self
    }

    pub fn limit(mut self, limit: Option<i64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> CompiledQuery {
        let mut sql = self.select;
        let mut binds = Vec::with_capacity(self.predicates.len() + 1);

        if !self.predicates.is_empty() {
            let clauses: Vec<&str> = self.predicates.iter().map(Predicate::template).collect();
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
            binds.extend(self.predicates.iter().map(Predicate::bind_value));
        }

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            binds.push(BindValue::Integer(limit));
        }

        CompiledQuery { sql, binds }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELECT: &str = "SELECT id, name, phone FROM customers";

    #[test]
    fn test_no_filters() {
        let query = CustomerFilter::default().to_query(SELECT);
        assert_eq!(query.sql, SELECT);
        assert!(query.binds.is_empty());
    }

    #[test]
    fn test_all_customer_filters() {
        let filter = CustomerFilter {
            name: Some("an".to_string()),
            phone: Some("555-123-4567".to_string()),
            limit: Some(10),
        };
        let query = filter.to_query(SELECT);

        assert_eq!(
            query.sql,
            "SELECT id, name, phone FROM customers WHERE name LIKE ? ESCAPE '\\' AND phone = ? LIMIT ?"
        );
        assert_eq!(
            query.binds,
            vec![
                BindValue::Text("%an%".to_string()),
                BindValue::Text("555-123-4567".to_string()),
                BindValue::Integer(10),
            ]
        );
    }

    #[test]
    fn test_injection_attempt_stays_bound() {
        let filter = ItemFilter {
            name: Some("'; DROP TABLE items; --".to_string()),
        };
        let query = filter.to_query("SELECT id, name, price FROM items");

        assert!(!query.sql.contains("DROP"));
        assert_eq!(
            query.binds,
            vec![BindValue::Text("%'; DROP TABLE items; --%".to_string())]
        );
    }

    #[test]
    fn test_like_wildcards_are_escaped() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
    }

    #[test]
    fn test_order_filter() {
        let query = OrderFilter {
            customer_id: Some(42),
        }
        .to_query("SELECT id, customer_id, item_id, quantity FROM orders");

        assert!(query.sql.ends_with("WHERE customer_id = ?"));
        assert_eq!(query.binds, vec![BindValue::Integer(42)]);
    }
}
