pub mod validation;

pub use validation::{
    resolve_customer_limit, validate_customer, validate_item, validate_phone,
};
