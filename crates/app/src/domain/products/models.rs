//! Product Models

use jiff::Timestamp;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub category: String,
    pub price: u64,
    pub stock: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category: String,
    pub price: u64,
    pub stock: u64,
}

/// Product Update Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub price: u64,
    pub stock: u64,
}
