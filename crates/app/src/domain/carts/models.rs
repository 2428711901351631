//! Cart Models

use jiff::Timestamp;

use crate::domain::{customers::models::CustomerId, products::models::ProductId};

/// Cart Model
///
/// Items keep the order in which their product was first added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub customer_id: CustomerId,
    pub items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// CartItem Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: ProductId,
    pub quantity: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
