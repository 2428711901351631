//! Order Models

use jiff::Timestamp;

use crate::{
    domain::{customers::models::CustomerId, products::models::ProductId},
    ids::TypedId,
};

pub type OrderId = TypedId<Order>;

/// Order line. The unit price is captured when the order is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: u64,
    pub unit_price: u64,
}

impl OrderItem {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
}

impl Order {
    /// Pre-discount total of every line.
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        total_of(&self.items)
    }
}

/// Archived copy of an order, keyed by the id it had while open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedOrder {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderItem>,
    pub ordered_at: Timestamp,
    pub completed_at: Timestamp,
}

impl CompletedOrder {
    #[must_use]
    pub fn total_amount(&self) -> u64 {
        total_of(&self.items)
    }
}

fn total_of(items: &[OrderItem]) -> u64 {
    items
        .iter()
        .fold(0_u64, |total, item| total.saturating_add(item.subtotal()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_amount_sums_line_subtotals() {
        let order = Order {
            id: OrderId::from_i64(1),
            customer_id: CustomerId::from_i64(1),
            items: vec![
                OrderItem {
                    product_id: ProductId::from_i64(1),
                    quantity: 2,
                    unit_price: 10_00,
                },
                OrderItem {
                    product_id: ProductId::from_i64(2),
                    quantity: 0,
                    unit_price: 99_00,
                },
                OrderItem {
                    product_id: ProductId::from_i64(3),
                    quantity: 3,
                    unit_price: 1_50,
                },
            ],
            created_at: Timestamp::UNIX_EPOCH,
        };

        assert_eq!(order.total_amount(), 24_50);
    }
}
