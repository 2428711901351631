//! Order Repositories

mod completed;
mod orders;

pub(crate) use completed::SqliteCompletedOrdersRepository;
pub(crate) use orders::SqliteOrdersRepository;

use sqlx::{FromRow, Row, sqlite::SqliteRow};

use crate::{
    database::try_get_amount,
    domain::{
        orders::models::{OrderId, OrderItem},
        products::models::ProductId,
    },
};

/// Order line row, shared by the open and archived item tables.
struct OrderItemRow {
    order_id: OrderId,
    item: OrderItem,
}

impl<'r> FromRow<'r, SqliteRow> for OrderItemRow {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            item: OrderItem {
                product_id: ProductId::from_i64(row.try_get("product_id")?),
                quantity: try_get_amount(row, "quantity")?,
                unit_price: try_get_amount(row, "unit_price")?,
            },
        })
    }
}
