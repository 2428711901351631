//! Completed Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::try_bind_amount,
    domain::{
        customers::models::CustomerId,
        orders::models::{CompletedOrder, Order, OrderId, OrderItem},
    },
};

use super::OrderItemRow;

const CREATE_COMPLETED_ORDER_SQL: &str = include_str!("../sql/create_completed_order.sql");
const CREATE_COMPLETED_ORDER_ITEM_SQL: &str =
    include_str!("../sql/create_completed_order_item.sql");
const GET_COMPLETED_ORDER_SQL: &str = include_str!("../sql/get_completed_order.sql");
const GET_COMPLETED_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_completed_order_items.sql");
const LIST_COMPLETED_ORDERS_SQL: &str = include_str!("../sql/list_completed_orders.sql");
const GET_CUSTOMER_COMPLETED_ORDER_ITEMS_SQL: &str =
    include_str!("../sql/get_customer_completed_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCompletedOrdersRepository;

impl SqliteCompletedOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Copy an open order, lines included, into the archive.
    pub(crate) async fn archive_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: &Order,
        completed_at: Timestamp,
    ) -> Result<CompletedOrder, sqlx::Error> {
        let header = query_as::<Sqlite, CompletedHeader>(CREATE_COMPLETED_ORDER_SQL)
            .bind(order.id.into_i64())
            .bind(order.customer_id.into_i64())
            .bind(SqlxTimestamp::from(order.created_at))
            .bind(SqlxTimestamp::from(completed_at))
            .fetch_one(&mut **tx)
            .await?;

        for item in &order.items {
            query(CREATE_COMPLETED_ORDER_ITEM_SQL)
                .bind(order.id.into_i64())
                .bind(item.product_id.into_i64())
                .bind(try_bind_amount(item.quantity, "quantity")?)
                .bind(try_bind_amount(item.unit_price, "unit_price")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(header.into_completed(order.items.clone()))
    }

    pub(crate) async fn find_completed_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<Option<CompletedOrder>, sqlx::Error> {
        let Some(header) = query_as::<Sqlite, CompletedHeader>(GET_COMPLETED_ORDER_SQL)
            .bind(customer.into_i64())
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let items = query_as::<Sqlite, OrderItemRow>(GET_COMPLETED_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await?
            .into_iter()
            .map(|row| row.item)
            .collect();

        Ok(Some(header.into_completed(items)))
    }

    /// Every archived order of a customer, most recently completed first.
    pub(crate) async fn list_completed_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<Vec<CompletedOrder>, sqlx::Error> {
        let headers = query_as::<Sqlite, CompletedHeader>(LIST_COMPLETED_ORDERS_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        let rows = query_as::<Sqlite, OrderItemRow>(GET_CUSTOMER_COMPLETED_ORDER_ITEMS_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        let mut items: FxHashMap<OrderId, Vec<OrderItem>> = FxHashMap::default();

        for row in rows {
            items.entry(row.order_id).or_default().push(row.item);
        }

        Ok(headers
            .into_iter()
            .map(|header| {
                let lines = items.remove(&header.order_id).unwrap_or_default();
                header.into_completed(lines)
            })
            .collect())
    }
}

struct CompletedHeader {
    order_id: OrderId,
    customer_id: CustomerId,
    ordered_at: Timestamp,
    completed_at: Timestamp,
}

impl CompletedHeader {
    fn into_completed(self, items: Vec<OrderItem>) -> CompletedOrder {
        CompletedOrder {
            order_id: self.order_id,
            customer_id: self.customer_id,
            items,
            ordered_at: self.ordered_at,
            completed_at: self.completed_at,
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for CompletedHeader {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            customer_id: CustomerId::from_i64(row.try_get("customer_id")?),
            ordered_at: row.try_get::<SqlxTimestamp, _>("ordered_at")?.to_jiff(),
            completed_at: row.try_get::<SqlxTimestamp, _>("completed_at")?.to_jiff(),
        })
    }
}
