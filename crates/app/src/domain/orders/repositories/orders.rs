//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::try_bind_amount,
    domain::{
        customers::models::CustomerId,
        orders::models::{Order, OrderId, OrderItem},
        products::models::ProductId,
    },
};

use super::OrderItemRow;

const CREATE_ORDER_SQL: &str = include_str!("../sql/create_order.sql");
const GET_ORDER_SQL: &str = include_str!("../sql/get_order.sql");
const LIST_ORDERS_SQL: &str = include_str!("../sql/list_orders.sql");
const DELETE_ORDER_SQL: &str = include_str!("../sql/delete_order.sql");
const DELETE_ORDERS_SQL: &str = include_str!("../sql/delete_orders.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("../sql/create_order_item.sql");
const GET_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_order_items.sql");
const GET_CUSTOMER_ORDER_ITEMS_SQL: &str = include_str!("../sql/get_customer_order_items.sql");
const UPDATE_ORDER_ITEM_SQL: &str = include_str!("../sql/update_order_item.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        items: Vec<OrderItem>,
        created_at: Timestamp,
    ) -> Result<Order, sqlx::Error> {
        let header = query_as::<Sqlite, OrderHeader>(CREATE_ORDER_SQL)
            .bind(customer.into_i64())
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await?;

        for item in &items {
            query(CREATE_ORDER_ITEM_SQL)
                .bind(header.id.into_i64())
                .bind(item.product_id.into_i64())
                .bind(try_bind_amount(item.quantity, "quantity")?)
                .bind(try_bind_amount(item.unit_price, "unit_price")?)
                .execute(&mut **tx)
                .await?;
        }

        Ok(header.into_order(items))
    }

    pub(crate) async fn find_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<Option<Order>, sqlx::Error> {
        let Some(header) = query_as::<Sqlite, OrderHeader>(GET_ORDER_SQL)
            .bind(customer.into_i64())
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let items = query_as::<Sqlite, OrderItemRow>(GET_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await?
            .into_iter()
            .map(|row| row.item)
            .collect();

        Ok(Some(header.into_order(items)))
    }

    /// Every open order of a customer, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let headers = query_as::<Sqlite, OrderHeader>(LIST_ORDERS_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await?;

        let rows = query_as::<Sqlite, OrderItemRow>(GET_CUSTOMER_ORDER_ITEMS_SQL)
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
                let lines = items.remove(&header.id).unwrap_or_default();
                header.into_order(lines)
            })
            .collect())
    }

    pub(crate) async fn update_order_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        product: ProductId,
        quantity: u64,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_ORDER_ITEM_SQL)
            .bind(order.into_i64())
            .bind(product.into_i64())
            .bind(try_bind_amount(quantity, "quantity")?)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDER_SQL)
            .bind(customer.into_i64())
            .bind(order.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ORDERS_SQL)
            .bind(customer.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

struct OrderHeader {
    id: OrderId,
    customer_id: CustomerId,
    created_at: Timestamp,
}

impl OrderHeader {
    fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            customer_id: self.customer_id,
            items,
            created_at: self.created_at,
        }
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderHeader {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            customer_id: CustomerId::from_i64(row.try_get("customer_id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
