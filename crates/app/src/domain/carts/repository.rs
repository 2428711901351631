//! Cart Items Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::{try_bind_amount, try_get_amount},
    domain::{
        carts::models::CartItem, customers::models::CustomerId, products::models::ProductId,
    },
};

const GET_CART_ITEMS_SQL: &str = include_str!("sql/get_cart_items.sql");
const GET_CART_ITEM_SQL: &str = include_str!("sql/get_cart_item.sql");
const UPSERT_CART_ITEM_SQL: &str = include_str!("sql/upsert_cart_item.sql");
const UPDATE_CART_ITEM_SQL: &str = include_str!("sql/update_cart_item.sql");
const DELETE_CART_ITEM_SQL: &str = include_str!("sql/delete_cart_item.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartItemsRepository;

impl SqliteCartItemsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_cart_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<Vec<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(GET_CART_ITEMS_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(GET_CART_ITEM_SQL)
            .bind(customer.into_i64())
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
        now: Timestamp,
    ) -> Result<CartItem, sqlx::Error> {
        query_as::<Sqlite, CartItem>(UPSERT_CART_ITEM_SQL)
            .bind(customer.into_i64())
            .bind(product.into_i64())
            .bind(try_bind_amount(quantity, "quantity")?)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
        now: Timestamp,
    ) -> Result<Option<CartItem>, sqlx::Error> {
        query_as::<Sqlite, CartItem>(UPDATE_CART_ITEM_SQL)
            .bind(customer.into_i64())
            .bind(product.into_i64())
            .bind(try_bind_amount(quantity, "quantity")?)
            .bind(SqlxTimestamp::from(now))
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_cart_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_ITEM_SQL)
            .bind(customer.into_i64())
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear_cart(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(customer.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            quantity: try_get_amount(row, "quantity")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
