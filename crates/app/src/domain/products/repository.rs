//! Products Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    database::{try_bind_amount, try_get_amount},
    domain::products::models::{NewProduct, Product, ProductId, ProductUpdate},
};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DECREMENT_STOCK_SQL: &str = include_str!("sql/decrement_stock.sql");
const INCREMENT_STOCK_SQL: &str = include_str!("sql/increment_stock.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteProductsRepository;

impl SqliteProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: &NewProduct,
        created_at: Timestamp,
    ) -> Result<Product, sqlx::Error> {
        query_as::<Sqlite, Product>(CREATE_PRODUCT_SQL)
            .bind(product.category.trim())
            .bind(try_bind_amount(product.price, "price")?)
            .bind(try_bind_amount(product.stock, "stock")?)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        update: &ProductUpdate,
        updated_at: Timestamp,
    ) -> Result<Option<Product>, sqlx::Error> {
        query_as::<Sqlite, Product>(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(try_bind_amount(update.price, "price")?)
            .bind(try_bind_amount(update.stock, "stock")?)
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_optional(&mut **tx)
            .await
    }

    /// Take `quantity` units out of stock, only if that many are on hand.
    ///
    /// Returns the number of rows changed: zero means the product is missing
    /// or holds fewer than `quantity` units.
    pub(crate) async fn decrement_stock(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        quantity: u64,
        updated_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DECREMENT_STOCK_SQL)
            .bind(product.into_i64())
            .bind(try_bind_amount(quantity, "quantity")?)
            .bind(SqlxTimestamp::from(updated_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn increment_stock(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        quantity: u64,
        updated_at: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_STOCK_SQL)
            .bind(product.into_i64())
            .bind(try_bind_amount(quantity, "quantity")?)
            .bind(SqlxTimestamp::from(updated_at))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Product {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            category: row.try_get("category")?,
            price: try_get_amount(row, "price")?,
            stock: try_get_amount(row, "stock")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
