//! Customers Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::domain::customers::models::{Customer, CustomerId, NewCustomer};

const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCustomersRepository;

impl SqliteCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<Option<Customer>, sqlx::Error> {
        query_as::<Sqlite, Customer>(GET_CUSTOMER_SQL)
            .bind(customer.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: &NewCustomer,
        created_at: Timestamp,
    ) -> Result<Customer, sqlx::Error> {
        query_as::<Sqlite, Customer>(CREATE_CUSTOMER_SQL)
            .bind(customer.email.trim())
            .bind(customer.name.trim())
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Customer {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: CustomerId::from_i64(row.try_get("id")?),
            email: row.try_get("email")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
