//! Return Requests Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::try_get_parsed,
    domain::{
        customers::models::CustomerId,
        orders::models::OrderId,
        returns::models::{NewReturnRequest, ReturnRequest, ReturnStatus},
    },
};

const CREATE_RETURN_SQL: &str = include_str!("sql/create_return.sql");
const GET_RETURN_SQL: &str = include_str!("sql/get_return.sql");
const LIST_RETURNS_SQL: &str = include_str!("sql/list_returns.sql");
const TRANSITION_RETURN_SQL: &str = include_str!("sql/transition_return.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReturnsRepository;

impl SqliteReturnsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_return(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        request: &NewReturnRequest,
        requested_at: Timestamp,
    ) -> Result<ReturnRequest, sqlx::Error> {
        query_as::<Sqlite, ReturnRequest>(CREATE_RETURN_SQL)
            .bind(customer.into_i64())
            .bind(request.order_id.into_i64())
            .bind(request.reason.trim())
            .bind(request.description.as_deref())
            .bind(ReturnStatus::Pending.to_str())
            .bind(SqlxTimestamp::from(requested_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_return(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<Option<ReturnRequest>, sqlx::Error> {
        query_as::<Sqlite, ReturnRequest>(GET_RETURN_SQL)
            .bind(customer.into_i64())
            .bind(order.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_returns(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        status: Option<ReturnStatus>,
    ) -> Result<Vec<ReturnRequest>, sqlx::Error> {
        query_as::<Sqlite, ReturnRequest>(LIST_RETURNS_SQL)
            .bind(customer.into_i64())
            .bind(status.map(ReturnStatus::to_str))
            .fetch_all(&mut **tx)
            .await
    }

    /// Move a request from `from` to `to`. `None` when the request is missing
    /// or no longer in `from`.
    pub(crate) async fn transition_return(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
        from: ReturnStatus,
        to: ReturnStatus,
        completed_at: Option<Timestamp>,
    ) -> Result<Option<ReturnRequest>, sqlx::Error> {
        query_as::<Sqlite, ReturnRequest>(TRANSITION_RETURN_SQL)
            .bind(customer.into_i64())
            .bind(order.into_i64())
            .bind(from.to_str())
            .bind(to.to_str())
            .bind(completed_at.map(SqlxTimestamp::from))
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ReturnRequest {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            customer_id: CustomerId::from_i64(row.try_get("customer_id")?),
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            reason: row.try_get("reason")?,
            description: row.try_get("description")?,
            status: try_get_parsed::<ReturnStatus>(row, "status")?,
            requested_at: row.try_get::<SqlxTimestamp, _>("requested_at")?.to_jiff(),
            completed_at: row
                .try_get::<Option<SqlxTimestamp>, _>("completed_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
