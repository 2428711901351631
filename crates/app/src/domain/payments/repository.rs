//! Receipts Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::{
    database::{try_bind_amount, try_get_amount, try_get_parsed},
    domain::{
        customers::models::CustomerId,
        orders::models::OrderId,
        payments::{
            gateway::{PaymentConfirmation, PaymentMethod},
            models::{PaymentStatus, Receipt, ReceiptId},
        },
        validation::Currency,
    },
};

const CREATE_RECEIPT_SQL: &str = include_str!("sql/create_receipt.sql");
const LIST_RECEIPTS_SQL: &str = include_str!("sql/list_receipts.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReceiptsRepository;

impl SqliteReceiptsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_receipt(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        order: OrderId,
        confirmation: &PaymentConfirmation,
        paid_at: Timestamp,
    ) -> Result<Receipt, sqlx::Error> {
        query_as::<Sqlite, Receipt>(CREATE_RECEIPT_SQL)
            .bind(order.into_i64())
            .bind(customer.into_i64())
            .bind(confirmation.payment_id.as_str())
            .bind(PaymentStatus::Approved.to_str())
            .bind(confirmation.method.to_str())
            .bind(try_bind_amount(confirmation.amount, "total_amount")?)
            .bind(confirmation.currency.as_str())
            .bind(confirmation.description.as_str())
            .bind(SqlxTimestamp::from(paid_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn list_receipts(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<Vec<Receipt>, sqlx::Error> {
        query_as::<Sqlite, Receipt>(LIST_RECEIPTS_SQL)
            .bind(customer.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Receipt {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ReceiptId::from_i64(row.try_get("id")?),
            order_id: OrderId::from_i64(row.try_get("order_id")?),
            customer_id: CustomerId::from_i64(row.try_get("customer_id")?),
            payment_id: row.try_get("payment_id")?,
            status: try_get_parsed::<PaymentStatus>(row, "status")?,
            method: try_get_parsed::<PaymentMethod>(row, "method")?,
            total_amount: try_get_amount(row, "total_amount")?,
            currency: try_get_parsed::<Currency>(row, "currency")?,
            description: row.try_get("description")?,
            paid_at: row.try_get::<SqlxTimestamp, _>("paid_at")?.to_jiff(),
        })
    }
}
