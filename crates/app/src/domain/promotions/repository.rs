//! Promotion Codes Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    discounts::rows::{TermsColumns, try_get_terms},
    promotions::models::{PromotionCode, PromotionCodeUpsert},
};

const GET_PROMOTION_CODE_SQL: &str = include_str!("sql/get_promotion_code.sql");
const LIST_PROMOTION_CODES_SQL: &str = include_str!("sql/list_promotion_codes.sql");
const UPSERT_PROMOTION_CODE_SQL: &str = include_str!("sql/upsert_promotion_code.sql");
const DELETE_PROMOTION_CODE_SQL: &str = include_str!("sql/delete_promotion_code.sql");
const DELETE_PROMOTION_CODES_SQL: &str = include_str!("sql/delete_promotion_codes.sql");
const REDEEM_PROMOTION_CODE_SQL: &str = include_str!("sql/redeem_promotion_code.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePromotionCodesRepository;

impl SqlitePromotionCodesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_promotion_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<Option<PromotionCode>, sqlx::Error> {
        query_as::<Sqlite, PromotionCode>(GET_PROMOTION_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_promotion_codes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<PromotionCode>, sqlx::Error> {
        query_as::<Sqlite, PromotionCode>(LIST_PROMOTION_CODES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn upsert_promotion_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        upsert: &PromotionCodeUpsert,
        now: Timestamp,
    ) -> Result<PromotionCode, sqlx::Error> {
        let columns = TermsColumns::try_from_terms(&upsert.terms)?;

        query_as::<Sqlite, PromotionCode>(UPSERT_PROMOTION_CODE_SQL)
            .bind(upsert.code.as_str())
            .bind(columns.starts_at)
            .bind(columns.ends_at)
            .bind(columns.usage_limit)
            .bind(columns.status)
            .bind(columns.discount_kind)
            .bind(columns.discount_value)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_promotion_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_CODE_SQL)
            .bind(code)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_promotion_codes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_CODES_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Consume one use of a code. Unlimited codes stay unlimited; zero rows
    /// affected means the code is missing or already exhausted.
    pub(crate) async fn redeem_promotion_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REDEEM_PROMOTION_CODE_SQL)
            .bind(code)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for PromotionCode {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            terms: try_get_terms(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
