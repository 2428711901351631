//! Row mapping for discount terms stored alongside promotion codes and campaigns.

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{Row, sqlite::SqliteRow};

use crate::{
    database::{try_bind_amount, try_get_amount, try_get_optional_amount, try_get_parsed},
    domain::discounts::models::{DiscountStatus, DiscountTerms, SimpleDiscount},
};

/// Column values for binding [`DiscountTerms`] into an insert or update.
#[derive(Debug, Clone)]
pub(crate) struct TermsColumns {
    pub(crate) starts_at: SqlxTimestamp,
    pub(crate) ends_at: SqlxTimestamp,
    pub(crate) usage_limit: Option<i64>,
    pub(crate) status: &'static str,
    pub(crate) discount_kind: &'static str,
    pub(crate) discount_value: i64,
}

impl TermsColumns {
    pub(crate) fn try_from_terms(terms: &DiscountTerms) -> Result<Self, sqlx::Error> {
        Ok(Self {
            starts_at: SqlxTimestamp::from(terms.starts_at),
            ends_at: SqlxTimestamp::from(terms.ends_at),
            usage_limit: terms
                .usage_limit
                .map(|limit| try_bind_amount(limit, "usage_limit"))
                .transpose()?,
            status: terms.status.to_str(),
            discount_kind: terms.discount.to_str(),
            discount_value: try_bind_amount(terms.discount.value(), "discount_value")?,
        })
    }
}

pub(crate) fn try_get_terms(row: &SqliteRow) -> Result<DiscountTerms, sqlx::Error> {
    let kind: String = row.try_get("discount_kind")?;
    let value = try_get_amount(row, "discount_value")?;

    Ok(DiscountTerms {
        starts_at: row.try_get::<SqlxTimestamp, _>("starts_at")?.to_jiff(),
        ends_at: row.try_get::<SqlxTimestamp, _>("ends_at")?.to_jiff(),
        usage_limit: try_get_optional_amount(row, "usage_limit")?,
        status: try_get_parsed::<DiscountStatus>(row, "status")?,
        discount: SimpleDiscount::from_parts(&kind, value).map_err(|e| {
            sqlx::Error::ColumnDecode {
                index: "discount_kind".to_string(),
                source: Box::new(e),
            }
        })?,
    })
}
