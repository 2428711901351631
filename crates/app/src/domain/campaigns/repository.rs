//! Campaigns Repository

use std::collections::BTreeSet;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};

use crate::domain::{
    campaigns::models::{Campaign, CampaignUpsert},
    discounts::rows::{TermsColumns, try_get_terms},
};

const GET_CAMPAIGN_SQL: &str = include_str!("sql/get_campaign.sql");
const LIST_CAMPAIGNS_SQL: &str = include_str!("sql/list_campaigns.sql");
const LIST_CAMPAIGNS_FOR_CATEGORY_SQL: &str = include_str!("sql/list_campaigns_for_category.sql");
const GET_CAMPAIGN_CATEGORIES_SQL: &str = include_str!("sql/get_campaign_categories.sql");
const UPSERT_CAMPAIGN_SQL: &str = include_str!("sql/upsert_campaign.sql");
const DELETE_CAMPAIGN_CATEGORIES_SQL: &str = include_str!("sql/delete_campaign_categories.sql");
const CREATE_CAMPAIGN_CATEGORY_SQL: &str = include_str!("sql/create_campaign_category.sql");
const DELETE_CAMPAIGN_SQL: &str = include_str!("sql/delete_campaign.sql");
const DELETE_CAMPAIGNS_SQL: &str = include_str!("sql/delete_campaigns.sql");
const REDEEM_CAMPAIGN_SQL: &str = include_str!("sql/redeem_campaign.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCampaignsRepository;

impl SqliteCampaignsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_campaign(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let campaign = query_as::<Sqlite, Campaign>(GET_CAMPAIGN_SQL)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;

        match campaign {
            Some(campaign) => Ok(Some(self.with_categories(tx, campaign).await?)),
            None => Ok(None),
        }
    }

    pub(crate) async fn list_campaigns(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let campaigns = query_as::<Sqlite, Campaign>(LIST_CAMPAIGNS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        self.with_all_categories(tx, campaigns).await
    }

    /// Campaigns whose category set contains `category`, regardless of eligibility.
    pub(crate) async fn list_campaigns_for_category(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        category: &str,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let campaigns = query_as::<Sqlite, Campaign>(LIST_CAMPAIGNS_FOR_CATEGORY_SQL)
            .bind(category)
            .fetch_all(&mut **tx)
            .await?;

        self.with_all_categories(tx, campaigns).await
    }

    pub(crate) async fn upsert_campaign(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        upsert: &CampaignUpsert,
        now: Timestamp,
    ) -> Result<Campaign, sqlx::Error> {
        let columns = TermsColumns::try_from_terms(&upsert.terms)?;

        let mut campaign = query_as::<Sqlite, Campaign>(UPSERT_CAMPAIGN_SQL)
            .bind(upsert.name.as_str())
            .bind(columns.starts_at)
            .bind(columns.ends_at)
            .bind(columns.usage_limit)
            .bind(columns.status)
            .bind(columns.discount_kind)
            .bind(columns.discount_value)
            .bind(SqlxTimestamp::from(now))
            .fetch_one(&mut **tx)
            .await?;

        query(DELETE_CAMPAIGN_CATEGORIES_SQL)
            .bind(upsert.name.as_str())
            .execute(&mut **tx)
            .await?;

        for category in &upsert.categories {
            query(CREATE_CAMPAIGN_CATEGORY_SQL)
                .bind(upsert.name.as_str())
                .bind(category.as_str())
                .execute(&mut **tx)
                .await?;
        }

        campaign.categories.clone_from(&upsert.categories);

        Ok(campaign)
    }

    pub(crate) async fn delete_campaign(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CAMPAIGN_SQL)
            .bind(name)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn delete_campaigns(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CAMPAIGNS_SQL)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Consume one use of a campaign. Zero rows affected means the campaign
    /// is missing or already exhausted.
    pub(crate) async fn redeem_campaign(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(REDEEM_CAMPAIGN_SQL)
            .bind(name)
            .bind(SqlxTimestamp::from(now))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    async fn with_categories(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        mut campaign: Campaign,
    ) -> Result<Campaign, sqlx::Error> {
        let categories = query_scalar::<Sqlite, String>(GET_CAMPAIGN_CATEGORIES_SQL)
            .bind(campaign.name.as_str())
            .fetch_all(&mut **tx)
            .await?;

        campaign.categories = categories.into_iter().collect::<BTreeSet<_>>();

        Ok(campaign)
    }

    async fn with_all_categories(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        campaigns: Vec<Campaign>,
    ) -> Result<Vec<Campaign>, sqlx::Error> {
        let mut loaded = Vec::with_capacity(campaigns.len());

        for campaign in campaigns {
            loaded.push(self.with_categories(tx, campaign).await?);
        }

        Ok(loaded)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Campaign {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            name: row.try_get("name")?,
            categories: BTreeSet::new(),
            terms: try_get_terms(row)?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
