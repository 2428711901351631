//! Campaigns Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        campaigns::{
            CampaignsServiceError,
            models::{Campaign, CampaignUpsert},
            repository::SqliteCampaignsRepository,
        },
        upserted::Upserted,
        validation::{ValidationError, require_non_empty},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCampaignsService {
    db: Db,
    repository: SqliteCampaignsRepository,
}

impl SqliteCampaignsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCampaignsRepository::new(),
        }
    }
}

#[async_trait]
impl CampaignsService for SqliteCampaignsService {
    #[tracing::instrument(
        name = "campaigns.service.upsert_campaign",
        skip(self, upsert),
        fields(
            campaign = %upsert.name,
            category_count = upsert.categories.len(),
            created = tracing::field::Empty
        ),
        err
    )]
    async fn upsert_campaign(
        &self,
        upsert: CampaignUpsert,
    ) -> Result<Upserted<Campaign>, CampaignsServiceError> {
        require_non_empty("name", &upsert.name)?;

        if upsert.categories.is_empty() {
            return Err(ValidationError::Empty { field: "categories" }.into());
        }

        if upsert.categories.iter().any(|category| category.trim().is_empty()) {
            return Err(ValidationError::Empty { field: "category" }.into());
        }

        upsert.terms.validate()?;

        let mut tx = self.db.begin().await?;

        let existed = self
            .repository
            .find_campaign(&mut tx, &upsert.name)
            .await?
            .is_some();

        let stored = self
            .repository
            .upsert_campaign(&mut tx, &upsert, Timestamp::now())
            .await?;

        tx.commit().await?;

        Span::current().record("created", !existed);

        info!(campaign = %stored.name, "saved campaign");

        Ok(if existed {
            Upserted::Updated(stored)
        } else {
            Upserted::Created(stored)
        })
    }

    async fn get_campaign(&self, name: &str) -> Result<Campaign, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_campaign(&mut tx, name)
            .await?
            .ok_or_else(|| CampaignsServiceError::CampaignNotFound(name.to_string()))?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_campaigns(&self) -> Result<Vec<Campaign>, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let campaigns = self.repository.list_campaigns(&mut tx).await?;

        tx.commit().await?;

        Ok(campaigns)
    }

    #[tracing::instrument(name = "campaigns.service.delete_campaign", skip(self), err)]
    async fn delete_campaign(&self, name: &str) -> Result<(), CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_campaign(&mut tx, name).await?;

        if rows_affected == 0 {
            return Err(CampaignsServiceError::CampaignNotFound(name.to_string()));
        }

        tx.commit().await?;

        info!(campaign = name, "deleted campaign");

        Ok(())
    }

    #[tracing::instrument(name = "campaigns.service.delete_campaigns", skip(self), err)]
    async fn delete_campaigns(&self) -> Result<u64, CampaignsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.repository.delete_campaigns(&mut tx).await?;

        tx.commit().await?;

        info!(deleted, "deleted all campaigns");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait CampaignsService: Send + Sync {
    /// Create a campaign, or replace the terms and categories of an existing one.
    async fn upsert_campaign(
        &self,
        upsert: CampaignUpsert,
    ) -> Result<Upserted<Campaign>, CampaignsServiceError>;

    /// Retrieve a single campaign.
    async fn get_campaign(&self, name: &str) -> Result<Campaign, CampaignsServiceError>;

    /// Retrieve every campaign, ordered by name.
    async fn list_campaigns(&self) -> Result<Vec<Campaign>, CampaignsServiceError>;

    /// Delete a single campaign.
    async fn delete_campaign(&self, name: &str) -> Result<(), CampaignsServiceError>;

    /// Delete every campaign, returning how many were removed.
    async fn delete_campaigns(&self) -> Result<u64, CampaignsServiceError>;
}
