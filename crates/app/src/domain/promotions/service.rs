//! Promotion Codes Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        promotions::{
            PromotionsServiceError,
            models::{PromotionCode, PromotionCodeUpsert},
            repository::SqlitePromotionCodesRepository,
        },
        upserted::Upserted,
        validation::require_non_empty,
    },
};

#[derive(Debug, Clone)]
pub struct SqlitePromotionsService {
    db: Db,
    repository: SqlitePromotionCodesRepository,
}

impl SqlitePromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqlitePromotionCodesRepository::new(),
        }
    }
}

#[async_trait]
impl PromotionsService for SqlitePromotionsService {
    #[tracing::instrument(
        name = "promotions.service.upsert_promotion_code",
        skip(self, upsert),
        fields(
            code = %upsert.code,
            discount_type = upsert.terms.discount.to_str(),
            created = tracing::field::Empty
        ),
        err
    )]
    async fn upsert_promotion_code(
        &self,
        upsert: PromotionCodeUpsert,
    ) -> Result<Upserted<PromotionCode>, PromotionsServiceError> {
        require_non_empty("code", &upsert.code)?;
        upsert.terms.validate()?;

        let mut tx = self.db.begin().await?;

        let existed = self
            .repository
            .find_promotion_code(&mut tx, &upsert.code)
            .await?
            .is_some();

        let stored = self
            .repository
            .upsert_promotion_code(&mut tx, &upsert, Timestamp::now())
            .await?;

        tx.commit().await?;

        Span::current().record("created", !existed);

        info!(code = %stored.code, "saved promotion code");

        Ok(if existed {
            Upserted::Updated(stored)
        } else {
            Upserted::Created(stored)
        })
    }

    async fn get_promotion_code(&self, code: &str) -> Result<PromotionCode, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_promotion_code(&mut tx, code)
            .await?
            .ok_or_else(|| PromotionsServiceError::CodeNotFound(code.to_string()))?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_promotion_codes(&self) -> Result<Vec<PromotionCode>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let codes = self.repository.list_promotion_codes(&mut tx).await?;

        tx.commit().await?;

        Ok(codes)
    }

    #[tracing::instrument(name = "promotions.service.delete_promotion_code", skip(self), err)]
    async fn delete_promotion_code(&self, code: &str) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_promotion_code(&mut tx, code).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::CodeNotFound(code.to_string()));
        }

        tx.commit().await?;

        info!(code, "deleted promotion code");

        Ok(())
    }

    #[tracing::instrument(name = "promotions.service.delete_promotion_codes", skip(self), err)]
    async fn delete_promotion_codes(&self) -> Result<u64, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.repository.delete_promotion_codes(&mut tx).await?;

        tx.commit().await?;

        info!(deleted, "deleted all promotion codes");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Create a promotion code, or replace the terms of an existing one.
    async fn upsert_promotion_code(
        &self,
        upsert: PromotionCodeUpsert,
    ) -> Result<Upserted<PromotionCode>, PromotionsServiceError>;

    /// Retrieve a single promotion code.
    async fn get_promotion_code(&self, code: &str) -> Result<PromotionCode, PromotionsServiceError>;

    /// Retrieve every promotion code, ordered by code.
    async fn list_promotion_codes(&self) -> Result<Vec<PromotionCode>, PromotionsServiceError>;

    /// Delete a single promotion code.
    async fn delete_promotion_code(&self, code: &str) -> Result<(), PromotionsServiceError>;

    /// Delete every promotion code, returning how many were removed.
    async fn delete_promotion_codes(&self) -> Result<u64, PromotionsServiceError>;
}
