//! Promotion Code Models

use jiff::Timestamp;

use crate::domain::discounts::models::DiscountTerms;

/// Promotion Code Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCode {
    pub code: String,
    pub terms: DiscountTerms,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Promotion Code Upsert Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionCodeUpsert {
    pub code: String,
    pub terms: DiscountTerms,
}
