//! Campaign Models

use std::collections::BTreeSet;

use jiff::Timestamp;

use crate::domain::discounts::models::DiscountTerms;

/// Campaign Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub name: String,
    /// Product categories the campaign discounts.
    pub categories: BTreeSet<String>,
    pub terms: DiscountTerms,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Campaign Upsert Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignUpsert {
    pub name: String,
    pub categories: BTreeSet<String>,
    pub terms: DiscountTerms,
}
