//! Discount Engine
//!
//! Pure pricing rules: campaign discounts per cart line and a single
//! promotion code on the aggregate. The stages are pure functions; callers
//! load the rules and pass them in.

pub mod campaigns;
pub mod models;
pub mod promotions;
pub(crate) mod rows;

pub use campaigns::{
    AppliedCampaign, CampaignAccumulation, CampaignStage, PricedLine, apply_campaigns,
};
pub use models::{DiscountStatus, DiscountTerms, Ineligible, SimpleDiscount};
pub use promotions::{NotApplicableReason, PromotionOutcome, apply_promotion};
