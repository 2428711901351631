//! Campaign stage: category-scoped discounts applied per cart line.

use std::collections::BTreeSet;

use jiff::Timestamp;
use tracing::debug;

use crate::domain::{campaigns::models::Campaign, products::models::ProductId};

/// How campaign discounts accumulate across cart lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CampaignAccumulation {
    /// Each campaign is computed against the line's own subtotal.
    #[default]
    Independent,

    /// Each campaign is computed against the running order total, which
    /// already reflects discounts taken on earlier lines.
    Compounding,
}

/// A cart line with its catalog price resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub category: String,
    pub unit_price: u64,
    pub quantity: u64,
}

impl PricedLine {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.unit_price.saturating_mul(self.quantity)
    }
}

/// One campaign's contribution to one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedCampaign {
    pub campaign: String,
    pub product_id: ProductId,
    pub discount: u64,
}

/// Result of running the campaign stage over a cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignStage {
    /// Sum of `price × quantity` before any discount.
    pub subtotal: u64,
    pub discount: u64,
    /// `subtotal - discount`.
    pub total: u64,
    pub applied: Vec<AppliedCampaign>,
}

impl CampaignStage {
    /// Distinct campaigns that took money off at least one line.
    #[must_use]
    pub fn campaign_names(&self) -> BTreeSet<&str> {
        self.applied
            .iter()
            .map(|applied| applied.campaign.as_str())
            .collect()
    }
}

/// Apply every eligible campaign whose categories include a line's category.
///
/// Matching campaigns stack. A line never receives more discount than the
/// base it was computed against, and totals never drop below zero.
#[must_use]
pub fn apply_campaigns(
    lines: &[PricedLine],
    campaigns: &[Campaign],
    accumulation: CampaignAccumulation,
    now: Timestamp,
) -> CampaignStage {
    let eligible: Vec<&Campaign> = campaigns
        .iter()
        .filter(|campaign| match campaign.terms.check_eligibility(now) {
            Ok(()) => true,
            Err(reason) => {
                debug!(campaign = %campaign.name, %reason, "skipping campaign");

                false
            }
        })
        .collect();

    let mut stage = CampaignStage::default();
    let mut running = 0_u64;

    for line in lines {
        let line_subtotal = line.subtotal();

        stage.subtotal = stage.subtotal.saturating_add(line_subtotal);

        let base = match accumulation {
            CampaignAccumulation::Independent => line_subtotal,
            CampaignAccumulation::Compounding => {
                running = running.saturating_add(line_subtotal);
                running
            }
        };

        let mut line_discount = 0_u64;

        if base > 0 {
            for campaign in eligible
                .iter()
                .filter(|campaign| campaign.categories.contains(&line.category))
            {
                let discount = campaign
                    .terms
                    .discount
                    .discount_for(base)
                    .min(base - line_discount);

                if discount == 0 {
                    continue;
                }

                line_discount += discount;

                stage.applied.push(AppliedCampaign {
                    campaign: campaign.name.clone(),
                    product_id: line.product_id,
                    discount,
                });
            }
        }

        match accumulation {
            CampaignAccumulation::Independent => {
                stage.discount = stage.discount.saturating_add(line_discount);
            }
            CampaignAccumulation::Compounding => running -= line_discount,
        }
    }

    match accumulation {
        CampaignAccumulation::Independent => {
            stage.total = stage.subtotal - stage.discount;
        }
        CampaignAccumulation::Compounding => {
            stage.total = running;
            stage.discount = stage.subtotal - running;
        }
    }

    stage
}
