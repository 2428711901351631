//! Checkout Quote Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{
    discounts::{AppliedCampaign, PricedLine, PromotionOutcome},
    payments::models::CheckoutQuote,
};

use crate::{extensions::*, payments::errors::into_status_error};

/// Checkout Quote Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteRequest {
    /// Promotion code to try against the cart total
    #[serde(default)]
    pub promotion_code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteLineResponse {
    pub product_id: i64,
    pub category: String,
    pub unit_price: u64,
    pub quantity: u64,
    pub subtotal: u64,
}

impl From<PricedLine> for QuoteLineResponse {
    fn from(line: PricedLine) -> Self {
        QuoteLineResponse {
            product_id: line.product_id.into(),
            subtotal: line.subtotal(),
            category: line.category,
            unit_price: line.unit_price,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AppliedCampaignResponse {
    pub campaign: String,
    pub product_id: i64,
    pub discount: u64,
}

impl From<AppliedCampaign> for AppliedCampaignResponse {
    fn from(applied: AppliedCampaign) -> Self {
        AppliedCampaignResponse {
            campaign: applied.campaign,
            product_id: applied.product_id.into(),
            discount: applied.discount,
        }
    }
}

/// Result of trying a promotion code
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub(crate) enum PromotionOutcomeResponse {
    Applied {
        code: String,
        discount: u64,
        final_amount: u64,
    },
    NotApplicable {
        code: String,
        reason: String,
    },
}

impl From<PromotionOutcome> for PromotionOutcomeResponse {
    fn from(outcome: PromotionOutcome) -> Self {
        match outcome {
            PromotionOutcome::Applied {
                code,
                discount,
                final_amount,
            } => Self::Applied {
                code,
                discount,
                final_amount,
            },
            PromotionOutcome::NotApplicable { code, reason } => Self::NotApplicable {
                code,
                reason: reason.to_str().to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub lines: Vec<QuoteLineResponse>,

    /// Sum of every line before discounts
    pub subtotal: u64,

    /// Taken off by category campaigns
    pub campaign_discount: u64,

    pub campaigns: Vec<AppliedCampaignResponse>,

    pub promotion: Option<PromotionOutcomeResponse>,

    /// Amount that would be charged
    pub total: u64,
}

impl From<CheckoutQuote> for QuoteResponse {
    fn from(quote: CheckoutQuote) -> Self {
        QuoteResponse {
            subtotal: quote.subtotal(),
            campaign_discount: quote.campaigns.discount,
            lines: quote.lines.into_iter().map(Into::into).collect(),
            campaigns: quote
                .campaigns
                .applied
                .into_iter()
                .map(Into::into)
                .collect(),
            promotion: quote.promotion.map(Into::into),
            total: quote.total,
        }
    }
}

/// Checkout Quote Handler
///
/// Prices the current cart with campaigns and an optional promotion code.
/// Nothing is charged, reserved or redeemed.
#[endpoint(
    tags("checkout"),
    summary = "Quote Checkout",
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<QuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let quote = app
        .payments
        .quote(customer.into_inner().into(), json.into_inner().promotion_code)
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
