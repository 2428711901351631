//! Get Promotion Code Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::promotions::models::PromotionCode;

use crate::{
    discounts::DiscountTermsPayload, extensions::*, promotions::errors::into_status_error,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionCodeResponse {
    pub code: String,

    #[serde(flatten)]
    pub terms: DiscountTermsPayload,

    pub created_at: String,

    pub updated_at: String,
}

impl From<PromotionCode> for PromotionCodeResponse {
    fn from(promotion: PromotionCode) -> Self {
        PromotionCodeResponse {
            code: promotion.code,
            terms: promotion.terms.into(),
            created_at: promotion.created_at.to_string(),
            updated_at: promotion.updated_at.to_string(),
        }
    }
}

/// Get Promotion Code Handler
#[endpoint(
    tags("promotion-codes"),
    summary = "Get Promotion Code",
    responses(
        (status_code = StatusCode::OK, description = "Promotion code found"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion code not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<PromotionCodeResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let promotion = app
        .promotions
        .get_promotion_code(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(promotion.into()))
}
