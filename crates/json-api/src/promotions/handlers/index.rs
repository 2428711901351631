//! Promotion Code Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, get::PromotionCodeResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionCodesResponse {
    /// Ordered by code
    pub promotion_codes: Vec<PromotionCodeResponse>,
}

/// Promotion Code Index Handler
#[endpoint(tags("promotion-codes"), summary = "List Promotion Codes")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<PromotionCodesResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let promotions = app
        .promotions
        .list_promotion_codes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionCodesResponse {
        promotion_codes: promotions.into_iter().map(Into::into).collect(),
    }))
}
