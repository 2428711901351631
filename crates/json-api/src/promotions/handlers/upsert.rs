//! Upsert Promotion Code Handler

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};

use storefront_app::domain::{discounts::DiscountTerms, promotions::models::PromotionCodeUpsert};

use crate::{
    discounts::DiscountTermsPayload,
    extensions::*,
    promotions::{errors::into_status_error, get::PromotionCodeResponse},
};

/// Upsert Promotion Code Handler
///
/// Creates the code, or replaces the terms of an existing one.
#[endpoint(
    tags("promotion-codes"),
    summary = "Create or Replace Promotion Code",
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion code created"),
        (status_code = StatusCode::OK, description = "Promotion code replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    json: JsonBody<DiscountTermsPayload>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionCodeResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let terms = DiscountTerms::try_from(json.into_inner()).or_400()?;

    let upserted = app
        .promotions
        .upsert_promotion_code(PromotionCodeUpsert {
            code: code.into_inner(),
            terms,
        })
        .await
        .map_err(into_status_error)?;

    if upserted.is_created() {
        res.created_at(format!("/promotion-codes/{}", upserted.as_inner().code))?;
    }

    Ok(Json(upserted.into_inner().into()))
}
