//! Upsert Campaign Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::{campaigns::models::CampaignUpsert, discounts::DiscountTerms};

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse},
    discounts::DiscountTermsPayload,
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignRequest {
    /// Product categories the campaign discounts
    pub categories: Vec<String>,

    #[serde(flatten)]
    pub terms: DiscountTermsPayload,
}

/// Upsert Campaign Handler
///
/// Creates the campaign, or replaces the categories and terms of an existing one.
#[endpoint(
    tags("campaigns"),
    summary = "Create or Replace Campaign",
    responses(
        (status_code = StatusCode::CREATED, description = "Campaign created"),
        (status_code = StatusCode::OK, description = "Campaign replaced"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    json: JsonBody<CampaignRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CampaignResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let request = json.into_inner();
    let terms = DiscountTerms::try_from(request.terms).or_400()?;

    let upserted = app
        .campaigns
        .upsert_campaign(CampaignUpsert {
            name: name.into_inner(),
            categories: request.categories.into_iter().collect(),
            terms,
        })
        .await
        .map_err(into_status_error)?;

    if upserted.is_created() {
        res.created_at(format!("/campaigns/{}", upserted.as_inner().name))?;
    }

    Ok(Json(upserted.into_inner().into()))
}
