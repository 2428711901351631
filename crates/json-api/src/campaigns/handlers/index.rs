//! Campaign Index Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    campaigns::{errors::into_status_error, get::CampaignResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignsResponse {
    pub campaigns: Vec<CampaignResponse>,
}

/// Campaign Index Handler
#[endpoint(tags("campaigns"), summary = "List Campaigns")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CampaignsResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let campaigns = app
        .campaigns
        .list_campaigns()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CampaignsResponse {
        campaigns: campaigns.into_iter().map(Into::into).collect(),
    }))
}
