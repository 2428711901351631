//! Get Campaign Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::campaigns::models::Campaign;

use crate::{campaigns::errors::into_status_error, discounts::DiscountTermsPayload, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CampaignResponse {
    pub name: String,

    /// Sorted product categories
    pub categories: Vec<String>,

    #[serde(flatten)]
    pub terms: DiscountTermsPayload,

    pub created_at: String,

    pub updated_at: String,
}

impl From<Campaign> for CampaignResponse {
    fn from(campaign: Campaign) -> Self {
        CampaignResponse {
            name: campaign.name,
            categories: campaign.categories.into_iter().collect(),
            terms: campaign.terms.into(),
            created_at: campaign.created_at.to_string(),
            updated_at: campaign.updated_at.to_string(),
        }
    }
}

/// Get Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Get Campaign",
    responses(
        (status_code = StatusCode::OK, description = "Campaign found"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<CampaignResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let campaign = app
        .campaigns
        .get_campaign(&name.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(campaign.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::campaigns::{CampaignsServiceError, MockCampaignsService},
    };

    use crate::test_helpers::{app_context, make_service};

    use super::{super::tests::make_campaign, *};

    fn service(campaigns: MockCampaignsService) -> Service {
        make_service(
            AppContext {
                campaigns: Arc::new(campaigns),
                ..app_context()
            },
            Router::with_path("campaigns/{name}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_campaign_returns_sorted_categories() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_get_campaign()
            .once()
            .withf(|name| name == "spring")
            .return_once(|name| Ok(make_campaign(name, &["toys", "books"])));

        let mut res = TestClient::get("http://example.com/campaigns/spring")
            .send(&service(campaigns))
            .await;

        let body: CampaignResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.name, "spring");
        assert_eq!(body.categories, vec!["books", "toys"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_campaign_returns_404() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_get_campaign()
            .once()
            .return_once(|name| Err(CampaignsServiceError::CampaignNotFound(name.to_string())));

        let res = TestClient::get("http://example.com/campaigns/winter")
            .send(&service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
