//! Delete Campaign Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{campaigns::errors::into_status_error, extensions::*};

/// Delete Campaign Handler
#[endpoint(
    tags("campaigns"),
    summary = "Delete Campaign",
    responses(
        (status_code = StatusCode::OK, description = "Campaign deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Campaign not found"),
    ),
)]
pub(crate) async fn handler(
    name: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let app = depot.app_or_500()?;

    app.campaigns
        .delete_campaign(&name.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::TestClient;
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::campaigns::{CampaignsServiceError, MockCampaignsService},
    };

    use crate::test_helpers::{app_context, make_service};

    use super::*;

    fn service(campaigns: MockCampaignsService) -> Service {
        make_service(
            AppContext {
                campaigns: Arc::new(campaigns),
                ..app_context()
            },
            Router::with_path("campaigns/{name}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_campaign_success() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_delete_campaign()
            .once()
            .withf(|name| name == "spring")
            .return_once(|_| Ok(()));

        let res = TestClient::delete("http://example.com/campaigns/spring")
            .send(&service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_campaign_returns_404() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_delete_campaign()
            .once()
            .return_once(|name| Err(CampaignsServiceError::CampaignNotFound(name.to_string())));

        let res = TestClient::delete("http://example.com/campaigns/winter")
            .send(&service(campaigns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
