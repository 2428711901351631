//! Delete Campaigns Handler

use salvo::prelude::*;

use crate::{campaigns::errors::into_status_error, extensions::*, responses::DeletedResponse};

/// Delete Campaigns Handler
#[endpoint(tags("campaigns"), summary = "Delete All Campaigns")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeletedResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let deleted = app
        .campaigns
        .delete_campaigns()
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeletedResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{context::AppContext, domain::campaigns::MockCampaignsService};

    use crate::test_helpers::{app_context, make_service};

    use super::*;

    #[tokio::test]
    async fn test_delete_all_reports_count() -> TestResult {
        let mut campaigns = MockCampaignsService::new();

        campaigns
            .expect_delete_campaigns()
            .once()
            .return_once(|| Ok(2));

        let service = make_service(
            AppContext {
                campaigns: Arc::new(campaigns),
                ..app_context()
            },
            Router::with_path("campaigns").delete(handler),
        );

        let mut res = TestClient::delete("http://example.com/campaigns")
            .send(&service)
            .await;

        let body: DeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.deleted, 2);

        Ok(())
    }
}
