//! Delete Promotion Codes Handler

use salvo::prelude::*;

use crate::{extensions::*, promotions::errors::into_status_error, responses::DeletedResponse};

/// Delete Promotion Codes Handler
#[endpoint(tags("promotion-codes"), summary = "Delete All Promotion Codes")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<DeletedResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let deleted = app
        .promotions
        .delete_promotion_codes()
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeletedResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{context::AppContext, domain::promotions::MockPromotionsService};

    use crate::test_helpers::{app_context, make_service};

    use super::*;

    #[tokio::test]
    async fn test_delete_all_reports_count() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_delete_promotion_codes()
            .once()
            .return_once(|| Ok(2));

        let service = make_service(
            AppContext {
                promotions: Arc::new(promotions),
                ..app_context()
            },
            Router::with_path("promotion-codes").delete(handler),
        );

        let mut res = TestClient::delete("http://example.com/promotion-codes")
            .send(&service)
            .await;

        let body: DeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.deleted, 2);

        Ok(())
    }
}
