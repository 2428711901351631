//! Return Request Index Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{PathParam, QueryParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::returns::models::ReturnStatus;

use crate::{
    extensions::*,
    returns::{errors::into_status_error, get::ReturnResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnsResponse {
    pub returns: Vec<ReturnResponse>,
}

/// Return Request Index Handler
///
/// Lists the customer's return requests, optionally only those in one status.
#[endpoint(
    tags("returns"),
    summary = "List Return Requests",
    responses(
        (status_code = StatusCode::OK, description = "Return requests"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::NOT_FOUND, description = "No matching return requests"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<ReturnsResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let status = status
        .into_inner()
        .map(|value| value.parse::<ReturnStatus>())
        .transpose()
        .or_400()?;

    let returns = app
        .returns
        .list_returns(customer.into_inner().into(), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReturnsResponse {
        returns: returns.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::returns::{MockReturnsService, ReturnsServiceError},
    };

    use crate::test_helpers::{app_context, make_return, make_service};

    use super::*;

    fn service(returns: MockReturnsService) -> Service {
        make_service(
            AppContext {
                returns: Arc::new(returns),
                ..app_context()
            },
            Router::with_path("customers/{customer}/returns").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_without_filter() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_returns()
            .once()
            .withf(|customer, status| customer.into_i64() == 1 && status.is_none())
            .return_once(|_, _| {
                Ok(vec![
                    make_return(1, 8, ReturnStatus::Pending),
                    make_return(1, 9, ReturnStatus::Approved),
                ])
            });

        let mut res = TestClient::get("http://example.com/customers/1/returns")
            .send(&service(returns))
            .await;

        let body: ReturnsResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.returns.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_list_forwards_status_filter() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_returns()
            .once()
            .withf(|_, status| *status == Some(ReturnStatus::Approved))
            .return_once(|_, _| Ok(vec![make_return(1, 9, ReturnStatus::Approved)]));

        let res = TestClient::get("http://example.com/customers/1/returns?status=approved")
            .send(&service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_unknown_status_returns_400() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns.expect_list_returns().never();

        let res = TestClient::get("http://example.com/customers/1/returns?status=lost")
            .send(&service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_list_nothing_matching_returns_404() -> TestResult {
        let mut returns = MockReturnsService::new();

        returns
            .expect_list_returns()
            .once()
            .return_once(|_, _| Err(ReturnsServiceError::NoReturns));

        let res = TestClient::get("http://example.com/customers/1/returns?status=rejected")
            .send(&service(returns))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
