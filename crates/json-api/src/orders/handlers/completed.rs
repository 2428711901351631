//! Completed Order Index Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{complete::CompletedOrderResponse, errors::into_status_error},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompletedOrdersResponse {
    pub orders: Vec<CompletedOrderResponse>,
}

/// Completed Order Index Handler
#[endpoint(
    tags("orders"),
    summary = "List Completed Orders",
    responses(
        (status_code = StatusCode::OK, description = "Archived orders"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CompletedOrdersResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let orders = app
        .orders
        .list_completed_orders(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CompletedOrdersResponse {
        orders: orders.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::orders::{MockOrdersService, OrdersServiceError},
    };

    use crate::test_helpers::{app_context, make_service};

    use super::*;

    fn service(orders: MockOrdersService) -> Service {
        make_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            Router::with_path("customers/{customer}/completed-orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_no_completed_orders_is_an_empty_list() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_completed_orders()
            .once()
            .withf(|customer| customer.into_i64() == 1)
            .return_once(|_| Ok(Vec::new()));

        let mut res = TestClient::get("http://example.com/customers/1/completed-orders")
            .send(&service(orders))
            .await;

        let body: CompletedOrdersResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.orders.is_empty(), "expected no archived orders");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_customer_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_completed_orders()
            .once()
            .return_once(|customer| Err(OrdersServiceError::CustomerNotFound(customer)));

        let res = TestClient::get("http://example.com/customers/1/completed-orders")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
