//! Complete Order Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::CompletedOrder;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderItemResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompletedOrderResponse {
    /// Id the order had while it was open
    pub order_id: i64,

    pub customer_id: i64,

    pub items: Vec<OrderItemResponse>,

    pub total_amount: u64,

    pub ordered_at: String,

    pub completed_at: String,
}

impl From<CompletedOrder> for CompletedOrderResponse {
    fn from(order: CompletedOrder) -> Self {
        CompletedOrderResponse {
            order_id: order.order_id.into(),
            customer_id: order.customer_id.into(),
            total_amount: order.total_amount(),
            items: order.items.into_iter().map(Into::into).collect(),
            ordered_at: order.ordered_at.to_string(),
            completed_at: order.completed_at.to_string(),
        }
    }
}

/// Complete Order Handler
///
/// Archives an open order. The order disappears from the open set in the
/// same step.
#[endpoint(
    tags("orders"),
    summary = "Complete Order",
    responses(
        (status_code = StatusCode::OK, description = "Order archived"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CompletedOrderResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let completed = app
        .orders
        .complete_order(customer.into_inner().into(), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(completed.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::orders::{MockOrdersService, OrdersServiceError},
    };

    use crate::test_helpers::{app_context, make_order, make_service};

    use super::*;

    fn service(orders: MockOrdersService) -> Service {
        make_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            Router::with_path("customers/{customer}/orders/{order}/complete").post(handler),
        )
    }

    #[tokio::test]
    async fn test_complete_order_returns_archive() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_complete_order()
            .once()
            .withf(|customer, order| customer.into_i64() == 1 && order.into_i64() == 8)
            .return_once(|_, _| {
                let order = make_order(1, 8);

                Ok(CompletedOrder {
                    order_id: order.id,
                    customer_id: order.customer_id,
                    items: order.items,
                    ordered_at: order.created_at,
                    completed_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/customers/1/orders/8/complete")
            .send(&service(orders))
            .await;

        let body: CompletedOrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.order_id, 8);
        assert_eq!(body.total_amount, 20_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_complete_integrity_violation_returns_500() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_complete_order()
            .once()
            .return_once(|_, order| Err(OrdersServiceError::IntegrityViolation(order)));

        let res = TestClient::post("http://example.com/customers/1/orders/8/complete")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
