//! Update Order Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
};

/// Update Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderItemRequest {
    /// New quantity; zero keeps the line with nothing reserved
    pub quantity: u64,
}

/// Update Order Item Handler
///
/// Changes the quantity of one order line. The difference is taken from, or
/// returned to, the product's stock.
#[endpoint(
    tags("orders"),
    summary = "Change Order Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Order updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or order line not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    product: PathParam<i64>,
    json: JsonBody<UpdateOrderItemRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let order = app
        .orders
        .update_quantity(
            customer.into_inner().into(),
            order.into_inner().into(),
            product.into_inner().into(),
            json.into_inner().quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
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
            Router::with_path("customers/{customer}/orders/{order}/items/{product}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_update_quantity_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_quantity()
            .once()
            .withf(|customer, order, product, quantity| {
                customer.into_i64() == 1
                    && order.into_i64() == 8
                    && product.into_i64() == 1
                    && *quantity == 4
            })
            .return_once(|_, _, _, _| Ok(make_order(1, 8)));

        let mut res = TestClient::put("http://example.com/customers/1/orders/8/items/1")
            .json(&json!({ "quantity": 4 }))
            .send(&service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 8);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_beyond_stock_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_quantity()
            .once()
            .return_once(|_, _, product, _| {
                Err(OrdersServiceError::InsufficientStock {
                    product,
                    requested: 2,
                    available: 0,
                })
            });

        let res = TestClient::put("http://example.com/customers/1/orders/8/items/1")
            .json(&json!({ "quantity": 4 }))
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_line_not_in_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_update_quantity()
            .once()
            .return_once(|_, _, product, _| Err(OrdersServiceError::ItemNotFound(product)));

        let res = TestClient::put("http://example.com/customers/1/orders/8/items/5")
            .json(&json!({ "quantity": 1 }))
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
