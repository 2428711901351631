//! Assemble Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, get::OrderResponse},
};

/// Assemble Order Handler
///
/// Turns the customer's cart into an order. Stock for every line is reserved
/// and the cart is emptied; if any line cannot be reserved nothing changes.
#[endpoint(
    tags("orders"),
    summary = "Assemble Order from Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let order = app
        .orders
        .assemble_order(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.created_at(format!(
        "/customers/{}/orders/{}",
        order.customer_id, order.id
    ))?;

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::orders::{AssemblyError, MockOrdersService},
    };

    use crate::test_helpers::{app_context, make_order, make_service};

    use super::*;

    fn service(orders: MockOrdersService) -> Service {
        make_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            Router::with_path("customers/{customer}/orders").post(handler),
        )
    }

    #[tokio::test]
    async fn test_assemble_order_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_assemble_order()
            .once()
            .withf(|customer| customer.into_i64() == 1)
            .return_once(|_| Ok(make_order(1, 12)));

        let mut res = TestClient::post("http://example.com/customers/1/orders")
            .send(&service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some("/customers/1/orders/12"));
        assert_eq!(body.id, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_assemble_empty_cart_returns_422() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_assemble_order()
            .once()
            .return_once(|_| Err(AssemblyError::EmptyCart.into()));

        let res = TestClient::post("http://example.com/customers/1/orders")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_assemble_insufficient_stock_returns_409() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_assemble_order().once().return_once(|_| {
            Err(AssemblyError::InsufficientStock {
                product: 4.into(),
                requested: 3,
                available: 1,
            }
            .into())
        });

        let res = TestClient::post("http://example.com/customers/1/orders")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
