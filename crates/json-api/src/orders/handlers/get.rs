//! Get Order Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::orders::models::{Order, OrderItem};

use crate::{extensions::*, orders::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub product_id: i64,

    pub quantity: u64,

    /// Price per unit when the order was assembled
    pub unit_price: u64,

    pub subtotal: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        OrderItemResponse {
            product_id: item.product_id.into(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub id: i64,

    pub customer_id: i64,

    pub items: Vec<OrderItemResponse>,

    /// Sum of every line before discounts
    pub total_amount: u64,

    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.into(),
            customer_id: order.customer_id.into(),
            total_amount: order.total_amount(),
            items: order.items.into_iter().map(Into::into).collect(),
            created_at: order.created_at.to_string(),
        }
    }
}

/// Get Order Handler
#[endpoint(
    tags("orders"),
    summary = "Get Order",
    responses(
        (status_code = StatusCode::OK, description = "Order found"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let order = app
        .orders
        .get_order(customer.into_inner().into(), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(order.into()))
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

    use crate::test_helpers::{app_context, make_order, make_service};

    use super::*;

    fn service(orders: MockOrdersService) -> Service {
        make_service(
            AppContext {
                orders: Arc::new(orders),
                ..app_context()
            },
            Router::with_path("customers/{customer}/orders/{order}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_order_returns_lines_and_total() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .withf(|customer, order| customer.into_i64() == 1 && order.into_i64() == 8)
            .return_once(|_, _| Ok(make_order(1, 8)));

        let mut res = TestClient::get("http://example.com/customers/1/orders/8")
            .send(&service(orders))
            .await;

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 8);
        assert_eq!(body.total_amount, 20_00);
        assert_eq!(body.items.first().map(|item| item.subtotal), Some(20_00));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_other_customers_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_get_order()
            .once()
            .return_once(|_, order| Err(OrdersServiceError::OrderNotFound(order)));

        let res = TestClient::get("http://example.com/customers/2/orders/8")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
