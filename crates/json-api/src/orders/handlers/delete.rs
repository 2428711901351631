//! Delete Order Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, orders::errors::into_status_error};

/// Delete Order Handler
///
/// Reserved stock is not returned to the catalog.
#[endpoint(
    tags("orders"),
    summary = "Delete Order",
    responses(
        (status_code = StatusCode::OK, description = "Order deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let app = depot.app_or_500()?;

    app.orders
        .delete_order(customer.into_inner().into(), order.into_inner().into())
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
            Router::with_path("customers/{customer}/orders/{order}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_delete_order_success() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .withf(|customer, order| customer.into_i64() == 1 && order.into_i64() == 8)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete("http://example.com/customers/1/orders/8")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_missing_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_delete_order()
            .once()
            .return_once(|_, order| Err(OrdersServiceError::OrderNotFound(order)));

        let res = TestClient::delete("http://example.com/customers/1/orders/8")
            .send(&service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
