//! Add Cart Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::{errors::into_status_error, items::get::CartItemResponse},
    extensions::*,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    pub product_id: i64,

    /// Replaces the quantity when the product is already in the cart
    pub quantity: u64,
}

/// Add Cart Item Handler
///
/// Adds a product to the cart, or sets its quantity when it is already there.
/// Stock is checked but not reserved.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart item stored"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let request = json.into_inner();

    let item = app
        .carts
        .upsert_item(
            customer.into_inner().into(),
            request.product_id.into(),
            request.quantity,
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::carts::{CartsServiceError, MockCartsService},
    };

    use crate::test_helpers::{app_context, make_service};

    use super::{super::tests::make_item, *};

    fn service(carts: MockCartsService) -> Service {
        make_service(
            AppContext {
                carts: Arc::new(carts),
                ..app_context()
            },
            Router::with_path("customers/{customer}/cart/items").post(handler),
        )
    }

    #[tokio::test]
    async fn test_add_item_success() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_upsert_item()
            .once()
            .withf(|customer, product, quantity| {
                customer.into_i64() == 1 && product.into_i64() == 4 && *quantity == 2
            })
            .return_once(|_, product, quantity| Ok(make_item(product.into_i64(), quantity)));

        let mut res = TestClient::post("http://example.com/customers/1/cart/items")
            .json(&json!({ "product_id": 4, "quantity": 2 }))
            .send(&service(carts))
            .await;

        let body: CartItemResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.product_id, 4);
        assert_eq!(body.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_item_beyond_stock_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_upsert_item()
            .once()
            .return_once(|_, product, requested| {
                Err(CartsServiceError::InsufficientStock {
                    product,
                    requested,
                    available: 1,
                })
            });

        let res = TestClient::post("http://example.com/customers/1/cart/items")
            .json(&json!({ "product_id": 4, "quantity": 2 }))
            .send(&service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_add_unknown_product_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_upsert_item()
            .once()
            .return_once(|_, product, _| Err(CartsServiceError::ProductNotFound(product)));

        let res = TestClient::post("http://example.com/customers/1/cart/items")
            .json(&json!({ "product_id": 99, "quantity": 1 }))
            .send(&service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
