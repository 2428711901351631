//! Create Single-Item Order Handler

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

/// Create Order Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderItemRequest {
    pub product: i64,

    /// Units to order; must be at least 1
    pub quantity: u64,
}

/// Create Single-Item Order Handler
///
/// Orders one product directly without going through the cart. The cart is
/// left untouched.
#[endpoint(
    tags("orders"),
    summary = "Order a Single Product",
    responses(
        (status_code = StatusCode::CREATED, description = "Order created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Quantity is zero"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<CreateOrderItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let app = depot.app_or_500()?;
    let request = json.into_inner();

    let order = app
        .orders
        .create_order_item(
            customer.into_inner().into(),
            request.product.into(),
            request.quantity,
        )
        .await
        .map_err(into_status_error)?;

    res.created_at(format!(
        "/customers/{}/orders/{}",
        order.customer_id, order.id
    ))?;

    Ok(Json(order.into()))
}
