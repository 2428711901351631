//! Get Cart Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::Cart;

use crate::{
    carts::{errors::into_status_error, items::get::CartItemResponse},
    extensions::*,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub customer_id: i64,

    /// Lines in the order their product was first added
    pub items: Vec<CartItemResponse>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        CartResponse {
            customer_id: cart.customer_id.into(),
            items: cart.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Get Cart Handler
///
/// Returns every line of the customer's cart. An empty cart is not an error.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let cart = app
        .carts
        .get_cart(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
