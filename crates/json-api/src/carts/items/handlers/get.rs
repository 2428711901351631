//! Get Cart Item Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::carts::models::CartItem;

use crate::{carts::errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub product_id: i64,

    pub quantity: u64,

    /// When the product was first added
    pub created_at: String,

    pub updated_at: String,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        CartItemResponse {
            product_id: item.product_id.into(),
            quantity: item.quantity,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}

/// Get Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Get Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Cart item found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product is not in the cart"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    product: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CartItemResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let item = app
        .carts
        .get_item(customer.into_inner().into(), product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(item.into()))
}
