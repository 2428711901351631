//! Delete Orders Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, orders::errors::into_status_error, responses::DeletedResponse};

/// Delete Orders Handler
///
/// Removes every open order of the customer.
#[endpoint(
    tags("orders"),
    summary = "Delete Open Orders",
    responses(
        (status_code = StatusCode::OK, description = "Orders deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer has no open orders"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<DeletedResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let deleted = app
        .orders
        .delete_orders(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(DeletedResponse { deleted }))
}
