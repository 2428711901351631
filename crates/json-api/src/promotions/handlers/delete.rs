//! Delete Promotion Code Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{extensions::*, promotions::errors::into_status_error};

/// Delete Promotion Code Handler
#[endpoint(
    tags("promotion-codes"),
    summary = "Delete Promotion Code",
    responses(
        (status_code = StatusCode::OK, description = "Promotion code deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion code not found"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let app = depot.app_or_500()?;

    app.promotions
        .delete_promotion_code(&code.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(StatusCode::OK)
}
