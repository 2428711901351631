//! Set Return Status Handler

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
    returns::{
        errors::into_status_error,
        get::{ReturnResponse, ReturnStatusPayload},
    },
};

/// Set Return Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetReturnStatusRequest {
    pub status: ReturnStatusPayload,
}

/// Set Return Status Handler
///
/// Approves or rejects a pending request. Completion goes through the
/// complete endpoint so that the refund is issued.
#[endpoint(
    tags("returns"),
    summary = "Set Return Status",
    responses(
        (status_code = StatusCode::OK, description = "Status changed"),
        (status_code = StatusCode::NOT_FOUND, description = "No return request for the order"),
        (status_code = StatusCode::PRECONDITION_FAILED, description = "Transition not allowed"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    json: JsonBody<SetReturnStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<ReturnResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let request = app
        .returns
        .set_status(
            customer.into_inner().into(),
            order.into_inner().into(),
            json.into_inner().status.into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(request.into()))
}
