//! Create Return Request Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::returns::models::NewReturnRequest;

use crate::{
    extensions::*,
    returns::{errors::into_status_error, get::ReturnResponse},
};

/// Create Return Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReturnRequest {
    /// Open or completed order being returned
    pub order_id: i64,

    pub reason: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateReturnRequest> for NewReturnRequest {
    fn from(request: CreateReturnRequest) -> Self {
        NewReturnRequest {
            order_id: request.order_id.into(),
            reason: request.reason,
            description: request.description,
        }
    }
}

/// Create Return Request Handler
///
/// Opens a pending return request. Each order can be returned once.
#[endpoint(
    tags("returns"),
    summary = "Request Return",
    responses(
        (status_code = StatusCode::CREATED, description = "Return request created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Missing reason"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Return already requested"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<CreateReturnRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReturnResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let request = app
        .returns
        .create_return(customer.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.created_at(format!(
        "/customers/{}/returns/{}",
        request.customer_id, request.order_id
    ))?;

    Ok(Json(request.into()))
}
