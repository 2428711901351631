//! Get Return Request Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::returns::models::{ReturnRequest, ReturnStatus};

use crate::{extensions::*, returns::errors::into_status_error};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReturnStatusPayload {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl From<ReturnStatusPayload> for ReturnStatus {
    fn from(status: ReturnStatusPayload) -> Self {
        match status {
            ReturnStatusPayload::Pending => ReturnStatus::Pending,
            ReturnStatusPayload::Approved => ReturnStatus::Approved,
            ReturnStatusPayload::Rejected => ReturnStatus::Rejected,
            ReturnStatusPayload::Completed => ReturnStatus::Completed,
        }
    }
}

impl From<ReturnStatus> for ReturnStatusPayload {
    fn from(status: ReturnStatus) -> Self {
        match status {
            ReturnStatus::Pending => Self::Pending,
            ReturnStatus::Approved => Self::Approved,
            ReturnStatus::Rejected => Self::Rejected,
            ReturnStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnResponse {
    pub customer_id: i64,

    pub order_id: i64,

    pub reason: String,

    pub description: Option<String>,

    pub status: ReturnStatusPayload,

    pub requested_at: String,

    /// Set once the refund step has run
    pub completed_at: Option<String>,
}

impl From<ReturnRequest> for ReturnResponse {
    fn from(request: ReturnRequest) -> Self {
        ReturnResponse {
            customer_id: request.customer_id.into(),
            order_id: request.order_id.into(),
            reason: request.reason,
            description: request.description,
            status: request.status.into(),
            requested_at: request.requested_at.to_string(),
            completed_at: request.completed_at.as_ref().map(ToString::to_string),
        }
    }
}

/// Get Return Request Handler
#[endpoint(
    tags("returns"),
    summary = "Get Return Request",
    responses(
        (status_code = StatusCode::OK, description = "Return request found"),
        (status_code = StatusCode::NOT_FOUND, description = "No return request for the order"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ReturnResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let request = app
        .returns
        .get_return(customer.into_inner().into(), order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(request.into()))
}
