//! Complete Return Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::returns::models::{RefundInput, RefundOutcome, ReturnCompletion};

use crate::{
    extensions::*,
    payments::create::PaymentMethodPayload,
    returns::{errors::into_status_error, get::ReturnResponse},
};

/// Complete Return Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CompleteReturnRequest {
    /// Minor currency units to refund
    pub amount: i64,

    pub currency: String,

    /// At least eight characters
    pub description: String,

    pub method: PaymentMethodPayload,
}

impl From<CompleteReturnRequest> for RefundInput {
    fn from(request: CompleteReturnRequest) -> Self {
        RefundInput {
            amount: request.amount,
            currency: request.currency,
            description: request.description,
            method: request.method.into(),
        }
    }
}

/// What happened to the refund of a completed return
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub(crate) enum RefundOutcomeResponse {
    Refunded {
        refund_id: String,
        method: String,
        amount: u64,
        currency: String,
        description: String,
    },
    Failed {
        reason: String,
    },
}

impl From<RefundOutcome> for RefundOutcomeResponse {
    fn from(outcome: RefundOutcome) -> Self {
        match outcome {
            RefundOutcome::Refunded { confirmation } => Self::Refunded {
                refund_id: confirmation.refund_id,
                method: confirmation.method.to_string(),
                amount: confirmation.amount,
                currency: confirmation.currency.to_string(),
                description: confirmation.description,
            },
            RefundOutcome::Failed { reason } => Self::Failed {
                reason: reason.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReturnCompletionResponse {
    pub request: ReturnResponse,
    pub refund: RefundOutcomeResponse,
}

impl From<ReturnCompletion> for ReturnCompletionResponse {
    fn from(completion: ReturnCompletion) -> Self {
        ReturnCompletionResponse {
            request: completion.request.into(),
            refund: completion.refund.into(),
        }
    }
}

/// Complete Return Handler
///
/// Marks an approved request completed and issues the refund. A refused
/// refund is reported in the body; the return stays completed.
#[endpoint(
    tags("returns"),
    summary = "Complete Return",
    responses(
        (status_code = StatusCode::OK, description = "Return completed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid currency or description"),
        (status_code = StatusCode::NOT_FOUND, description = "No return request for the order"),
        (status_code = StatusCode::PRECONDITION_FAILED, description = "Return is not approved"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    order: PathParam<i64>,
    json: JsonBody<CompleteReturnRequest>,
    depot: &mut Depot,
) -> Result<Json<ReturnCompletionResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let completion = app
        .returns
        .complete_return(
            customer.into_inner().into(),
            order.into_inner().into(),
            json.into_inner().into(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(completion.into()))
}
