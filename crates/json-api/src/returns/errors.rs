//! Return Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::returns::ReturnsServiceError;

pub(crate) fn into_status_error(error: ReturnsServiceError) -> StatusError {
    match error {
        ReturnsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        ReturnsServiceError::OrderNotFound(order) => {
            StatusError::not_found().brief(format!("Order {order} not found"))
        }
        ReturnsServiceError::ReturnNotFound(order) => {
            StatusError::not_found().brief(format!("No return request for order {order}"))
        }
        ReturnsServiceError::NoReturns => {
            StatusError::not_found().brief("No matching return requests")
        }
        error @ (ReturnsServiceError::InvalidTransition { .. }
        | ReturnsServiceError::NotApproved(_)) => {
            StatusError::precondition_failed().brief(error.to_string())
        }
        ReturnsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A return request already exists for this order")
        }
        ReturnsServiceError::InvalidReference
        | ReturnsServiceError::MissingRequiredData
        | ReturnsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid return payload")
        }
        ReturnsServiceError::NotFound => StatusError::not_found(),
        ReturnsServiceError::Sql(source) => {
            error!("return storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
