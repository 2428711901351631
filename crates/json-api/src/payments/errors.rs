//! Payment Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::payments::PaymentsServiceError;

use crate::orders::errors::assembly_status_error;

pub(crate) fn into_status_error(error: PaymentsServiceError) -> StatusError {
    match error {
        PaymentsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        PaymentsServiceError::Assembly(source) => assembly_status_error(source),
        PaymentsServiceError::Declined(reason) => {
            StatusError::payment_required().brief(format!("Payment declined: {reason}"))
        }
        PaymentsServiceError::UsageLimitReached(name) => {
            StatusError::conflict().brief(format!("Discount {name:?} has no uses left"))
        }
        PaymentsServiceError::NoReceipts => {
            StatusError::not_found().brief("Customer has no receipts")
        }
        PaymentsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Receipt already exists")
        }
        PaymentsServiceError::InvalidReference
        | PaymentsServiceError::MissingRequiredData
        | PaymentsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid payment payload")
        }
        PaymentsServiceError::NotFound => StatusError::not_found(),
        PaymentsServiceError::Sql(source) => {
            error!("payment storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
