//! Customer Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::customers::CustomersServiceError;

pub(crate) fn into_status_error(error: CustomersServiceError) -> StatusError {
    match error {
        CustomersServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CustomersServiceError::AlreadyExists => {
            StatusError::conflict().brief("Customer already exists")
        }
        CustomersServiceError::MissingRequiredData | CustomersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid customer payload")
        }
        CustomersServiceError::CustomerNotFound(customer) => {
            StatusError::not_found().brief(format!("Customer {customer} not found"))
        }
        CustomersServiceError::NotFound => StatusError::not_found(),
        CustomersServiceError::Sql(source) => {
            error!("customer storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
