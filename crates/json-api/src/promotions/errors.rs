//! Promotion Code Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promotion code already exists")
        }
        PromotionsServiceError::CodeNotFound(code) => {
            StatusError::not_found().brief(format!("Promotion code {code:?} not found"))
        }
        PromotionsServiceError::MissingRequiredData | PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promotion code payload")
        }
        PromotionsServiceError::NotFound => StatusError::not_found(),
        PromotionsServiceError::Sql(source) => {
            error!("promotion code storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
