//! Campaign Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::campaigns::CampaignsServiceError;

pub(crate) fn into_status_error(error: CampaignsServiceError) -> StatusError {
    match error {
        CampaignsServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        CampaignsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Campaign already exists")
        }
        CampaignsServiceError::CampaignNotFound(name) => {
            StatusError::not_found().brief(format!("Campaign {name:?} not found"))
        }
        CampaignsServiceError::InvalidReference
        | CampaignsServiceError::MissingRequiredData
        | CampaignsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid campaign payload")
        }
        CampaignsServiceError::NotFound => StatusError::not_found(),
        CampaignsServiceError::Sql(source) => {
            error!("campaign storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
