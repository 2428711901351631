//! Create Customer Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::customers::models::NewCustomer;

use crate::{
    customers::{errors::into_status_error, get::CustomerResponse},
    extensions::*,
};

/// Create Customer Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateCustomerRequest {
    pub email: String,
    pub name: String,
}

impl From<CreateCustomerRequest> for NewCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        NewCustomer {
            email: request.email,
            name: request.name,
        }
    }
}

/// Create Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Create Customer",
    responses(
        (status_code = StatusCode::CREATED, description = "Customer created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateCustomerRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CustomerResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let customer = app
        .customers
        .create_customer(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.created_at(format!("/customers/{}", customer.id))?;

    Ok(Json(customer.into()))
}
