//! Get Customer Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::customers::models::Customer;

use crate::{customers::errors::into_status_error, extensions::*};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub id: i64,

    pub email: String,

    pub name: String,

    /// The date and time the customer registered
    pub created_at: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        CustomerResponse {
            id: customer.id.into(),
            email: customer.email,
            name: customer.name,
            created_at: customer.created_at.to_string(),
        }
    }
}

/// Get Customer Handler
#[endpoint(
    tags("customers"),
    summary = "Get Customer",
    responses(
        (status_code = StatusCode::OK, description = "Customer found"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let customer = app
        .customers
        .get_customer(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::customers::{CustomersServiceError, MockCustomersService},
    };

    use crate::test_helpers::{app_context, make_customer, make_service};

    use super::*;

    fn service(customers: MockCustomersService) -> Service {
        make_service(
            AppContext {
                customers: Arc::new(customers),
                ..app_context()
            },
            Router::with_path("customers/{customer}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_customer_returns_200() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_get_customer()
            .once()
            .withf(|customer| customer.into_i64() == 7)
            .return_once(|_| Ok(make_customer(7)));

        let mut res = TestClient::get("http://example.com/customers/7")
            .send(&service(customers))
            .await;

        let body: CustomerResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.id, 7);
        assert_eq!(body.email, "customer7@example.com");
        assert_eq!(body.created_at, "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_customer_returns_404() -> TestResult {
        let mut customers = MockCustomersService::new();

        customers
            .expect_get_customer()
            .once()
            .return_once(|customer| Err(CustomersServiceError::CustomerNotFound(customer)));

        let res = TestClient::get("http://example.com/customers/9")
            .send(&service(customers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
