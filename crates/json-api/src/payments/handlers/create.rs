//! Pay Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::payments::{PaymentMethod, models::PaymentRequest};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, receipts::ReceiptResponse},
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum PaymentMethodPayload {
    Paypal,
    CreditCard,
}

impl From<PaymentMethodPayload> for PaymentMethod {
    fn from(method: PaymentMethodPayload) -> Self {
        match method {
            PaymentMethodPayload::Paypal => PaymentMethod::PayPal,
            PaymentMethodPayload::CreditCard => PaymentMethod::CreditCard,
        }
    }
}

/// Pay Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PayRequest {
    /// Three-letter currency code
    pub currency: String,

    /// At least eight characters
    pub description: String,

    #[serde(default)]
    pub promotion_code: Option<String>,

    /// Defaults to the server's configured method
    #[serde(default)]
    pub method: Option<PaymentMethodPayload>,
}

impl From<PayRequest> for PaymentRequest {
    fn from(request: PayRequest) -> Self {
        PaymentRequest {
            currency: request.currency,
            description: request.description,
            promotion_code: request.promotion_code,
            method: request.method.map(Into::into),
        }
    }
}

/// Pay Handler
///
/// Prices the cart, charges the discounted total, assembles the order and
/// records a receipt. Either all of it happens or none of it does.
#[endpoint(
    tags("checkout"),
    summary = "Pay for Cart",
    responses(
        (status_code = StatusCode::CREATED, description = "Payment approved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid currency or description"),
        (status_code = StatusCode::PAYMENT_REQUIRED, description = "Payment declined"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer or product not found"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock or discount used up"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    json: JsonBody<PayRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReceiptResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let receipt = app
        .payments
        .pay(customer.into_inner().into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::{
            orders::AssemblyError,
            payments::{MockPaymentsService, PaymentDeclined, PaymentsServiceError},
            validation::ValidationError,
        },
    };

    use crate::test_helpers::{app_context, make_service};

    use super::{super::tests::make_receipt, *};

    fn service(payments: MockPaymentsService) -> Service {
        make_service(
            AppContext {
                payments: Arc::new(payments),
                ..app_context()
            },
            Router::with_path("customers/{customer}/payments").post(handler),
        )
    }

    #[tokio::test]
    async fn test_pay_success() -> TestResult {
        let receipt = make_receipt(1, 8, 90_00)?;

        let mut payments = MockPaymentsService::new();

        payments
            .expect_pay()
            .once()
            .withf(|customer, request| {
                customer.into_i64() == 1
                    && *request
                        == PaymentRequest {
                            currency: "usd".to_string(),
                            description: "Order payment".to_string(),
                            promotion_code: Some("SAVE10".to_string()),
                            method: Some(PaymentMethod::CreditCard),
                        }
            })
            .return_once(move |_, _| Ok(receipt));

        let mut res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({
                "currency": "usd",
                "description": "Order payment",
                "promotion_code": "SAVE10",
                "method": "credit_card"
            }))
            .send(&service(payments))
            .await;

        let body: ReceiptResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.order_id, 8);
        assert_eq!(body.total_amount, 90_00);
        assert_eq!(body.payment_id, "PAY-8");

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_defaults_method_to_none() -> TestResult {
        let receipt = make_receipt(1, 8, 90_00)?;

        let mut payments = MockPaymentsService::new();

        payments
            .expect_pay()
            .once()
            .withf(|_, request| request.method.is_none() && request.promotion_code.is_none())
            .return_once(move |_, _| Ok(receipt));

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({ "currency": "USD", "description": "Order payment" }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_unknown_method_is_rejected() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_pay().never();

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({
                "currency": "USD",
                "description": "Order payment",
                "method": "cheque"
            }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_short_description_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_pay().once().return_once(|_, _| {
            Err(ValidationError::TooShort {
                field: "description",
                min: 8,
            }
            .into())
        });

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({ "currency": "USD", "description": "short" }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_declined_returns_402() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_pay()
            .once()
            .return_once(|_, _| Err(PaymentDeclined::ZeroAmount.into()));

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({ "currency": "USD", "description": "Order payment" }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::PAYMENT_REQUIRED));

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_used_up_discount_returns_409() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_pay()
            .once()
            .return_once(|_, _| Err(PaymentsServiceError::UsageLimitReached("SAVE10".to_string())));

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({ "currency": "USD", "description": "Order payment" }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_pay_empty_cart_returns_422() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_pay()
            .once()
            .return_once(|_, _| Err(AssemblyError::EmptyCart.into()));

        let res = TestClient::post("http://example.com/customers/1/payments")
            .json(&json!({ "currency": "USD", "description": "Order payment" }))
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }
}
