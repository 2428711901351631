//! Receipt Index Handler

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::domain::payments::models::Receipt;

use crate::{extensions::*, payments::errors::into_status_error};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptResponse {
    pub id: i64,

    /// Order assembled by the payment
    pub order_id: i64,

    pub customer_id: i64,

    /// Gateway reference, `PAY-` followed by a UUID
    pub payment_id: String,

    pub status: String,

    pub method: String,

    /// Amount charged, after discounts
    pub total_amount: u64,

    pub currency: String,

    pub description: String,

    pub paid_at: String,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        ReceiptResponse {
            id: receipt.id.into(),
            order_id: receipt.order_id.into(),
            customer_id: receipt.customer_id.into(),
            payment_id: receipt.payment_id,
            status: receipt.status.to_string(),
            method: receipt.method.to_string(),
            total_amount: receipt.total_amount,
            currency: receipt.currency.to_string(),
            description: receipt.description,
            paid_at: receipt.paid_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReceiptsResponse {
    /// Oldest first
    pub receipts: Vec<ReceiptResponse>,
}

/// Receipt Index Handler
#[endpoint(
    tags("checkout"),
    summary = "List Receipts",
    responses(
        (status_code = StatusCode::OK, description = "Receipts"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer has no receipts"),
    ),
)]
pub(crate) async fn handler(
    customer: PathParam<i64>,
    depot: &mut Depot,
) -> Result<Json<ReceiptsResponse>, StatusError> {
    let app = depot.app_or_500()?;

    let receipts = app
        .payments
        .list_receipts(customer.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ReceiptsResponse {
        receipts: receipts.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use storefront_app::{
        context::AppContext,
        domain::payments::{MockPaymentsService, PaymentsServiceError},
    };

    use crate::test_helpers::{app_context, make_service};

    use super::{super::tests::make_receipt, *};

    fn service(payments: MockPaymentsService) -> Service {
        make_service(
            AppContext {
                payments: Arc::new(payments),
                ..app_context()
            },
            Router::with_path("customers/{customer}/receipts").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_receipts_returns_200() -> TestResult {
        let receipts = vec![make_receipt(1, 8, 90_00)?, make_receipt(1, 9, 15_00)?];

        let mut payments = MockPaymentsService::new();

        payments
            .expect_list_receipts()
            .once()
            .withf(|customer| customer.into_i64() == 1)
            .return_once(move |_| Ok(receipts));

        let mut res = TestClient::get("http://example.com/customers/1/receipts")
            .send(&service(payments))
            .await;

        let body: ReceiptsResponse = res.take_json().await?;
        let first = body.receipts.first();

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.receipts.len(), 2);
        assert_eq!(first.map(|r| r.status.as_str()), Some("approved"));
        assert_eq!(first.map(|r| r.method.as_str()), Some("paypal"));
        assert_eq!(first.map(|r| r.currency.as_str()), Some("USD"));

        Ok(())
    }

    #[tokio::test]
    async fn test_no_receipts_returns_404() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_list_receipts()
            .once()
            .return_once(|_| Err(PaymentsServiceError::NoReceipts));

        let res = TestClient::get("http://example.com/customers/1/receipts")
            .send(&service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
