//! Payments Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tracing::{Span, error, info, warn};

use crate::{
    database::Db,
    domain::{
        campaigns::repository::SqliteCampaignsRepository,
        customers::models::CustomerId,
        notifications::{Notification, Notifier},
        orders::assembler::OrderAssembler,
        payments::{
            PaymentsServiceError,
            gateway::{ChargeRequest, PaymentConfirmation, PaymentGateway, RefundRequest},
            models::{CheckoutQuote, CheckoutSettings, PaymentRequest, Receipt},
            pricing::CartPricer,
            repository::SqliteReceiptsRepository,
        },
        promotions::repository::SqlitePromotionCodesRepository,
        validation::{Currency, require_description},
    },
};

pub struct SqlitePaymentsService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
    settings: CheckoutSettings,
    pricer: CartPricer,
    assembler: OrderAssembler,
    receipts: SqliteReceiptsRepository,
    promotions: SqlitePromotionCodesRepository,
    campaigns: SqliteCampaignsRepository,
}

impl std::fmt::Debug for SqlitePaymentsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePaymentsService")
            .field("db", &self.db)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl SqlitePaymentsService {
    #[must_use]
    pub fn new(
        db: Db,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn Notifier>,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            db,
            gateway,
            notifier,
            settings,
            pricer: CartPricer::new(),
            assembler: OrderAssembler::new(),
            receipts: SqliteReceiptsRepository::new(),
            promotions: SqlitePromotionCodesRepository::new(),
            campaigns: SqliteCampaignsRepository::new(),
        }
    }

    /// Everything that happens after the charge is approved: materialise the
    /// order, consume discount uses and write the receipt.
    async fn settle(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        quote: &CheckoutQuote,
        confirmation: &PaymentConfirmation,
        now: Timestamp,
    ) -> Result<Receipt, PaymentsServiceError> {
        let order = self.assembler.assemble(tx, customer, now).await?;

        if let Some(code) = quote.applied_promotion_code()
            && self.promotions.redeem_promotion_code(tx, code, now).await? == 0
        {
            return Err(PaymentsServiceError::UsageLimitReached(code.to_string()));
        }

        for name in quote.campaigns.campaign_names() {
            if self.campaigns.redeem_campaign(tx, name, now).await? == 0 {
                return Err(PaymentsServiceError::UsageLimitReached(name.to_string()));
            }
        }

        let receipt = self
            .receipts
            .create_receipt(tx, customer, order.id, confirmation, now)
            .await?;

        Ok(receipt)
    }

    /// Give back an approved charge whose checkout did not go through.
    fn compensate(&self, confirmation: &PaymentConfirmation) {
        let Ok(amount) = i64::try_from(confirmation.amount) else {
            error!(payment_id = %confirmation.payment_id, "charge too large to refund");

            return;
        };

        let request = RefundRequest {
            amount,
            currency: confirmation.currency.clone(),
            description: format!("reversal of {}", confirmation.payment_id),
            method: confirmation.method,
        };

        match self.gateway.refund(&request) {
            Ok(refund) => warn!(
                payment_id = %confirmation.payment_id,
                refund_id = %refund.refund_id,
                amount = refund.amount,
                "reversed charge after failed checkout"
            ),
            Err(e) => error!(
                payment_id = %confirmation.payment_id,
                error = %e,
                "failed to reverse charge after failed checkout"
            ),
        }
    }
}

#[async_trait]
impl PaymentsService for SqlitePaymentsService {
    #[tracing::instrument(
        name = "payments.service.quote",
        skip(self, promotion_code),
        fields(customer_id = %customer),
        err
    )]
    async fn quote(
        &self,
        customer: CustomerId,
        promotion_code: Option<String>,
    ) -> Result<CheckoutQuote, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let quote = self
            .pricer
            .quote(
                &mut tx,
                customer,
                promotion_code.as_deref().map(str::trim).filter(|code| !code.is_empty()),
                self.settings.accumulation,
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(quote)
    }

    #[tracing::instrument(
        name = "payments.service.pay",
        skip(self, request),
        fields(
            customer_id = %customer,
            order_id = tracing::field::Empty,
            payment_id = tracing::field::Empty,
            total = tracing::field::Empty
        ),
        err
    )]
    async fn pay(
        &self,
        customer: CustomerId,
        request: PaymentRequest,
    ) -> Result<Receipt, PaymentsServiceError> {
        let currency = Currency::parse(&request.currency)?;
        require_description(&request.description)?;

        let method = request.method.unwrap_or(self.settings.default_method);
        let code = request
            .promotion_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());

        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let quote = self
            .pricer
            .quote(&mut tx, customer, code, self.settings.accumulation, now)
            .await?;

        Span::current().record("total", quote.total);

        let confirmation = self.gateway.charge(&ChargeRequest {
            amount: quote.total,
            currency,
            description: request.description,
            method,
        })?;

        Span::current().record("payment_id", confirmation.payment_id.as_str());

        let settled = match self.settle(&mut tx, customer, &quote, &confirmation, now).await {
            Ok(receipt) => tx.commit().await.map(|()| receipt).map_err(Into::into),
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    error!(error = %rollback, "failed to roll back checkout");
                }

                Err(e)
            }
        };

        let receipt = match settled {
            Ok(receipt) => receipt,
            Err(e) => {
                self.compensate(&confirmation);

                return Err(e);
            }
        };

        Span::current().record("order_id", receipt.order_id.into_i64());

        info!(
            customer_id = %customer,
            order_id = %receipt.order_id,
            payment_id = %receipt.payment_id,
            total = receipt.total_amount,
            "payment approved"
        );

        self.notifier.notify(Notification::ReceiptIssued {
            customer,
            order: receipt.order_id,
            payment_id: receipt.payment_id.clone(),
            amount: receipt.total_amount,
            currency: receipt.currency.clone(),
        });

        Ok(receipt)
    }

    async fn list_receipts(&self, customer: CustomerId) -> Result<Vec<Receipt>, PaymentsServiceError> {
        let mut tx = self.db.begin().await?;

        let receipts = self.receipts.list_receipts(&mut tx, customer).await?;

        tx.commit().await?;

        if receipts.is_empty() {
            return Err(PaymentsServiceError::NoReceipts);
        }

        Ok(receipts)
    }
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Price the customer's cart without charging or reserving anything.
    async fn quote(
        &self,
        customer: CustomerId,
        promotion_code: Option<String>,
    ) -> Result<CheckoutQuote, PaymentsServiceError>;

    /// Charge for the customer's cart, turn it into an order and record a receipt.
    async fn pay(
        &self,
        customer: CustomerId,
        request: PaymentRequest,
    ) -> Result<Receipt, PaymentsServiceError>;

    /// Retrieve every receipt of a customer, oldest first.
    async fn list_receipts(&self, customer: CustomerId) -> Result<Vec<Receipt>, PaymentsServiceError>;
}
