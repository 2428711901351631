//! Returns Service

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        customers::models::CustomerId,
        notifications::{Notification, Notifier},
        orders::{
            models::OrderId,
            repositories::{SqliteCompletedOrdersRepository, SqliteOrdersRepository},
        },
        payments::gateway::{PaymentGateway, RefundRequest},
        returns::{
            ReturnsServiceError,
            models::{
                NewReturnRequest, RefundInput, RefundOutcome, ReturnCompletion, ReturnRequest,
                ReturnStatus,
            },
            repository::SqliteReturnsRepository,
        },
        validation::{Currency, require_description, require_non_empty},
    },
};

pub struct SqliteReturnsService {
    db: Db,
    gateway: Arc<dyn PaymentGateway>,
    notifier: Arc<dyn Notifier>,
    returns: SqliteReturnsRepository,
    orders: SqliteOrdersRepository,
    completed: SqliteCompletedOrdersRepository,
}

impl std::fmt::Debug for SqliteReturnsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteReturnsService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl SqliteReturnsService {
    #[must_use]
    pub fn new(db: Db, gateway: Arc<dyn PaymentGateway>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            gateway,
            notifier,
            returns: SqliteReturnsRepository::new(),
            orders: SqliteOrdersRepository::new(),
            completed: SqliteCompletedOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl ReturnsService for SqliteReturnsService {
    #[tracing::instrument(
        name = "returns.service.create_return",
        skip(self, request),
        fields(customer_id = %customer, order_id = %request.order_id),
        err
    )]
    async fn create_return(
        &self,
        customer: CustomerId,
        mut request: NewReturnRequest,
    ) -> Result<ReturnRequest, ReturnsServiceError> {
        require_non_empty("reason", &request.reason)?;

        request.description = request
            .description
            .map(|description| description.trim().to_string())
            .filter(|description| !description.is_empty());

        let mut tx = self.db.begin().await?;

        let open = self
            .orders
            .find_order(&mut tx, customer, request.order_id)
            .await?
            .is_some();

        let exists = open
            || self
                .completed
                .find_completed_order(&mut tx, customer, request.order_id)
                .await?
                .is_some();

        if !exists {
            return Err(ReturnsServiceError::OrderNotFound(request.order_id));
        }

        let created = self
            .returns
            .create_return(&mut tx, customer, &request, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(customer_id = %customer, order_id = %created.order_id, "requested return");

        Ok(created)
    }

    async fn get_return(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<ReturnRequest, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .returns
            .find_return(&mut tx, customer, order)
            .await?
            .ok_or(ReturnsServiceError::ReturnNotFound(order))?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_returns(
        &self,
        customer: CustomerId,
        status: Option<ReturnStatus>,
    ) -> Result<Vec<ReturnRequest>, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let returns = self.returns.list_returns(&mut tx, customer, status).await?;

        tx.commit().await?;

        if returns.is_empty() {
            return Err(ReturnsServiceError::NoReturns);
        }

        Ok(returns)
    }

    #[tracing::instrument(
        name = "returns.service.set_status",
        skip(self),
        fields(customer_id = %customer, order_id = %order, status = %status),
        err
    )]
    async fn set_status(
        &self,
        customer: CustomerId,
        order: OrderId,
        status: ReturnStatus,
    ) -> Result<ReturnRequest, ReturnsServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self
            .returns
            .find_return(&mut tx, customer, order)
            .await?
            .ok_or(ReturnsServiceError::ReturnNotFound(order))?;

        let invalid = ReturnsServiceError::InvalidTransition {
            from: current.status,
            to: status,
        };

        if status == ReturnStatus::Completed || !current.status.can_transition_to(status) {
            return Err(invalid);
        }

        let updated = self
            .returns
            .transition_return(&mut tx, customer, order, current.status, status, None)
            .await?
            .ok_or(invalid)?;

        tx.commit().await?;

        info!(
            customer_id = %customer,
            order_id = %order,
            from = %current.status,
            to = %updated.status,
            "changed return status"
        );

        Ok(updated)
    }

    #[tracing::instrument(
        name = "returns.service.complete_return",
        skip(self, refund),
        fields(customer_id = %customer, order_id = %order, refunded = tracing::field::Empty),
        err
    )]
    async fn complete_return(
        &self,
        customer: CustomerId,
        order: OrderId,
        refund: RefundInput,
    ) -> Result<ReturnCompletion, ReturnsServiceError> {
        let currency = Currency::parse(&refund.currency)?;
        require_description(&refund.description)?;

        let mut tx = self.db.begin().await?;

        let current = self
            .returns
            .find_return(&mut tx, customer, order)
            .await?
            .ok_or(ReturnsServiceError::ReturnNotFound(order))?;

        if current.status != ReturnStatus::Approved {
            return Err(ReturnsServiceError::NotApproved(current.status));
        }

        let completed = self
            .returns
            .transition_return(
                &mut tx,
                customer,
                order,
                ReturnStatus::Approved,
                ReturnStatus::Completed,
                Some(Timestamp::now()),
            )
            .await?
            .ok_or(ReturnsServiceError::NotApproved(current.status))?;

        tx.commit().await?;

        let outcome = match self.gateway.refund(&RefundRequest {
            amount: refund.amount,
            currency,
            description: refund.description,
            method: refund.method,
        }) {
            Ok(confirmation) => {
                info!(
                    customer_id = %customer,
                    order_id = %order,
                    refund_id = %confirmation.refund_id,
                    amount = confirmation.amount,
                    "refunded return"
                );

                RefundOutcome::Refunded { confirmation }
            }
            Err(reason) => {
                warn!(customer_id = %customer, order_id = %order, %reason, "refund failed");

                RefundOutcome::Failed { reason }
            }
        };

        tracing::Span::current().record("refunded", outcome.is_refunded());

        self.notifier.notify(Notification::ReturnCompleted {
            customer,
            order,
            refunded: outcome.is_refunded(),
        });

        Ok(ReturnCompletion {
            request: completed,
            refund: outcome,
        })
    }
}

#[automock]
#[async_trait]
pub trait ReturnsService: Send + Sync {
    /// Open a return request for an open or completed order.
    async fn create_return(
        &self,
        customer: CustomerId,
        request: NewReturnRequest,
    ) -> Result<ReturnRequest, ReturnsServiceError>;

    /// Retrieve the return request for one order.
    async fn get_return(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<ReturnRequest, ReturnsServiceError>;

    /// Retrieve a customer's return requests, optionally only those in `status`.
    async fn list_returns(
        &self,
        customer: CustomerId,
        status: Option<ReturnStatus>,
    ) -> Result<Vec<ReturnRequest>, ReturnsServiceError>;

    /// Approve or reject a pending request.
    async fn set_status(
        &self,
        customer: CustomerId,
        order: OrderId,
        status: ReturnStatus,
    ) -> Result<ReturnRequest, ReturnsServiceError>;

    /// Complete an approved request and issue its refund.
    async fn complete_return(
        &self,
        customer: CustomerId,
        order: OrderId,
        refund: RefundInput,
    ) -> Result<ReturnCompletion, ReturnsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::CartsService,
            orders::{OrdersService, models::Order},
            payments::gateway::{PaymentMethod, RefundError},
            validation::ValidationError,
        },
        test::TestContext,
    };

    use super::*;

    async fn ordered(ctx: &TestContext) -> TestResult<(CustomerId, Order)> {
        let customer = ctx.create_customer().await;
        let product = ctx.create_product("books", 10_00, 5).await;

        ctx.carts.upsert_item(customer.id, product.id, 1).await?;

        let order = ctx.orders.assemble_order(customer.id).await?;

        Ok((customer.id, order))
    }

    fn new_return(order: OrderId) -> NewReturnRequest {
        NewReturnRequest {
            order_id: order,
            reason: "damaged".to_string(),
            description: Some("  ".to_string()),
        }
    }

    fn refund(amount: i64) -> RefundInput {
        RefundInput {
            amount,
            currency: "usd".to_string(),
            description: "damaged on arrival".to_string(),
            method: PaymentMethod::CreditCard,
        }
    }

    #[tokio::test]
    async fn create_starts_pending_and_rejects_duplicates() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        let created = ctx.returns.create_return(customer, new_return(order.id)).await?;

        assert_eq!(created.status, ReturnStatus::Pending);
        assert_eq!(created.description, None);
        assert_eq!(created.completed_at, None);

        let duplicate = ctx.returns.create_return(customer, new_return(order.id)).await;

        assert!(
            matches!(duplicate, Err(ReturnsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {duplicate:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_accepts_completed_orders_but_not_foreign_ones() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;
        let stranger = ctx.create_customer().await;

        ctx.orders.complete_order(customer, order.id).await?;

        let foreign = ctx.returns.create_return(stranger.id, new_return(order.id)).await;

        assert!(
            matches!(foreign, Err(ReturnsServiceError::OrderNotFound(_))),
            "expected OrderNotFound, got {foreign:?}"
        );

        ctx.returns.create_return(customer, new_return(order.id)).await?;

        Ok(())
    }

    #[tokio::test]
    async fn illegal_transitions_are_refused() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        ctx.returns.create_return(customer, new_return(order.id)).await?;
        ctx.returns
            .set_status(customer, order.id, ReturnStatus::Rejected)
            .await?;

        let reopened = ctx
            .returns
            .set_status(customer, order.id, ReturnStatus::Pending)
            .await;

        assert!(
            matches!(
                reopened,
                Err(ReturnsServiceError::InvalidTransition {
                    from: ReturnStatus::Rejected,
                    to: ReturnStatus::Pending,
                })
            ),
            "expected InvalidTransition, got {reopened:?}"
        );

        assert_eq!(
            ctx.returns.get_return(customer, order.id).await?.status,
            ReturnStatus::Rejected
        );

        Ok(())
    }

    #[tokio::test]
    async fn completing_a_pending_return_fails_and_keeps_it_pending() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        ctx.returns.create_return(customer, new_return(order.id)).await?;

        let result = ctx.returns.complete_return(customer, order.id, refund(10_00)).await;

        assert!(
            matches!(result, Err(ReturnsServiceError::NotApproved(ReturnStatus::Pending))),
            "expected NotApproved, got {result:?}"
        );

        assert_eq!(
            ctx.returns.get_return(customer, order.id).await?.status,
            ReturnStatus::Pending
        );

        let forced = ctx
            .returns
            .set_status(customer, order.id, ReturnStatus::Completed)
            .await;

        assert!(
            matches!(forced, Err(ReturnsServiceError::InvalidTransition { .. })),
            "expected InvalidTransition, got {forced:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn completing_an_approved_return_reports_the_refund() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        ctx.returns.create_return(customer, new_return(order.id)).await?;
        ctx.returns
            .set_status(customer, order.id, ReturnStatus::Approved)
            .await?;

        let completion = ctx
            .returns
            .complete_return(customer, order.id, refund(10_00))
            .await?;

        assert_eq!(completion.request.status, ReturnStatus::Completed);
        assert!(completion.request.completed_at.is_some());
        assert!(
            matches!(
                &completion.refund,
                RefundOutcome::Refunded { confirmation } if confirmation.amount == 10_00
            ),
            "expected a refund, got {:?}",
            completion.refund
        );

        let again = ctx.returns.complete_return(customer, order.id, refund(10_00)).await;

        assert!(
            matches!(again, Err(ReturnsServiceError::NotApproved(ReturnStatus::Completed))),
            "expected NotApproved, got {again:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn short_refund_description_is_rejected_and_keeps_it_approved() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        ctx.returns.create_return(customer, new_return(order.id)).await?;
        ctx.returns
            .set_status(customer, order.id, ReturnStatus::Approved)
            .await?;

        let result = ctx
            .returns
            .complete_return(
                customer,
                order.id,
                RefundInput {
                    description: "broken".to_string(),
                    ..refund(10_00)
                },
            )
            .await;

        assert!(
            matches!(
                result,
                Err(ReturnsServiceError::Validation(ValidationError::TooShort {
                    field: "description",
                    ..
                }))
            ),
            "expected TooShort, got {result:?}"
        );

        assert_eq!(
            ctx.returns.get_return(customer, order.id).await?.status,
            ReturnStatus::Approved
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_refund_still_completes_the_return() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, order) = ordered(&ctx).await?;

        ctx.returns.create_return(customer, new_return(order.id)).await?;
        ctx.returns
            .set_status(customer, order.id, ReturnStatus::Approved)
            .await?;

        let completion = ctx.returns.complete_return(customer, order.id, refund(0)).await?;

        assert_eq!(completion.request.status, ReturnStatus::Completed);
        assert_eq!(
            completion.refund,
            RefundOutcome::Failed {
                reason: RefundError::ZeroAmount
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_status() -> TestResult {
        let ctx = TestContext::new().await;
        let (customer, first) = ordered(&ctx).await?;

        let product = ctx.create_product("games", 5_00, 5).await;
        ctx.carts.upsert_item(customer, product.id, 1).await?;
        let second = ctx.orders.assemble_order(customer).await?;

        ctx.returns.create_return(customer, new_return(first.id)).await?;
        ctx.returns.create_return(customer, new_return(second.id)).await?;
        ctx.returns
            .set_status(customer, second.id, ReturnStatus::Approved)
            .await?;

        assert_eq!(ctx.returns.list_returns(customer, None).await?.len(), 2);

        let approved = ctx
            .returns
            .list_returns(customer, Some(ReturnStatus::Approved))
            .await?;

        assert_eq!(
            approved.iter().map(|request| request.order_id).collect::<Vec<_>>(),
            vec![second.id]
        );

        let rejected = ctx
            .returns
            .list_returns(customer, Some(ReturnStatus::Rejected))
            .await;

        assert!(
            matches!(rejected, Err(ReturnsServiceError::NoReturns)),
            "expected NoReturns, got {rejected:?}"
        );

        Ok(())
    }
}
