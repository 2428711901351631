//! Customers service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        customers::{
            errors::CustomersServiceError,
            models::{Customer, CustomerId, NewCustomer},
            repository::SqliteCustomersRepository,
        },
        validation::{ValidationError, require_non_empty},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCustomersService {
    db: Db,
    repository: SqliteCustomersRepository,
}

impl SqliteCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for SqliteCustomersService {
    #[tracing::instrument(
        name = "customers.service.create_customer",
        skip(self, customer),
        err
    )]
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<Customer, CustomersServiceError> {
        require_non_empty("name", &customer.name)?;

        let email = customer.email.trim();

        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(ValidationError::Email(customer.email).into());
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_customer(&mut tx, &customer, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(customer_id = %created.id, "created customer");

        Ok(created)
    }

    async fn get_customer(&self, customer: CustomerId) -> Result<Customer, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::CustomerNotFound(customer))?;

        tx.commit().await?;

        Ok(found)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Registers a customer in the account directory.
    async fn create_customer(&self, customer: NewCustomer)
    -> Result<Customer, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(&self, customer: CustomerId) -> Result<Customer, CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn create_customer_then_get_it_back() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .customers
            .create_customer(NewCustomer {
                email: "ada@example.com".to_string(),
                name: "Ada".to_string(),
            })
            .await?;

        let found = ctx.customers.get_customer(created.id).await?;

        assert_eq!(found, created);
        assert_eq!(found.email, "ada@example.com");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let new_customer = NewCustomer {
            email: "dup@example.com".to_string(),
            name: "Dup".to_string(),
        };

        ctx.customers.create_customer(new_customer.clone()).await?;

        let result = ctx.customers.create_customer(new_customer).await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_storage() {
        let ctx = TestContext::new().await;

        let result = ctx
            .customers
            .create_customer(NewCustomer {
                email: "nobody".to_string(),
                name: "Nobody".to_string(),
            })
            .await;

        assert!(
            matches!(
                result,
                Err(CustomersServiceError::Validation(ValidationError::Email(_)))
            ),
            "expected Email validation error, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unknown_customer_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.customers.get_customer(CustomerId::from_i64(404)).await;

        assert!(
            matches!(result, Err(CustomersServiceError::CustomerNotFound(id)) if id.into_i64() == 404),
            "expected CustomerNotFound, got {result:?}"
        );
    }
}
