//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{Cart, CartItem},
            repository::SqliteCartItemsRepository,
        },
        customers::{models::CustomerId, repository::SqliteCustomersRepository},
        products::{models::ProductId, repository::SqliteProductsRepository},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    items: SqliteCartItemsRepository,
    customers: SqliteCustomersRepository,
    products: SqliteProductsRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            items: SqliteCartItemsRepository::new(),
            customers: SqliteCustomersRepository::new(),
            products: SqliteProductsRepository::new(),
        }
    }

    async fn require_customer(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
    ) -> Result<(), CartsServiceError> {
        self.customers
            .find_customer(tx, customer)
            .await?
            .ok_or(CartsServiceError::CustomerNotFound(customer))?;

        Ok(())
    }

    /// Point-in-time stock check. Nothing is reserved until the order is assembled.
    async fn require_stock(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
        quantity: u64,
    ) -> Result<(), CartsServiceError> {
        let found = self
            .products
            .find_product(tx, product)
            .await?
            .ok_or(CartsServiceError::ProductNotFound(product))?;

        if quantity > found.stock {
            return Err(CartsServiceError::InsufficientStock {
                product,
                requested: quantity,
                available: found.stock,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    #[tracing::instrument(
        name = "carts.service.upsert_item",
        skip(self),
        fields(customer_id = %customer, product_id = %product),
        err
    )]
    async fn upsert_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;
        self.require_stock(&mut tx, product, quantity).await?;

        let item = self
            .items
            .upsert_cart_item(&mut tx, customer, product, quantity, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(customer_id = %customer, product_id = %product, quantity, "upserted cart item");

        Ok(item)
    }

    async fn get_cart(&self, customer: CustomerId) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;

        let items = self.items.get_cart_items(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(Cart {
            customer_id: customer,
            items,
        })
    }

    async fn get_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;

        let item = self
            .items
            .find_cart_item(&mut tx, customer, product)
            .await?
            .ok_or(CartsServiceError::ItemNotFound(product))?;

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(
        name = "carts.service.update_item",
        skip(self),
        fields(customer_id = %customer, product_id = %product),
        err
    )]
    async fn update_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<CartItem, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;
        self.require_stock(&mut tx, product, quantity).await?;

        let item = self
            .items
            .update_cart_item(&mut tx, customer, product, quantity, Timestamp::now())
            .await?
            .ok_or(CartsServiceError::ItemNotFound(product))?;

        tx.commit().await?;

        info!(customer_id = %customer, product_id = %product, quantity, "updated cart item");

        Ok(item)
    }

    #[tracing::instrument(
        name = "carts.service.remove_item",
        skip(self),
        fields(customer_id = %customer, product_id = %product),
        err
    )]
    async fn remove_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;

        let rows_affected = self.items.delete_cart_item(&mut tx, customer, product).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::ItemNotFound(product));
        }

        tx.commit().await?;

        info!(customer_id = %customer, product_id = %product, "removed cart item");

        Ok(())
    }

    #[tracing::instrument(
        name = "carts.service.clear_cart",
        skip(self),
        fields(customer_id = %customer),
        err
    )]
    async fn clear_cart(&self, customer: CustomerId) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.require_customer(&mut tx, customer).await?;

        let removed = self.items.clear_cart(&mut tx, customer).await?;

        tx.commit().await?;

        info!(customer_id = %customer, removed, "cleared cart");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Set the quantity for a product, adding it to the cart when absent.
    async fn upsert_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<CartItem, CartsServiceError>;

    /// Retrieve a customer's cart.
    async fn get_cart(&self, customer: CustomerId) -> Result<Cart, CartsServiceError>;

    /// Retrieve one line of a customer's cart.
    async fn get_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<CartItem, CartsServiceError>;

    /// Change the quantity of a product already in the cart.
    async fn update_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<CartItem, CartsServiceError>;

    /// Remove a product from the cart.
    async fn remove_item(
        &self,
        customer: CustomerId,
        product: ProductId,
    ) -> Result<(), CartsServiceError>;

    /// Empty the cart.
    async fn clear_cart(&self, customer: CustomerId) -> Result<(), CartsServiceError>;
}
