//! Orders Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        customers::{models::CustomerId, repository::SqliteCustomersRepository},
        orders::{
            assembler::OrderAssembler,
            errors::OrdersServiceError,
            models::{CompletedOrder, Order, OrderId, OrderItem},
            repositories::{SqliteCompletedOrdersRepository, SqliteOrdersRepository},
        },
        products::{models::ProductId, repository::SqliteProductsRepository},
        validation::ValidationError,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    assembler: OrderAssembler,
    orders: SqliteOrdersRepository,
    completed: SqliteCompletedOrdersRepository,
    customers: SqliteCustomersRepository,
    products: SqliteProductsRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            assembler: OrderAssembler::new(),
            orders: SqliteOrdersRepository::new(),
            completed: SqliteCompletedOrdersRepository::new(),
            customers: SqliteCustomersRepository::new(),
            products: SqliteProductsRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    #[tracing::instrument(
        name = "orders.service.assemble_order",
        skip(self),
        fields(customer_id = %customer),
        err
    )]
    async fn assemble_order(&self, customer: CustomerId) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .assembler
            .assemble(&mut tx, customer, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!(
            customer_id = %customer,
            order_id = %order.id,
            total = order.total_amount(),
            "assembled order"
        );

        Ok(order)
    }

    #[tracing::instrument(
        name = "orders.service.create_order_item",
        skip(self),
        fields(customer_id = %customer, product_id = %product),
        err
    )]
    async fn create_order_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<Order, OrdersServiceError> {
        if quantity == 0 {
            return Err(ValidationError::Zero { field: "quantity" }.into());
        }

        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::CustomerNotFound(customer))?;

        let found = self
            .products
            .find_product(&mut tx, product)
            .await?
            .ok_or(OrdersServiceError::ProductNotFound(product))?;

        let now = Timestamp::now();

        let rows_affected = self
            .products
            .decrement_stock(&mut tx, product, quantity, now)
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::InsufficientStock {
                product,
                requested: quantity,
                available: found.stock,
            });
        }

        let item = OrderItem {
            product_id: product,
            quantity,
            unit_price: found.price,
        };

        let order = self.orders.create_order(&mut tx, customer, vec![item], now).await?;

        tx.commit().await?;

        info!(
            customer_id = %customer,
            order_id = %order.id,
            product_id = %product,
            quantity,
            "created single-item order"
        );

        Ok(order)
    }

    async fn get_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .orders
            .find_order(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound(order))?;

        tx.commit().await?;

        Ok(found)
    }

    async fn list_orders(&self, customer: CustomerId) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, customer).await?;

        tx.commit().await?;

        if orders.is_empty() {
            return Err(OrdersServiceError::NoOrders);
        }

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.delete_order",
        skip(self),
        fields(customer_id = %customer, order_id = %order),
        err
    )]
    async fn delete_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<(), OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.orders.delete_order(&mut tx, customer, order).await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::OrderNotFound(order));
        }

        tx.commit().await?;

        info!(customer_id = %customer, order_id = %order, "deleted order");

        Ok(())
    }

    #[tracing::instrument(
        name = "orders.service.delete_orders",
        skip(self),
        fields(customer_id = %customer),
        err
    )]
    async fn delete_orders(&self, customer: CustomerId) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let deleted = self.orders.delete_orders(&mut tx, customer).await?;

        if deleted == 0 {
            return Err(OrdersServiceError::NoOrders);
        }

        tx.commit().await?;

        info!(customer_id = %customer, deleted, "deleted orders");

        Ok(deleted)
    }

    #[tracing::instrument(
        name = "orders.service.update_quantity",
        skip(self),
        fields(customer_id = %customer, order_id = %order, product_id = %product),
        err
    )]
    async fn update_quantity(
        &self,
        customer: CustomerId,
        order: OrderId,
        product: ProductId,
        quantity: u64,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut found = self
            .orders
            .find_order(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound(order))?;

        let item = found
            .items
            .iter_mut()
            .find(|item| item.product_id == product)
            .ok_or(OrdersServiceError::ItemNotFound(product))?;

        let previous = item.quantity;
        let now = Timestamp::now();

        if quantity > previous {
            let delta = quantity - previous;

            let rows_affected = self
                .products
                .decrement_stock(&mut tx, product, delta, now)
                .await?;

            if rows_affected == 0 {
                let available = self
                    .products
                    .find_product(&mut tx, product)
                    .await?
                    .map_or(0, |current| current.stock);

                return Err(OrdersServiceError::InsufficientStock {
                    product,
                    requested: delta,
                    available,
                });
            }
        } else if quantity < previous {
            self.products
                .increment_stock(&mut tx, product, previous - quantity, now)
                .await?;
        }

        self.orders
            .update_order_item(&mut tx, order, product, quantity)
            .await?;

        item.quantity = quantity;

        tx.commit().await?;

        info!(
            customer_id = %customer,
            order_id = %order,
            product_id = %product,
            previous,
            quantity,
            "updated order quantity"
        );

        Ok(found)
    }

    #[tracing::instrument(
        name = "orders.service.complete_order",
        skip(self),
        fields(customer_id = %customer, order_id = %order),
        err
    )]
    async fn complete_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<CompletedOrder, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let open = self
            .orders
            .find_order(&mut tx, customer, order)
            .await?
            .ok_or(OrdersServiceError::OrderNotFound(order))?;

        let completed = self
            .completed
            .archive_order(&mut tx, &open, Timestamp::now())
            .await?;

        let rows_affected = self.orders.delete_order(&mut tx, customer, order).await?;

        if rows_affected == 0 {
            warn!(customer_id = %customer, order_id = %order, "archived order could not be removed");

            return Err(OrdersServiceError::IntegrityViolation(order));
        }

        tx.commit().await?;

        info!(customer_id = %customer, order_id = %order, "completed order");

        Ok(completed)
    }

    async fn list_completed_orders(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<CompletedOrder>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(OrdersServiceError::CustomerNotFound(customer))?;

        let completed = self.completed.list_completed_orders(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(completed)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the customer's cart into an order, reserving stock and emptying the cart.
    async fn assemble_order(&self, customer: CustomerId) -> Result<Order, OrdersServiceError>;

    /// Order one product directly, bypassing the cart. Stock is reserved in
    /// the same transaction as the order insert.
    async fn create_order_item(
        &self,
        customer: CustomerId,
        product: ProductId,
        quantity: u64,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve one open order.
    async fn get_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<Order, OrdersServiceError>;

    /// Retrieve every open order of a customer, newest first.
    async fn list_orders(&self, customer: CustomerId) -> Result<Vec<Order>, OrdersServiceError>;

    /// Delete one open order. Reserved stock is not returned.
    async fn delete_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<(), OrdersServiceError>;

    /// Delete every open order of a customer, returning how many were removed.
    async fn delete_orders(&self, customer: CustomerId) -> Result<u64, OrdersServiceError>;

    /// Change the quantity of one order line, moving the difference in or out of stock.
    async fn update_quantity(
        &self,
        customer: CustomerId,
        order: OrderId,
        product: ProductId,
        quantity: u64,
    ) -> Result<Order, OrdersServiceError>;

    /// Archive an open order and remove it from the open set.
    async fn complete_order(
        &self,
        customer: CustomerId,
        order: OrderId,
    ) -> Result<CompletedOrder, OrdersServiceError>;

    /// Retrieve every archived order of a customer.
    async fn list_completed_orders(
        &self,
        customer: CustomerId,
    ) -> Result<Vec<CompletedOrder>, OrdersServiceError>;
}
