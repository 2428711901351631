//! Order Assembler
//!
//! Turns a customer's cart into an order inside a caller-owned transaction.

use jiff::Timestamp;
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::domain::{
    carts::repository::SqliteCartItemsRepository,
    customers::{models::CustomerId, repository::SqliteCustomersRepository},
    orders::{
        errors::AssemblyError,
        models::{Order, OrderItem},
        repositories::SqliteOrdersRepository,
    },
    products::repository::SqliteProductsRepository,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct OrderAssembler {
    customers: SqliteCustomersRepository,
    products: SqliteProductsRepository,
    cart_items: SqliteCartItemsRepository,
    orders: SqliteOrdersRepository,
}

impl OrderAssembler {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reserve stock for every cart line, persist the order and empty the cart.
    ///
    /// Lines are processed in cart order. Stock is taken with a conditional
    /// decrement, so the caller must roll back `tx` on error to release the
    /// units already taken for earlier lines.
    pub(crate) async fn assemble(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: CustomerId,
        now: Timestamp,
    ) -> Result<Order, AssemblyError> {
        self.customers
            .find_customer(tx, customer)
            .await?
            .ok_or(AssemblyError::CustomerNotFound(customer))?;

        let cart = self.cart_items.get_cart_items(tx, customer).await?;

        if cart.is_empty() {
            return Err(AssemblyError::EmptyCart);
        }

        let mut items = Vec::with_capacity(cart.len());
        let mut total = 0_u64;

        for line in cart {
            let product = self
                .products
                .find_product(tx, line.product_id)
                .await?
                .ok_or(AssemblyError::ProductNotFound(line.product_id))?;

            total = product
                .price
                .checked_mul(line.quantity)
                .and_then(|subtotal| total.checked_add(subtotal))
                .ok_or(AssemblyError::AmountOverflow)?;

            let insufficient = AssemblyError::InsufficientStock {
                product: product.id,
                requested: line.quantity,
                available: product.stock,
            };

            if line.quantity > product.stock {
                return Err(insufficient);
            }

            let rows_affected = self
                .products
                .decrement_stock(tx, product.id, line.quantity, now)
                .await?;

            if rows_affected == 0 {
                return Err(insufficient);
            }

            items.push(OrderItem {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        let order = self.orders.create_order(tx, customer, items, now).await?;

        let cleared = self.cart_items.clear_cart(tx, customer).await?;

        debug!(order_id = %order.id, total, cleared, "assembled order");

        Ok(order)
    }
}
