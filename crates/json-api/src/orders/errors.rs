//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::orders::{AssemblyError, OrdersServiceError};

/// Shared by every endpoint that turns a cart into an order.
pub(crate) fn assembly_status_error(error: AssemblyError) -> StatusError {
    match error {
        AssemblyError::CustomerNotFound(customer) => {
            StatusError::not_found().brief(format!("Customer {customer} not found"))
        }
        AssemblyError::EmptyCart => StatusError::unprocessable_entity().brief("Cart is empty"),
        AssemblyError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        error @ AssemblyError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        AssemblyError::AmountOverflow => {
            StatusError::unprocessable_entity().brief("Order total is too large")
        }
        AssemblyError::Sql(source) => {
            error!("order assembly storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::Assembly(source) => assembly_status_error(source),
        OrdersServiceError::Validation(source) => {
            StatusError::bad_request().brief(source.to_string())
        }
        OrdersServiceError::CustomerNotFound(customer) => {
            StatusError::not_found().brief(format!("Customer {customer} not found"))
        }
        OrdersServiceError::ProductNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} not found"))
        }
        OrdersServiceError::OrderNotFound(order) => {
            StatusError::not_found().brief(format!("Order {order} not found"))
        }
        OrdersServiceError::NoOrders => StatusError::not_found().brief("Customer has no orders"),
        OrdersServiceError::ItemNotFound(product) => {
            StatusError::not_found().brief(format!("Product {product} is not part of the order"))
        }
        error @ OrdersServiceError::InsufficientStock { .. } => {
            StatusError::conflict().brief(error.to_string())
        }
        OrdersServiceError::IntegrityViolation(order) => {
            error!(order = %order, "archived order could not be removed from the open set");

            StatusError::internal_server_error()
        }
        OrdersServiceError::AlreadyExists => StatusError::conflict().brief("Order already exists"),
        OrdersServiceError::InvalidReference
        | OrdersServiceError::MissingRequiredData
        | OrdersServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::NotFound => StatusError::not_found(),
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
