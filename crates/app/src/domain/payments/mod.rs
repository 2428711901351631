//! Payments
//!
//! Checkout: price the cart, charge through the gateway, assemble the order
//! and record a receipt.

pub mod errors;
pub mod gateway;
pub mod models;
pub(crate) mod pricing;
pub(crate) mod repository;
pub mod service;

pub use errors::PaymentsServiceError;
pub use gateway::{
    ChargeRequest, MockPaymentGateway, PaymentConfirmation, PaymentDeclined, PaymentGateway,
    PaymentMethod, RefundConfirmation, RefundError, RefundRequest, SimulatedGateway,
};
pub use service::*;
