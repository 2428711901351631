//! Notifications
//!
//! Fire-and-forget messages to customers. Sending never fails the caller.

use mockall::automock;
use tracing::info;

use crate::domain::{
    customers::models::CustomerId, orders::models::OrderId, validation::Currency,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ReceiptIssued {
        customer: CustomerId,
        order: OrderId,
        payment_id: String,
        amount: u64,
        currency: Currency,
    },
    ReturnCompleted {
        customer: CustomerId,
        order: OrderId,
        refunded: bool,
    },
}

impl Notification {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ReceiptIssued { .. } => "receipt_issued",
            Self::ReturnCompleted { .. } => "return_completed",
        }
    }

    #[must_use]
    pub const fn customer(&self) -> CustomerId {
        match self {
            Self::ReceiptIssued { customer, .. } | Self::ReturnCompleted { customer, .. } => {
                *customer
            }
        }
    }
}

/// Writes notifications to the log instead of delivering them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            kind = notification.kind(),
            customer_id = %notification.customer(),
            ?notification,
            "sending notification"
        );
    }
}

#[automock]
pub trait Notifier: Send + Sync {
    /// Send a message. Delivery failures are the notifier's concern.
    fn notify(&self, notification: Notification);
}
