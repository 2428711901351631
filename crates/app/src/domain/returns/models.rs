//! Return Request Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::domain::{
    customers::models::CustomerId,
    orders::models::OrderId,
    payments::gateway::{PaymentMethod, RefundConfirmation, RefundError},
    validation::ValidationError,
};

/// Return request state.
///
/// `Pending` moves to `Approved` or `Rejected`; only `Approved` moves on,
/// to the terminal `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl ReturnStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved | Self::Rejected) | (Self::Approved, Self::Completed)
        )
    }
}

impl FromStr for ReturnStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::Status(other.to_string())),
        }
    }
}

impl Display for ReturnStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

/// Return Request Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnRequest {
    pub customer_id: CustomerId,
    pub order_id: OrderId,
    pub reason: String,
    pub description: Option<String>,
    pub status: ReturnStatus,
    pub requested_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// New Return Request Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReturnRequest {
    pub order_id: OrderId,
    pub reason: String,
    pub description: Option<String>,
}

/// Refund to issue when a return completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundInput {
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefundOutcome {
    Refunded { confirmation: RefundConfirmation },
    Failed { reason: RefundError },
}

impl RefundOutcome {
    #[must_use]
    pub fn is_refunded(&self) -> bool {
        matches!(self, Self::Refunded { .. })
    }
}

/// A completed return together with what happened to its refund.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnCompletion {
    pub request: ReturnRequest,
    pub refund: RefundOutcome,
}
