//! Payment Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::{
    domain::{
        customers::models::CustomerId,
        discounts::{CampaignAccumulation, CampaignStage, PricedLine, PromotionOutcome},
        orders::models::OrderId,
        payments::gateway::PaymentMethod,
        validation::{Currency, ValidationError},
    },
    ids::TypedId,
};

pub type ReceiptId = TypedId<Receipt>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Approved,
}

impl PaymentStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(Self::Approved),
            other => Err(ValidationError::Status(other.to_string())),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

/// Receipt Model
///
/// Proof of one approved payment. Never modified once written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub id: ReceiptId,
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub payment_id: String,
    pub status: PaymentStatus,
    pub method: PaymentMethod,
    pub total_amount: u64,
    pub currency: Currency,
    pub description: String,
    pub paid_at: Timestamp,
}

/// Payment Request Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub currency: String,
    pub description: String,
    pub promotion_code: Option<String>,
    /// Falls back to the configured default method.
    pub method: Option<PaymentMethod>,
}

/// Priced preview of a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutQuote {
    pub lines: Vec<PricedLine>,
    pub campaigns: CampaignStage,
    pub promotion: Option<PromotionOutcome>,
    /// Amount that would be charged.
    pub total: u64,
}

impl CheckoutQuote {
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.campaigns.subtotal
    }

    /// Code to redeem when this quote is paid, if the promotion stage applied one.
    #[must_use]
    pub fn applied_promotion_code(&self) -> Option<&str> {
        self.promotion
            .as_ref()
            .filter(|outcome| outcome.is_applied())
            .map(PromotionOutcome::code)
    }
}

/// Checkout Settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub accumulation: CampaignAccumulation,
    pub default_method: PaymentMethod,
}
