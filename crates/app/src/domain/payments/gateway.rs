//! Simulated payment gateway.
//!
//! Deterministic stand-in for a payment provider: one decision per call,
//! no network, no retries.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::validation::{Currency, ValidationError};

/// Payment Method
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    #[default]
    PayPal,
    CreditCard,
}

impl PaymentMethod {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::PayPal => "paypal",
            Self::CreditCard => "credit_card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "paypal" => Ok(Self::PayPal),
            "credit_card" => Ok(Self::CreditCard),
            other => Err(ValidationError::PaymentMethod(other.to_string())),
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount: u64,
    pub currency: Currency,
    pub description: String,
    pub method: PaymentMethod,
}

/// Approved charge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub payment_id: String,
    pub method: PaymentMethod,
    pub amount: u64,
    pub currency: Currency,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentDeclined {
    #[error("cannot charge a zero amount")]
    ZeroAmount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundRequest {
    /// Signed so that negative refunds can be refused rather than unrepresentable.
    pub amount: i64,
    pub currency: Currency,
    pub description: String,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefundConfirmation {
    pub refund_id: String,
    pub method: PaymentMethod,
    pub amount: u64,
    pub currency: Currency,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RefundError {
    #[error("cannot refund a zero amount")]
    ZeroAmount,

    #[error("refund amount {0} is negative")]
    NegativeAmount(i64),
}

/// Simulated Gateway
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedGateway;

impl SimulatedGateway {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PaymentGateway for SimulatedGateway {
    fn charge(&self, request: &ChargeRequest) -> Result<PaymentConfirmation, PaymentDeclined> {
        if request.amount == 0 {
            return Err(PaymentDeclined::ZeroAmount);
        }

        Ok(PaymentConfirmation {
            payment_id: format!("PAY-{}", Uuid::now_v7()),
            method: request.method,
            amount: request.amount,
            currency: request.currency.clone(),
            description: request.description.clone(),
        })
    }

    fn refund(&self, request: &RefundRequest) -> Result<RefundConfirmation, RefundError> {
        let amount = match u64::try_from(request.amount) {
            Ok(0) => return Err(RefundError::ZeroAmount),
            Ok(amount) => amount,
            Err(_) => return Err(RefundError::NegativeAmount(request.amount)),
        };

        Ok(RefundConfirmation {
            refund_id: format!("REF-{}", Uuid::now_v7()),
            method: request.method,
            amount,
            currency: request.currency.clone(),
            description: request.description.clone(),
        })
    }
}

#[automock]
pub trait PaymentGateway: Send + Sync {
    /// Charge the customer. Approves every positive amount.
    fn charge(&self, request: &ChargeRequest) -> Result<PaymentConfirmation, PaymentDeclined>;

    /// Pay money back. Approves every positive amount.
    fn refund(&self, request: &RefundRequest) -> Result<RefundConfirmation, RefundError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn positive_charges_are_approved_with_fresh_ids() -> TestResult {
        let gateway = SimulatedGateway::new();

        let request = ChargeRequest {
            amount: 12_34,
            currency: Currency::parse("usd")?,
            description: "two books".to_string(),
            method: PaymentMethod::CreditCard,
        };

        let first = gateway.charge(&request)?;
        let second = gateway.charge(&request)?;

        assert!(first.payment_id.starts_with("PAY-"));
        assert_ne!(first.payment_id, second.payment_id);
        assert_eq!(first.amount, 12_34);
        assert_eq!(first.currency.as_str(), "USD");
        assert_eq!(first.method, PaymentMethod::CreditCard);

        Ok(())
    }

    #[test]
    fn zero_charge_is_declined() -> TestResult {
        let result = SimulatedGateway::new().charge(&ChargeRequest {
            amount: 0,
            currency: Currency::parse("EUR")?,
            description: "nothing at all".to_string(),
            method: PaymentMethod::PayPal,
        });

        assert_eq!(result, Err(PaymentDeclined::ZeroAmount));

        Ok(())
    }

    #[test]
    fn refunds_follow_the_sign_of_the_amount() -> TestResult {
        let gateway = SimulatedGateway::new();
        let currency = Currency::parse("GBP")?;

        let refund = |amount| {
            gateway.refund(&RefundRequest {
                amount,
                currency: currency.clone(),
                description: "damaged item".to_string(),
                method: PaymentMethod::PayPal,
            })
        };

        assert!(matches!(refund(5_00), Ok(confirmation) if confirmation.amount == 5_00));
        assert_eq!(refund(0), Err(RefundError::ZeroAmount));
        assert_eq!(refund(-1), Err(RefundError::NegativeAmount(-1)));

        Ok(())
    }

    #[test]
    fn payment_methods_parse_from_wire_names() {
        assert_eq!("paypal".parse::<PaymentMethod>(), Ok(PaymentMethod::PayPal));
        assert_eq!("credit_card".parse::<PaymentMethod>(), Ok(PaymentMethod::CreditCard));
        assert_eq!(
            "cash".parse::<PaymentMethod>(),
            Err(ValidationError::PaymentMethod("cash".to_string()))
        );
    }
}
