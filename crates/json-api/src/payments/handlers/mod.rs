//! Payment Handlers

pub(crate) mod create;
pub(crate) mod quote;
pub(crate) mod receipts;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use storefront_app::domain::{
        payments::{
            PaymentMethod,
            models::{PaymentStatus, Receipt},
        },
        validation::{Currency, ValidationError},
    };

    pub(super) fn make_receipt(
        customer: i64,
        order: i64,
        total_amount: u64,
    ) -> Result<Receipt, ValidationError> {
        Ok(Receipt {
            id: order.into(),
            order_id: order.into(),
            customer_id: customer.into(),
            payment_id: format!("PAY-{order}"),
            status: PaymentStatus::Approved,
            method: PaymentMethod::PayPal,
            total_amount,
            currency: Currency::parse("USD")?,
            description: "Order payment".to_string(),
            paid_at: Timestamp::UNIX_EPOCH,
        })
    }
}
