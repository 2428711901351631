//! Checkout Config

use clap::{Args, ValueEnum};

use storefront_app::domain::{
    discounts::CampaignAccumulation,
    payments::{PaymentMethod, models::CheckoutSettings},
};

/// How campaign discounts add up across cart lines.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Accumulation {
    /// Every campaign is taken from the line's own subtotal.
    Independent,

    /// Every campaign is taken from the running order total.
    Compounding,
}

/// Payment method used when a request does not name one.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DefaultPaymentMethod {
    Paypal,

    #[value(name = "credit_card")]
    CreditCard,
}

/// Checkout settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Campaign accumulation (independent, compounding)
    #[arg(
        long,
        env = "CAMPAIGN_ACCUMULATION",
        value_enum,
        default_value_t = Accumulation::Independent
    )]
    pub campaign_accumulation: Accumulation,

    /// Default payment method (paypal, credit_card)
    #[arg(
        long,
        env = "PAYMENT_METHOD",
        value_enum,
        default_value_t = DefaultPaymentMethod::Paypal
    )]
    pub payment_method: DefaultPaymentMethod,
}

impl CheckoutConfig {
    #[must_use]
    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            accumulation: match self.campaign_accumulation {
                Accumulation::Independent => CampaignAccumulation::Independent,
                Accumulation::Compounding => CampaignAccumulation::Compounding,
            },
            default_method: match self.payment_method {
                DefaultPaymentMethod::Paypal => PaymentMethod::PayPal,
                DefaultPaymentMethod::CreditCard => PaymentMethod::CreditCard,
            },
        }
    }
}
