//! Discount term payloads shared by promotion codes and campaigns.

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use storefront_app::domain::discounts::{DiscountStatus, DiscountTerms, SimpleDiscount};

/// Discount amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum SimpleDiscountPayload {
    /// Whole percent between 0 and 100
    PercentageOff { percentage: u16 },

    /// Minor currency units
    FixedAmountOff { amount: u64 },
}

impl From<SimpleDiscountPayload> for SimpleDiscount {
    fn from(payload: SimpleDiscountPayload) -> Self {
        match payload {
            SimpleDiscountPayload::PercentageOff { percentage } => {
                SimpleDiscount::PercentageOff { percentage }
            }
            SimpleDiscountPayload::FixedAmountOff { amount } => {
                SimpleDiscount::FixedAmountOff { amount }
            }
        }
    }
}

impl From<SimpleDiscount> for SimpleDiscountPayload {
    fn from(discount: SimpleDiscount) -> Self {
        match discount {
            SimpleDiscount::PercentageOff { percentage } => Self::PercentageOff { percentage },
            SimpleDiscount::FixedAmountOff { amount } => Self::FixedAmountOff { amount },
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DiscountStatusPayload {
    Active,
    Inactive,
}

impl From<DiscountStatusPayload> for DiscountStatus {
    fn from(status: DiscountStatusPayload) -> Self {
        match status {
            DiscountStatusPayload::Active => DiscountStatus::Active,
            DiscountStatusPayload::Inactive => DiscountStatus::Inactive,
        }
    }
}

impl From<DiscountStatus> for DiscountStatusPayload {
    fn from(status: DiscountStatus) -> Self {
        match status {
            DiscountStatus::Active => Self::Active,
            DiscountStatus::Inactive => Self::Inactive,
        }
    }
}

/// Schedule, limits and amount of a discount rule
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct DiscountTermsPayload {
    /// First instant the rule applies (RFC 3339)
    pub starts_at: String,

    /// Last instant the rule applies (RFC 3339)
    pub ends_at: String,

    /// Remaining uses, unlimited when absent
    #[serde(default)]
    pub usage_limit: Option<u64>,

    pub status: DiscountStatusPayload,

    pub discount: SimpleDiscountPayload,
}

impl TryFrom<DiscountTermsPayload> for DiscountTerms {
    type Error = jiff::Error;

    fn try_from(payload: DiscountTermsPayload) -> Result<Self, Self::Error> {
        Ok(DiscountTerms {
            starts_at: payload.starts_at.parse::<Timestamp>()?,
            ends_at: payload.ends_at.parse::<Timestamp>()?,
            usage_limit: payload.usage_limit,
            status: payload.status.into(),
            discount: payload.discount.into(),
        })
    }
}

impl From<DiscountTerms> for DiscountTermsPayload {
    fn from(terms: DiscountTerms) -> Self {
        DiscountTermsPayload {
            starts_at: terms.starts_at.to_string(),
            ends_at: terms.ends_at.to_string(),
            usage_limit: terms.usage_limit,
            status: terms.status.into(),
            discount: terms.discount.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn terms_payload_parse() -> TestResult {
        let json = r#"
            {
                "starts_at": "2026-01-01T00:00:00Z",
                "ends_at": "2026-12-31T23:59:59Z",
                "status": "active",
                "discount": { "type": "percentage_off", "percentage": 10 }
            }
        "#;

        let payload: DiscountTermsPayload = serde_json::from_str(json)?;
        let terms = DiscountTerms::try_from(payload)?;

        assert_eq!(terms.starts_at, "2026-01-01T00:00:00Z".parse::<Timestamp>()?);
        assert_eq!(terms.usage_limit, None);
        assert_eq!(terms.status, DiscountStatus::Active);
        assert_eq!(
            terms.discount,
            SimpleDiscount::PercentageOff { percentage: 10 }
        );

        Ok(())
    }

    #[test]
    fn unparseable_timestamp_is_an_error() -> TestResult {
        let payload: DiscountTermsPayload = serde_json::from_str(
            r#"{
                "starts_at": "yesterday",
                "ends_at": "2026-12-31T23:59:59Z",
                "usage_limit": 3,
                "status": "inactive",
                "discount": { "type": "fixed_amount_off", "amount": 500 }
            }"#,
        )?;

        assert!(DiscountTerms::try_from(payload).is_err(), "expected parse failure");

        Ok(())
    }
}
