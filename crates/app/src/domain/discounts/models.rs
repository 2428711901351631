//! Discount Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;

use crate::domain::validation::ValidationError;

/// Simple Discount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleDiscount {
    PercentageOff { percentage: u16 },
    FixedAmountOff { amount: u64 },
}

impl SimpleDiscount {
    /// Build a discount from its stored type name and value.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown type or a percentage above 100.
    pub fn from_parts(kind: &str, value: u64) -> Result<Self, ValidationError> {
        match kind {
            "percentage" => u16::try_from(value)
                .ok()
                .filter(|percentage| *percentage <= 100)
                .map(|percentage| Self::PercentageOff { percentage })
                .ok_or(ValidationError::Percentage(value)),
            "fixed" => Ok(Self::FixedAmountOff { amount: value }),
            other => Err(ValidationError::DiscountKind(other.to_string())),
        }
    }

    #[must_use]
    pub const fn to_str(&self) -> &'static str {
        match self {
            Self::PercentageOff { .. } => "percentage",
            Self::FixedAmountOff { .. } => "fixed",
        }
    }

    #[must_use]
    pub fn value(&self) -> u64 {
        match self {
            Self::PercentageOff { percentage } => u64::from(*percentage),
            Self::FixedAmountOff { amount } => *amount,
        }
    }

    /// Amount taken off `base`, never more than `base` itself.
    ///
    /// Percentages truncate toward zero.
    #[must_use]
    pub fn discount_for(&self, base: u64) -> u64 {
        match self {
            Self::PercentageOff { percentage } => {
                let discount = u128::from(base) * u128::from(*percentage) / 100;

                u64::try_from(discount).unwrap_or(base).min(base)
            }
            Self::FixedAmountOff { amount } => (*amount).min(base),
        }
    }
}

/// Whether a rule may currently be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountStatus {
    Active,
    Inactive,
}

impl DiscountStatus {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl FromStr for DiscountStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(ValidationError::Status(other.to_string())),
        }
    }
}

/// Why an otherwise known rule cannot be applied right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    OutsideWindow,
    Inactive,
    UsageLimitReached,
}

impl Display for Ineligible {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::OutsideWindow => "outside its date window",
            Self::Inactive => "inactive",
            Self::UsageLimitReached => "usage limit reached",
        })
    }
}

/// Schedule, limits and amount shared by promotion codes and campaigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountTerms {
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    /// Remaining uses; `None` is unlimited.
    pub usage_limit: Option<u64>,
    pub status: DiscountStatus,
    pub discount: SimpleDiscount,
}

impl DiscountTerms {
    /// Checks the window first, then status, then remaining uses.
    ///
    /// # Errors
    ///
    /// Returns the first reason the rule cannot be applied at `now`.
    pub fn check_eligibility(&self, now: Timestamp) -> Result<(), Ineligible> {
        if now < self.starts_at || now > self.ends_at {
            return Err(Ineligible::OutsideWindow);
        }

        if self.status == DiscountStatus::Inactive {
            return Err(Ineligible::Inactive);
        }

        if self.usage_limit == Some(0) {
            return Err(Ineligible::UsageLimitReached);
        }

        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error when the window is inverted or a percentage exceeds 100.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.starts_at > self.ends_at {
            return Err(ValidationError::DateRange);
        }

        if let SimpleDiscount::PercentageOff { percentage } = self.discount
            && percentage > 100
        {
            return Err(ValidationError::Percentage(u64::from(percentage)));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use super::*;

    fn terms(now: Timestamp) -> DiscountTerms {
        DiscountTerms {
            starts_at: now - SignedDuration::from_hours(1),
            ends_at: now + SignedDuration::from_hours(1),
            usage_limit: None,
            status: DiscountStatus::Active,
            discount: SimpleDiscount::PercentageOff { percentage: 10 },
        }
    }

    #[test]
    fn percentage_truncates_toward_zero() {
        let discount = SimpleDiscount::PercentageOff { percentage: 15 };

        assert_eq!(discount.discount_for(100_00), 15_00);
        assert_eq!(discount.discount_for(99), 14);
        assert_eq!(discount.discount_for(0), 0);
    }

    #[test]
    fn fixed_discount_is_capped_at_base() {
        let discount = SimpleDiscount::FixedAmountOff { amount: 5_00 };

        assert_eq!(discount.discount_for(20_00), 5_00);
        assert_eq!(discount.discount_for(3_00), 3_00);
    }

    #[test]
    fn from_parts_rejects_unknown_kind_and_large_percentages() {
        assert_eq!(
            SimpleDiscount::from_parts("percentage", 100),
            Ok(SimpleDiscount::PercentageOff { percentage: 100 })
        );
        assert_eq!(
            SimpleDiscount::from_parts("percentage", 101),
            Err(ValidationError::Percentage(101))
        );
        assert_eq!(
            SimpleDiscount::from_parts("bogo", 1),
            Err(ValidationError::DiscountKind("bogo".to_string()))
        );
    }

    #[test]
    fn eligibility_checks_window_status_and_usage() -> TestResult {
        let now: Timestamp = "2026-05-01T12:00:00Z".parse()?;
        let base = terms(now);

        assert_eq!(base.check_eligibility(now), Ok(()));
        assert_eq!(
            base.check_eligibility(now + SignedDuration::from_hours(2)),
            Err(Ineligible::OutsideWindow)
        );

        let inactive = DiscountTerms {
            status: DiscountStatus::Inactive,
            ..base.clone()
        };

        assert_eq!(inactive.check_eligibility(now), Err(Ineligible::Inactive));

        let exhausted = DiscountTerms {
            usage_limit: Some(0),
            ..base.clone()
        };

        assert_eq!(
            exhausted.check_eligibility(now),
            Err(Ineligible::UsageLimitReached)
        );

        let one_left = DiscountTerms {
            usage_limit: Some(1),
            ..base
        };

        assert_eq!(one_left.check_eligibility(now), Ok(()));

        Ok(())
    }

    #[test]
    fn window_bounds_are_inclusive() -> TestResult {
        let now: Timestamp = "2026-05-01T12:00:00Z".parse()?;
        let base = terms(now);

        assert_eq!(base.check_eligibility(base.starts_at), Ok(()));
        assert_eq!(base.check_eligibility(base.ends_at), Ok(()));

        Ok(())
    }

    #[test]
    fn inverted_window_fails_validation() -> TestResult {
        let now: Timestamp = "2026-05-01T12:00:00Z".parse()?;

        let inverted = DiscountTerms {
            starts_at: now,
            ends_at: now - SignedDuration::from_secs(1),
            ..terms(now)
        };

        assert_eq!(inverted.validate(), Err(ValidationError::DateRange));

        Ok(())
    }
}
