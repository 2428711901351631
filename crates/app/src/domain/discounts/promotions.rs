//! Promotion-code stage: at most one code, applied to the aggregate total.

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;

use crate::domain::{discounts::models::Ineligible, promotions::models::PromotionCode};

/// Why a supplied code left the total untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotApplicableReason {
    UnknownCode,
    OutsideWindow,
    Inactive,
    UsageLimitReached,
    NonPositiveTotal,
}

impl NotApplicableReason {
    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::UnknownCode => "unknown_code",
            Self::OutsideWindow => "outside_window",
            Self::Inactive => "inactive",
            Self::UsageLimitReached => "usage_limit_reached",
            Self::NonPositiveTotal => "non_positive_total",
        }
    }
}

impl Display for NotApplicableReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.to_str())
    }
}

impl From<Ineligible> for NotApplicableReason {
    fn from(reason: Ineligible) -> Self {
        match reason {
            Ineligible::OutsideWindow => Self::OutsideWindow,
            Ineligible::Inactive => Self::Inactive,
            Ineligible::UsageLimitReached => Self::UsageLimitReached,
        }
    }
}

/// Outcome of the promotion-code stage. Never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromotionOutcome {
    Applied {
        code: String,
        discount: u64,
        final_amount: u64,
    },
    NotApplicable {
        code: String,
        reason: NotApplicableReason,
    },
}

impl PromotionOutcome {
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Applied { code, .. } | Self::NotApplicable { code, .. } => code,
        }
    }

    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Total after this stage, given the total it was offered.
    #[must_use]
    pub fn final_amount(&self, total: u64) -> u64 {
        match self {
            Self::Applied { final_amount, .. } => *final_amount,
            Self::NotApplicable { .. } => total,
        }
    }
}

/// Apply `code` to `total`. `promotion` is the stored code, if any.
#[must_use]
pub fn apply_promotion(
    code: &str,
    promotion: Option<&PromotionCode>,
    total: u64,
    now: Timestamp,
) -> PromotionOutcome {
    let not_applicable = |reason| PromotionOutcome::NotApplicable {
        code: code.to_string(),
        reason,
    };

    if total == 0 {
        return not_applicable(NotApplicableReason::NonPositiveTotal);
    }

    let Some(promotion) = promotion else {
        return not_applicable(NotApplicableReason::UnknownCode);
    };

    if let Err(reason) = promotion.terms.check_eligibility(now) {
        return not_applicable(reason.into());
    }

    let discount = promotion.terms.discount.discount_for(total);

    PromotionOutcome::Applied {
        code: promotion.code.clone(),
        discount,
        final_amount: total - discount,
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use testresult::TestResult;

    use crate::domain::discounts::models::{DiscountStatus, DiscountTerms, SimpleDiscount};

    use super::*;

    fn promotion(now: Timestamp, discount: SimpleDiscount) -> PromotionCode {
        PromotionCode {
            code: "SAVE10".to_string(),
            terms: DiscountTerms {
                starts_at: now - SignedDuration::from_hours(1),
                ends_at: now + SignedDuration::from_hours(1),
                usage_limit: None,
                status: DiscountStatus::Active,
                discount,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn percentage_code_takes_share_of_total() -> TestResult {
        let now: Timestamp = "2026-06-01T09:00:00Z".parse()?;
        let code = promotion(now, SimpleDiscount::PercentageOff { percentage: 10 });

        let outcome = apply_promotion("SAVE10", Some(&code), 100_00, now);

        assert_eq!(
            outcome,
            PromotionOutcome::Applied {
                code: "SAVE10".to_string(),
                discount: 10_00,
                final_amount: 90_00,
            }
        );

        Ok(())
    }

    #[test]
    fn fixed_code_subtracts_amount_and_saturates() -> TestResult {
        let now: Timestamp = "2026-06-01T09:00:00Z".parse()?;
        let code = promotion(now, SimpleDiscount::FixedAmountOff { amount: 15_00 });

        assert_eq!(
            apply_promotion("SAVE10", Some(&code), 100_00, now).final_amount(100_00),
            85_00
        );
        assert_eq!(
            apply_promotion("SAVE10", Some(&code), 10_00, now).final_amount(10_00),
            0
        );

        Ok(())
    }

    #[test]
    fn expired_inactive_and_exhausted_codes_leave_total_unchanged() -> TestResult {
        let now: Timestamp = "2026-06-01T09:00:00Z".parse()?;
        let valid = promotion(now, SimpleDiscount::PercentageOff { percentage: 10 });

        let mut expired = valid.clone();
        expired.terms.ends_at = now - SignedDuration::from_mins(1);

        let mut inactive = valid.clone();
        inactive.terms.status = DiscountStatus::Inactive;

        let mut exhausted = valid;
        exhausted.terms.usage_limit = Some(0);

        for (code, reason) in [
            (expired, NotApplicableReason::OutsideWindow),
            (inactive, NotApplicableReason::Inactive),
            (exhausted, NotApplicableReason::UsageLimitReached),
        ] {
            let outcome = apply_promotion("SAVE10", Some(&code), 100_00, now);

            assert_eq!(
                outcome,
                PromotionOutcome::NotApplicable {
                    code: "SAVE10".to_string(),
                    reason,
                }
            );
            assert_eq!(outcome.final_amount(100_00), 100_00);
        }

        Ok(())
    }

    #[test]
    fn unknown_code_and_zero_total_are_not_applicable() -> TestResult {
        let now: Timestamp = "2026-06-01T09:00:00Z".parse()?;
        let code = promotion(now, SimpleDiscount::PercentageOff { percentage: 10 });

        let unknown = apply_promotion("NOPE", None, 100_00, now);
        let zero = apply_promotion("SAVE10", Some(&code), 0, now);

        assert!(
            matches!(
                unknown,
                PromotionOutcome::NotApplicable {
                    reason: NotApplicableReason::UnknownCode,
                    ..
                }
            ),
            "expected UnknownCode, got {unknown:?}"
        );
        assert!(
            matches!(
                zero,
                PromotionOutcome::NotApplicable {
                    reason: NotApplicableReason::NonPositiveTotal,
                    ..
                }
            ),
            "expected NonPositiveTotal, got {zero:?}"
        );
        assert_eq!(unknown.code(), "NOPE");

        Ok(())
    }
}
