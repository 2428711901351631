//! Test Helpers

use jiff::{SignedDuration, Timestamp};

use crate::domain::discounts::models::{DiscountStatus, DiscountTerms, SimpleDiscount};

/// Active, unlimited terms whose window spans a day either side of now.
///
/// Bounds are whole seconds.
pub(crate) fn current_terms(discount: SimpleDiscount) -> DiscountTerms {
    let now = Timestamp::from_second(Timestamp::now().as_second()).unwrap_or(Timestamp::UNIX_EPOCH);

    DiscountTerms {
        starts_at: now - SignedDuration::from_hours(24),
        ends_at: now + SignedDuration::from_hours(24),
        usage_limit: None,
        status: DiscountStatus::Active,
        discount,
    }
}
