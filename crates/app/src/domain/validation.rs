//! Input validation shared by the domain services.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use thiserror::Error;

/// Minimum length of a payment or refund description.
pub const MIN_DESCRIPTION_LEN: usize = 8;

/// Input rejected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },

    #[error("{field} must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    #[error("{0:?} is not a three-letter currency code")]
    Currency(String),

    #[error("{0:?} is not a valid email address")]
    Email(String),

    #[error("percentage must be between 0 and 100, got {0}")]
    Percentage(u64),

    #[error("start date must not be after end date")]
    DateRange,

    #[error("{0:?} is not a discount type, expected \"fixed\" or \"percentage\"")]
    DiscountKind(String),

    #[error("{0:?} is not a status")]
    Status(String),

    #[error("{0:?} is not a payment method, expected \"paypal\" or \"credit_card\"")]
    PaymentMethod(String),
}

/// ISO-4217 style currency code, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Currency(String);

impl Currency {
    /// Parse a three-letter alphabetic code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Currency`] for anything else.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let trimmed = code.trim();

        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::Currency(code.to_string()));
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

pub(crate) fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    Ok(())
}

pub(crate) fn require_description(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_DESCRIPTION_LEN {
        return Err(ValidationError::TooShort {
            field: "description",
            min: MIN_DESCRIPTION_LEN,
        });
    }

    Ok(())
}
