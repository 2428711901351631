//! Upsert results.

/// Whether an upsert inserted a new row or replaced an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        match self {
            Self::Created(value) | Self::Updated(value) => value,
        }
    }

    #[must_use]
    pub fn as_inner(&self) -> &T {
        match self {
            Self::Created(value) | Self::Updated(value) => value,
        }
    }
}
