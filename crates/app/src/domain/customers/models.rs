//! Customer Models

use jiff::Timestamp;

use crate::ids::TypedId;

/// Customer Id
pub type CustomerId = TypedId<Customer>;

/// Customer Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub name: String,
    pub created_at: Timestamp,
}

/// New Customer Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub email: String,
    pub name: String,
}
