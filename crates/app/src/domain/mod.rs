//! Storefront Domain Concerns

pub mod campaigns;
pub mod carts;
pub mod customers;
pub mod discounts;
pub mod notifications;
pub mod orders;
pub mod payments;
pub mod products;
pub mod promotions;
pub mod returns;
pub mod upserted;
pub mod validation;
