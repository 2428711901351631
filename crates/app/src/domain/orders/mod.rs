//! Orders

pub(crate) mod assembler;
pub mod errors;
pub mod models;
pub(crate) mod repositories;
pub mod service;

pub use errors::{AssemblyError, OrdersServiceError};
pub use service::*;
