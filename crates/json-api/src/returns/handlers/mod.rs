//! Return Handlers

pub(crate) mod complete;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod status;
