//! Order Handlers

pub(crate) mod clear;
pub(crate) mod complete;
pub(crate) mod completed;
pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
