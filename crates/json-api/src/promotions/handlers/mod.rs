//! Promotion Code Handlers

pub(crate) mod clear;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod upsert;
