//! Catalog Handlers

pub(crate) mod home;
pub(crate) mod product;
