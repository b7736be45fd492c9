//! Carts

pub mod data;
pub mod errors;
pub mod records;
pub(crate) mod repositories;
pub mod service;
mod totals;

pub use errors::CartsServiceError;
pub use service::*;
pub use totals::compute_total;
