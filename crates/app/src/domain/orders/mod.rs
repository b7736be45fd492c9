//! Orders

pub mod data;
pub mod delivery;
pub mod errors;
pub mod records;
mod repositories;
pub mod service;
pub mod status;

pub use errors::{OrderValidationError, OrdersServiceError};
pub use service::*;
pub use status::{OrderStatus, current_status};
