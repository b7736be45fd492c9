//! Authentication

mod errors;
mod models;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::{IssuedSession, SessionMetadata, SessionUuid};
pub use service::*;
pub use token::*;
