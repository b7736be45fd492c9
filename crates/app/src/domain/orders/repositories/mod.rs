//! Order Repositories

mod items;
mod orders;

pub(crate) use items::{PgOrderItemsRepository, ProductSnapshot};
pub(crate) use orders::PgOrdersRepository;
