//! Extension traits

mod depot;
mod point_in_time;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use point_in_time::{PointInTimeExt as _, view_at};
pub(crate) use result::ResultExt as _;
