//! Point-in-time query parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use storefront_app::domain::orders::{current_status, records::OrderRecord};

use crate::extensions::*;

pub(crate) trait PointInTimeExt {
    /// The `at` query parameter as a timestamp, if present.
    fn into_point_in_time(self) -> Result<Option<Timestamp>, StatusError>;
}

impl PointInTimeExt for QueryParam<String, false> {
    fn into_point_in_time(self) -> Result<Option<Timestamp>, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400("could not parse \"at\" query parameter")
    }
}

/// Shows `order` with the status it would have at `at`. Nothing is stored.
pub(crate) fn view_at(mut order: OrderRecord, at: Option<Timestamp>) -> OrderRecord {
    if let Some(at) = at {
        order.status = current_status(order.status, order.created_at, at);
    }

    order
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use storefront_app::domain::orders::{OrderStatus, records::OrderUuid};

    use crate::test_helpers::make_order;

    use super::*;

    #[test]
    fn view_at_projects_status_without_touching_timestamps() -> TestResult {
        let placed: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let order = make_order(OrderUuid::new(), OrderStatus::Pending, placed);
        let at = placed.checked_add(SignedDuration::from_hours(30))?;

        let viewed = view_at(order.clone(), Some(at));

        assert_eq!(viewed.status, OrderStatus::Packaging);
        assert_eq!(viewed.updated_at, order.updated_at);

        Ok(())
    }

    #[test]
    fn view_at_keeps_canceled_orders_canceled() -> TestResult {
        let placed: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let order = make_order(OrderUuid::new(), OrderStatus::Canceled, placed);
        let at = placed.checked_add(SignedDuration::from_hours(100))?;

        assert_eq!(view_at(order, Some(at)).status, OrderStatus::Canceled);

        Ok(())
    }

    #[test]
    fn absent_at_leaves_order_as_stored() -> TestResult {
        let placed: Timestamp = "2026-03-01T09:00:00Z".parse()?;
        let order = make_order(OrderUuid::new(), OrderStatus::Shipping, placed);

        assert_eq!(view_at(order, None).status, OrderStatus::Shipping);

        Ok(())
    }
}
