//! Order Status

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::{SignedDuration, Timestamp};
use thiserror::Error;

/// Lifecycle stage of an order.
///
/// The non-canceled stages are derived from the time elapsed since the
/// order was placed; [`OrderStatus::Canceled`] is only ever set explicitly
/// and is never left again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OrderStatus {
    Pending,
    Processing,
    Packaging,
    Shipping,
    Delivered,
    Canceled,
}

/// Hours spent in each stage before the next one begins.
const STAGE_HOURS: i64 = 12;

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Packaging => "packaging",
            Self::Shipping => "shipping",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    #[must_use]
    pub const fn is_canceled(self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Stage reached after `elapsed` has passed since placement. Negative
    /// durations (clock skew) count as pending.
    #[must_use]
    pub fn from_elapsed(elapsed: SignedDuration) -> Self {
        let stage = SignedDuration::from_hours(STAGE_HOURS);

        if elapsed < stage {
            Self::Pending
        } else if elapsed < stage * 2 {
            Self::Processing
        } else if elapsed < stage * 3 {
            Self::Packaging
        } else if elapsed < stage * 4 {
            Self::Shipping
        } else {
            Self::Delivered
        }
    }
}

/// Derives the status an order should have at `now`.
#[must_use]
pub fn current_status(stored: OrderStatus, created_at: Timestamp, now: Timestamp) -> OrderStatus {
    if stored.is_canceled() {
        return OrderStatus::Canceled;
    }

    OrderStatus::from_elapsed(now.duration_since(created_at))
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "packaging" => Ok(Self::Packaging),
            "shipping" => Ok(Self::Shipping),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn placed() -> Timestamp {
        Timestamp::from_second(1_767_225_600).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    fn after(hours: i64, minutes: i64) -> Timestamp {
        placed()
            + SignedDuration::from_hours(hours)
            + SignedDuration::from_mins(minutes)
    }

    #[test]
    fn elapsed_time_maps_to_stage() {
        let cases = [
            (0, 0, OrderStatus::Pending),
            (11, 59, OrderStatus::Pending),
            (12, 0, OrderStatus::Processing),
            (23, 59, OrderStatus::Processing),
            (24, 0, OrderStatus::Packaging),
            (30, 0, OrderStatus::Packaging),
            (36, 0, OrderStatus::Shipping),
            (47, 59, OrderStatus::Shipping),
            (48, 0, OrderStatus::Delivered),
            (50, 0, OrderStatus::Delivered),
            (24 * 30, 0, OrderStatus::Delivered),
        ];

        for (hours, minutes, expected) in cases {
            let status = current_status(OrderStatus::Pending, placed(), after(hours, minutes));

            assert_eq!(status, expected, "at +{hours}h{minutes}m");
        }
    }

    #[test]
    fn now_before_creation_is_pending() {
        let status = current_status(OrderStatus::Pending, placed(), after(-5, 0));

        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn stored_stage_does_not_hold_back_derivation() {
        let status = current_status(OrderStatus::Delivered, placed(), after(1, 0));

        assert_eq!(status, OrderStatus::Pending);

        let status = current_status(OrderStatus::Pending, placed(), after(40, 0));

        assert_eq!(status, OrderStatus::Shipping);
    }

    #[test]
    fn canceled_is_absorbing() {
        for hours in [-1, 0, 13, 25, 37, 49, 1_000] {
            let status = current_status(OrderStatus::Canceled, placed(), after(hours, 0));

            assert_eq!(status, OrderStatus::Canceled, "at +{hours}h");
        }
    }

    #[test]
    fn derivation_never_yields_canceled() {
        for hours in -2..100 {
            let status = current_status(OrderStatus::Pending, placed(), after(hours, 0));

            assert_ne!(status, OrderStatus::Canceled);
        }
    }

    #[test]
    fn derivation_is_monotonic_in_time() {
        let mut previous = OrderStatus::Pending;

        for minutes in (0..(60 * 60)).step_by(15) {
            let status = current_status(OrderStatus::Pending, placed(), after(0, minutes));

            assert!(status >= previous, "{status} regressed from {previous}");

            previous = status;
        }
    }

    #[test]
    fn parses_stored_values() -> TestResult {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Packaging,
            OrderStatus::Shipping,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        Ok(())
    }

    #[test]
    fn rejects_unknown_value() {
        assert_eq!(
            "lost".parse::<OrderStatus>(),
            Err(UnknownOrderStatus("lost".to_string()))
        );
    }
}
