//! Delivery Estimates

use std::sync::{Mutex, PoisonError};

use jiff::{SignedDuration, Timestamp};
use mockall::automock;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Fewest whole days an order spends in transit.
pub const MIN_TRANSIT_DAYS: u8 = 2;

/// Most whole days an order spends in transit.
pub const MAX_TRANSIT_DAYS: u8 = 3;

/// Source of the transit time drawn once per order.
#[automock]
pub trait TransitDays: Send + Sync {
    /// Whole days between placement and expected delivery.
    fn draw(&self) -> u8;
}

/// Uniform draw over the transit range.
#[derive(Debug)]
pub struct RandomTransitDays {
    rng: Mutex<StdRng>,
}

impl RandomTransitDays {
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomTransitDays {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TransitDays for RandomTransitDays {
    fn draw(&self) -> u8 {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(MIN_TRANSIT_DAYS..=MAX_TRANSIT_DAYS)
    }
}

/// Expected delivery for an order placed at `created_at`. Draws outside the
/// transit range are clamped into it. `None` only when the result would
/// overflow the supported timestamp range.
#[must_use]
pub fn estimate_delivery(created_at: Timestamp, transit_days: u8) -> Option<Timestamp> {
    let days = transit_days.clamp(MIN_TRANSIT_DAYS, MAX_TRANSIT_DAYS);

    created_at
        .checked_add(SignedDuration::from_hours(24 * i64::from(days)))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed() -> Timestamp {
        Timestamp::from_second(1_767_225_600).unwrap_or(Timestamp::UNIX_EPOCH)
    }

    #[test]
    fn seeded_draws_stay_in_range() {
        let source = RandomTransitDays::seeded(7);

        for _ in 0..1_000 {
            let days = source.draw();

            assert!(
                (MIN_TRANSIT_DAYS..=MAX_TRANSIT_DAYS).contains(&days),
                "drew {days} days"
            );
        }
    }

    #[test]
    fn seeded_draws_cover_both_values() {
        let source = RandomTransitDays::seeded(42);
        let draws: Vec<u8> = (0..200).map(|_| source.draw()).collect();

        assert!(draws.contains(&MIN_TRANSIT_DAYS));
        assert!(draws.contains(&MAX_TRANSIT_DAYS));
    }

    #[test]
    fn same_seed_yields_same_sequence() {
        let a = RandomTransitDays::seeded(99);
        let b = RandomTransitDays::seeded(99);

        let first: Vec<u8> = (0..20).map(|_| a.draw()).collect();
        let second: Vec<u8> = (0..20).map(|_| b.draw()).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn estimate_adds_whole_days() {
        let two = estimate_delivery(placed(), 2).map(|at| at.duration_since(placed()));
        let three = estimate_delivery(placed(), 3).map(|at| at.duration_since(placed()));

        assert_eq!(two, Some(SignedDuration::from_hours(48)));
        assert_eq!(three, Some(SignedDuration::from_hours(72)));
    }

    #[test]
    fn estimate_clamps_out_of_range_draws() {
        let low = estimate_delivery(placed(), 0).map(|at| at.duration_since(placed()));
        let high = estimate_delivery(placed(), 9).map(|at| at.duration_since(placed()));

        assert_eq!(low, Some(SignedDuration::from_hours(48)));
        assert_eq!(high, Some(SignedDuration::from_hours(72)));
    }

    #[test]
    fn estimate_near_the_end_of_time_is_none() {
        assert_eq!(estimate_delivery(Timestamp::MAX, 2), None);
    }
}
