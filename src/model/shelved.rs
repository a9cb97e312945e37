//! Placement records: which shelf holds an order and since when.

use crate::model::{Order, OrderId, Temperature};
use serde::Serialize;
use std::fmt::Display;
use std::ops::Add;
use std::time::Duration;

/// Logical simulation time in milliseconds since the kitchen opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0);

    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Seconds elapsed since `earlier`; zero if `earlier` is in the future.
    pub fn seconds_since(self, earlier: Timestamp) -> f64 {
        self.0.saturating_sub(earlier.0) as f64 / 1000.0
    }

    pub fn saturating_duration_since(self, earlier: Timestamp) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

impl Add<Duration> for Timestamp {
    type Output = Timestamp;

    fn add(self, rhs: Duration) -> Timestamp {
        let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
        Timestamp(self.0.saturating_add(millis))
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// A storage tier. Also serves as the shelf id: there is one shelf per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShelfKind {
    Primary(Temperature),
    Overflow,
}

impl ShelfKind {
    /// True if an order of `temperature` may be stored here.
    pub fn accepts(self, temperature: Temperature) -> bool {
        match self {
            ShelfKind::Primary(t) => t == temperature,
            ShelfKind::Overflow => true,
        }
    }
}

impl Display for ShelfKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShelfKind::Primary(t) => write!(f, "{}", t),
            ShelfKind::Overflow => f.write_str("overflow"),
        }
    }
}

/// An order sitting on a shelf.
///
/// The record belongs to the shelf that holds it. Moving an order to another shelf goes through
/// [`ShelvedOrder::relocate`], which produces a fresh record whose decay clock starts at the
/// move time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelvedOrder {
    pub id: OrderId,
    pub order: Order,
    pub placed_at: Timestamp,
    pub shelf: ShelfKind,
}

impl ShelvedOrder {
    pub fn new(id: OrderId, order: Order, shelf: ShelfKind, placed_at: Timestamp) -> Self {
        Self {
            id,
            order,
            placed_at,
            shelf,
        }
    }

    /// Consumes this record and returns one for `shelf` placed at `now`.
    pub fn relocate(self, shelf: ShelfKind, now: Timestamp) -> Self {
        Self {
            shelf,
            placed_at: now,
            ..self
        }
    }

    /// Seconds this order has spent on its current shelf.
    pub fn age_secs(&self, now: Timestamp) -> f64 {
        now.seconds_since(self.placed_at)
    }

    pub fn temperature(&self) -> Temperature {
        self.order.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocate_resets_placement_time() {
        let order = Order::new("Ramen", Temperature::Hot, 500, 0.45);
        let shelved = ShelvedOrder::new(OrderId(1), order, ShelfKind::Overflow, Timestamp::ZERO);
        let now = Timestamp::from_millis(4_000);
        assert_eq!(shelved.age_secs(now), 4.0);

        let moved = shelved.relocate(ShelfKind::Primary(Temperature::Hot), now);
        assert_eq!(moved.placed_at, now);
        assert_eq!(moved.shelf, ShelfKind::Primary(Temperature::Hot));
        assert_eq!(moved.age_secs(now), 0.0);
    }

    #[test]
    fn test_age_never_negative() {
        let order = Order::new("Pho", Temperature::Hot, 300, 0.3);
        let shelved = ShelvedOrder::new(
            OrderId(2),
            order,
            ShelfKind::Overflow,
            Timestamp::from_millis(5_000),
        );
        assert_eq!(shelved.age_secs(Timestamp::from_millis(1_000)), 0.0);
    }

    #[test]
    fn test_overflow_accepts_every_class() {
        for temperature in Temperature::ALL {
            assert!(ShelfKind::Overflow.accepts(temperature));
        }
        assert!(!ShelfKind::Primary(Temperature::Hot).accepts(Temperature::Cold));
    }
}
