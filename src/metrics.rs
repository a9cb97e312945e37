//! # Metrics
//!
//! Fire-and-forget counters for order state transitions. The kitchen emits exactly one event per
//! transition; a sink must never block or fail the caller.

use serde::Serialize;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// One order state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KitchenEvent {
    /// Handed to the kitchen by the order source.
    Submitted,
    /// Placed on its primary shelf.
    Placed,
    /// Placed on the Overflow shelf.
    Overflowed,
    /// Moved from Overflow to its primary shelf.
    Promoted,
    /// Removed by a courier while still fresh.
    PickedUp,
    /// Found with no value left and thrown away.
    Wasted,
    /// Thrown away to make room on a full Overflow shelf.
    Evicted,
    /// Rejected at arrival because it had no value to begin with.
    Discarded,
}

impl KitchenEvent {
    pub const ALL: [KitchenEvent; 8] = [
        KitchenEvent::Submitted,
        KitchenEvent::Placed,
        KitchenEvent::Overflowed,
        KitchenEvent::Promoted,
        KitchenEvent::PickedUp,
        KitchenEvent::Wasted,
        KitchenEvent::Evicted,
        KitchenEvent::Discarded,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl Display for KitchenEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KitchenEvent::Submitted => "submitted",
            KitchenEvent::Placed => "placed",
            KitchenEvent::Overflowed => "overflowed",
            KitchenEvent::Promoted => "promoted",
            KitchenEvent::PickedUp => "picked_up",
            KitchenEvent::Wasted => "wasted",
            KitchenEvent::Evicted => "evicted",
            KitchenEvent::Discarded => "discarded",
        };
        f.write_str(name)
    }
}

/// Receiver of kitchen events.
pub trait MetricsSink: Send + Sync {
    fn incr(&self, event: KitchenEvent);
}

/// In-process atomic counters.
#[derive(Debug, Default)]
pub struct KitchenMetrics {
    counters: [AtomicU64; 8],
}

impl KitchenMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, event: KitchenEvent) -> u64 {
        self.counters[event.index()].load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            submitted: self.count(KitchenEvent::Submitted),
            placed: self.count(KitchenEvent::Placed),
            overflowed: self.count(KitchenEvent::Overflowed),
            promoted: self.count(KitchenEvent::Promoted),
            picked_up: self.count(KitchenEvent::PickedUp),
            wasted: self.count(KitchenEvent::Wasted),
            evicted: self.count(KitchenEvent::Evicted),
            discarded: self.count(KitchenEvent::Discarded),
        }
    }
}

impl MetricsSink for KitchenMetrics {
    fn incr(&self, event: KitchenEvent) {
        let total = self.counters[event.index()].fetch_add(1, Ordering::Relaxed) + 1;
        trace!(%event, total, "metric");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn incr(&self, _event: KitchenEvent) {}
}

/// Point-in-time copy of [`KitchenMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub submitted: u64,
    pub placed: u64,
    pub overflowed: u64,
    pub promoted: u64,
    pub picked_up: u64,
    pub wasted: u64,
    pub evicted: u64,
    pub discarded: u64,
}

impl MetricsSnapshot {
    /// Orders that left the kitchen without being delivered.
    pub fn lost(&self) -> u64 {
        self.wasted + self.evicted + self.discarded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_are_independent() {
        let metrics = KitchenMetrics::new();
        metrics.incr(KitchenEvent::Submitted);
        metrics.incr(KitchenEvent::Submitted);
        metrics.incr(KitchenEvent::Evicted);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.submitted, 2);
        assert_eq!(snapshot.evicted, 1);
        assert_eq!(snapshot.picked_up, 0);
        assert_eq!(snapshot.lost(), 1);
    }

    #[test]
    fn test_every_event_has_a_counter() {
        let metrics = KitchenMetrics::new();
        for event in KitchenEvent::ALL {
            metrics.incr(event);
        }
        for event in KitchenEvent::ALL {
            assert_eq!(metrics.count(event), 1, "{}", event);
        }
    }
}
