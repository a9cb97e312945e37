//! Placement, promotion and eviction across all shelves.

use crate::config::ShelfConfig;
use crate::metrics::{KitchenEvent, MetricsSink};
use crate::model::{Order, OrderId, ShelfKind, ShelvedOrder, Temperature, Timestamp};
use crate::shelf::Shelf;
use crate::value::{is_wasted, value};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Where a submitted order ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Placement {
    Primary(Temperature),
    Overflow,
    /// Had no value at arrival and was never shelved.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub id: OrderId,
    pub placement: Placement,
}

impl SubmitOutcome {
    pub fn is_shelved(&self) -> bool {
        self.placement != Placement::Discarded
    }
}

/// Result of a courier arriving for an order.
#[derive(Debug, Clone, PartialEq)]
pub enum PickupOutcome {
    Delivered { order: ShelvedOrder, value: f64 },
    /// Still on a shelf, but with no value left.
    Wasted(ShelvedOrder),
    /// Already gone: swept as waste or evicted before the courier came.
    Missing,
}

/// Current value of one shelved order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderValue {
    pub id: OrderId,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfContents {
    pub kind: ShelfKind,
    pub capacity: usize,
    pub orders: Vec<OrderValue>,
}

/// Every shelf and its orders at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelfSnapshot {
    pub at: Timestamp,
    pub shelves: Vec<ShelfContents>,
}

impl ShelfSnapshot {
    pub fn len(&self) -> usize {
        self.shelves.iter().map(|s| s.orders.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shelf(&self, kind: ShelfKind) -> Option<&ShelfContents> {
        self.shelves.iter().find(|s| s.kind == kind)
    }
}

/// The kitchen's storage: one primary shelf per temperature plus Overflow.
///
/// Every public method is a complete policy decision. The set is meant to be owned by a single
/// writer (see [`crate::shelf_set`]), so no method leaves a shelf over capacity or an order on
/// two shelves when it returns.
pub struct ShelfSet {
    primaries: [Shelf; 3],
    overflow: Shelf,
    next_id: u64,
    metrics: Arc<dyn MetricsSink>,
}

impl std::fmt::Debug for ShelfSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShelfSet")
            .field("primaries", &self.primaries)
            .field("overflow", &self.overflow)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl ShelfSet {
    pub fn new(config: &ShelfConfig, metrics: Arc<dyn MetricsSink>) -> Self {
        Self {
            primaries: Temperature::ALL.map(|t| Shelf::primary(t, config.capacity_for(t))),
            overflow: Shelf::overflow(config.overflow, config.overflow_decay_multiplier),
            next_id: 1,
            metrics,
        }
    }

    pub fn primary(&self, temperature: Temperature) -> &Shelf {
        &self.primaries[temperature.index()]
    }

    fn primary_mut(&mut self, temperature: Temperature) -> &mut Shelf {
        &mut self.primaries[temperature.index()]
    }

    pub fn overflow(&self) -> &Shelf {
        &self.overflow
    }

    fn shelf(&self, kind: ShelfKind) -> &Shelf {
        match kind {
            ShelfKind::Primary(t) => self.primary(t),
            ShelfKind::Overflow => &self.overflow,
        }
    }

    fn shelf_mut(&mut self, kind: ShelfKind) -> &mut Shelf {
        match kind {
            ShelfKind::Primary(t) => self.primary_mut(t),
            ShelfKind::Overflow => &mut self.overflow,
        }
    }

    fn shelves(&self) -> impl Iterator<Item = &Shelf> {
        self.primaries.iter().chain(std::iter::once(&self.overflow))
    }

    pub fn len(&self) -> usize {
        self.shelves().map(Shelf::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves().all(Shelf::is_empty)
    }

    /// Total capacity across every shelf.
    pub fn capacity(&self) -> usize {
        self.shelves().map(Shelf::capacity).sum()
    }

    /// The shelf currently holding `id`.
    pub fn locate(&self, id: OrderId) -> Option<ShelfKind> {
        self.shelves().find(|s| s.contains(id)).map(Shelf::kind)
    }

    /// Current value of an order, measured on the shelf it sits on.
    pub fn value_of(&self, shelved: &ShelvedOrder, now: Timestamp) -> f64 {
        self.shelf(shelved.shelf).value_of(shelved, now)
    }

    fn allocate_id(&mut self) -> OrderId {
        let id = OrderId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Accepts a new order.
    ///
    /// 1. Sweeps waste from the order's primary shelf and from Overflow.
    /// 2. Discards the order if it has no value even when fresh.
    /// 3. Places it on its primary shelf if there is room, else on Overflow if there is room.
    /// 4. With Overflow full, rescues the freshest Overflow order whose primary shelf has room,
    ///    or failing that evicts the Overflow order with the lowest value, and places the new
    ///    order on Overflow.
    pub fn submit(&mut self, order: Order, now: Timestamp) -> SubmitOutcome {
        let id = self.allocate_id();
        let temperature = order.temperature;
        self.sweep_shelf(ShelfKind::Primary(temperature), now);
        self.sweep_shelf(ShelfKind::Overflow, now);

        if is_wasted(value(&order, order.decay_rate, 0.0)) {
            info!(%id, name = %order.name, "Discarded on arrival");
            self.metrics.incr(KitchenEvent::Discarded);
            return SubmitOutcome {
                id,
                placement: Placement::Discarded,
            };
        }

        let shelved = ShelvedOrder::new(id, order, ShelfKind::Primary(temperature), now);
        let shelved = match self.primary_mut(temperature).add(shelved) {
            Ok(()) => {
                info!(%id, %temperature, "Placed");
                self.metrics.incr(KitchenEvent::Placed);
                return SubmitOutcome {
                    id,
                    placement: Placement::Primary(temperature),
                };
            }
            Err(rejected) => rejected.relocate(ShelfKind::Overflow, now),
        };

        if let Err(rejected) = self.overflow.add(shelved) {
            self.overflow.force_add(rejected);
            self.relieve_overflow(id, now);
        }
        info!(%id, %temperature, "Overflowed");
        self.metrics.incr(KitchenEvent::Overflowed);
        SubmitOutcome {
            id,
            placement: Placement::Overflow,
        }
    }

    /// Brings a transiently over-full Overflow shelf back to capacity, first by promotion and
    /// otherwise by eviction. `newcomer` is only evicted when no other order is there.
    fn relieve_overflow(&mut self, newcomer: OrderId, now: Timestamp) {
        let primaries = &self.primaries;
        let rescue = self
            .overflow
            .highest_value_where(now, |o| {
                o.id != newcomer && primaries[o.temperature().index()].has_room()
            })
            .map(|o| o.id);
        if let Some(shelved) = rescue.and_then(|id| self.overflow.remove(id)) {
            self.move_to_primary(shelved, now);
            return;
        }

        // With nothing else on Overflow the newcomer itself has to go.
        let victim = self
            .overflow
            .lowest_value_where(now, |o| o.id != newcomer)
            .map(|o| o.id)
            .or_else(|| self.overflow.contains(newcomer).then_some(newcomer));
        if let Some(evicted) = victim.and_then(|id| self.overflow.remove(id)) {
            warn!(id = %evicted.id, name = %evicted.order.name, "Evicted from overflow");
            self.metrics.incr(KitchenEvent::Evicted);
        }
    }

    /// Moves an order that was just taken off Overflow onto its primary shelf, restarting its
    /// decay clock there. The caller has checked that the primary shelf has room.
    fn move_to_primary(&mut self, shelved: ShelvedOrder, now: Timestamp) -> Option<ShelvedOrder> {
        let temperature = shelved.temperature();
        let id = shelved.id;
        let moved = shelved.relocate(ShelfKind::Primary(temperature), now);
        match self.primary_mut(temperature).add(moved) {
            Ok(()) => {
                info!(%id, %temperature, "Promoted");
                self.metrics.incr(KitchenEvent::Promoted);
                self.primary(temperature).iter().find(|o| o.id == id).cloned()
            }
            Err(rejected) => {
                self.overflow.force_add(rejected.relocate(ShelfKind::Overflow, now));
                None
            }
        }
    }

    /// Pulls the Overflow order of `temperature` with the lowest value onto its primary shelf,
    /// if that shelf has room. Orders already at zero value are swept first, never rescued.
    pub fn promote(&mut self, temperature: Temperature, now: Timestamp) -> Option<ShelvedOrder> {
        if self.primary(temperature).is_full() {
            return None;
        }
        self.sweep_shelf(ShelfKind::Overflow, now);
        let candidate = self.overflow.take_lowest_value(now, Some(temperature))?;
        self.move_to_primary(candidate, now)
    }

    /// Removes `id` from whichever shelf holds it. A slot freed on a primary shelf is refilled
    /// from Overflow when a matching order is waiting there.
    pub fn remove(&mut self, id: OrderId, now: Timestamp) -> Option<ShelvedOrder> {
        for temperature in Temperature::ALL {
            if let Some(removed) = self.primary_mut(temperature).remove(id) {
                self.promote(temperature, now);
                return Some(removed);
            }
        }
        self.overflow.remove(id)
    }

    /// A courier collects `id`.
    pub fn pickup(&mut self, id: OrderId, now: Timestamp) -> PickupOutcome {
        let Some(removed) = self.remove(id, now) else {
            debug!(%id, "Pickup found nothing");
            return PickupOutcome::Missing;
        };
        let value = self.value_of(&removed, now);
        if is_wasted(value) {
            info!(%id, name = %removed.order.name, "Wasted at pickup");
            self.metrics.incr(KitchenEvent::Wasted);
            PickupOutcome::Wasted(removed)
        } else {
            info!(%id, name = %removed.order.name, value, "Picked up");
            self.metrics.incr(KitchenEvent::PickedUp);
            PickupOutcome::Delivered {
                order: removed,
                value,
            }
        }
    }

    fn sweep_shelf(&mut self, kind: ShelfKind, now: Timestamp) -> usize {
        let wasted = self.shelf_mut(kind).remove_wasted(now);
        for shelved in &wasted {
            info!(id = %shelved.id, name = %shelved.order.name, shelf = %kind, "Wasted");
            self.metrics.incr(KitchenEvent::Wasted);
        }
        wasted.len()
    }

    /// Removes waste from every shelf. Returns how many orders were thrown away.
    pub fn sweep(&mut self, now: Timestamp) -> usize {
        let kinds: Vec<ShelfKind> = self.shelves().map(Shelf::kind).collect();
        kinds
            .into_iter()
            .map(|kind| self.sweep_shelf(kind, now))
            .sum()
    }

    pub fn snapshot(&self, now: Timestamp) -> ShelfSnapshot {
        ShelfSnapshot {
            at: now,
            shelves: self
                .shelves()
                .map(|shelf| ShelfContents {
                    kind: shelf.kind(),
                    capacity: shelf.capacity(),
                    orders: shelf
                        .iter()
                        .map(|o| OrderValue {
                            id: o.id,
                            name: o.order.name.clone(),
                            value: shelf.value_of(o, now),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
