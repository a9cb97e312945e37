//! # Shelf
//!
//! A capacity-bounded tier. There is one primary shelf per temperature class and one shared
//! Overflow shelf whose decay multiplier makes orders lose value faster.
//!
//! A shelf knows nothing about policy: it accepts, returns and scans orders, and answers
//! value-based questions about what it holds. Deciding *which* shelf an order goes to is the
//! job of the [`ShelfSet`](crate::shelf_set::ShelfSet).

use crate::model::{OrderId, ShelfKind, ShelvedOrder, Temperature, Timestamp};
use crate::value::{is_wasted, value};
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct Shelf {
    kind: ShelfKind,
    capacity: usize,
    decay_multiplier: f64,
    orders: Vec<ShelvedOrder>,
}

impl Shelf {
    /// A primary shelf for `temperature` with a decay multiplier of 1.
    pub fn primary(temperature: Temperature, capacity: usize) -> Self {
        Self {
            kind: ShelfKind::Primary(temperature),
            capacity,
            decay_multiplier: 1.0,
            orders: Vec::with_capacity(capacity),
        }
    }

    /// The shared Overflow shelf.
    pub fn overflow(capacity: usize, decay_multiplier: f64) -> Self {
        Self {
            kind: ShelfKind::Overflow,
            capacity,
            decay_multiplier,
            orders: Vec::with_capacity(capacity),
        }
    }

    pub fn kind(&self) -> ShelfKind {
        self.kind
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn decay_multiplier(&self) -> f64 {
        self.decay_multiplier
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.orders.len() >= self.capacity
    }

    pub fn has_room(&self) -> bool {
        !self.is_full()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ShelvedOrder> {
        self.orders.iter()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.orders.iter().any(|o| o.id == id)
    }

    /// Current normalized value of an order held on this shelf.
    pub fn value_of(&self, shelved: &ShelvedOrder, now: Timestamp) -> f64 {
        value(
            &shelved.order,
            shelved.order.decay_rate * self.decay_multiplier,
            shelved.age_secs(now),
        )
    }

    /// Places an order on the shelf.
    ///
    /// Fails without touching the shelf when it is full or when a primary shelf is offered an
    /// order of another temperature; the rejected order is handed back.
    pub fn add(&mut self, shelved: ShelvedOrder) -> Result<(), ShelvedOrder> {
        if self.is_full() || !self.kind.accepts(shelved.temperature()) {
            return Err(shelved);
        }
        self.orders.push(shelved);
        Ok(())
    }

    /// Places an order even if the shelf is full.
    ///
    /// The caller must bring the shelf back within capacity before it releases control.
    pub(crate) fn force_add(&mut self, shelved: ShelvedOrder) {
        debug_assert!(self.kind.accepts(shelved.temperature()));
        self.orders.push(shelved);
    }

    pub fn remove(&mut self, id: OrderId) -> Option<ShelvedOrder> {
        let index = self.orders.iter().position(|o| o.id == id)?;
        Some(self.orders.swap_remove(index))
    }

    /// Removes and returns every order whose value has dropped to zero or below.
    pub fn remove_wasted(&mut self, now: Timestamp) -> Vec<ShelvedOrder> {
        let multiplier = self.decay_multiplier;
        let (wasted, fresh): (Vec<_>, Vec<_>) = self.orders.drain(..).partition(|o| {
            is_wasted(value(
                &o.order,
                o.order.decay_rate * multiplier,
                o.age_secs(now),
            ))
        });
        self.orders = fresh;
        wasted
    }

    /// The order with the smallest current value, optionally restricted to one temperature.
    /// Ties go to the earliest placement.
    pub fn lowest_value(
        &self,
        now: Timestamp,
        temperature: Option<Temperature>,
    ) -> Option<&ShelvedOrder> {
        self.lowest_value_where(now, |o| temperature.map_or(true, |t| o.temperature() == t))
    }

    /// The order with the smallest current value among those matching `eligible`.
    /// Ties go to the earliest placement.
    pub fn lowest_value_where<F>(&self, now: Timestamp, eligible: F) -> Option<&ShelvedOrder>
    where
        F: Fn(&ShelvedOrder) -> bool,
    {
        self.orders
            .iter()
            .filter(|o| eligible(o))
            .min_by(|a, b| self.compare_value(a, b, now))
    }

    /// The order with the largest current value among those matching `eligible`.
    /// Ties go to the earliest placement.
    pub fn highest_value_where<F>(&self, now: Timestamp, eligible: F) -> Option<&ShelvedOrder>
    where
        F: Fn(&ShelvedOrder) -> bool,
    {
        self.orders
            .iter()
            .filter(|o| eligible(o))
            .min_by(|a, b| {
                self.value_of(b, now)
                    .total_cmp(&self.value_of(a, now))
                    .then_with(|| a.placed_at.cmp(&b.placed_at))
            })
    }

    /// Removes and returns [`lowest_value`](Shelf::lowest_value).
    pub fn take_lowest_value(
        &mut self,
        now: Timestamp,
        temperature: Option<Temperature>,
    ) -> Option<ShelvedOrder> {
        let id = self.lowest_value(now, temperature)?.id;
        self.remove(id)
    }

    fn compare_value(&self, a: &ShelvedOrder, b: &ShelvedOrder, now: Timestamp) -> Ordering {
        self.value_of(a, now)
            .total_cmp(&self.value_of(b, now))
            .then_with(|| a.placed_at.cmp(&b.placed_at))
    }
}
