//! Messages understood by the Shelf Set actor.
//!
//! Commands mutate the shelves and are applied one at a time; queries only read them. Reply
//! variants match their requests 1:1.

use super::policy::{PickupOutcome, ShelfSnapshot, SubmitOutcome};
use crate::model::{Order, OrderId, ShelvedOrder, Temperature};

#[derive(Debug, Clone)]
pub enum ShelfCommand {
    /// Place a newly arrived order.
    Submit(Order),
    /// A courier collects an order.
    Pickup(OrderId),
    /// Refill a primary shelf from Overflow.
    Promote(Temperature),
    /// Throw away every order with no value left.
    Sweep,
}

#[derive(Debug, Clone)]
pub enum ShelfOutcome {
    Submitted(SubmitOutcome),
    PickedUp(PickupOutcome),
    Promoted(Option<ShelvedOrder>),
    /// Number of orders swept.
    Swept(usize),
}

#[derive(Debug, Clone, Copy)]
pub enum ShelfQuery {
    /// Orders currently on any shelf.
    Size,
    Snapshot,
}

#[derive(Debug, Clone)]
pub enum ShelfReport {
    Size(usize),
    Snapshot(ShelfSnapshot),
}
