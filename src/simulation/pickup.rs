//! # Pickup Simulator
//!
//! Couriers arrive for each accepted order after an independent random delay. A dispatcher task
//! receives order ids, starts one timer per id in a [`JoinSet`], and reaps finished timers as it
//! goes. When every [`PickupScheduler`] is dropped, [`PickupDispatcher::drain`] lets the timers
//! still in flight run to completion.

use crate::clients::ShelfClient;
use crate::model::OrderId;
use crate::shelf_set::PickupOutcome;
use crate::simulation::Randomness;
use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

/// Queues pickups. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PickupScheduler {
    sender: mpsc::UnboundedSender<OrderId>,
}

impl PickupScheduler {
    /// Schedules a courier for `id`. Returns `false` if the dispatcher is gone.
    pub fn schedule(&self, id: OrderId) -> bool {
        self.sender.send(id).is_ok()
    }
}

/// The running dispatcher task.
#[derive(Debug)]
pub struct PickupDispatcher {
    task: JoinHandle<usize>,
}

impl PickupDispatcher {
    /// Waits until every scheduler is dropped and every pending pickup has fired. Returns how
    /// many pickups ran.
    pub async fn drain(self) -> usize {
        match self.task.await {
            Ok(count) => count,
            Err(e) => {
                warn!(error = %e, "Pickup dispatcher failed");
                0
            }
        }
    }
}

/// Starts the dispatcher.
pub fn spawn(
    shelves: ShelfClient,
    window: RangeInclusive<Duration>,
    random: Arc<dyn Randomness>,
) -> (PickupScheduler, PickupDispatcher) {
    let (sender, receiver) = mpsc::unbounded_channel();
    let task = tokio::spawn(dispatch(shelves, window, random, receiver));
    (PickupScheduler { sender }, PickupDispatcher { task })
}

async fn dispatch(
    shelves: ShelfClient,
    window: RangeInclusive<Duration>,
    random: Arc<dyn Randomness>,
    mut receiver: mpsc::UnboundedReceiver<OrderId>,
) -> usize {
    let mut pending = JoinSet::new();
    let mut completed = 0;

    loop {
        tokio::select! {
            received = receiver.recv() => {
                let Some(id) = received else { break };
                let delay = random.pickup_delay(window.clone());
                debug!(%id, ?delay, "Courier dispatched");
                pending.spawn(courier(shelves.clone(), id, delay));
            }
            Some(finished) = pending.join_next(), if !pending.is_empty() => {
                completed += reap(finished);
            }
        }
    }

    info!(in_flight = pending.len(), "Draining pickups");
    while let Some(finished) = pending.join_next().await {
        completed += reap(finished);
    }
    completed
}

fn reap(finished: Result<(), tokio::task::JoinError>) -> usize {
    match finished {
        Ok(()) => 1,
        Err(e) => {
            warn!(error = %e, "Courier task failed");
            0
        }
    }
}

async fn courier(shelves: ShelfClient, id: OrderId, delay: Duration) {
    tokio::time::sleep(delay).await;
    match shelves.pickup(id).await {
        Ok(PickupOutcome::Delivered { value, .. }) => debug!(%id, value, "Courier delivered"),
        Ok(PickupOutcome::Wasted(_)) => debug!(%id, "Courier found waste"),
        Ok(PickupOutcome::Missing) => debug!(%id, "Courier found nothing"),
        Err(e) => warn!(%id, error = %e, "Pickup failed"),
    }
}
