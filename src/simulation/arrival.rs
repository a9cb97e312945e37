//! # Arrival Simulator
//!
//! Feeds a finite sequence of orders to the kitchen on a fixed tick. Each tick fires with a fixed
//! probability, approximating a Poisson arrival process; a tick that fires submits the next order.
//!
//! Progress lives behind a Tokio mutex shared by the ticker and [`ArrivalHandle::is_exhausted`].
//! Both sides acquire it with a timeout: a ticker that cannot get the lock skips its tick, and an
//! exhaustion check that cannot get it reports "not yet determined" instead of waiting.

use crate::config::ArrivalConfig;
use crate::model::Order;
use crate::simulation::Randomness;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Receiver of simulated arrivals.
#[async_trait]
pub trait OrderSink: Send + Sync + 'static {
    type Error: Display + Send;

    async fn submit_order(&self, order: Order) -> Result<(), Self::Error>;
}

#[derive(Debug)]
struct Progress {
    remaining: VecDeque<Order>,
    submitted: usize,
    /// Last submission attempt, or the start of the run before the first one.
    quiet_since: Instant,
    exhausted: bool,
}

/// Control and observation handle for a running arrival simulator.
#[derive(Debug)]
pub struct ArrivalHandle {
    progress: Arc<Mutex<Progress>>,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// Starts submitting `orders` to `sink`.
pub fn spawn<K: OrderSink>(
    orders: Vec<Order>,
    config: ArrivalConfig,
    random: Arc<dyn Randomness>,
    sink: K,
) -> ArrivalHandle {
    let progress = Arc::new(Mutex::new(Progress {
        remaining: orders.into(),
        submitted: 0,
        quiet_since: Instant::now(),
        exhausted: false,
    }));
    let (stop, stopped) = oneshot::channel();
    let task = tokio::spawn(run(progress.clone(), config, random, sink, stopped));
    ArrivalHandle {
        progress,
        stop: Some(stop),
        task,
    }
}

async fn run<K: OrderSink>(
    progress: Arc<Mutex<Progress>>,
    config: ArrivalConfig,
    random: Arc<dyn Randomness>,
    sink: K,
    mut stopped: oneshot::Receiver<()>,
) {
    let probability = config.fire_probability();
    let mut ticker = interval(config.tick());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(probability, tick = ?config.tick(), "Arrivals started");

    loop {
        tokio::select! {
            _ = &mut stopped => {
                info!("Arrivals stopped");
                return;
            }
            _ = ticker.tick() => {}
        }

        let Ok(mut progress) = timeout(config.check_timeout(), progress.lock()).await else {
            warn!("Arrival progress busy, skipping tick");
            continue;
        };

        if progress.remaining.is_empty() {
            if progress.quiet_since.elapsed() >= config.grace() {
                progress.exhausted = true;
                info!(submitted = progress.submitted, "Arrivals exhausted");
                return;
            }
            continue;
        }

        if !random.arrival_fires(probability) {
            continue;
        }
        let Some(order) = progress.remaining.pop_front() else {
            continue;
        };
        debug!(name = %order.name, remaining = progress.remaining.len(), "Order arriving");
        match sink.submit_order(order).await {
            Ok(()) => progress.submitted += 1,
            Err(e) => warn!(error = %e, "Submission failed"),
        }
        progress.quiet_since = Instant::now();
    }
}

impl ArrivalHandle {
    /// Whether every order has been submitted and the grace period has passed since the last one.
    ///
    /// Returns `None` if the progress lock could not be acquired within `wait`; the caller should
    /// ask again later.
    pub async fn is_exhausted(&self, wait: Duration) -> Option<bool> {
        match timeout(wait, self.progress.lock()).await {
            Ok(progress) => Some(progress.exhausted),
            Err(_) => {
                debug!(?wait, "Exhaustion check deferred");
                None
            }
        }
    }

    /// Orders the sink has accepted so far, if the progress lock is free within `wait`.
    pub async fn submitted(&self, wait: Duration) -> Option<usize> {
        timeout(wait, self.progress.lock())
            .await
            .ok()
            .map(|progress| progress.submitted)
    }

    /// Stops the ticker and waits for it to finish. A submission already under way completes.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "Arrival task failed");
        }
    }
}
