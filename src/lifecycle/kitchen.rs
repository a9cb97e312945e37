use crate::clients::ShelfClient;
use crate::config::KitchenConfig;
use crate::error::KitchenError;
use crate::metrics::{KitchenEvent, KitchenMetrics, MetricsSink, MetricsSnapshot};
use crate::model::Order;
use crate::shelf_set::{self, ShelfSet, ShelfSnapshot, SubmitOutcome};
use crate::simulation::arrival::{self, ArrivalHandle, OrderSink};
use crate::simulation::pickup::{self, PickupDispatcher, PickupScheduler};
use crate::simulation::{Clock, Randomness, SeededRandom, ThreadRandom, TokioClock};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Accepts orders: places them on the shelves and books a courier for each one that is shelved.
///
/// Shared between [`Kitchen::submit_order`] and the arrival ticker.
#[derive(Clone)]
struct Intake {
    shelves: ShelfClient,
    pickups: PickupScheduler,
    metrics: Arc<KitchenMetrics>,
}

impl Intake {
    async fn submit(&self, order: Order) -> Result<SubmitOutcome, KitchenError> {
        self.metrics.incr(KitchenEvent::Submitted);
        let outcome = self.shelves.submit(order).await?;
        // The courier is booked only after the order is on a shelf.
        if outcome.is_shelved() && !self.pickups.schedule(outcome.id) {
            debug!(id = %outcome.id, "Pickup dispatcher closed, no courier booked");
        }
        Ok(outcome)
    }
}

#[async_trait]
impl OrderSink for Intake {
    type Error = KitchenError;

    async fn submit_order(&self, order: Order) -> Result<(), KitchenError> {
        self.submit(order).await.map(|_| ())
    }
}

/// Builds a [`Kitchen`] with injected time, randomness or counters.
pub struct KitchenBuilder {
    config: KitchenConfig,
    clock: Option<Arc<dyn Clock>>,
    random: Option<Arc<dyn Randomness>>,
    metrics: Option<Arc<KitchenMetrics>>,
}

impl KitchenBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn random(mut self, random: Arc<dyn Randomness>) -> Self {
        self.random = Some(random);
        self
    }

    pub fn metrics(mut self, metrics: Arc<KitchenMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Validates the configuration and starts the Shelf Set actor and the pickup dispatcher.
    /// Must be called inside a Tokio runtime.
    pub fn build(self) -> Result<Kitchen, KitchenError> {
        self.config.validate()?;
        let config = self.config;
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(TokioClock::new()),
        };
        let random: Arc<dyn Randomness> = match (self.random, config.seed) {
            (Some(random), _) => random,
            (None, Some(seed)) => Arc::new(SeededRandom::new(seed)),
            (None, None) => Arc::new(ThreadRandom),
        };
        let metrics = self.metrics.unwrap_or_default();

        let (actor, shelves) = shelf_set::new(&config.shelves, metrics.clone());
        let shelf_task = tokio::spawn(actor.run(clock.clone()));

        let window = config.pickup.min_delay()..=config.pickup.max_delay();
        let (pickups, dispatcher) = pickup::spawn(shelves.clone(), window, random.clone());

        info!(
            capacity = config.shelves.total_capacity(),
            rate = config.arrival.rate_per_second,
            "Kitchen open"
        );
        Ok(Kitchen {
            intake: Intake {
                shelves,
                pickups,
                metrics: metrics.clone(),
            },
            config,
            clock,
            random,
            metrics,
            shelf_task,
            dispatcher,
            arrival: None,
        })
    }
}

/// The running kitchen.
///
/// # Shutdown
///
/// [`shutdown`](Kitchen::shutdown) stops arrivals first, then lets every booked courier arrive,
/// then closes the shelves. No order is thrown away just because the kitchen is closing.
pub struct Kitchen {
    config: KitchenConfig,
    clock: Arc<dyn Clock>,
    random: Arc<dyn Randomness>,
    metrics: Arc<KitchenMetrics>,
    intake: Intake,
    shelf_task: JoinHandle<ShelfSet>,
    dispatcher: PickupDispatcher,
    arrival: Option<ArrivalHandle>,
}

impl Kitchen {
    pub fn builder(config: KitchenConfig) -> KitchenBuilder {
        KitchenBuilder {
            config,
            clock: None,
            random: None,
            metrics: None,
        }
    }

    /// A kitchen on Tokio time with fresh counters, seeded if the config carries a seed.
    pub fn new(config: KitchenConfig) -> Result<Self, KitchenError> {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Orders currently on any shelf.
    pub async fn shelf_count(&self) -> Result<usize, KitchenError> {
        Ok(self.intake.shelves.size().await?)
    }

    pub async fn snapshot(&self) -> Result<ShelfSnapshot, KitchenError> {
        Ok(self.intake.shelves.snapshot().await?)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Starts feeding `orders` to the kitchen on the arrival tick.
    pub fn start(&mut self, orders: Vec<Order>) -> Result<(), KitchenError> {
        if self.arrival.is_some() {
            return Err(KitchenError::AlreadyStarted);
        }
        info!(orders = orders.len(), "Starting arrivals");
        self.arrival = Some(arrival::spawn(
            orders,
            self.config.arrival.clone(),
            self.random.clone(),
            self.intake.clone(),
        ));
        Ok(())
    }

    /// Places one order now and books its courier.
    #[instrument(skip(self, order), fields(name = %order.name))]
    pub async fn submit_order(&self, order: Order) -> Result<SubmitOutcome, KitchenError> {
        self.intake.submit(order).await
    }

    /// True once arrivals are exhausted and every shelf is empty.
    ///
    /// Both checks wait at most the configured check timeout; a check that cannot be answered in
    /// time counts as "not done yet". A kitchen that was never started is never done.
    pub async fn is_done(&self) -> Result<bool, KitchenError> {
        let Some(arrival) = &self.arrival else {
            return Ok(false);
        };
        let wait = self.config.arrival.check_timeout();
        if arrival.is_exhausted(wait).await != Some(true) {
            return Ok(false);
        }
        Ok(self.intake.shelves.is_empty_within(wait).await? == Some(true))
    }

    /// Polls [`is_done`](Kitchen::is_done) once per arrival tick until it holds.
    pub async fn run_until_done(&self) -> Result<(), KitchenError> {
        let mut ticker = tokio::time::interval(self.config.arrival.tick());
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if self.is_done().await? {
                info!(at = %self.clock.now(), "Kitchen done");
                return Ok(());
            }
        }
    }

    /// Stops arrivals, waits for outstanding pickups, closes the shelves and returns the final
    /// counters.
    pub async fn shutdown(self) -> Result<MetricsSnapshot, KitchenError> {
        info!("Shutting down kitchen...");
        let Kitchen {
            metrics,
            intake,
            shelf_task,
            dispatcher,
            arrival,
            ..
        } = self;

        if let Some(arrival) = arrival {
            arrival.stop().await;
        }
        // With the arrival task gone this is the last scheduler.
        drop(intake);
        let pickups = dispatcher.drain().await;
        debug!(pickups, "Pickups drained");

        let leftover = shelf_task.await?;
        info!(remaining = leftover.len(), "Kitchen closed");
        Ok(metrics.snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Temperature;
    use crate::shelf_set::Placement;

    #[tokio::test(start_paused = true)]
    async fn test_submit_order_counts_and_places() {
        let metrics = Arc::new(KitchenMetrics::new());
        let kitchen = Kitchen::builder(KitchenConfig::default())
            .random(Arc::new(SeededRandom::new(3)))
            .metrics(metrics.clone())
            .build()
            .unwrap();

        let outcome = kitchen
            .submit_order(Order::new("Ramen", Temperature::Hot, 500, 0.45))
            .await
            .unwrap();
        assert_eq!(outcome.placement, Placement::Primary(Temperature::Hot));
        assert_eq!(metrics.count(KitchenEvent::Submitted), 1);
        assert_eq!(metrics.count(KitchenEvent::Placed), 1);
        assert_eq!(kitchen.shelf_count().await.unwrap(), 1);
        let snapshot = kitchen.snapshot().await.unwrap();
        assert_eq!(snapshot.len(), 1);

        // Shutdown waits for the courier.
        let metrics = kitchen.shutdown().await.unwrap();
        assert_eq!(metrics.picked_up, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_discarded_order_books_no_courier() {
        let kitchen = Kitchen::new(KitchenConfig::default()).unwrap();
        let outcome = kitchen
            .submit_order(Order::new("Nothing", Temperature::Cold, 0, 0.0))
            .await
            .unwrap();
        assert_eq!(outcome.placement, Placement::Discarded);

        let snapshot = kitchen.shutdown().await.unwrap();
        assert_eq!(snapshot.discarded, 1);
        assert_eq!(snapshot.picked_up + snapshot.wasted, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_is_rejected() {
        let mut kitchen = Kitchen::new(KitchenConfig::default()).unwrap();
        kitchen.start(Vec::new()).unwrap();
        assert!(matches!(
            kitchen.start(Vec::new()),
            Err(KitchenError::AlreadyStarted)
        ));
        kitchen.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_not_started_is_never_done() {
        let kitchen = Kitchen::new(KitchenConfig::default()).unwrap();
        assert!(!kitchen.is_done().await.unwrap());
        kitchen.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let mut config = KitchenConfig::default();
        config.arrival.tick_ms = 0;
        assert!(matches!(
            Kitchen::new(config),
            Err(KitchenError::Config(_))
        ));
    }
}
