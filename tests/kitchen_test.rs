use kitchen_sim::config::KitchenConfig;
use kitchen_sim::lifecycle::Kitchen;
use kitchen_sim::metrics::{KitchenMetrics, MetricsSnapshot};
use kitchen_sim::model::{Order, Temperature};
use kitchen_sim::simulation::SeededRandom;
use kitchen_sim::source::parse_orders;
use std::sync::Arc;

fn menu(count: usize) -> Vec<Order> {
    (0..count)
        .map(|i| {
            let temperature = Temperature::ALL[i % 3];
            Order::new(
                format!("dish {}", i),
                temperature,
                200 + (i as u32 * 37) % 400,
                0.1 + (i % 7) as f64 * 0.1,
            )
        })
        .collect()
}

/// Every submitted order ends in exactly one terminal state.
fn assert_accounted(metrics: &MetricsSnapshot) {
    assert_eq!(
        metrics.picked_up + metrics.wasted + metrics.evicted + metrics.discarded,
        metrics.submitted,
        "{:?}",
        metrics
    );
    assert_eq!(
        metrics.placed + metrics.overflowed + metrics.discarded,
        metrics.submitted,
        "{:?}",
        metrics
    );
}

#[tokio::test(start_paused = true)]
async fn test_full_run_delivers_everything_with_room() {
    let mut config = KitchenConfig::default();
    config.seed = Some(42);
    let mut kitchen = Kitchen::new(config).unwrap();

    kitchen.start(menu(30)).unwrap();
    kitchen.run_until_done().await.unwrap();
    assert!(kitchen.is_done().await.unwrap());
    assert!(kitchen.snapshot().await.unwrap().is_empty());

    let metrics = kitchen.shutdown().await.unwrap();
    assert_eq!(metrics.submitted, 30);
    // Long shelf lives and plenty of room: every courier finds a fresh order.
    assert_eq!(metrics.picked_up, 30);
    assert_eq!(metrics.lost(), 0);
    assert_accounted(&metrics);
}

#[tokio::test(start_paused = true)]
async fn test_tight_shelves_evict_under_pressure() {
    let mut config = KitchenConfig::default();
    config.shelves.hot = 1;
    config.shelves.cold = 1;
    config.shelves.frozen = 1;
    config.shelves.overflow = 1;
    config.arrival.rate_per_second = 10.0;

    let metrics = Arc::new(KitchenMetrics::new());
    let mut kitchen = Kitchen::builder(config)
        .random(Arc::new(SeededRandom::new(7)))
        .metrics(metrics.clone())
        .build()
        .unwrap();

    let hot_only: Vec<Order> = (0..20)
        .map(|i| Order::new(format!("wings {}", i), Temperature::Hot, 300, 0.3))
        .collect();
    kitchen.start(hot_only).unwrap();
    kitchen.run_until_done().await.unwrap();

    let snapshot = kitchen.shutdown().await.unwrap();
    assert_eq!(snapshot.submitted, 20);
    assert!(snapshot.evicted > 0, "{:?}", snapshot);
    assert!(snapshot.picked_up > 0, "{:?}", snapshot);
    assert_accounted(&snapshot);
    assert_eq!(snapshot, metrics.snapshot());
}

#[tokio::test(start_paused = true)]
async fn test_short_lived_orders_are_wasted() {
    let mut config = KitchenConfig::default();
    config.seed = Some(1);
    let mut kitchen = Kitchen::new(config).unwrap();

    // Zero value after half a second; couriers need at least two.
    let melting: Vec<Order> = (0..5)
        .map(|i| Order::new(format!("gelato {}", i), Temperature::Frozen, 1, 1.0))
        .collect();
    kitchen.start(melting).unwrap();
    kitchen.run_until_done().await.unwrap();

    let metrics = kitchen.shutdown().await.unwrap();
    assert_eq!(metrics.submitted, 5);
    assert_eq!(metrics.wasted, 5);
    assert_eq!(metrics.picked_up, 0);
    assert_accounted(&metrics);
}

#[tokio::test(start_paused = true)]
async fn test_orders_from_json_document() {
    let orders = parse_orders(
        r#"[
            { "name": "Banana Split", "temp": "frozen", "shelfLife": 20, "decayRate": 0.63 },
            { "name": "McFlury", "temp": "frozen", "shelfLife": 375, "decayRate": 0.4 },
            { "name": "Acai Bowl", "temp": "cold", "shelfLife": 249, "decayRate": 0.3 },
            { "name": "Yogurt", "temp": "lukewarm", "shelfLife": 263, "decayRate": 0.37 },
            { "name": "Chocolate Gelato", "temp": "FROZEN", "shelfLife": 300 }
        ]"#,
    )
    .unwrap();
    assert_eq!(orders.len(), 3);

    let mut config = KitchenConfig::default();
    config.seed = Some(3);
    let mut kitchen = Kitchen::new(config).unwrap();
    kitchen.start(orders).unwrap();
    kitchen.run_until_done().await.unwrap();

    let metrics = kitchen.shutdown().await.unwrap();
    assert_eq!(metrics.submitted, 3);
    assert_eq!(metrics.picked_up, 3);
    assert_accounted(&metrics);
}
