use kitchen_sim::config::ShelfConfig;
use kitchen_sim::metrics::{KitchenEvent, KitchenMetrics};
use kitchen_sim::model::{Order, OrderId, ShelfKind, Temperature};
use kitchen_sim::shelf_set::{self, PickupOutcome, Placement};
use kitchen_sim::simulation::{Clock, ManualClock};
use std::sync::Arc;
use std::time::Duration;

fn config(hot: usize, cold: usize, frozen: usize, overflow: usize) -> ShelfConfig {
    ShelfConfig {
        hot,
        cold,
        frozen,
        overflow,
        overflow_decay_multiplier: 2.0,
    }
}

/// Many concurrent submitters racing for the last slots never push a shelf past capacity.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_submissions_respect_capacity() {
    let metrics = Arc::new(KitchenMetrics::new());
    let clock = Arc::new(ManualClock::new());
    let (actor, client) = shelf_set::new(&config(2, 2, 2, 3), metrics.clone());
    let handle = tokio::spawn(actor.run(clock.clone() as Arc<dyn Clock>));

    let mut tasks = Vec::new();
    for i in 0..40 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client
                .submit(Order::new(format!("soup {}", i), Temperature::Hot, 300, 0.5))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let snapshot = client.snapshot().await.unwrap();
    for shelf in &snapshot.shelves {
        assert!(shelf.orders.len() <= shelf.capacity, "{:?}", shelf.kind);
    }
    assert_eq!(
        snapshot
            .shelf(ShelfKind::Primary(Temperature::Hot))
            .unwrap()
            .orders
            .len(),
        2
    );
    assert_eq!(snapshot.shelf(ShelfKind::Overflow).unwrap().orders.len(), 3);
    assert_eq!(client.size().await.unwrap(), 5);

    assert_eq!(metrics.count(KitchenEvent::Placed), 2);
    assert_eq!(metrics.count(KitchenEvent::Overflowed), 38);
    assert_eq!(metrics.count(KitchenEvent::Evicted), 35);

    drop(client);
    let shelves = handle.await.unwrap();
    assert_eq!(shelves.len(), 5);
}

/// Pickups free primary slots and pull the most urgent matching order off Overflow.
#[tokio::test]
async fn test_pickups_backfill_from_overflow() {
    let metrics = Arc::new(KitchenMetrics::new());
    let clock = Arc::new(ManualClock::new());
    let (actor, client) = shelf_set::new(&config(1, 1, 1, 4), metrics.clone());
    tokio::spawn(actor.run(clock.clone() as Arc<dyn Clock>));

    let pho = client
        .submit(Order::new("Pho", Temperature::Hot, 900, 0.1))
        .await
        .unwrap();
    let salad = client
        .submit(Order::new("Salad", Temperature::Cold, 900, 0.1))
        .await
        .unwrap();
    let ramen = client
        .submit(Order::new("Ramen", Temperature::Hot, 500, 0.45))
        .await
        .unwrap();
    let burger = client
        .submit(Order::new("Burger", Temperature::Hot, 1200, 0.10))
        .await
        .unwrap();
    let cheesecake = client
        .submit(Order::new("Cheesecake", Temperature::Cold, 700, 0.5))
        .await
        .unwrap();
    assert_eq!(pho.placement, Placement::Primary(Temperature::Hot));
    assert_eq!(ramen.placement, Placement::Overflow);
    assert_eq!(burger.placement, Placement::Overflow);
    assert_eq!(cheesecake.placement, Placement::Overflow);

    clock.advance(Duration::from_secs(2));
    assert!(matches!(
        client.pickup(salad.id).await.unwrap(),
        PickupOutcome::Delivered { .. }
    ));

    clock.advance(Duration::from_secs(2));
    assert!(matches!(
        client.pickup(pho.id).await.unwrap(),
        PickupOutcome::Delivered { .. }
    ));

    let snapshot = client.snapshot().await.unwrap();
    let hot = snapshot.shelf(ShelfKind::Primary(Temperature::Hot)).unwrap();
    let cold = snapshot
        .shelf(ShelfKind::Primary(Temperature::Cold))
        .unwrap();
    assert_eq!(hot.orders[0].id, ramen.id);
    assert_eq!(hot.orders[0].value, 1.0);
    assert_eq!(cold.orders[0].id, cheesecake.id);
    let overflow = snapshot.shelf(ShelfKind::Overflow).unwrap();
    assert_eq!(overflow.orders.len(), 1);
    assert_eq!(overflow.orders[0].id, burger.id);
    assert_eq!(metrics.count(KitchenEvent::Promoted), 2);
}

#[tokio::test]
async fn test_lazy_waste_and_missing_pickups() {
    let metrics = Arc::new(KitchenMetrics::new());
    let clock = Arc::new(ManualClock::new());
    let (actor, client) = shelf_set::new(&config(2, 2, 2, 2), metrics.clone());
    tokio::spawn(actor.run(clock.clone() as Arc<dyn Clock>));

    let sorbet = client
        .submit(Order::new("Sorbet", Temperature::Frozen, 10, 1.0))
        .await
        .unwrap();
    let stew = client
        .submit(Order::new("Stew", Temperature::Hot, 10, 1.0))
        .await
        .unwrap();

    // Both reach zero after 5s. The stew is discovered at pickup, the sorbet by a sweep.
    clock.advance(Duration::from_secs(5));
    assert!(matches!(
        client.pickup(stew.id).await.unwrap(),
        PickupOutcome::Wasted(_)
    ));
    assert_eq!(client.sweep().await.unwrap(), 1);
    assert_eq!(client.sweep().await.unwrap(), 0);
    assert_eq!(
        client.pickup(sorbet.id).await.unwrap(),
        PickupOutcome::Missing
    );
    assert_eq!(client.pickup(OrderId(99)).await.unwrap(), PickupOutcome::Missing);

    assert_eq!(metrics.count(KitchenEvent::Wasted), 2);
    assert_eq!(metrics.count(KitchenEvent::PickedUp), 0);
    assert!(client.snapshot().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_explicit_promote_through_client() {
    let clock = Arc::new(ManualClock::new());
    let (actor, client) = shelf_set::new(&config(1, 1, 1, 2), Arc::new(KitchenMetrics::new()));
    tokio::spawn(actor.run(clock.clone() as Arc<dyn Clock>));

    client
        .submit(Order::new("Curry", Temperature::Hot, 600, 0.2))
        .await
        .unwrap();
    let naan = client
        .submit(Order::new("Naan", Temperature::Hot, 600, 0.2))
        .await
        .unwrap();

    // Hot shelf is full: nothing to promote into.
    assert_eq!(client.promote(Temperature::Hot).await.unwrap(), None);
    // Cold shelf has room but Overflow holds nothing cold.
    assert_eq!(client.promote(Temperature::Cold).await.unwrap(), None);
    assert_eq!(client.size().await.unwrap(), 2);
    assert_eq!(
        client.snapshot().await.unwrap().shelf(ShelfKind::Overflow).unwrap().orders[0].id,
        naan.id
    );
}
