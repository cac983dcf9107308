//! Integration tests for room histories, long-poll wakeups, and the
//! aggregate room.
//!
//! Timeout tests run on a paused clock so the 15 s poll window elapses
//! instantly and deterministically.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use murmur_room::{MessageId, RoomConfig, RoomRegistry, RoomState, AGGREGATE_ROOM};
use tokio::time::Instant;

// =========================================================================
// Helpers
// =========================================================================

fn parse_lines(out: &str) -> Vec<(u64, String)> {
    out.lines()
        .map(|line| {
            let (id, body) = line.split_once(": ").expect("line has an id");
            (id.parse().expect("id is numeric"), body.to_string())
        })
        .collect()
}

fn big_history() -> RoomConfig {
    RoomConfig {
        max_history: 10_000,
        ..RoomConfig::default()
    }
}

// =========================================================================
// RoomState
// =========================================================================

#[tokio::test]
async fn test_history_never_exceeds_capacity() {
    let room = RoomState::new("x", RoomConfig::default());
    let mut pushed = Vec::new();
    for i in 0..100 {
        let body = format!("msg-{i}");
        room.push(body.clone()).await;
        pushed.push(body);
        assert!(room.len().await <= 32);
    }

    let retained: Vec<String> = room.history().await.into_iter().map(|m| m.body).collect();
    assert_eq!(retained, pushed[pushed.len() - 32..]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_push_ids_unique_and_increasing() {
    let room = Arc::new(RoomState::with_seed("x", big_history(), 0));

    let tasks = (0..8).map(|t| {
        let room = Arc::clone(&room);
        tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..50 {
                ids.push(room.push(format!("{t}-{i}")).await);
            }
            ids
        })
    });
    let mut all_ids = Vec::new();
    for ids in join_all(tasks).await {
        let ids = ids.unwrap();
        // Each pusher sees its own ids strictly increasing.
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        all_ids.extend(ids);
    }

    all_ids.sort();
    all_ids.dedup();
    assert_eq!(all_ids.len(), 400);
    assert_eq!(room.last_id().await, MessageId(400));

    let history = room.history().await;
    assert!(history.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test(start_paused = true)]
async fn test_pull_at_tail_times_out_empty() {
    let room = RoomState::new("x", RoomConfig::default());
    let last = room.last_id().await.0;

    let start = Instant::now();
    let out = room.pull(last).await;
    assert_eq!(out, "");
    assert!(start.elapsed() >= Duration::from_secs(15));
}

#[tokio::test(start_paused = true)]
async fn test_blocked_pull_wakes_on_push() {
    let room = Arc::new(RoomState::with_seed("x", RoomConfig::default(), 1_000));

    let start = Instant::now();
    let puller = {
        let room = Arc::clone(&room);
        tokio::spawn(async move { room.pull(1_000).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    room.push("hello").await;

    let out = puller.await.unwrap();
    assert_eq!(out, "1001: hello\n");
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_every_waiter_woken_by_one_push() {
    let room = Arc::new(RoomState::with_seed("x", RoomConfig::default(), 50));

    let pullers: Vec<_> = (0..16)
        .map(|_| {
            let room = Arc::clone(&room);
            tokio::spawn(async move { room.pull(50).await })
        })
        .collect();

    tokio::time::sleep(Duration::from_millis(10)).await;
    let start = Instant::now();
    room.push("wake").await;

    for out in join_all(pullers).await {
        assert_eq!(out.unwrap(), "51: wake\n");
    }
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_woken_pull_returns_after_one_recheck() {
    // A cursor beyond the tail isn't satisfied by a push with a lower id,
    // but the woken pull still returns right away with an empty body.
    let room = Arc::new(RoomState::with_seed("x", RoomConfig::default(), 10));

    let start = Instant::now();
    let puller = {
        let room = Arc::clone(&room);
        tokio::spawn(async move { room.pull(500).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    room.push("too old").await;

    assert_eq!(puller.await.unwrap(), "");
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_shortened_poll_timeout() {
    let room = RoomState::new(
        "x",
        RoomConfig {
            poll_timeout: Duration::from_millis(250),
            ..RoomConfig::default()
        },
    );
    let last = room.last_id().await.0;

    let start = Instant::now();
    assert_eq!(room.pull(last).await, "");
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(250));
    assert!(elapsed < Duration::from_secs(15));
}

// =========================================================================
// RoomRegistry
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_first_reference_scenario() {
    let registry = RoomRegistry::default();

    let welcome = registry.get_or_create("x").await.unwrap().last_id().await;
    registry.broadcast_push("x", "hi").await.unwrap();
    let room = registry.get_or_create("x").await.unwrap();
    let k = room.last_id().await;
    assert_eq!(k, MessageId(welcome.0 + 1));

    let out = room.pull(0).await;
    assert_eq!(out, format!("{welcome}: Hello, x!\n{k}: hi\n"));

    let start = Instant::now();
    assert_eq!(room.pull(k.0).await, "");
    assert!(start.elapsed() >= Duration::from_secs(15));
}

#[tokio::test]
async fn test_push_mirrors_into_aggregate() {
    let registry = RoomRegistry::default();
    registry.broadcast_push("x", "hi").await.unwrap();

    let x = registry.get_or_create("x").await.unwrap();
    let all = registry.aggregate();

    let x_history = x.history().await;
    let all_history = all.history().await;
    assert_eq!(x_history.last().unwrap().body, "hi");
    assert_eq!(all_history.last().unwrap().body, "hi");
    assert_eq!(all_history.first().unwrap().body, "Hello, all!");
}

#[tokio::test]
async fn test_push_to_unknown_room_creates_it() {
    let registry = RoomRegistry::default();
    registry.broadcast_push("fresh", "first").await.unwrap();

    let bodies: Vec<_> = registry
        .get_or_create("fresh")
        .await
        .unwrap()
        .history()
        .await
        .into_iter()
        .map(|m| m.body)
        .collect();
    assert_eq!(bodies, ["Hello, fresh!", "first"]);
}

#[tokio::test]
async fn test_push_to_all_fans_out() {
    let registry = RoomRegistry::default();
    for name in ["a", "b", "c"] {
        registry.get_or_create(name).await.unwrap();
    }

    registry.broadcast_push(AGGREGATE_ROOM, "announce").await.unwrap();

    for name in ["a", "b", "c", AGGREGATE_ROOM] {
        let room = registry.get_or_create(name).await.unwrap();
        let history = room.history().await;
        assert_eq!(history.last().unwrap().body, "announce", "room {name}");
        assert_eq!(history.len(), 2, "room {name}");
    }
    // `all` is never shadowed by a regular room.
    assert_eq!(registry.room_count().await, 3);
}

#[tokio::test(start_paused = true)]
async fn test_aggregate_pull_wakes_on_room_push() {
    let registry = Arc::new(RoomRegistry::default());
    let last = registry.aggregate().last_id().await;

    let puller = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            let all = registry.get_or_create(AGGREGATE_ROOM).await.unwrap();
            all.pull(last.0).await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    registry.broadcast_push("kitchen", "soup").await.unwrap();

    let lines = parse_lines(&puller.await.unwrap());
    assert_eq!(lines, vec![(last.0 + 1, "soup".to_string())]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_aggregate_order_matches_every_room() {
    let registry = Arc::new(RoomRegistry::new(big_history()));
    let rooms = ["r0", "r1", "r2", "r3"];

    let pushers = rooms.iter().map(|name| {
        let registry = Arc::clone(&registry);
        let name = name.to_string();
        tokio::spawn(async move {
            for i in 0..50 {
                registry
                    .broadcast_push(&name, &format!("{name}-{i}"))
                    .await
                    .unwrap();
            }
        })
    });
    // Interleave some fan-outs to `all` with the per-room pushes.
    let announcer = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            for i in 0..10 {
                registry
                    .broadcast_push(AGGREGATE_ROOM, &format!("all-{i}"))
                    .await
                    .unwrap();
            }
        })
    };
    for result in join_all(pushers).await {
        result.unwrap();
    }
    announcer.await.unwrap();

    let aggregate: Vec<String> = registry
        .aggregate()
        .history()
        .await
        .into_iter()
        .skip(1)
        .map(|m| m.body)
        .collect();
    assert_eq!(aggregate.len(), 4 * 50 + 10);

    // Each room's history, welcome aside, is exactly the aggregate order
    // restricted to the messages that room received.
    for name in rooms {
        let room = registry.get_or_create(name).await.unwrap();
        let own: Vec<String> = room.history().await.into_iter().skip(1).map(|m| m.body).collect();
        let prefix = format!("{name}-");
        let expected: Vec<String> = aggregate
            .iter()
            .filter(|body| body.starts_with(&prefix) || body.starts_with("all-"))
            .cloned()
            .collect();
        // A room created after some `all` fan-outs won't have those.
        assert!(expected.ends_with(&own), "room {name} diverges from aggregate order");
        assert_eq!(own.iter().filter(|b| b.starts_with(&prefix)).count(), 50);
    }
}
