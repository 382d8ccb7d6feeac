//! End-to-end tests: chat command in, room packets out, hand message back.
//!
//! These drive the real coordinator through the loopback room, so sightings,
//! pacing, offset decoding, and result collection all run the production
//! paths with results arriving on their own task in arbitrary order.

use std::sync::Arc;
use std::time::Duration;

use crate::api::CommandDispatcher;
use crate::config::Config;
use crate::infrastructure::loopback::{self, LoopbackRoom};
use crate::use_cases::{RollCoordinator, SessionMode};

const ROOM_DICE: [i64; 5] = [11, 22, 33, 44, 55];

struct Harness {
    room: Arc<LoopbackRoom>,
    coordinator: Arc<RollCoordinator>,
    dispatcher: CommandDispatcher,
}

async fn harness() -> Harness {
    let (room, events) = LoopbackRoom::new(&ROOM_DICE);
    let coordinator = Arc::new(RollCoordinator::new(
        room.clone(),
        room.clone(),
        Config::for_tests(),
    ));
    loopback::spawn_pump(coordinator.clone(), events);
    let dispatcher = CommandDispatcher::new(coordinator.clone());

    // The owner presses each die once; wait until the bot has learned all
    // five ids and the press results have drained, so a session started
    // afterwards only ever sees its own reports.
    room.press_all();
    wait_until(|| {
        let coordinator = coordinator.clone();
        async move {
            let dice = coordinator.dice().await;
            dice.len() == ROOM_DICE.len() && dice.iter().all(|d| d.value != 0)
        }
    })
    .await;

    Harness {
        room,
        coordinator,
        dispatcher,
    }
}

async fn wait_until<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 2s");
}

#[tokio::test]
async fn full_roll_round_trip_emits_exactly_one_hand_message() {
    let h = harness().await;

    let session = h
        .dispatcher
        .handle_chat_message(":roll")
        .await
        .expect("roll session starts");
    session.await.unwrap();

    assert_eq!(h.coordinator.mode().await, SessionMode::Idle);
    let messages = h.room.messages();
    assert_eq!(messages.len(), 1, "exactly one hand message: {:?}", messages);

    let faces: Vec<i32> = h.coordinator.dice().await.iter().map(|d| d.value).collect();
    assert!(faces.iter().all(|f| (1..=6).contains(f)), "faces: {:?}", faces);
}

#[tokio::test]
async fn suppressed_roll_emits_no_message() {
    let h = harness().await;

    h.dispatcher.handle_chat_message(":chatoff").await;
    let session = h
        .dispatcher
        .handle_chat_message(":roll")
        .await
        .expect("roll session starts");
    session.await.unwrap();

    assert_eq!(h.coordinator.mode().await, SessionMode::Idle);
    assert!(h.room.messages().is_empty());
}

#[tokio::test]
async fn tri_round_trip_shouts_the_sum_of_three_dice() {
    let h = harness().await;

    let session = h
        .dispatcher
        .handle_chat_message(":tri")
        .await
        .expect("tri session starts");
    session.await.unwrap();

    let messages = h.room.messages();
    assert_eq!(messages.len(), 1);
    let total: i32 = messages[0].parse().expect("tri message is a number");
    assert!((3..=18).contains(&total), "sum of three dice: {}", total);
}

#[tokio::test]
async fn close_round_trip_turns_every_die_off() {
    let h = harness().await;

    let session = h
        .dispatcher
        .handle_chat_message(":close")
        .await
        .expect("close session starts");
    session.await.unwrap();

    assert_eq!(h.coordinator.mode().await, SessionMode::Idle);
    assert_eq!(h.room.off_count(), ROOM_DICE.len());
    assert!(h.coordinator.dice().await.iter().all(|d| d.is_closed));
    assert!(h.room.messages().is_empty(), "closing shouts nothing");
}

#[tokio::test]
async fn reset_then_roll_requires_rediscovery() {
    let h = harness().await;

    h.dispatcher.handle_chat_message(":reset").await;
    assert!(h.coordinator.dice().await.is_empty());

    // No dice registered: the roll command is dropped.
    assert!(h.dispatcher.handle_chat_message(":roll").await.is_none());

    // Pressing the dice again re-registers them and rolling works.
    h.room.press_all();
    wait_until(|| {
        let coordinator = h.coordinator.clone();
        async move { coordinator.dice().await.len() == ROOM_DICE.len() }
    })
    .await;
    let session = h
        .dispatcher
        .handle_chat_message(":roll")
        .await
        .expect("roll session starts after rediscovery");
    session.await.unwrap();
    assert_eq!(h.room.messages().len(), 1);
}
