//! DiceBot - main entry point.
//!
//! Runs the coordinator against the loopback room and takes commands from
//! stdin, standing in for the room chat. Timings and chat behavior come from
//! the environment, see [`Config::from_env`].

use std::sync::Arc;

use tokio::io::AsyncBufReadExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dicebot_engine::api::CommandDispatcher;
use dicebot_engine::infrastructure::loopback::{self, LoopbackRoom};
use dicebot_engine::use_cases::RollCoordinator;
use dicebot_engine::Config;

/// Item ids of the five dice in the demo room.
const ROOM_DICE: [i64; 5] = [371, 372, 373, 374, 375];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicebot=info,dicebot_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting DiceBot");

    let config = Config::from_env();
    tracing::info!(
        command_delay_ms = config.command_delay.as_millis() as u64,
        settle_delay_ms = config.settle_delay.as_millis() as u64,
        "Pacing configured"
    );

    let (room, events) = LoopbackRoom::new(&ROOM_DICE);
    let coordinator = Arc::new(RollCoordinator::new(room.clone(), room.clone(), config));
    let pump = loopback::spawn_pump(coordinator.clone(), events);

    // The owner presses each die once so the bot learns the ids.
    room.press_all();

    let dispatcher = CommandDispatcher::new(coordinator.clone());

    println!("Commands: :roll :tri :close :reset :chaton :chatoff (quit to exit)");
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        dispatcher.handle_chat_message(line).await;
    }

    pump.abort();
    tracing::info!("DiceBot stopped");
    Ok(())
}
