//! In-memory loopback room.
//!
//! Simulates a game room with a handful of dice so the bot can run without a
//! live connection: local demos and the end-to-end tests both drive the real
//! coordinator through this adapter. A thrown die reports its value back on
//! the event channel after a short random delay, re-encoded with the same
//! per-die offset the live server uses, so the decoding path is exercised for
//! real.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

use dicebot_domain::DieId;

use crate::infrastructure::ports::{ChatPort, GameServerPort, TransportError};
use crate::use_cases::RollCoordinator;

/// Raw packet traffic observable on the loopback connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// The room's owner instructed a die to roll (payload: "<id>").
    ThrowDice(String),
    /// The room's owner instructed a die to turn off (payload: "<id>").
    DiceOff(String),
    /// The server reported a die value (payload: "<id> <raw value>").
    DiceValue(String),
}

/// The server-side value encoding: `face + id * 38`.
const VALUE_OFFSET: i64 = 38;

/// Bounds for the simulated settle time of a thrown die.
const RESULT_DELAY_MS: std::ops::Range<u64> = 10..60;

struct SimDie {
    id: DieId,
    is_off: bool,
}

/// A simulated room holding dice, a chat, and the packet event stream.
pub struct LoopbackRoom {
    dice: Mutex<Vec<SimDie>>,
    events: mpsc::UnboundedSender<RoomEvent>,
    chat_log: Mutex<Vec<String>>,
}

impl LoopbackRoom {
    /// Create a room containing the given dice, plus the receiving end of its
    /// packet stream.
    pub fn new(ids: &[i64]) -> (Arc<Self>, mpsc::UnboundedReceiver<RoomEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let room = Arc::new(Self {
            dice: Mutex::new(
                ids.iter()
                    .map(|raw| SimDie {
                        id: DieId::new(*raw),
                        is_off: false,
                    })
                    .collect(),
            ),
            events: tx,
            chat_log: Mutex::new(Vec::new()),
        });
        (room, rx)
    }

    /// Simulate the owner clicking one die: the client emits a throw packet
    /// and the server answers with a value a moment later.
    pub fn press_die(&self, id: DieId) {
        let _ = self.events.send(RoomEvent::ThrowDice(id.to_string()));
        self.schedule_result(id);
    }

    /// Press every die once, revealing all ids to an observing bot.
    pub fn press_all(&self) {
        let ids: Vec<DieId> = match self.dice.lock() {
            Ok(dice) => dice.iter().map(|d| d.id).collect(),
            Err(_) => return,
        };
        for id in ids {
            self.press_die(id);
        }
    }

    /// Number of dice currently turned off.
    pub fn off_count(&self) -> usize {
        match self.dice.lock() {
            Ok(dice) => dice.iter().filter(|d| d.is_off).count(),
            Err(_) => 0,
        }
    }

    /// Chat messages the room has seen, oldest first.
    pub fn messages(&self) -> Vec<String> {
        match self.chat_log.lock() {
            Ok(log) => log.clone(),
            Err(_) => Vec::new(),
        }
    }

    fn schedule_result(&self, id: DieId) {
        let face: i32 = rand::thread_rng().gen_range(1..=6);
        let delay = Duration::from_millis(rand::thread_rng().gen_range(RESULT_DELAY_MS));
        let raw = face as i64 + id.as_i64() * VALUE_OFFSET;
        let payload = format!("{} {}", id, raw);
        let events = self.events.clone();
        tokio::spawn(async move {
            sleep(delay).await;
            let _ = events.send(RoomEvent::DiceValue(payload));
        });
    }
}

#[async_trait]
impl GameServerPort for LoopbackRoom {
    async fn send_throw_dice(&self, id: DieId) -> Result<(), TransportError> {
        {
            let mut dice = self
                .dice
                .lock()
                .map_err(|_| TransportError::SendFailed("room state poisoned".into()))?;
            let Some(die) = dice.iter_mut().find(|d| d.id == id) else {
                warn!(die = %id, "Throw command for a die this room does not have");
                return Ok(());
            };
            die.is_off = false;
        }
        self.schedule_result(id);
        Ok(())
    }

    async fn send_dice_off(&self, id: DieId) -> Result<(), TransportError> {
        let mut dice = self
            .dice
            .lock()
            .map_err(|_| TransportError::SendFailed("room state poisoned".into()))?;
        if let Some(die) = dice.iter_mut().find(|d| d.id == id) {
            die.is_off = true;
        }
        Ok(())
    }
}

#[async_trait]
impl ChatPort for LoopbackRoom {
    async fn send_message(&self, text: &str) -> Result<(), TransportError> {
        info!(message = text, "Room chat");
        self.chat_log
            .lock()
            .map_err(|_| TransportError::SendFailed("chat log poisoned".into()))?
            .push(text.to_string());
        Ok(())
    }
}

/// Forward room packets into the coordinator until the room goes away.
pub fn spawn_pump(
    coordinator: Arc<RollCoordinator>,
    mut events: mpsc::UnboundedReceiver<RoomEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                RoomEvent::ThrowDice(payload) => coordinator.handle_throw_packet(&payload).await,
                RoomEvent::DiceOff(payload) => coordinator.handle_dice_off_packet(&payload).await,
                RoomEvent::DiceValue(payload) => coordinator.handle_result_packet(&payload).await,
            }
        }
    })
}
