//! Roll session coordination.
//!
//! [`RollCoordinator`] owns the dice registry and the transient session state
//! behind a single lock, and drives the three session kinds: a full five-dice
//! poker roll, the reduced three-dice "tri" roll, and close-all. A session
//! issues paced commands on a detached task, then blocks on a completion
//! channel that the result handler fires once every expected die has
//! reported. Results arrive on their own task, in any order, at any time.
//!
//! Locking rule: the state lock is never held across a pacing sleep or the
//! completion wait, so result delivery always makes progress while a session
//! is pacing out commands.

use std::sync::Arc;

use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use dicebot_domain::{
    classify, evaluate_hand, sum_hand, DiceRegistry, Die, DieId, LetterPlacement, Observed,
    SightingKind, MAX_DICE,
};

use crate::config::Config;
use crate::infrastructure::ports::{ChatPort, GameServerPort};

/// Per-die encoding offset in `DICE_VALUE` packets: the server reports
/// `face + id * 38` (a sprite-index base), so decoding subtracts `id * 38`.
const DICE_VALUE_OFFSET: i64 = 38;

/// What the coordinator is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Idle,
    RollingFull,
    RollingTri,
    Closing,
}

impl std::fmt::Display for SessionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::RollingFull => "rolling",
            Self::RollingTri => "tri-rolling",
            Self::Closing => "closing",
        };
        write!(f, "{}", s)
    }
}

/// Why a session could not be started. Callers log these and drop the
/// command; a rejected start never disturbs the active session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("busy: a {mode} session is already in progress")]
    Busy { mode: SessionMode },
    #[error("not enough dice: {have} of {need} registered")]
    InsufficientDice { have: usize, need: usize },
}

/// Which roll variant a session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RollKind {
    Full,
    Tri,
}

/// How the result wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    /// Every expected die reported.
    Complete,
    /// The completion channel was torn down (a reset superseded the session).
    Aborted,
    /// The bounded wait expired before every die reported.
    TimedOut,
}

/// Registry plus transient session fields, updated atomically under one lock.
struct SessionState {
    registry: DiceRegistry,
    mode: SessionMode,
    /// Results still awaited by the active session.
    pending: usize,
    /// Monotonic session tag; a completing task only touches state whose
    /// generation still matches the one it was armed with.
    generation: u64,
    /// Dice armed for the active session that have not reported yet.
    expected: Vec<DieId>,
    /// Fires once `pending` reaches zero. Dropping it releases the waiter.
    completion: Option<oneshot::Sender<()>>,
    chat_enabled: bool,
}

/// Coordinates dice discovery, roll/close sessions, and result collection.
pub struct RollCoordinator {
    state: Mutex<SessionState>,
    game: Arc<dyn GameServerPort>,
    chat: Arc<dyn ChatPort>,
    config: Config,
}

impl RollCoordinator {
    pub fn new(game: Arc<dyn GameServerPort>, chat: Arc<dyn ChatPort>, config: Config) -> Self {
        let chat_enabled = config.chat_enabled;
        Self {
            state: Mutex::new(SessionState {
                registry: DiceRegistry::new(),
                mode: SessionMode::Idle,
                pending: 0,
                generation: 0,
                expected: Vec::new(),
                completion: None,
                chat_enabled,
            }),
            game,
            chat,
            config,
        }
    }

    // =========================================================================
    // Session entry points
    // =========================================================================

    /// Roll all five dice and shout the poker hand when every result is in.
    pub async fn start_full_roll(self: &Arc<Self>) -> Result<JoinHandle<()>, SessionError> {
        self.start_roll(RollKind::Full).await
    }

    /// Roll the dice at seats 0, 2 and 4 and shout the sum of their values.
    pub async fn start_tri_roll(self: &Arc<Self>) -> Result<JoinHandle<()>, SessionError> {
        self.start_roll(RollKind::Tri).await
    }

    async fn start_roll(
        self: &Arc<Self>,
        kind: RollKind,
    ) -> Result<JoinHandle<()>, SessionError> {
        // Arm the session entirely under the lock, before the first command
        // leaves: a die can report back faster than the pacing loop runs.
        let (targets, generation, rx) = {
            let mut st = self.state.lock().await;
            if st.mode != SessionMode::Idle {
                return Err(SessionError::Busy { mode: st.mode });
            }
            if st.registry.count() != MAX_DICE {
                return Err(SessionError::InsufficientDice {
                    have: st.registry.count(),
                    need: MAX_DICE,
                });
            }

            let targets: Vec<DieId> = match kind {
                RollKind::Full => st.registry.slots().iter().map(|d| d.id).collect(),
                // Seats 0, 2, 4: the assumed seating order groups the players.
                RollKind::Tri => st
                    .registry
                    .slots()
                    .iter()
                    .step_by(2)
                    .map(|d| d.id)
                    .collect(),
            };
            for die in st.registry.slots_mut() {
                if targets.contains(&die.id) {
                    die.mark_rolling();
                }
            }

            st.mode = match kind {
                RollKind::Full => SessionMode::RollingFull,
                RollKind::Tri => SessionMode::RollingTri,
            };
            st.generation += 1;
            st.pending = targets.len();
            st.expected = targets.clone();
            let (tx, rx) = oneshot::channel();
            st.completion = Some(tx);

            (targets, st.generation, rx)
        };

        info!(dice = targets.len(), mode = %kind_mode(kind), "Roll session started");
        let this = Arc::clone(self);
        Ok(tokio::spawn(async move {
            this.run_roll_session(kind, targets, generation, rx).await;
        }))
    }

    /// Turn off every registered die. No results are awaited; the session
    /// ends as soon as the last command is sent.
    pub async fn start_close_all(self: &Arc<Self>) -> Result<JoinHandle<()>, SessionError> {
        let (targets, generation) = {
            let mut st = self.state.lock().await;
            if st.mode != SessionMode::Idle {
                return Err(SessionError::Busy { mode: st.mode });
            }
            st.mode = SessionMode::Closing;
            st.generation += 1;
            for die in st.registry.slots_mut() {
                die.mark_closed();
            }
            let targets: Vec<DieId> = st.registry.slots().iter().map(|d| d.id).collect();
            (targets, st.generation)
        };

        info!(dice = targets.len(), "Closing all dice");
        let this = Arc::clone(self);
        Ok(tokio::spawn(async move {
            this.run_close_session(targets, generation).await;
        }))
    }

    /// Drop any in-flight session and forget every registered die.
    ///
    /// Bumping the generation and tearing down the completion channel
    /// releases a blocked session task immediately; it sees the stale
    /// generation and walks away without evaluating.
    pub async fn reset(&self) {
        let mut st = self.state.lock().await;
        st.generation += 1;
        st.completion = None;
        st.pending = 0;
        st.expected.clear();
        st.mode = SessionMode::Idle;
        st.registry.reset();
        info!("All saved dice reset");
    }

    /// Toggle whether hand results are shouted into the room chat.
    pub async fn set_chat_enabled(&self, enabled: bool) {
        let mut st = self.state.lock().await;
        st.chat_enabled = enabled;
        info!(enabled, "Chat output toggled");
    }

    // =========================================================================
    // Inbound observations
    // =========================================================================

    /// A die was seen being instructed to roll.
    pub async fn on_roll_sighting(&self, id: DieId) {
        self.observe(id, SightingKind::Roll).await;
    }

    /// A die was seen being instructed to turn off.
    pub async fn on_close_sighting(&self, id: DieId) {
        self.observe(id, SightingKind::Close).await;
    }

    async fn observe(&self, id: DieId, kind: SightingKind) {
        let mut st = self.state.lock().await;
        match st.registry.observe(id, kind) {
            Observed::Added => {
                info!(die = %id, count = st.registry.count(), "Die registered");
            }
            Observed::Known => {}
            Observed::Ignored => {
                debug!(die = %id, "Sighting ignored: registry full or invalid id");
            }
        }
    }

    /// A die reported its value.
    ///
    /// The raw value is decoded with the per-die offset and stored on the
    /// slot whenever the die is registered, session or not. The completion
    /// counter only moves when the die is armed for the active session and
    /// has not been counted yet, so stray or duplicate reports can never
    /// finish a session early.
    pub async fn on_result(&self, id: DieId, raw_value: i32) {
        let adjusted = (raw_value as i64 - id.as_i64() * DICE_VALUE_OFFSET) as i32;
        let mut st = self.state.lock().await;

        match st.registry.find_mut(id) {
            Some(die) => die.record_value(adjusted),
            None => {
                debug!(die = %id, "Result for unregistered die discarded");
                return;
            }
        }

        if !matches!(st.mode, SessionMode::RollingFull | SessionMode::RollingTri) {
            debug!(die = %id, value = adjusted, "Result stored outside a session");
            return;
        }

        if let Some(pos) = st.expected.iter().position(|e| *e == id) {
            st.expected.remove(pos);
            st.pending = st.pending.saturating_sub(1);
            info!(die = %id, value = adjusted, remaining = st.pending, "Die reported");
            if st.pending == 0 {
                if let Some(tx) = st.completion.take() {
                    let _ = tx.send(());
                }
            }
        } else {
            debug!(die = %id, "Result for die outside the active session");
        }
    }

    // =========================================================================
    // Raw packet entry points
    // =========================================================================

    /// Handle a `THROW_DICE` packet payload: "<id> ...".
    pub async fn handle_throw_packet(&self, payload: &str) {
        let Some(id_str) = payload.split_whitespace().next() else {
            debug!(raw = payload, "Empty throw packet ignored");
            return;
        };
        match id_str.parse::<DieId>() {
            Ok(id) => self.on_roll_sighting(id).await,
            Err(e) => warn!(raw = payload, error = %e, "Failed to parse die id from throw packet"),
        }
    }

    /// Handle a `DICE_OFF` packet payload: "<id>".
    pub async fn handle_dice_off_packet(&self, payload: &str) {
        match payload.trim().parse::<DieId>() {
            Ok(id) => self.on_close_sighting(id).await,
            Err(e) => warn!(raw = payload, error = %e, "Failed to parse die id from dice-off packet"),
        }
    }

    /// Handle a `DICE_VALUE` packet payload: "<id> <raw value>".
    pub async fn handle_result_packet(&self, payload: &str) {
        let mut fields = payload.split_whitespace();
        let (Some(id_str), Some(value_str)) = (fields.next(), fields.next()) else {
            debug!(raw = payload, "Short dice value packet ignored");
            return;
        };
        let id = match id_str.parse::<DieId>() {
            Ok(id) => id,
            Err(e) => {
                warn!(raw = payload, error = %e, "Failed to parse die id from value packet");
                return;
            }
        };
        let raw_value: i32 = match value_str.parse() {
            Ok(v) => v,
            Err(_) => {
                warn!(raw = payload, "Failed to parse die value from value packet");
                return;
            }
        };
        self.on_result(id, raw_value).await;
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    pub async fn mode(&self) -> SessionMode {
        self.state.lock().await.mode
    }

    pub async fn dice(&self) -> Vec<Die> {
        self.state.lock().await.registry.slots().to_vec()
    }

    pub async fn chat_enabled(&self) -> bool {
        self.state.lock().await.chat_enabled
    }

    // =========================================================================
    // Session tasks
    // =========================================================================

    async fn run_roll_session(
        &self,
        kind: RollKind,
        targets: Vec<DieId>,
        generation: u64,
        rx: oneshot::Receiver<()>,
    ) {
        for id in &targets {
            if let Err(e) = self.game.send_throw_dice(*id).await {
                warn!(die = %id, error = %e, "Failed to send throw command");
            }
            sleep(self.config.command_delay).await;
        }
        sleep(self.config.settle_delay).await;

        let outcome = match self.config.result_timeout {
            Some(limit) => match timeout(limit, rx).await {
                Ok(Ok(())) => WaitOutcome::Complete,
                Ok(Err(_)) => WaitOutcome::Aborted,
                Err(_) => WaitOutcome::TimedOut,
            },
            None => match rx.await {
                Ok(()) => WaitOutcome::Complete,
                Err(_) => WaitOutcome::Aborted,
            },
        };

        self.finish_roll_session(kind, generation, outcome).await;
    }

    async fn finish_roll_session(&self, kind: RollKind, generation: u64, outcome: WaitOutcome) {
        let message = {
            let mut st = self.state.lock().await;
            if st.generation != generation {
                debug!(generation, "Roll session superseded; nothing to finish");
                return;
            }

            match outcome {
                WaitOutcome::Complete => {
                    let values: Vec<i32> = match kind {
                        RollKind::Full => st.registry.slots().iter().map(|d| d.value).collect(),
                        RollKind::Tri => st
                            .registry
                            .slots()
                            .iter()
                            .step_by(2)
                            .map(|d| d.value)
                            .collect(),
                    };
                    st.mode = SessionMode::Idle;
                    st.pending = 0;
                    st.expected.clear();
                    st.completion = None;
                    let chat = st.chat_enabled;

                    let text = match kind {
                        RollKind::Full => {
                            let faces: [i32; 5] = match values.try_into() {
                                Ok(f) => f,
                                Err(_) => {
                                    warn!("Registry changed mid-session; dropping evaluation");
                                    return;
                                }
                            };
                            let hand = classify(&faces, LetterPlacement::Suffixed);
                            info!(
                                hand = %hand,
                                description = %evaluate_hand(&faces),
                                "Hand evaluated"
                            );
                            hand
                        }
                        RollKind::Tri => {
                            let total = sum_hand(&values);
                            info!(total = %total, "Tri hand summed");
                            total
                        }
                    };
                    chat.then_some(text)
                }
                WaitOutcome::TimedOut => {
                    warn!(
                        missing = st.pending,
                        "Roll session timed out before every die reported"
                    );
                    st.mode = SessionMode::Idle;
                    st.pending = 0;
                    st.expected.clear();
                    st.completion = None;
                    None
                }
                WaitOutcome::Aborted => {
                    debug!("Roll session aborted");
                    st.mode = SessionMode::Idle;
                    st.pending = 0;
                    st.expected.clear();
                    st.completion = None;
                    None
                }
            }
        };

        if let Some(text) = message {
            if let Err(e) = self.chat.send_message(&text).await {
                warn!(error = %e, "Failed to send hand message");
            }
        }
    }

    async fn run_close_session(&self, targets: Vec<DieId>, generation: u64) {
        for id in &targets {
            if let Err(e) = self.game.send_dice_off(*id).await {
                warn!(die = %id, error = %e, "Failed to send dice-off command");
            }
            sleep(self.config.command_delay).await;
        }

        let mut st = self.state.lock().await;
        if st.generation == generation {
            st.mode = SessionMode::Idle;
            info!(dice = targets.len(), "All dice closed");
        }
    }
}

fn kind_mode(kind: RollKind) -> SessionMode {
    match kind {
        RollKind::Full => SessionMode::RollingFull,
        RollKind::Tri => SessionMode::RollingTri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockChatPort, MockGameServerPort};
    use mockall::predicate::eq;
    use std::time::Duration;

    fn raw_for(id: i64, face: i32) -> i32 {
        face + (id * DICE_VALUE_OFFSET) as i32
    }

    fn quiet_game() -> MockGameServerPort {
        let mut game = MockGameServerPort::new();
        game.expect_send_throw_dice().returning(|_| Ok(()));
        game.expect_send_dice_off().returning(|_| Ok(()));
        game
    }

    fn coordinator_with(
        game: MockGameServerPort,
        chat: MockChatPort,
        config: Config,
    ) -> Arc<RollCoordinator> {
        Arc::new(RollCoordinator::new(Arc::new(game), Arc::new(chat), config))
    }

    async fn register_dice(coordinator: &RollCoordinator, ids: &[i64]) {
        for id in ids {
            coordinator.on_roll_sighting(DieId::new(*id)).await;
        }
    }

    #[tokio::test]
    async fn roll_completes_and_shouts_the_hand() {
        let mut chat = MockChatPort::new();
        chat.expect_send_message()
            .with(eq("25fh"))
            .times(1)
            .returning(|_| Ok(()));
        let coordinator = coordinator_with(quiet_game(), chat, Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_full_roll().await.unwrap();
        for (id, face) in [(1, 2), (2, 2), (3, 2), (4, 5), (5, 5)] {
            coordinator.on_result(DieId::new(id), raw_for(id, face)).await;
        }
        handle.await.unwrap();

        assert_eq!(coordinator.mode().await, SessionMode::Idle);
        let values: Vec<i32> = coordinator.dice().await.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![2, 2, 2, 5, 5]);
    }

    #[tokio::test]
    async fn roll_with_fewer_than_five_dice_is_rejected() {
        let coordinator =
            coordinator_with(MockGameServerPort::new(), MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4]).await;

        let err = coordinator.start_full_roll().await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::InsufficientDice { have: 4, need: 5 }
        ));
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn second_start_while_rolling_is_rejected() {
        let mut chat = MockChatPort::new();
        chat.expect_send_message().times(1).returning(|_| Ok(()));
        let coordinator = coordinator_with(quiet_game(), chat, Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_full_roll().await.unwrap();
        assert!(matches!(
            coordinator.start_full_roll().await,
            Err(SessionError::Busy { .. })
        ));
        assert!(matches!(
            coordinator.start_close_all().await,
            Err(SessionError::Busy { .. })
        ));

        for id in 1..=5 {
            coordinator.on_result(DieId::new(id), raw_for(id, 3)).await;
        }
        handle.await.unwrap();
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn chat_off_suppresses_the_hand_message() {
        // No expectation on the chat mock: any send would panic the test.
        let coordinator = coordinator_with(quiet_game(), MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;
        coordinator.set_chat_enabled(false).await;

        let handle = coordinator.start_full_roll().await.unwrap();
        for id in 1..=5 {
            coordinator.on_result(DieId::new(id), raw_for(id, 6)).await;
        }
        handle.await.unwrap();
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn stray_and_duplicate_results_never_complete_early() {
        let mut chat = MockChatPort::new();
        chat.expect_send_message().times(1).returning(|_| Ok(()));
        let coordinator = coordinator_with(quiet_game(), chat, Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_full_roll().await.unwrap();

        // A die that was never registered.
        coordinator.on_result(DieId::new(99), raw_for(99, 1)).await;
        // Four real results, one of them repeated.
        for id in [1, 1, 2, 3, 4] {
            coordinator.on_result(DieId::new(id), raw_for(id, 2)).await;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!handle.is_finished(), "one die is still outstanding");

        coordinator.on_result(DieId::new(5), raw_for(5, 2)).await;
        handle.await.unwrap();
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn result_outside_a_session_updates_the_slot_only() {
        let coordinator =
            coordinator_with(MockGameServerPort::new(), MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[371]).await;

        coordinator.on_result(DieId::new(371), raw_for(371, 4)).await;

        let dice = coordinator.dice().await;
        assert_eq!(dice[0].value, 4);
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn tri_roll_targets_seats_0_2_4_and_shouts_the_sum() {
        let mut game = MockGameServerPort::new();
        game.expect_send_throw_dice()
            .withf(|id| [1, 3, 5].contains(&id.as_i64()))
            .times(3)
            .returning(|_| Ok(()));
        let mut chat = MockChatPort::new();
        chat.expect_send_message()
            .with(eq("12"))
            .times(1)
            .returning(|_| Ok(()));
        let coordinator = coordinator_with(game, chat, Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_tri_roll().await.unwrap();
        for (id, face) in [(1, 2), (3, 4), (5, 6)] {
            coordinator.on_result(DieId::new(id), raw_for(id, face)).await;
        }
        handle.await.unwrap();
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn reset_aborts_an_inflight_session_without_evaluating() {
        let coordinator = coordinator_with(quiet_game(), MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_full_roll().await.unwrap();
        coordinator.reset().await;
        handle.await.unwrap();

        assert_eq!(coordinator.mode().await, SessionMode::Idle);
        assert!(coordinator.dice().await.is_empty());
    }

    #[tokio::test]
    async fn timed_out_session_returns_to_idle_and_keeps_values() {
        let config = Config {
            result_timeout: Some(Duration::from_millis(100)),
            ..Config::for_tests()
        };
        let coordinator = coordinator_with(quiet_game(), MockChatPort::new(), config);
        register_dice(&coordinator, &[1, 2, 3, 4, 5]).await;

        let handle = coordinator.start_full_roll().await.unwrap();
        for (id, face) in [(1, 6), (2, 6), (3, 6)] {
            coordinator.on_result(DieId::new(id), raw_for(id, face)).await;
        }
        handle.await.unwrap();

        assert_eq!(coordinator.mode().await, SessionMode::Idle);
        let values: Vec<i32> = coordinator.dice().await.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![6, 6, 6, 0, 0]);

        // The coordinator accepts a fresh session afterwards.
        assert!(coordinator.start_close_all().await.is_ok());
    }

    #[tokio::test]
    async fn close_all_works_with_any_number_of_dice() {
        let mut game = MockGameServerPort::new();
        game.expect_send_dice_off().times(2).returning(|_| Ok(()));
        let coordinator = coordinator_with(game, MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[7, 8]).await;

        let handle = coordinator.start_close_all().await.unwrap();
        handle.await.unwrap();

        assert_eq!(coordinator.mode().await, SessionMode::Idle);
        assert!(coordinator.dice().await.iter().all(|d| d.is_closed));
    }

    #[tokio::test]
    async fn offset_decoding_recovers_the_face_value() {
        let coordinator =
            coordinator_with(MockGameServerPort::new(), MockChatPort::new(), Config::for_tests());
        register_dice(&coordinator, &[371]).await;

        coordinator.on_result(DieId::new(371), 371 * 38 + 4).await;
        assert_eq!(coordinator.dice().await[0].value, 4);
    }

    #[tokio::test]
    async fn malformed_packets_are_discarded() {
        let coordinator =
            coordinator_with(MockGameServerPort::new(), MockChatPort::new(), Config::for_tests());

        coordinator.handle_throw_packet("").await;
        coordinator.handle_throw_packet("garbage").await;
        coordinator.handle_dice_off_packet("12abc").await;
        coordinator.handle_result_packet("12").await;
        coordinator.handle_result_packet("twelve six").await;
        coordinator.handle_result_packet("0 42").await;

        assert!(coordinator.dice().await.is_empty());
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn packet_entry_points_feed_the_registry_and_results() {
        let coordinator =
            coordinator_with(MockGameServerPort::new(), MockChatPort::new(), Config::for_tests());

        coordinator.handle_throw_packet("371 H").await;
        coordinator.handle_dice_off_packet("372").await;
        coordinator
            .handle_result_packet(&format!("371 {}", 371 * 38 + 5))
            .await;

        let dice = coordinator.dice().await;
        assert_eq!(dice.len(), 2);
        assert_eq!(dice[0].value, 5);
        assert!(dice[1].is_closed, "dice-off sighting starts closed");
    }
}
