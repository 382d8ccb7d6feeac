//! Chat command parsing and dispatch.
//!
//! The bot listens to the owner's own chat lines. A line is a command when it
//! starts with `:`; the keyword is the last whitespace-separated token, so
//! both ":roll" and ": please roll" trigger a roll. Unknown keywords are
//! ignored so normal chat starting with a colon stays harmless.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::use_cases::RollCoordinator;

/// The command prefix in chat.
const COMMAND_PREFIX: char = ':';

/// A recognized chat command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    /// Roll all five dice and shout the poker hand.
    Roll,
    /// Roll the three player dice and shout the sum.
    Tri,
    /// Turn all dice off.
    Close,
    /// Forget every die and abort any running session.
    Reset,
    /// Re-enable hand messages in chat.
    ChatOn,
    /// Stop shouting hand messages.
    ChatOff,
}

impl ChatCommand {
    /// Parse a chat line into a command, if it is one.
    pub fn parse(message: &str) -> Option<Self> {
        let rest = message.trim().strip_prefix(COMMAND_PREFIX)?;
        let keyword = rest.split_whitespace().last().unwrap_or(rest);
        match keyword {
            "roll" => Some(Self::Roll),
            "tri" => Some(Self::Tri),
            "close" => Some(Self::Close),
            "reset" => Some(Self::Reset),
            "chaton" => Some(Self::ChatOn),
            "chatoff" => Some(Self::ChatOff),
            _ => None,
        }
    }
}

/// Routes chat commands into the [`RollCoordinator`].
///
/// Session rejections (busy, not enough dice) are logged and swallowed here;
/// the issuer gets no structured error, only the absence of a hand message.
pub struct CommandDispatcher {
    coordinator: Arc<RollCoordinator>,
}

impl CommandDispatcher {
    pub fn new(coordinator: Arc<RollCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Parse and dispatch a raw chat line.
    ///
    /// Returns the session task handle when the line started one, so callers
    /// (and tests) can await session completion.
    pub async fn handle_chat_message(&self, message: &str) -> Option<JoinHandle<()>> {
        let command = ChatCommand::parse(message)?;
        info!(?command, "Chat command received");
        self.dispatch(command).await
    }

    /// Dispatch an already-parsed command.
    pub async fn dispatch(&self, command: ChatCommand) -> Option<JoinHandle<()>> {
        match command {
            ChatCommand::Roll => match self.coordinator.start_full_roll().await {
                Ok(handle) => Some(handle),
                Err(e) => {
                    debug!(error = %e, "Roll command dropped");
                    None
                }
            },
            ChatCommand::Tri => match self.coordinator.start_tri_roll().await {
                Ok(handle) => Some(handle),
                Err(e) => {
                    debug!(error = %e, "Tri command dropped");
                    None
                }
            },
            ChatCommand::Close => match self.coordinator.start_close_all().await {
                Ok(handle) => Some(handle),
                Err(e) => {
                    debug!(error = %e, "Close command dropped");
                    None
                }
            },
            ChatCommand::Reset => {
                self.coordinator.reset().await;
                None
            }
            ChatCommand::ChatOn => {
                self.coordinator.set_chat_enabled(true).await;
                None
            }
            ChatCommand::ChatOff => {
                self.coordinator.set_chat_enabled(false).await;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::infrastructure::ports::{MockChatPort, MockGameServerPort};
    use crate::use_cases::SessionMode;
    use dicebot_domain::DieId;

    #[test]
    fn parses_bare_commands() {
        assert_eq!(ChatCommand::parse(":roll"), Some(ChatCommand::Roll));
        assert_eq!(ChatCommand::parse(":tri"), Some(ChatCommand::Tri));
        assert_eq!(ChatCommand::parse(":close"), Some(ChatCommand::Close));
        assert_eq!(ChatCommand::parse(":reset"), Some(ChatCommand::Reset));
        assert_eq!(ChatCommand::parse(":chaton"), Some(ChatCommand::ChatOn));
        assert_eq!(ChatCommand::parse(":chatoff"), Some(ChatCommand::ChatOff));
    }

    #[test]
    fn keyword_is_the_last_token() {
        assert_eq!(
            ChatCommand::parse(": dice please roll"),
            Some(ChatCommand::Roll)
        );
    }

    #[test]
    fn ignores_lines_without_the_prefix() {
        assert_eq!(ChatCommand::parse("roll"), None);
        assert_eq!(ChatCommand::parse("just chatting"), None);
    }

    #[test]
    fn ignores_unknown_keywords() {
        assert_eq!(ChatCommand::parse(":dance"), None);
        assert_eq!(ChatCommand::parse(":"), None);
    }

    #[tokio::test]
    async fn rejected_roll_is_swallowed() {
        // Fewer than five dice: the coordinator refuses, the dispatcher drops.
        let coordinator = Arc::new(RollCoordinator::new(
            Arc::new(MockGameServerPort::new()),
            Arc::new(MockChatPort::new()),
            Config::for_tests(),
        ));
        coordinator.on_roll_sighting(DieId::new(1)).await;
        let dispatcher = CommandDispatcher::new(coordinator.clone());

        assert!(dispatcher.handle_chat_message(":roll").await.is_none());
        assert_eq!(coordinator.mode().await, SessionMode::Idle);
    }

    #[tokio::test]
    async fn chat_toggle_commands_flip_suppression() {
        let coordinator = Arc::new(RollCoordinator::new(
            Arc::new(MockGameServerPort::new()),
            Arc::new(MockChatPort::new()),
            Config::for_tests(),
        ));
        let dispatcher = CommandDispatcher::new(coordinator.clone());

        dispatcher.handle_chat_message(":chatoff").await;
        assert!(!coordinator.chat_enabled().await);
        dispatcher.handle_chat_message(":chaton").await;
        assert!(coordinator.chat_enabled().await);
    }
}
