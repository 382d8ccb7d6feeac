//! Environment-driven configuration.
//!
//! Timings mirror the pacing the live game tolerates: commands are spaced out
//! so the server does not drop them, and a settle delay gives the room time
//! to animate before the bot starts counting results.

use std::time::Duration;

/// Runtime configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pause between consecutive per-die commands.
    pub command_delay: Duration,
    /// Extra wait after the last roll command before blocking on results.
    pub settle_delay: Duration,
    /// Upper bound on the result wait. `None` blocks until every result
    /// arrives, however long that takes.
    pub result_timeout: Option<Duration>,
    /// Whether the final hand message is shouted into the chat by default.
    /// Toggled at runtime with `:chaton` / `:chatoff`.
    pub chat_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            command_delay: Duration::from_millis(600),
            settle_delay: Duration::from_millis(1000),
            result_timeout: Some(Duration::from_millis(30_000)),
            chat_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults.
    ///
    /// - `DICEBOT_COMMAND_DELAY_MS` - pacing between per-die commands (600)
    /// - `DICEBOT_SETTLE_DELAY_MS` - settle wait after the last command (1000)
    /// - `DICEBOT_RESULT_TIMEOUT_MS` - result wait bound, 0 waits forever (30000)
    /// - `DICEBOT_CHAT_ENABLED` - initial chat state (true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let command_delay = env_millis("DICEBOT_COMMAND_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.command_delay);
        let settle_delay = env_millis("DICEBOT_SETTLE_DELAY_MS")
            .map(Duration::from_millis)
            .unwrap_or(defaults.settle_delay);
        let result_timeout = match env_millis("DICEBOT_RESULT_TIMEOUT_MS") {
            Some(0) => None,
            Some(ms) => Some(Duration::from_millis(ms)),
            None => defaults.result_timeout,
        };
        let chat_enabled = std::env::var("DICEBOT_CHAT_ENABLED")
            .ok()
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(defaults.chat_enabled);

        Self {
            command_delay,
            settle_delay,
            result_timeout,
            chat_enabled,
        }
    }

    /// Fast timings for tests: no pacing, short settle, short timeout.
    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            command_delay: Duration::from_millis(1),
            settle_delay: Duration::from_millis(1),
            result_timeout: Some(Duration::from_millis(2_000)),
            chat_enabled: true,
        }
    }
}

fn env_millis(key: &str) -> Option<u64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(ms) => Some(ms),
        Err(_) => {
            tracing::warn!(%key, %raw, "Ignoring unparseable duration override");
            None
        }
    }
}
