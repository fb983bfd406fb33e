//! Client configuration.

use borders_shared::{DEBOUNCE_DELAY_MS, DEFAULT_API_BASE, HINT_CLEAR_DELAY_MS};
use std::time::Duration;

/// Settings for a [`GameClient`](crate::game::GameClient) and its authority.
///
/// Defaults match the fixed timings the game is designed around: a 300 ms
/// typing debounce and a 10 s hint display.
///
/// ```
/// use borders_client::config::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new("http://127.0.0.1:9000/api")
///     .with_debounce_delay(Duration::from_millis(150));
/// assert_eq!(config.debounce_delay, Duration::from_millis(150));
/// assert_eq!(config.hint_clear_delay, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub api_base: String,
    /// Quiet period before a typed (non-immediate) update is sent.
    pub debounce_delay: Duration,
    /// How long a hint stays on screen.
    pub hint_clear_delay: Duration,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            ..Self::default()
        }
    }

    pub fn with_debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    pub fn with_hint_clear_delay(mut self, delay: Duration) -> Self {
        self.hint_clear_delay = delay;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            debounce_delay: Duration::from_millis(DEBOUNCE_DELAY_MS),
            hint_clear_delay: Duration::from_millis(HINT_CLEAR_DELAY_MS),
        }
    }
}
