//! Runtime configuration for curfew
//!
//! There are no config files or environment knobs; the defaults below
//! are the whole surface. The PIN is configuration, not security: it
//! is held in cleartext and compared verbatim, with no rate limiting.

use std::time::Duration;

/// Default parent override PIN.
pub const DEFAULT_PARENT_PIN: &str = "1234";

/// Default caller label shown on the fake call view.
pub const DEFAULT_CALLER_LABEL: &str = "Mom";

/// Runtime configuration, constructed in `main` and handed to the engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parent override PIN, compared verbatim against entered text.
    pub parent_pin: String,

    /// Caller label shown on the fake call view.
    pub caller_label: String,

    /// How often the front-end feeds a tick into the engine. Must be
    /// well under one second so call ticks and expiry land on time.
    pub tick_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parent_pin: DEFAULT_PARENT_PIN.into(),
            caller_label: DEFAULT_CALLER_LABEL.into(),
            tick_interval: Duration::from_millis(200),
        }
    }
}
