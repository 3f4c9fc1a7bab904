//! Typed events into and notices out of the engine

use crate::DecoyAction;
use chrono::{DateTime, Local};

/// User interactions fed into the engine by the front-end.
///
/// Time never rides along on these; the front-end passes the current
/// instants to `Engine::handle` and `Engine::tick` explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The start control was activated with the given duration text.
    DurationEntered(String),

    /// A decoy action on the lock overlay was activated.
    DecoyPressed(DecoyAction),

    /// The parent override action was activated; opens the PIN prompt.
    OverrideRequested,

    /// PIN text was submitted from the override prompt.
    PinSubmitted(String),

    /// The override prompt was dismissed without submitting.
    PinCancelled,

    /// The end-call control on the fake call view was activated.
    CallEnded,
}

/// Notices emitted by the engine for the front-end to surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// A session was armed successfully.
    SessionStarted {
        minutes: u64,
        deadline: DateTime<Local>,
    },

    /// The duration text did not parse as positive whole minutes.
    InvalidDuration { input: String },

    /// The session deadline passed; the lock overlay is now active.
    SessionExpired,

    /// A static decoy acknowledged the press with its message.
    DecoyAcknowledged {
        action: DecoyAction,
        message: &'static str,
    },

    /// The fake call view opened.
    CallStarted,

    /// One whole second of call time elapsed.
    CallTick { elapsed_secs: u64 },

    /// The fake call view closed and its counter was discarded.
    CallEnded,

    /// The override PIN prompt opened.
    PinPromptOpened,

    /// The submitted PIN did not match; the overlay stays locked.
    PinRejected,

    /// The submitted PIN matched; the process should terminate.
    Unlocked,
}
