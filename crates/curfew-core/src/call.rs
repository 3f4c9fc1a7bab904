//! Fake call elapsed-time tracking
//!
//! A call counts whole seconds from the instant it opened. The counter
//! only ever advances on tick and is discarded with the call, so a
//! fresh call always starts back at zero.

use curfew_util::{format_mm_ss, MonotonicInstant};

/// Status line on the fake call view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    /// Before the first tick.
    Calling,
    /// From the first tick onward.
    InCall,
}

impl CallStatus {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Calling => "Calling...",
            Self::InCall => "In Call",
        }
    }
}

/// An open fake call.
#[derive(Debug)]
pub struct FakeCall {
    started_at_mono: MonotonicInstant,

    /// Whole seconds ticked so far; trails wall time by under a tick.
    elapsed_secs: u64,
}

impl FakeCall {
    /// Open a call now, with the readout at "00:00".
    pub fn start(now_mono: MonotonicInstant) -> Self {
        Self {
            started_at_mono: now_mono,
            elapsed_secs: 0,
        }
    }

    /// Advance the counter to the last whole second boundary crossed.
    ///
    /// Returns the seconds newly accounted for by this tick (one per
    /// one-second boundary, so a late tick catches up in one call).
    pub fn tick(&mut self, now_mono: MonotonicInstant) -> u64 {
        let whole_secs = now_mono.duration_since(self.started_at_mono).as_secs();
        let new_secs = whole_secs.saturating_sub(self.elapsed_secs);
        self.elapsed_secs = whole_secs;
        new_secs
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn status(&self) -> CallStatus {
        if self.elapsed_secs == 0 {
            CallStatus::Calling
        } else {
            CallStatus::InCall
        }
    }

    /// Zero-padded `MM:SS` elapsed readout.
    pub fn readout(&self) -> String {
        format_mm_ss(self.elapsed_secs)
    }
}
