//! Session duration parsing and the one-shot session timer

use chrono::{DateTime, Local};
use curfew_util::{CurfewError, MonotonicInstant};
use std::time::Duration;

/// A validated session duration in whole minutes, always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionDuration(u64);

impl SessionDuration {
    /// Parse user-entered duration text.
    ///
    /// Accepts only a plain positive integer (no sign, no decimal
    /// point, no surrounding whitespace beyond what trimming removes).
    pub fn parse(text: &str) -> Result<Self, CurfewError> {
        let trimmed = text.trim();
        match trimmed.parse::<u64>() {
            Ok(minutes) if minutes > 0 => Ok(Self(minutes)),
            _ => Err(CurfewError::invalid_duration(text)),
        }
    }

    pub fn minutes(&self) -> u64 {
        self.0
    }

    /// The full countdown length: `minutes * 60` seconds.
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0.saturating_mul(60))
    }
}

impl std::fmt::Display for SessionDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} minutes", self.0)
    }
}

/// A one-shot countdown armed at session start.
///
/// Once armed there is no cancel or restart path; the timer lives for
/// the remainder of the process. Expiry is detected on tick and
/// reported exactly once.
#[derive(Debug)]
pub struct SessionTimer {
    duration: SessionDuration,

    /// Monotonic deadline (for enforcement)
    deadline_mono: MonotonicInstant,

    /// Wall-clock deadline (for display)
    deadline: DateTime<Local>,

    /// Set once the expiry has been reported.
    expired: bool,
}

impl SessionTimer {
    /// Arm the timer for the full session duration starting now.
    pub fn arm(
        duration: SessionDuration,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Self {
        // Durations large enough to overflow the clocks would never
        // expire within a process lifetime anyway; clamp them far out.
        const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

        let countdown = duration.as_duration();
        let deadline_mono = now_mono
            .checked_add(countdown)
            .unwrap_or(now_mono + FAR_FUTURE);
        let deadline = chrono::Duration::from_std(countdown)
            .ok()
            .and_then(|d| now.checked_add_signed(d))
            .unwrap_or_else(|| now + chrono::Duration::days(10_950));

        Self {
            duration,
            deadline_mono,
            deadline,
            expired: false,
        }
    }

    pub fn duration(&self) -> SessionDuration {
        self.duration
    }

    /// Wall-clock deadline, for the "locks at" readout.
    pub fn deadline(&self) -> DateTime<Local> {
        self.deadline
    }

    /// Time remaining using monotonic time
    pub fn time_remaining(&self, now_mono: MonotonicInstant) -> Duration {
        self.deadline_mono.saturating_duration_until(now_mono)
    }

    /// Check if the deadline has passed
    pub fn is_expired(&self, now_mono: MonotonicInstant) -> bool {
        now_mono >= self.deadline_mono
    }

    /// Report expiry. Returns true exactly once, on the first check
    /// at or after the deadline.
    pub fn take_expiry(&mut self, now_mono: MonotonicInstant) -> bool {
        if !self.expired && self.is_expired(now_mono) {
            self.expired = true;
            true
        } else {
            false
        }
    }
}
