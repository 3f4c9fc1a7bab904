//! Lock overlay state machine
//!
//! The overlay offers three decoy actions and one PIN-gated override.
//! Only the override path can leave the overlay, and only by
//! terminating the process.

/// Current state of the lock overlay.
///
/// `Terminated` is terminal; the front-end shuts the process down once
/// it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockState {
    /// Overlay shown, actions available.
    #[default]
    Displayed,
    /// Override prompt open, awaiting PIN text.
    Unlocking,
    /// PIN matched; the overlay is done.
    Terminated,
}

/// Outcome of a PIN submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinOutcome {
    /// Exact match; terminate the process.
    Unlocked,
    /// Anything else, including empty text and case variants.
    Rejected,
}

/// Decoy actions on the lock overlay. They simulate opening another
/// application without doing so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoyAction {
    /// Opens the fake call view as a child of the overlay.
    CallingApp,
    StudyApp,
    Mail,
}

impl DecoyAction {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CallingApp => "Calling App",
            Self::StudyApp => "Study App",
            Self::Mail => "Mail",
        }
    }

    /// Static acknowledgment for decoys that do nothing further.
    /// The calling app opens the fake call view instead.
    pub fn acknowledgment(&self) -> Option<&'static str> {
        match self {
            Self::CallingApp => None,
            Self::StudyApp => Some("Study App Opened"),
            Self::Mail => Some("Mail Opened"),
        }
    }
}

/// The lock overlay itself. Holds nothing but its state; the PIN it
/// checks against comes from the engine's config.
#[derive(Debug, Default)]
pub struct LockOverlay {
    state: LockState,
}

impl LockOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LockState {
        self.state
    }

    /// Displayed -> Unlocking. Ignored in any other state.
    pub fn begin_override(&mut self) -> bool {
        if self.state == LockState::Displayed {
            self.state = LockState::Unlocking;
            true
        } else {
            false
        }
    }

    /// Unlocking -> Displayed without checking a PIN.
    pub fn cancel_override(&mut self) {
        if self.state == LockState::Unlocking {
            self.state = LockState::Displayed;
        }
    }

    /// Check submitted PIN text against the configured PIN.
    ///
    /// Comparison is verbatim string equality; there is no retry
    /// limit and no lockout. Ignored unless the prompt is open.
    pub fn submit_pin(&mut self, parent_pin: &str, entered: &str) -> Option<PinOutcome> {
        if self.state != LockState::Unlocking {
            return None;
        }

        if entered == parent_pin {
            self.state = LockState::Terminated;
            Some(PinOutcome::Unlocked)
        } else {
            self.state = LockState::Displayed;
            Some(PinOutcome::Rejected)
        }
    }
}
