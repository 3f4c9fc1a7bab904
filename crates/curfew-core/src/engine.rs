//! The curfew engine
//!
//! Serializes every user interaction and timer tick into a single
//! synchronous state machine. The front-end calls `handle` for input
//! events and `tick` once per loop iteration; both return the notices
//! the front-end should surface.

use chrono::{DateTime, Local};
use curfew_util::MonotonicInstant;
use tracing::{debug, info, warn};

use crate::{
    Config, DecoyAction, FakeCall, InputEvent, LockOverlay, LockState, Notice, PinOutcome,
    SessionDuration, SessionTimer,
};

/// Which view the front-end should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Duration input and start control.
    Home,
    /// Full-screen lock overlay.
    Locked,
    /// Fake call view, child of the overlay.
    Call,
    /// Override succeeded; shut down.
    Terminated,
}

/// Top-level controller owning all component state.
pub struct Engine {
    config: Config,
    session: Option<SessionTimer>,
    overlay: Option<LockOverlay>,
    call: Option<FakeCall>,
}

impl Engine {
    pub fn new(config: Config) -> Self {
        info!(tick_interval_ms = config.tick_interval.as_millis() as u64, "Engine initialized");
        Self {
            config,
            session: None,
            overlay: None,
            call: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The armed session timer, if any.
    pub fn session(&self) -> Option<&SessionTimer> {
        self.session.as_ref()
    }

    /// The open fake call, if any.
    pub fn call(&self) -> Option<&FakeCall> {
        self.call.as_ref()
    }

    /// Lock overlay state, once the overlay exists.
    pub fn lock_state(&self) -> Option<LockState> {
        self.overlay.as_ref().map(|o| o.state())
    }

    /// The start control stays enabled only until a session is armed.
    pub fn start_enabled(&self) -> bool {
        self.session.is_none()
    }

    pub fn is_terminated(&self) -> bool {
        self.lock_state() == Some(LockState::Terminated)
    }

    /// Which view to render right now.
    pub fn screen(&self) -> Screen {
        match self.lock_state() {
            Some(LockState::Terminated) => Screen::Terminated,
            Some(_) if self.call.is_some() => Screen::Call,
            Some(_) => Screen::Locked,
            None => Screen::Home,
        }
    }

    /// Handle one user interaction.
    pub fn handle(
        &mut self,
        event: InputEvent,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<Notice> {
        match event {
            InputEvent::DurationEntered(text) => self.handle_duration(&text, now, now_mono),
            InputEvent::DecoyPressed(action) => self.handle_decoy(action, now_mono),
            InputEvent::OverrideRequested => self.handle_override_requested(),
            InputEvent::PinSubmitted(pin) => self.handle_pin(&pin),
            InputEvent::PinCancelled => self.handle_pin_cancelled(),
            InputEvent::CallEnded => self.handle_call_ended(),
        }
    }

    /// Advance timers. Called once per front-end loop iteration.
    pub fn tick(&mut self, now_mono: MonotonicInstant) -> Vec<Notice> {
        let mut notices = Vec::new();

        // Session expiry: replace the home screen with the lock overlay,
        // exactly once.
        if self.overlay.is_none() {
            if let Some(session) = &mut self.session {
                if session.take_expiry(now_mono) {
                    info!(minutes = session.duration().minutes(), "Session expired, locking");
                    self.overlay = Some(LockOverlay::new());
                    notices.push(Notice::SessionExpired);
                }
            }
        }

        // Call tick: one notice per whole second elapsed. A late tick
        // catches up with one notice per boundary crossed.
        if let Some(call) = &mut self.call {
            let new_secs = call.tick(now_mono);
            let elapsed = call.elapsed_secs();
            for i in (0..new_secs).rev() {
                notices.push(Notice::CallTick {
                    elapsed_secs: elapsed - i,
                });
            }
        }

        notices
    }

    fn handle_duration(
        &mut self,
        text: &str,
        now: DateTime<Local>,
        now_mono: MonotonicInstant,
    ) -> Vec<Notice> {
        // Start is disabled for the rest of the process once a session
        // is armed, and the home screen is gone once locked.
        if self.session.is_some() || self.overlay.is_some() {
            debug!("Start request ignored, session already armed");
            return Vec::new();
        }

        let duration = match SessionDuration::parse(text) {
            Ok(d) => d,
            Err(err) => {
                warn!(input = %text, error = %err, "Invalid session duration");
                return vec![Notice::InvalidDuration {
                    input: text.to_string(),
                }];
            }
        };

        let timer = SessionTimer::arm(duration, now, now_mono);
        let deadline = timer.deadline();
        info!(
            minutes = duration.minutes(),
            deadline = %deadline,
            "Session started"
        );
        self.session = Some(timer);

        vec![Notice::SessionStarted {
            minutes: duration.minutes(),
            deadline,
        }]
    }

    fn handle_decoy(&mut self, action: DecoyAction, now_mono: MonotonicInstant) -> Vec<Notice> {
        let Some(overlay) = &self.overlay else {
            debug!(action = ?action, "Decoy ignored, overlay not shown");
            return Vec::new();
        };
        if overlay.state() != LockState::Displayed || self.call.is_some() {
            return Vec::new();
        }

        match action.acknowledgment() {
            Some(message) => {
                info!(action = ?action, "Decoy acknowledged");
                vec![Notice::DecoyAcknowledged { action, message }]
            }
            None => {
                info!(caller = %self.config.caller_label, "Fake call opened");
                self.call = Some(FakeCall::start(now_mono));
                vec![Notice::CallStarted]
            }
        }
    }

    fn handle_override_requested(&mut self) -> Vec<Notice> {
        let Some(overlay) = &mut self.overlay else {
            return Vec::new();
        };
        if self.call.is_some() {
            return Vec::new();
        }

        if overlay.begin_override() {
            debug!("Override prompt opened");
            vec![Notice::PinPromptOpened]
        } else {
            Vec::new()
        }
    }

    fn handle_pin(&mut self, entered: &str) -> Vec<Notice> {
        let Some(overlay) = &mut self.overlay else {
            return Vec::new();
        };

        match overlay.submit_pin(&self.config.parent_pin, entered) {
            Some(PinOutcome::Unlocked) => {
                info!("Unlocked by parent override");
                vec![Notice::Unlocked]
            }
            Some(PinOutcome::Rejected) => {
                info!("Override PIN rejected");
                vec![Notice::PinRejected]
            }
            None => Vec::new(),
        }
    }

    fn handle_pin_cancelled(&mut self) -> Vec<Notice> {
        if let Some(overlay) = &mut self.overlay {
            overlay.cancel_override();
        }
        Vec::new()
    }

    fn handle_call_ended(&mut self) -> Vec<Notice> {
        match self.call.take() {
            Some(call) => {
                info!(elapsed_secs = call.elapsed_secs(), "Call ended");
                vec![Notice::CallEnded]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn start_session(engine: &mut Engine, minutes: &str) -> (Vec<Notice>, MonotonicInstant) {
        let now = Local::now();
        let now_mono = MonotonicInstant::now();
        let notices = engine.handle(
            InputEvent::DurationEntered(minutes.into()),
            now,
            now_mono,
        );
        (notices, now_mono)
    }

    fn lock(engine: &mut Engine) -> MonotonicInstant {
        let (_, t0) = start_session(engine, "1");
        let expired = engine.tick(t0 + Duration::from_secs(60));
        assert_eq!(expired, vec![Notice::SessionExpired]);
        t0 + Duration::from_secs(60)
    }

    #[test]
    fn valid_duration_arms_and_disables_start() {
        let mut engine = Engine::new(Config::default());
        assert!(engine.start_enabled());

        let (notices, _) = start_session(&mut engine, "5");
        assert!(matches!(
            notices[..],
            [Notice::SessionStarted { minutes: 5, .. }]
        ));
        assert!(!engine.start_enabled());
        assert_eq!(engine.screen(), Screen::Home);
    }

    #[test]
    fn invalid_duration_leaves_start_enabled() {
        let mut engine = Engine::new(Config::default());

        for input in ["abc", "0", "-3", ""] {
            let now = Local::now();
            let notices = engine.handle(
                InputEvent::DurationEntered(input.into()),
                now,
                MonotonicInstant::now(),
            );
            assert_eq!(
                notices,
                vec![Notice::InvalidDuration {
                    input: input.into()
                }]
            );
            assert!(engine.start_enabled());
            assert!(engine.session().is_none());
        }
    }

    #[test]
    fn second_start_request_is_ignored() {
        let mut engine = Engine::new(Config::default());
        let (_, t0) = start_session(&mut engine, "5");

        let notices = engine.handle(
            InputEvent::DurationEntered("10".into()),
            Local::now(),
            t0 + Duration::from_secs(1),
        );
        assert!(notices.is_empty());
        assert_eq!(engine.session().unwrap().duration().minutes(), 5);
    }

    #[test]
    fn lock_at_exact_deadline_not_before() {
        let mut engine = Engine::new(Config::default());
        let (_, t0) = start_session(&mut engine, "5");

        assert!(engine.tick(t0 + Duration::from_secs(299)).is_empty());
        assert_eq!(engine.screen(), Screen::Home);

        let notices = engine.tick(t0 + Duration::from_secs(300));
        assert_eq!(notices, vec![Notice::SessionExpired]);
        assert_eq!(engine.screen(), Screen::Locked);
    }

    #[test]
    fn expiry_notice_fires_once() {
        let mut engine = Engine::new(Config::default());
        let t = lock(&mut engine);
        assert!(engine.tick(t + Duration::from_secs(1)).is_empty());
        assert_eq!(engine.screen(), Screen::Locked);
    }

    #[test]
    fn static_decoys_acknowledge_without_state_change() {
        let mut engine = Engine::new(Config::default());
        lock(&mut engine);

        let notices = engine.handle(
            InputEvent::DecoyPressed(DecoyAction::StudyApp),
            Local::now(),
            MonotonicInstant::now(),
        );
        assert_eq!(
            notices,
            vec![Notice::DecoyAcknowledged {
                action: DecoyAction::StudyApp,
                message: "Study App Opened",
            }]
        );

        let notices = engine.handle(
            InputEvent::DecoyPressed(DecoyAction::Mail),
            Local::now(),
            MonotonicInstant::now(),
        );
        assert_eq!(
            notices,
            vec![Notice::DecoyAcknowledged {
                action: DecoyAction::Mail,
                message: "Mail Opened",
            }]
        );
        assert_eq!(engine.screen(), Screen::Locked);
    }

    #[test]
    fn calling_decoy_opens_fake_call() {
        let mut engine = Engine::new(Config::default());
        let t = lock(&mut engine);

        let notices = engine.handle(
            InputEvent::DecoyPressed(DecoyAction::CallingApp),
            Local::now(),
            t,
        );
        assert_eq!(notices, vec![Notice::CallStarted]);
        assert_eq!(engine.screen(), Screen::Call);
        assert_eq!(engine.call().unwrap().readout(), "00:00");
    }

    #[test]
    fn call_ticks_and_ends() {
        let mut engine = Engine::new(Config::default());
        let t = lock(&mut engine);
        engine.handle(InputEvent::DecoyPressed(DecoyAction::CallingApp), Local::now(), t);

        let notices = engine.tick(t + Duration::from_secs(3));
        assert_eq!(
            notices,
            vec![
                Notice::CallTick { elapsed_secs: 1 },
                Notice::CallTick { elapsed_secs: 2 },
                Notice::CallTick { elapsed_secs: 3 },
            ]
        );
        assert_eq!(engine.call().unwrap().readout(), "00:03");

        let notices = engine.handle(InputEvent::CallEnded, Local::now(), t + Duration::from_secs(3));
        assert_eq!(notices, vec![Notice::CallEnded]);
        assert_eq!(engine.screen(), Screen::Locked);
        assert!(engine.call().is_none());
    }

    #[test]
    fn reopened_call_starts_at_zero() {
        let mut engine = Engine::new(Config::default());
        let t = lock(&mut engine);

        engine.handle(InputEvent::DecoyPressed(DecoyAction::CallingApp), Local::now(), t);
        engine.tick(t + Duration::from_secs(90));
        engine.handle(InputEvent::CallEnded, Local::now(), t + Duration::from_secs(90));

        engine.handle(
            InputEvent::DecoyPressed(DecoyAction::CallingApp),
            Local::now(),
            t + Duration::from_secs(100),
        );
        assert_eq!(engine.call().unwrap().readout(), "00:00");
    }

    #[test]
    fn wrong_pin_keeps_overlay_locked() {
        let mut engine = Engine::new(Config::default());
        lock(&mut engine);

        let now = Local::now();
        let mono = MonotonicInstant::now();
        assert_eq!(
            engine.handle(InputEvent::OverrideRequested, now, mono),
            vec![Notice::PinPromptOpened]
        );
        assert_eq!(engine.lock_state(), Some(LockState::Unlocking));

        let notices = engine.handle(InputEvent::PinSubmitted("0000".into()), now, mono);
        assert_eq!(notices, vec![Notice::PinRejected]);
        assert_eq!(engine.lock_state(), Some(LockState::Displayed));
        assert!(!engine.is_terminated());
    }

    #[test]
    fn correct_pin_terminates() {
        let mut engine = Engine::new(Config::default());
        lock(&mut engine);

        let now = Local::now();
        let mono = MonotonicInstant::now();
        engine.handle(InputEvent::OverrideRequested, now, mono);
        let notices = engine.handle(InputEvent::PinSubmitted("1234".into()), now, mono);

        assert_eq!(notices, vec![Notice::Unlocked]);
        assert!(engine.is_terminated());
        assert_eq!(engine.screen(), Screen::Terminated);
    }

    #[test]
    fn cancelled_prompt_returns_to_displayed() {
        let mut engine = Engine::new(Config::default());
        lock(&mut engine);

        let now = Local::now();
        let mono = MonotonicInstant::now();
        engine.handle(InputEvent::OverrideRequested, now, mono);
        engine.handle(InputEvent::PinCancelled, now, mono);
        assert_eq!(engine.lock_state(), Some(LockState::Displayed));
    }

    #[test]
    fn overlay_events_ignored_before_lock() {
        let mut engine = Engine::new(Config::default());
        let now = Local::now();
        let mono = MonotonicInstant::now();

        assert!(engine
            .handle(InputEvent::DecoyPressed(DecoyAction::StudyApp), now, mono)
            .is_empty());
        assert!(engine.handle(InputEvent::OverrideRequested, now, mono).is_empty());
        assert!(engine
            .handle(InputEvent::PinSubmitted("1234".into()), now, mono)
            .is_empty());
        assert!(engine.handle(InputEvent::CallEnded, now, mono).is_empty());
        assert_eq!(engine.screen(), Screen::Home);
    }

    #[test]
    fn decoys_ignored_while_call_open() {
        let mut engine = Engine::new(Config::default());
        let t = lock(&mut engine);
        engine.handle(InputEvent::DecoyPressed(DecoyAction::CallingApp), Local::now(), t);

        assert!(engine
            .handle(InputEvent::DecoyPressed(DecoyAction::StudyApp), Local::now(), t)
            .is_empty());
        assert!(engine.handle(InputEvent::OverrideRequested, Local::now(), t).is_empty());
        assert_eq!(engine.screen(), Screen::Call);
    }

    #[test]
    fn custom_pin_from_config() {
        let config = Config {
            parent_pin: "9876".into(),
            ..Config::default()
        };
        let mut engine = Engine::new(config);
        lock(&mut engine);

        let now = Local::now();
        let mono = MonotonicInstant::now();
        engine.handle(InputEvent::OverrideRequested, now, mono);
        assert_eq!(
            engine.handle(InputEvent::PinSubmitted("1234".into()), now, mono),
            vec![Notice::PinRejected]
        );

        engine.handle(InputEvent::OverrideRequested, now, mono);
        assert_eq!(
            engine.handle(InputEvent::PinSubmitted("9876".into()), now, mono),
            vec![Notice::Unlocked]
        );
    }
}
