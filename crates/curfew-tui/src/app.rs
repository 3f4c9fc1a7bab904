//! Application event loop
//!
//! Single-threaded: one loop blocks on keyboard input with a
//! sub-second timeout, then feeds a tick into the engine. Every
//! handler runs to completion on this loop, so the expiry check, call
//! ticks, and button handling are never concurrent.

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use curfew_core::{DecoyAction, Engine, InputEvent, LockState, Notice, Screen};
use curfew_util::MonotonicInstant;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use tracing::debug;

use crate::{call, home, lock};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Longest accepted duration entry ("9999" minutes is nearly a week).
const DURATION_INPUT_MAX: usize = 4;

/// PIN entries longer than this can never match a sane PIN anyway.
const PIN_INPUT_MAX: usize = 16;

/// How the process ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Parent override succeeded.
    Unlocked,
    /// Quit from the home screen.
    Quit,
}

pub struct App {
    engine: Engine,
    duration_input: String,
    pin_input: String,
    notice: Option<String>,
    exit: Option<Exit>,
}

impl App {
    pub fn new(config: curfew_core::Config) -> Self {
        Self {
            engine: Engine::new(config),
            duration_input: String::new(),
            pin_input: String::new(),
            notice: None,
            exit: None,
        }
    }

    /// Run to completion, restoring the terminal even on error.
    pub fn run(mut self) -> Result<Exit> {
        let mut terminal = setup_terminal()?;
        let result = self.event_loop(&mut terminal);
        restore_terminal(&mut terminal)?;
        result
    }

    fn event_loop(&mut self, terminal: &mut Tui) -> Result<Exit> {
        loop {
            terminal.draw(|frame| self.render(frame))?;

            if let Some(exit) = self.exit {
                return Ok(exit);
            }

            if event::poll(self.engine.config().tick_interval)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            let notices = self.engine.tick(MonotonicInstant::now());
            self.apply_notices(notices);
        }
    }

    fn render(&self, frame: &mut Frame) {
        match self.engine.screen() {
            Screen::Home => home::render(
                frame,
                &self.engine,
                &self.duration_input,
                self.notice.as_deref(),
            ),
            Screen::Call => call::render(frame, &self.engine),
            Screen::Locked | Screen::Terminated => lock::render(
                frame,
                &self.engine,
                &self.pin_input,
                self.notice.as_deref(),
            ),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.engine.screen() {
            Screen::Home => self.handle_home_key(key),
            Screen::Locked => self.handle_lock_key(key),
            Screen::Call => self.handle_call_key(key),
            Screen::Terminated => {}
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            // The window can be closed any time before the lock.
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("Quit from home screen");
                self.exit = Some(Exit::Quit);
            }
            _ if !self.engine.start_enabled() => {
                // Session armed: the field and start control are inert.
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if self.duration_input.len() < DURATION_INPUT_MAX {
                    self.duration_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.duration_input.pop();
            }
            KeyCode::Enter => {
                let text = self.duration_input.clone();
                self.dispatch(InputEvent::DurationEntered(text));
            }
            _ => {}
        }
    }

    fn handle_lock_key(&mut self, key: KeyEvent) {
        if self.engine.lock_state() == Some(LockState::Unlocking) {
            self.handle_pin_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('1') => self.dispatch(InputEvent::DecoyPressed(DecoyAction::CallingApp)),
            KeyCode::Char('2') => self.dispatch(InputEvent::DecoyPressed(DecoyAction::StudyApp)),
            KeyCode::Char('3') => self.dispatch(InputEvent::DecoyPressed(DecoyAction::Mail)),
            KeyCode::Char('4') | KeyCode::Char('p') => self.dispatch(InputEvent::OverrideRequested),
            // No quit path: only the override leaves the overlay.
            _ => {}
        }
    }

    fn handle_pin_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                if self.pin_input.len() < PIN_INPUT_MAX {
                    self.pin_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.pin_input.pop();
            }
            KeyCode::Enter => {
                let pin = std::mem::take(&mut self.pin_input);
                self.dispatch(InputEvent::PinSubmitted(pin));
            }
            KeyCode::Esc => {
                self.pin_input.clear();
                self.dispatch(InputEvent::PinCancelled);
            }
            _ => {}
        }
    }

    fn handle_call_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('e') => {
                self.dispatch(InputEvent::CallEnded);
            }
            _ => {}
        }
    }

    fn dispatch(&mut self, event: InputEvent) {
        let notices = self
            .engine
            .handle(event, curfew_util::now(), MonotonicInstant::now());
        self.apply_notices(notices);
    }

    fn apply_notices(&mut self, notices: Vec<Notice>) {
        for notice in notices {
            match notice {
                Notice::SessionStarted { minutes, .. } => {
                    self.notice = Some(format!("Session started for {} minutes", minutes));
                }
                Notice::InvalidDuration { .. } => {
                    self.notice = Some("Enter valid minutes".into());
                }
                Notice::SessionExpired => {
                    self.notice = None;
                }
                Notice::DecoyAcknowledged { message, .. } => {
                    self.notice = Some(message.into());
                }
                Notice::PinPromptOpened => {
                    self.pin_input.clear();
                    self.notice = None;
                }
                Notice::PinRejected => {
                    self.notice = Some("Wrong PIN".into());
                }
                Notice::Unlocked => {
                    self.notice = Some("Unlocked by Parent".into());
                    self.exit = Some(Exit::Unlocked);
                }
                Notice::CallStarted | Notice::CallEnded => {
                    self.notice = None;
                }
                // The readout rerenders every frame; nothing to latch.
                Notice::CallTick { .. } => {}
            }
        }
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("creating terminal")?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().context("disabling raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("leaving alternate screen")?;
    terminal.show_cursor().context("restoring cursor")?;
    Ok(())
}
