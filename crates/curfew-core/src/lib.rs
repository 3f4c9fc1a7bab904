//! Core state machine for curfew
//!
//! This crate is the heart of curfew, containing:
//! - Session duration parsing and the one-shot session timer
//! - Lock overlay state machine (Displayed -> Unlocking -> Terminated)
//! - Fake call elapsed-time tracking
//! - The engine that serializes typed input events and ticks into
//!   screen transitions, using monotonic time for enforcement
//!
//! Everything here is pure and synchronous: the front-end owns the
//! event loop and feeds events and ticks in; the engine hands typed
//! notices back. No I/O, no timers, no threads.

mod call;
mod config;
mod engine;
mod events;
mod lock;
mod session;

pub use call::*;
pub use config::*;
pub use engine::*;
pub use events::*;
pub use lock::*;
pub use session::*;
