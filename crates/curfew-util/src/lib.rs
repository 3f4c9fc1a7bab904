//! Shared utilities for curfew: time primitives, display formatting,
//! and the common error type.

mod error;
mod time;

pub use error::*;
pub use time::*;
