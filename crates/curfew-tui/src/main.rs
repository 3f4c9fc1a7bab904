//! Curfew - screen time countdown with a fake lock screen
//!
//! Counts down a session entered on the home screen, then replaces it
//! with a full-screen lock overlay offering decoy actions and a parent
//! PIN override. The override is the only way out of the overlay.

mod app;
mod call;
mod home;
mod lock;
mod view;

use anyhow::Result;
use app::{App, Exit};
use curfew_core::Config;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs share the terminal with the UI, so stay quiet unless asked.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting curfew");

    let app = App::new(Config::default());
    match app.run()? {
        Exit::Unlocked => println!("Unlocked by Parent"),
        Exit::Quit => {}
    }

    Ok(())
}
