//! inventory-tui - A terminal view for inventory records
//!
//! Entry point: parse flags, set up logging, load the records and run the
//! component loop.

mod action;
mod app;
mod cli;
mod component;
mod components;
mod config;
mod error;
mod logging;
mod model;
mod services;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::cli::Cli;
use crate::component::Component;
use crate::logging::{init_logging, LogConfig};
use crate::model::Dataset;
use crate::services::JsonlOutbox;
use crate::tui::Tui;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::Event;
use std::time::Duration;
use tracing::{error, info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config();

    let log_config = LogConfig::from_verbosity(cli.verbose, config.log_path());
    init_logging(&log_config)
        .with_context(|| format!("Failed to open log file {}", log_config.log_file.display()))?;

    let mut data = load_dataset(config.data_file.as_deref())?;
    let outbox = JsonlOutbox::new(config.outbox_path());
    if cli.replay {
        replay_outbox(&outbox, &mut data);
    }
    info!(outbox = %outbox.path().display(), page_size = config.page_size, "starting");

    // Setup terminal
    let mut tui = Tui::new()?.with_tick_rate(Duration::from_millis(100));
    tui.enter()?;

    let mut app = App::new(&config, data, Box::new(outbox)).with_export_dir(cli.export_dir);
    let result = app.init().and_then(|_| run_app(&mut tui, &mut app));

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = ?err, "exiting with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    Ok(())
}

fn load_dataset(data_file: Option<&str>) -> Result<Dataset> {
    match data_file {
        Some(path) => {
            let data = services::load_snapshot(path)?;
            info!(
                path,
                items = data.items.len(),
                returns = data.returns.len(),
                replacements = data.replacements.len(),
                "snapshot loaded"
            );
            Ok(data)
        }
        None => Ok(services::sample()),
    }
}

fn replay_outbox(outbox: &JsonlOutbox, data: &mut Dataset) {
    match outbox.read_all() {
        Ok(entries) => {
            let applied = services::routes::replay(data, &entries);
            info!(entries = entries.len(), applied, "outbox replayed");
        }
        Err(e) => warn!(error = %e, "outbox not replayed"),
    }
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        tui.draw(|frame| {
            if let Err(e) = app.draw(frame, frame.area()) {
                error!(error = %e, "draw failed");
            }
        })?;

        if let Some(event) = tui.next_event()? {
            let action = match event {
                Event::Key(key) => app.handle_key_event(key)?,
                Event::Mouse(mouse) => app.handle_mouse_event(mouse)?,
                Event::Resize(w, h) => Some(Action::Resize(w, h)),
                _ => None,
            };

            // Action might produce a follow-up action
            let mut current_action = action;
            while let Some(a) = current_action {
                current_action = app.update(a)?;
            }
        } else {
            // No event - send a tick for time-based updates
            app.update(Action::Tick)?;
        }
    }

    Ok(())
}
