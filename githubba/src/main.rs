//! githubba, swipe through GitHub repositories in the terminal.
//!
//! Entry point for the `githubba` binary. Wires together configuration
//! (`config`), file logging (`logging`), the terminal lifecycle (`tui`), the
//! unified event bus (`event`), the search worker (`feed`) and the card-stack
//! engine from `githubba-core`.
//!
//! # Startup sequence
//!
//! 1. Parse flags and load the config file; both are safe before terminal init.
//! 2. Start file logging. Config problems are logged, then defaults are used.
//! 3. `install_panic_hook()`: restores the terminal before the panic message.
//! 4. `register_sigterm()`: flag polled by the event loop's heartbeat.
//! 5. `init_tui()`: alternate screen, raw mode, mouse capture.
//! 6. Spawn the event task and the feed worker; build `AppState`, which asks
//!    for the first page.
//!
//! `restore_tui()` runs after the event loop exits, whatever the reason. Inside
//! the loop `?` is only used in the Render arm, and draw errors leave the loop
//! through `break` so the terminal is still restored.

mod app;
mod config;
mod event;
mod feed;
mod link;
mod logging;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;

use clap::Parser;
use githubba_core::feed::LinkOpener;
use githubba_core::github::GithubClient;

use crate::config::{Cli, Config};
use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

fn system_opener() -> Box<dyn LinkOpener + Send> {
    Box::new(link::SystemLinkOpener)
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let config_file = cli.config.clone().unwrap_or_else(config::config_path);
    let (mut config, config_error) = match Config::load(&config_file) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli(&cli);

    let log_path = config.log_path();
    if let Err(e) = logging::init(&log_path, &config.log_level) {
        eprintln!("githubba: cannot log to {}: {e}", log_path.display());
    }
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "using default settings");
    }
    tracing::info!(config = %config_file.display(), feed = %config.feed, "githubba starting");

    let theme = theme::Theme::from_name(&config.theme);
    let client = GithubClient::new(&config.api_url, config.token.as_deref())
        .map_err(std::io::Error::other)?;

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let feed_tx = feed::worker::spawn_feed_worker(client, handler.tx.clone());
    let mut state = app::AppState::new(config, Some(feed_tx), event::timer_sink(handler.tx.clone()), system_opener);
    let mut rx = handler.rx;

    // Event loop: exits only via `break`, so `restore_tui()` below always runs.
    let result = 'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    tracing::info!("SIGTERM received");
                    break 'event_loop Ok(());
                }
            }
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            break 'event_loop Err(e);
                        }
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::Key(key)) => handle_key(key, &mut state),
                    Some(event::AppEvent::Mouse(mouse)) => handle_mouse(mouse, &mut state),
                    Some(event::AppEvent::Timer(fired)) => {
                        state.on_timer(fired);
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::FeedResult(payload)) => {
                        state.on_feed_result(*payload);
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::Tick) => {
                        state.tick();
                        KeyAction::Continue
                    }
                    // ratatui picks up the new size from frame.area() on the next Render.
                    Some(event::AppEvent::Resize(_, _)) => KeyAction::Continue,
                    Some(event::AppEvent::Quit) | None => KeyAction::Quit,
                };
                if action == KeyAction::Quit || term_flag.load(Ordering::Relaxed) {
                    break 'event_loop Ok(());
                }
            }
        }
    };

    // Dispose the stack before the runtime shuts down so no timer outlives it.
    drop(state);
    tui::restore_tui()?;
    tracing::info!("githubba stopped");
    result
}
