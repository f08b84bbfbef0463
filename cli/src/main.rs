//! Valentine CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI bridges [`valentine_engine`] (application state) and [`valentine_tui`]
//! (rendering), providing RAII-based terminal management with guaranteed cleanup.
//!
//! ```text
//! main() -> TerminalSession::new() -> run_app() -> App + TUI
//!                                          |
//!                                          v
//!                                   App::teardown()
//! ```
//!
//! # Event Loop
//!
//! A fixed 8ms (~120 FPS) render cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`valentine_tui::InputPump`])
//! 3. Advance timers and poll the pending generation (`app.advance()`)
//! 4. Fire and step confetti
//! 5. Render frame

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, Write, stdout},
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use valentine_config::ValentineConfig;
use valentine_engine::App;
use valentine_providers::GeminiClient;
use valentine_tui::{ConfettiField, InputPump, draw, handle_events, update_effects};

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Writing to stdout/stderr would corrupt the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_log_file() -> (Option<(PathBuf, std::fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: next to the config file, ~/.valentine/logs/valentine.log
    if let Some(config_path) = ValentineConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("valentine.log"));
    }

    // Fallback: ./.valentine/logs/valentine.log
    candidates.push(
        PathBuf::from(".valentine")
            .join("logs")
            .join("valentine.log"),
    );

    candidates
}

/// RAII terminal state: raw mode, alternate screen and mouse capture.
///
/// Mouse capture is what lets a click land on the buttons. On drop the
/// terminal is restored, even after an error or early return.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            let _ = execute!(out, DisableMouseCapture, LeaveAlternateScreen);
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        let _ = Write::flush(self.terminal.backend_mut());
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match ValentineConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %e.path().display(), "Ignoring config: {e}");
            None
        }
    };
    let ui_options = config
        .as_ref()
        .map(ValentineConfig::ui_options)
        .unwrap_or_default();
    let settings = ValentineConfig::generation_settings(config.as_ref());
    if settings.api_key.is_none() {
        tracing::warn!("No API key configured; the fallback message will be shown");
    }
    tracing::info!(?settings, ?ui_options, "Starting");

    let client = GeminiClient::new(&settings).context("failed to build HTTP client")?;
    let mut app = App::new(Arc::new(client), ui_options);

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    app.teardown();

    if let Err(err) = &result {
        tracing::error!("Exiting with error: {err:?}");
        eprintln!("Error: {err:?}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(8);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut confetti = ConfettiField::new(!app.ui_options().reduced_motion);
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            tracing::info!(screen = app.screen().as_str(), "Quit requested");
            break Ok(());
        }

        let delta = app.frame_elapsed();
        app.advance(delta);
        update_effects(app, &mut confetti, delta);

        if let Err(e) = terminal.draw(|frame| draw(frame, app, &confetti)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
