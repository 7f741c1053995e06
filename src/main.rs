//! Terminal skirmish client (default binary).
//!
//! Usage: `tui-skirmish [ws://host:port]`. The argument overrides
//! `SKIRMISH_SERVER_URL`; see [`tui_skirmish::net`] for the other variables.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use anyhow::{Context, Result};
use crossterm::event::DisableMouseCapture;
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};

use tui_skirmish::net::{self, ClientConfig, Exit};

fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = std::env::args().nth(1) {
        config = config.with_server_url(&url)?;
    }
    init_tracing(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build runtime")?;

    match runtime.block_on(net::run(config))? {
        Exit::Closed => {}
        Exit::ServerClosed => eprintln!("server closed the connection"),
        Exit::Disconnected => eprintln!("connection lost"),
        Exit::InputEnded => eprintln!("terminal input ended"),
    }
    Ok(())
}

/// Logs go to `SKIRMISH_LOG_PATH` only; the terminal belongs to the game view.
fn init_tracing(config: &ClientConfig) -> Result<()> {
    if let Some(path) = &config.log_path {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
        if json {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .json()
                .with_current_span(true)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .compact()
                .init();
        }
    }

    std::panic::set_hook(Box::new(|info| {
        // Restore the terminal before anything is printed.
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = crossterm::execute!(stdout, DisableMouseCapture, LeaveAlternateScreen);
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
        eprintln!("{info}");
    }));
    Ok(())
}
