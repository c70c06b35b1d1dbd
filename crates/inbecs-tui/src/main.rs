mod app;
mod handler;
mod tui;
mod ui;

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::App;
use inbecs_core::Settings;

const DEFAULT_LOG_FILTER: &str = "inbecs=info,inbecs_core=info";
const TICK_RATE: Duration = Duration::from_millis(250);

fn log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inbecs")
        .join("inbecs.log")
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() -> Result<PathBuf> {
    let path = log_path();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating log directory {}", parent.display()))?;
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    Ok(path)
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set
    dotenv::dotenv().ok();

    let log_file = init_logging()?;
    tracing::info!("Starting inbecs v{} (log: {})", env!("CARGO_PKG_VERSION"), log_file.display());

    let settings = Settings::from_env();
    let mut app = App::new(settings);
    app.drain_notices();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new(TICK_RATE);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    if let Err(e) = &result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    tracing::info!("Shutting down");
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }
    }
    Ok(())
}
