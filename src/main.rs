//! Garage slots - terminal front end for managing parking-garage slots
//!
//! Pick a floor, park vehicles in by license plate and park them out with a
//! per-minute fee. All slot state lives in memory for the lifetime of the
//! process.
//!
//! Module structure:
//! - `domain/` - Core types (Floor, ParkingSlot, LicensePlate, Fee, Receipt)
//! - `services/` - Business logic (Garage, park-in, park-out, GarageSession)
//! - `io/` - Receipt log
//! - `infra/` - Config, Metrics
//! - `ui/` - ratatui front end

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use garage_slots::infra::Config;
use garage_slots::services::GarageSession;
use garage_slots::ui::{draw_ui, App};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Garage slots - park in, park out, pay per minute
#[derive(Parser, Debug)]
#[command(
    name = "garage-slots",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"),
    about
)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, env = "CONFIG_FILE", default_value = "config/dev.toml")]
    config: String,

    /// Write logs here instead of the configured log file
    #[arg(long)]
    log_file: Option<String>,
}

/// Structured logging to file; the terminal belongs to the UI.
/// RUST_LOG overrides the configured level.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_file())
        .with_context(|| format!("Failed to open log file {}", config.log_file()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    if config.log_json() {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_from_path(&args.config);
    if let Some(log_file) = args.log_file {
        config = config.with_log_file(log_file);
    }

    init_logging(&config)?;
    info!(version = env!("CARGO_PKG_VERSION"), git = env!("GIT_HASH"), "garage-slots starting");
    info!(
        config_file = %config.config_file(),
        garage = %config.garage_name(),
        default_floor = %config.default_floor(),
        rate_per_minute = %config.tariff().rate_per_minute(),
        currency = %config.tariff().currency(),
        receipts_enabled = %config.receipts_enabled(),
        receipts_file = %config.receipts_file(),
        "config_loaded"
    );

    let session = GarageSession::from_config(&config);
    let mut app = App::new(session, config.garage_name());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.session.metrics_summary().log();
    info!("garage-slots shutdown complete");

    result
}

fn run_ui(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    // Redraw at least once a second so running fees tick
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|f| draw_ui(f, app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}
