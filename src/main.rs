use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use chrono::NaiveDate;
use clap::Parser;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod calendar;
mod controller;
mod dataset;
mod domain;
mod expiry;
mod form;
mod inputter;
mod model;
mod pagination;
mod routes;
mod settings;
mod ui;

use controller::Controller;
use dataset::PAGE_SIZE_CHOICES;
use domain::{DashConfig, DashError};
use model::{Model, Status};
use settings::Theme;
use ui::DashboardUI;

/// Terminal admin dashboard: delivery routes, expiring products and a calendar.
#[derive(Parser, Debug)]
#[command(name = "prodash", version, about)]
struct Args {
    /// Day used for expiry classification and the calendar's "today" (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Rows per table page (5, 10, 15 or 20)
    #[arg(long, default_value_t = 10)]
    page_size: usize,

    /// Light, Dark, Ocean or Terminal
    #[arg(long)]
    theme: Option<Theme>,

    /// Start with the sidebar collapsed
    #[arg(long)]
    collapsed: bool,

    /// Event poll interval in milliseconds
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,

    /// Write logs to this file, `~` and environment variables are expanded
    #[arg(long)]
    log_file: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let result = run(args);
    ratatui::restore();
    match result {
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn config_from_args(args: Args) -> Result<DashConfig, DashError> {
    if !PAGE_SIZE_CHOICES.contains(&args.page_size) {
        return Err(DashError::InvalidArgument(format!(
            "page size must be one of {PAGE_SIZE_CHOICES:?}, got {}",
            args.page_size
        )));
    }
    if args.poll_ms == 0 {
        return Err(DashError::InvalidArgument("poll interval must be positive".into()));
    }

    let log_file = match args.log_file {
        Some(raw) => {
            let expanded = shellexpand::full(&raw)
                .map_err(|e| DashError::InvalidArgument(format!("log file {raw}: {e}")))?;
            Some(PathBuf::from(expanded.as_ref()))
        }
        None => None,
    };

    let defaults = DashConfig::default();
    Ok(defaults
        .clone()
        .event_poll_time(args.poll_ms)
        .reference_date(args.today.unwrap_or(defaults.reference_date))
        .default_page_size(args.page_size)
        .theme(args.theme.unwrap_or(defaults.theme))
        .sidebar_open(!args.collapsed)
        .log_file(log_file))
}

/// The terminal belongs to the ui, so logs only go to a file.
fn init_logging(path: &Path) -> Result<(), DashError> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| DashError::LogSetup(e.to_string()))
}

fn run(args: Args) -> Result<(), DashError> {
    let cfg = config_from_args(args)?;
    if let Some(path) = &cfg.log_file {
        init_logging(path)?;
    }
    info!("Starting prodash with {cfg:?}");

    let mut model = Model::init(&cfg)?;
    let mut ui = DashboardUI::new(&cfg);
    let controller = Controller::new(&cfg);

    let mut terminal = ratatui::init();

    while model.status != Status::Quitting {
        // Render the current view
        terminal.draw(|f| ui.draw(&model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event(&model)? {
            model.update(message);
        };
    }

    info!("Bye");
    Ok(())
}
