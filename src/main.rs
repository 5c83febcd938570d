//! SakhiMap - Main entry point
//!
//! Interactive locator by default; `search`, `cities`, `regions` and
//! `validate` run headless.

use anyhow::Context;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::OpenOptions;
use std::io::stdout;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use sakhimap::cli::{Cli, Commands, SearchArgs};
use sakhimap::{
    dial_link, directions_url, filter_catalog, App, AppConfig, AppExit, Catalog,
    LocationDetector, ResourceRecord, Session,
};

/// Initialize tracing.
///
/// Headless commands log to stderr. The TUI owns the terminal, so it logs to
/// the configured file or not at all.
fn init_tracing(config: &AppConfig, interactive: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    if let Some(path) = &config.log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {:?}", path))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

/// Catalog from `--catalog`, then the config's `catalog_path`, then the bundled one
fn load_catalog(cli_path: Option<&Path>, config: &AppConfig) -> anyhow::Result<Arc<Catalog>> {
    match cli_path.or(config.catalog_path.as_deref()) {
        Some(path) => Ok(Arc::new(Catalog::load_from_file(path)?)),
        None => Ok(Catalog::builtin()),
    }
}

/// Main application entry point
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = AppConfig::load_or_default(cli.config.as_deref())?;

    let interactive = matches!(cli.command, None | Some(Commands::Browse));
    init_tracing(&config, interactive)?;
    info!("SakhiMap starting up");
    debug!(detection = %config.detection, "Configuration loaded");

    match cli.command {
        Some(Commands::Validate { file }) => {
            info!("Validating catalog file: {:?}", file);
            match Catalog::load_from_file(&file) {
                Ok(catalog) => {
                    println!(
                        "✓ Catalog is valid: {} records in {} cities",
                        catalog.len(),
                        catalog.cities().len()
                    );
                }
                Err(e) => {
                    error!("Catalog validation failed: {:#}", e);
                    eprintln!("✗ Catalog validation failed: {:#}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Cities) => {
            let catalog = load_catalog(cli.catalog.as_deref(), &config)?;
            for city in catalog.cities() {
                println!("{}", city);
            }
        }
        Some(Commands::Regions { city }) => {
            let catalog = load_catalog(cli.catalog.as_deref(), &config)?;
            for region in catalog.regions_for_city(city.trim()) {
                println!("{}", region);
            }
        }
        Some(Commands::Search(args)) => {
            let catalog = load_catalog(cli.catalog.as_deref(), &config)?;
            run_search(&catalog, &args)?;
        }
        Some(Commands::Browse) | None => {
            let catalog = load_catalog(cli.catalog.as_deref(), &config)?;
            run_tui(catalog, &config)?;
        }
    }

    Ok(())
}

/// Headless filter
fn run_search(catalog: &Catalog, args: &SearchArgs) -> anyhow::Result<()> {
    let criteria = args.to_criteria();
    let results = filter_catalog(catalog.records(), &criteria);
    info!(
        mode = %criteria.mode(),
        category = %criteria.category_filter(),
        results = results.len(),
        "Search finished"
    );

    if args.json {
        let json = serde_json::to_string_pretty(&results).context("Failed to serialize results")?;
        println!("{}", json);
        return Ok(());
    }

    if results.is_empty() {
        println!("No locations found for {}", criteria.location_summary());
        return Ok(());
    }

    println!(
        "{} location(s) for {}\n",
        results.len(),
        criteria.location_summary()
    );
    for record in results {
        print_record(record);
    }
    Ok(())
}

fn print_record(record: &ResourceRecord) {
    let delivers = if record.supports_delivery { "  [delivers]" } else { "" };
    println!(
        "[{}] {}  (verified {}){}",
        record.category.short_label(),
        record.name,
        record.verified_at,
        delivers
    );
    println!("    {}, {} {}", record.address, record.city, record.postal_code);
    println!("    Hours: {}", record.operating_hours);
    if !record.eligibility_conditions.is_empty() {
        println!("    Eligibility: {}", record.eligibility_conditions.join("; "));
    }
    if !record.required_documents.is_empty() {
        println!("    Bring: {}", record.required_documents.join(", "));
    }
    println!("    Directions: {}", directions_url(record));
    if let Some(tel) = dial_link(record) {
        println!("    Call: {}", tel);
    }
    println!();
}

/// Run the interactive wizard
fn run_tui(catalog: Arc<Catalog>, config: &AppConfig) -> anyhow::Result<()> {
    let detector = LocationDetector::for_policy(
        config.detection,
        config.device_position,
        &config.default_city,
        catalog.clone(),
    );
    let mut app = App::new(Session::new(catalog), detector);

    enable_raw_mode().context("Failed to enable raw mode")?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout());
    let result = Terminal::new(backend)
        .context("Failed to create terminal")
        .and_then(|mut terminal| {
            let exit = app.run(&mut terminal)?;
            terminal.show_cursor()?;
            Ok(exit)
        });

    // Cleanup
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    match result? {
        AppExit::QuickExit => {
            // Leave nothing of the session on screen or in scrollback
            let _ = crossterm::execute!(
                stdout(),
                Clear(ClearType::Purge),
                Clear(ClearType::All),
                crossterm::cursor::MoveTo(0, 0)
            );
            info!("Quick exit");
        }
        AppExit::Quit => info!("SakhiMap exited normally"),
    }
    Ok(())
}
