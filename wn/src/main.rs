//! WanderNear - budget-constrained day itinerary planner
//!
//! CLI entry point for planning trips and inspecting catalogs.

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result, bail};
use tracing::{debug, info};

use wandernear::catalog::{FileCatalog, PlaceCatalog, filter_by_category};
use wandernear::cli::{Cli, Command};
use wandernear::config::Config;
use wandernear::domain::{Category, Place};
use wandernear::export::{ExportFormat, write_export};
use wandernear::planner::{GenerateOutcome, PlanError, PlanMode, PlannerSession, cost_table};
use wandernear::render::{OutputFormat, render_breakdown, render_costs, render_places, sink_for};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Priority: CLI --log-level > config file > INFO
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log level is needed before the full config load can report anything
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("wandernear starting");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Plan {
            places,
            budget,
            days,
            format,
            mode,
            export,
            export_dir,
        } => {
            let request = PlanRequest {
                budget,
                days: days.unwrap_or(config.default_days),
                format: format.unwrap_or(config.output),
                mode,
                export,
                export_dir: export_dir.unwrap_or_else(|| config.export_dir.clone()),
            };
            cmd_plan(&config, &places, request)
        }
        Command::Budget { budget, days } => cmd_budget(&config, budget, days.unwrap_or(config.default_days)),
        Command::Costs => {
            render_costs(&mut io::stdout().lock(), &cost_table(), &config.currency)?;
            Ok(())
        }
        Command::Places { places, category } => cmd_places(&places, category.as_ref()),
    }
}

struct PlanRequest {
    budget: f64,
    days: u32,
    format: OutputFormat,
    mode: PlanMode,
    export: Option<ExportFormat>,
    export_dir: PathBuf,
}

fn load_places(path: &Path) -> Result<Vec<Place>> {
    FileCatalog::open(path)
        .places()
        .context(format!("Failed to load places from {}", path.display()))
}

fn cmd_plan(config: &Config, places_path: &Path, request: PlanRequest) -> Result<()> {
    let places = load_places(places_path)?;

    let mut session = PlannerSession::new(request.budget, request.days);
    session.set_mode(request.mode);

    match session.generate(&places) {
        Ok(GenerateOutcome::Planned(itinerary)) => {
            let mut sink = sink_for(request.format, io::stdout().lock(), &config.currency);
            sink.render(itinerary).context("Failed to render itinerary")?;
        }
        Ok(GenerateOutcome::ManualSelection) => {
            println!("Manual mode: browse places with `wn places` and build the trip yourself");
        }
        Err(PlanError::NoPlaces) => {
            eprintln!("{} {}", "⚠".yellow(), PlanError::NoPlaces);
            bail!("Catalog {} contains no places", places_path.display());
        }
        Err(e) => return Err(e).context("Failed to generate itinerary"),
    }

    if let Some(format) = request.export {
        let itinerary = session.require_itinerary()?;
        let path = write_export(itinerary, &request.export_dir, format, &config.currency)?;
        eprintln!("{} Exported itinerary to {}", "✓".green(), path.display().to_string().cyan());
    }

    Ok(())
}

fn cmd_budget(config: &Config, budget: f64, days: u32) -> Result<()> {
    let session = PlannerSession::new(budget, days);
    session.validate()?;

    if let Some(breakdown) = session.breakdown() {
        render_breakdown(&mut io::stdout().lock(), &breakdown, days, &config.currency)?;
    }
    Ok(())
}

fn cmd_places(places_path: &Path, category: Option<&Category>) -> Result<()> {
    let places = load_places(places_path)?;
    let matching = filter_by_category(&places, category);
    debug!(total = places.len(), matching = matching.len(), "Filtered catalog");

    render_places(&mut io::stdout().lock(), &matching)?;
    Ok(())
}
