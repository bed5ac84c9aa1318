//! CLI argument parsing for wandernear

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::Category;
use crate::export::ExportFormat;
use crate::planner::PlanMode;
use crate::render::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "wn")]
#[command(author, version, about = "Budget-constrained day itinerary planner", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Plan a trip from a place catalog
    Plan {
        /// Catalog file (JSON array, JSONL, or Overpass response)
        #[arg(required = true)]
        places: PathBuf,

        /// Total trip budget
        #[arg(short, long, allow_negative_numbers = true)]
        budget: f64,

        /// Number of days (default: from config)
        #[arg(short, long)]
        days: Option<u32>,

        /// Output format: text or json (default: from config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Planning mode: auto or manual
        #[arg(short, long, default_value = "auto")]
        mode: PlanMode,

        /// Also export the itinerary (json or md)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "md")]
        export: Option<ExportFormat>,

        /// Export directory (default: from config)
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },

    /// Show how a budget is split across spending buckets
    Budget {
        /// Total trip budget
        #[arg(short, long, allow_negative_numbers = true)]
        budget: f64,

        /// Number of days (default: from config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Show the cost tier for each category
    Costs,

    /// List places in a catalog
    Places {
        /// Catalog file
        #[arg(required = true)]
        places: PathBuf,

        /// Only show places of this category
        #[arg(long)]
        category: Option<Category>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_args() {
        let cli = Cli::try_parse_from(["wn", "plan", "places.json", "--budget", "300", "--days", "2"]).unwrap();
        match cli.command {
            Command::Plan {
                places,
                budget,
                days,
                format,
                mode,
                export,
                ..
            } => {
                assert_eq!(places, PathBuf::from("places.json"));
                assert_eq!(budget, 300.0);
                assert_eq!(days, Some(2));
                assert!(format.is_none());
                assert_eq!(mode, PlanMode::Auto);
                assert!(export.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_export_flag_defaults_to_markdown() {
        let cli = Cli::try_parse_from(["wn", "plan", "p.json", "-b", "100", "--export"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Plan {
                export: Some(ExportFormat::Markdown),
                ..
            }
        ));

        let cli = Cli::try_parse_from(["wn", "plan", "p.json", "-b", "100", "--export", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Plan {
                export: Some(ExportFormat::Json),
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["wn", "costs", "--log-level", "debug", "-c", "wn.yml"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("wn.yml")));
    }

    #[test]
    fn test_places_category_parsed() {
        let cli = Cli::try_parse_from(["wn", "places", "p.json", "--category", "Museum"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Places {
                category: Some(Category::Museum),
                ..
            }
        ));
    }

    #[test]
    fn test_bad_format_rejected() {
        assert!(Cli::try_parse_from(["wn", "plan", "p.json", "-b", "1", "--format", "xml"]).is_err());
    }
}
