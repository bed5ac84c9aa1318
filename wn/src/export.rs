//! Itinerary export to shareable files

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{DayPart, Itinerary};
use crate::render::format_money;

/// Errors that can occur while exporting
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write export to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize itinerary: {0}")]
    Json(#[from] serde_json::Error),
}

/// File layout of an export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Markdown,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportEnvelope<'a> {
    exported_at: DateTime<Utc>,
    itinerary: &'a Itinerary,
}

/// Write `itinerary` into `dir` as a timestamped file and return its path
///
/// Existing files are never overwritten: a second export within the same
/// second gets a `-1`, `-2`, ... suffix.
pub fn write_export(
    itinerary: &Itinerary,
    dir: &Path,
    format: ExportFormat,
    currency: &str,
) -> Result<PathBuf, ExportError> {
    let now = Utc::now();
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExportError::Io { path, source }
    };

    fs::create_dir_all(dir).map_err(io_err(dir))?;

    let content = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&ExportEnvelope {
            exported_at: now,
            itinerary,
        })?,
        ExportFormat::Markdown => build_markdown(itinerary, currency),
    };

    let stem = format!("itinerary-{}", now.format("%Y%m%d-%H%M%S"));
    let (path, mut file) = create_unique(dir, &stem, format.extension()).map_err(io_err(dir))?;
    file.write_all(content.as_bytes()).map_err(io_err(&path))?;

    info!(path = %path.display(), "Exported itinerary");
    Ok(path)
}

fn create_unique(dir: &Path, stem: &str, extension: &str) -> io::Result<(PathBuf, File)> {
    let mut attempt = 0u32;
    loop {
        let name = match attempt {
            0 => format!("{stem}.{extension}"),
            n => format!("{stem}-{n}.{extension}"),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e),
        }
    }
}

/// Markdown rendering of an itinerary
pub fn build_markdown(itinerary: &Itinerary, currency: &str) -> String {
    let summary = itinerary.summary();
    let mut md = String::new();

    md.push_str("# Trip Plan\n\n");
    md.push_str(&format!(
        "- Duration: {} {}\n",
        itinerary.days,
        if itinerary.days == 1 { "Day" } else { "Days" }
    ));
    md.push_str(&format!("- Total Budget: {}\n", format_money(currency, itinerary.total_budget)));
    md.push_str(&format!(
        "- Estimated Cost: {}\n",
        format_money(currency, itinerary.total_estimated_cost)
    ));
    md.push_str(&format!("- Remaining: {}\n", format_money(currency, summary.remaining)));
    md.push_str(&format!("- Utilization: {:.1}%\n\n", summary.budget_utilization));

    for plan in &itinerary.daily_plans {
        md.push_str(&format!("## Day {}\n\n", plan.day));
        md.push_str(&format!(
            "_Budget: {} | Estimated: {}_\n\n",
            format_money(currency, plan.budget),
            format_money(currency, plan.estimated_cost)
        ));

        for part in DayPart::ALL {
            let activities = plan.slots.get(part);
            if activities.is_empty() {
                continue;
            }
            md.push_str(&format!("### {} ({})\n\n", part.label(), part.time_range()));
            for activity in activities {
                md.push_str(&format!(
                    "- **{}** {} {} ({}) ~{}\n",
                    activity.time,
                    activity.icon(),
                    activity.place.name,
                    activity.place.display_address(),
                    format_money(currency, activity.estimated_cost)
                ));
            }
            md.push('\n');
        }
    }

    md
}
