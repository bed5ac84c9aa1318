//! Rendering sinks for itineraries
//!
//! The planner emits raw numbers; everything about presentation (currency
//! symbol, precision, colours, icons) lives here.

use std::io::{self, Write};

use colored::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Activity, Category, DailyPlan, DayPart, Itinerary, ItinerarySummary, Place};
use crate::planner::{BudgetBreakdown, CostRange};

/// Output format for rendered results
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

/// Anything that can present an itinerary
pub trait ItinerarySink {
    fn render(&mut self, itinerary: &Itinerary) -> io::Result<()>;
}

/// Build the sink for `format` writing to `out`
pub fn sink_for<'a, W: Write + 'a>(format: OutputFormat, out: W, currency: &str) -> Box<dyn ItinerarySink + 'a> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(out, currency)),
        OutputFormat::Json => Box::new(JsonRenderer::new(out)),
    }
}

const PROGRESS_WIDTH: usize = 20;

/// Human-readable cards: trip summary followed by one card per day
pub struct TextRenderer<W: Write> {
    out: W,
    currency: String,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, currency: &str) -> Self {
        Self {
            out,
            currency: currency.to_string(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_summary(&mut self, itinerary: &Itinerary, summary: &ItinerarySummary) -> io::Result<()> {
        let days = if itinerary.days == 1 { "Day" } else { "Days" };
        let remaining = format_money(&self.currency, summary.remaining.abs());
        let remaining = if summary.is_over_budget() {
            format!("{} over budget", remaining).red()
        } else {
            remaining.green()
        };

        writeln!(self.out, "{}", "Trip Summary".bold())?;
        writeln!(self.out, "  Duration:       {} {}", itinerary.days, days)?;
        writeln!(self.out, "  Total Budget:   {}", format_money(&self.currency, itinerary.total_budget))?;
        writeln!(self.out, "  Estimated Cost: {}", format_money(&self.currency, itinerary.total_estimated_cost))?;
        writeln!(self.out, "  Remaining:      {}", remaining)?;
        writeln!(
            self.out,
            "  {} {:.1}% of budget utilized",
            progress_bar(summary.budget_utilization),
            summary.budget_utilization
        )?;
        Ok(())
    }

    fn write_day(&mut self, plan: &DailyPlan, total_days: u32) -> io::Result<()> {
        let title = if total_days > 1 {
            format!("Day {} of {}", plan.day, total_days)
        } else {
            format!("Day {}", plan.day)
        };
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}  Budget: {} | Estimated: {}",
            title.cyan().bold(),
            format_money(&self.currency, plan.budget),
            format_money(&self.currency, plan.estimated_cost)
        )?;

        for part in DayPart::ALL {
            let activities = plan.slots.get(part);
            if activities.is_empty() {
                continue;
            }
            writeln!(self.out, "  {} ({})", part.label().bold(), part.time_range())?;
            for activity in activities {
                self.write_activity(activity)?;
            }
        }
        Ok(())
    }

    fn write_activity(&mut self, activity: &Activity) -> io::Result<()> {
        let place = &activity.place;
        writeln!(
            self.out,
            "    {} {} {}",
            activity.time.yellow(),
            activity.icon(),
            place.name
        )?;
        writeln!(self.out, "          {}", place.display_address().dimmed())?;

        let cost = format!("~{}", format_money(&self.currency, activity.estimated_cost));
        match place.usable_rating() {
            Some(rating) => writeln!(self.out, "          ⭐ {}  {}", rating, cost)?,
            None => writeln!(self.out, "          {}", cost)?,
        }
        Ok(())
    }
}

impl<W: Write> ItinerarySink for TextRenderer<W> {
    fn render(&mut self, itinerary: &Itinerary) -> io::Result<()> {
        debug!(days = itinerary.days, "Rendering itinerary as text");
        let summary = itinerary.summary();
        self.write_summary(itinerary, &summary)?;
        for plan in &itinerary.daily_plans {
            self.write_day(plan, itinerary.days)?;
        }
        self.out.flush()
    }
}

/// Itinerary plus derived summary, as one JSON document
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    itinerary: &'a Itinerary,
    summary: ItinerarySummary,
}

/// Pretty-printed JSON for programmatic consumers
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ItinerarySink for JsonRenderer<W> {
    fn render(&mut self, itinerary: &Itinerary) -> io::Result<()> {
        let report = JsonReport {
            itinerary,
            summary: itinerary.summary(),
        };
        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// "$12.50"; negative amounts keep their sign in front of the symbol
pub fn format_money(currency: &str, amount: f64) -> String {
    if amount < 0.0 {
        format!("-{}{:.2}", currency, amount.abs())
    } else {
        format!("{}{:.2}", currency, amount)
    }
}

/// Fixed-width bar, full at 100% and never longer
pub fn progress_bar(percent: f64) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(PROGRESS_WIDTH - filled))
}

/// Allocation preview shown before planning
pub fn render_breakdown<W: Write>(
    out: &mut W,
    breakdown: &BudgetBreakdown,
    days: u32,
    currency: &str,
) -> io::Result<()> {
    if days > 1 {
        writeln!(
            out,
            "{} (Per Day: {})",
            "Budget Allocation".bold(),
            format_money(currency, breakdown.budget_per_day)
        )?;
    } else {
        writeln!(out, "{}", "Budget Allocation".bold())?;
    }
    let rows = [
        ("🍽️", "Food", breakdown.food),
        ("🎯", "Attractions", breakdown.attractions),
        ("🚗", "Transport", breakdown.transport),
        ("💰", "Buffer", breakdown.buffer),
    ];
    for (icon, label, amount) in rows {
        writeln!(out, "  {} {:<12} {}", icon, label, format_money(currency, amount))?;
    }
    Ok(())
}

/// Cost tier table
pub fn render_costs<W: Write>(out: &mut W, table: &[(Category, CostRange)], currency: &str) -> io::Result<()> {
    writeln!(out, "{:<20} {:>10} {:>10} {:>10}", "Category".bold(), "Min", "Max", "Avg")?;
    for (category, range) in table {
        writeln!(
            out,
            "{} {:<17} {:>10} {:>10} {:>10}",
            category.icon(),
            category.as_str(),
            format_money(currency, range.min),
            format_money(currency, range.max),
            format_money(currency, range.avg)
        )?;
    }
    Ok(())
}

/// One line per catalog place
pub fn render_places<W: Write>(out: &mut W, places: &[&Place]) -> io::Result<()> {
    if places.is_empty() {
        writeln!(out, "No places found")?;
        return Ok(());
    }
    for place in places {
        let category = place.effective_category();
        let icon = category.as_ref().map(Category::icon).unwrap_or("📍");
        let tag = category.as_ref().map(Category::as_str).unwrap_or("uncategorized");
        writeln!(
            out,
            "{} {} {} {}",
            icon,
            place.name,
            format!("[{}]", tag).dimmed(),
            place.display_address().dimmed()
        )?;
    }
    Ok(())
}
