//! Itinerary planner
//!
//! Turns a flat list of candidate places, a total budget and a trip length
//! into a day-by-day schedule.
//!
//! # Architecture
//!
//! ```text
//! Vec<Place> ─┐
//! budget ─────┼─> build_itinerary ─> generate_daily_plan (x days) ─> Itinerary
//! days ───────┘          │                    │
//!                   UsedPlaces        filter_and_sort / select_place
//! ```
//!
//! [`PlannerSession`] wraps the pure functions with the inputs a front end
//! collects (budget, duration, mode) and keeps the latest itinerary.

mod budget;
mod builder;
mod error;
mod selection;
mod session;
mod sort;

pub use budget::{BUDGET_ALLOCATION, BudgetAllocation, BudgetBreakdown, CostRange, cost_range, cost_table, estimated_cost};
pub use builder::{DAILY_SLOTS, SlotRule, build_itinerary, generate_daily_plan};
pub use error::PlanError;
pub use selection::{PoolKind, UsedPlaces, compare_names, compare_places, filter_and_sort, select_place};
pub use session::{GenerateOutcome, MAX_TRIP_DAYS, PlanMode, PlannerSession};
pub use sort::timsort_by;
