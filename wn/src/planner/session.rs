//! PlannerSession - the caller-owned state around the planner
//!
//! Holds the inputs a front end collects (budget, duration, mode) and the
//! most recent itinerary. Each generation replaces the itinerary wholesale.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::budget::BudgetBreakdown;
use super::builder::build_itinerary;
use super::error::PlanError;
use crate::domain::{Itinerary, Place};

/// Longest trip the planner accepts, in days
pub const MAX_TRIP_DAYS: u32 = 365;

/// How the user wants to build the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    /// Generate the itinerary automatically
    #[default]
    Auto,
    /// User browses and picks places themselves
    Manual,
}

impl std::fmt::Display for PlanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

impl std::str::FromStr for PlanMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "manual" => Ok(Self::Manual),
            _ => Err(format!("Unknown plan mode: {}", s)),
        }
    }
}

/// Result of a generate request
#[derive(Debug, PartialEq)]
pub enum GenerateOutcome<'a> {
    /// A fresh itinerary was built and stored
    Planned(&'a Itinerary),
    /// Manual mode: nothing generated, the user selects places instead
    ManualSelection,
}

/// Planner inputs plus the current itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerSession {
    budget: f64,
    duration: u32,
    mode: PlanMode,
    current: Option<Itinerary>,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self {
            budget: 0.0,
            duration: 1,
            mode: PlanMode::Auto,
            current: None,
        }
    }
}

impl PlannerSession {
    pub fn new(budget: f64, duration: u32) -> Self {
        Self {
            budget,
            duration,
            ..Default::default()
        }
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn mode(&self) -> PlanMode {
        self.mode
    }

    pub fn set_budget(&mut self, budget: f64) {
        self.budget = budget;
    }

    pub fn set_duration(&mut self, days: u32) {
        self.duration = days;
    }

    pub fn set_mode(&mut self, mode: PlanMode) {
        debug!(%mode, "Plan mode changed");
        self.mode = mode;
    }

    /// Allocation preview; none until a budget and duration are set
    pub fn breakdown(&self) -> Option<BudgetBreakdown> {
        if self.budget == 0.0 || self.duration == 0 {
            return None;
        }
        Some(BudgetBreakdown::for_trip(self.budget, self.duration))
    }

    /// Check the planner's preconditions
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(self.budget > 0.0) {
            return Err(PlanError::InvalidBudget(self.budget));
        }
        if self.duration < 1 || self.duration > MAX_TRIP_DAYS {
            return Err(PlanError::InvalidDuration(self.duration));
        }
        Ok(())
    }

    /// Handle a generate request according to the current mode
    pub fn generate(&mut self, places: &[Place]) -> Result<GenerateOutcome<'_>, PlanError> {
        self.validate()?;
        match self.mode {
            PlanMode::Auto => self.plan(places).map(GenerateOutcome::Planned),
            PlanMode::Manual => {
                info!("Manual mode selected, skipping itinerary generation");
                Ok(GenerateOutcome::ManualSelection)
            }
        }
    }

    /// Build a new itinerary regardless of mode, replacing the current one
    pub fn regenerate(&mut self, places: &[Place]) -> Result<&Itinerary, PlanError> {
        self.validate()?;
        self.plan(places)
    }

    fn plan(&mut self, places: &[Place]) -> Result<&Itinerary, PlanError> {
        if places.is_empty() {
            return Err(PlanError::NoPlaces);
        }
        debug!(
            candidates = places.len(),
            budget = self.budget,
            days = self.duration,
            "Generating itinerary"
        );
        let itinerary = build_itinerary(places, self.budget, self.duration);
        Ok(&*self.current.insert(itinerary))
    }

    pub fn current_itinerary(&self) -> Option<&Itinerary> {
        self.current.as_ref()
    }

    /// Current itinerary, or `NoItinerary` when nothing has been generated
    pub fn require_itinerary(&self) -> Result<&Itinerary, PlanError> {
        self.current.as_ref().ok_or(PlanError::NoItinerary)
    }
}
