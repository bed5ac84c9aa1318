//! Planner request errors
//!
//! The planner itself is total over valid input; these cover what the
//! session rejects before planning.

use thiserror::Error;

use super::session::MAX_TRIP_DAYS;

/// Errors raised while preparing or reading a plan
#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Please enter a valid budget (got {0})")]
    InvalidBudget(f64),

    #[error("Please select plan duration of 1 to {max} days (got {0} days)", max = MAX_TRIP_DAYS)]
    InvalidDuration(u32),

    #[error("No places available. Please search for a location first.")]
    NoPlaces,

    #[error("No itinerary to export")]
    NoItinerary,
}

impl PlanError {
    /// Errors the user fixes by changing an input, as opposed to missing data
    pub fn is_input_error(&self) -> bool {
        matches!(self, PlanError::InvalidBudget(_) | PlanError::InvalidDuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input_error() {
        assert!(PlanError::InvalidBudget(0.0).is_input_error());
        assert!(PlanError::InvalidDuration(0).is_input_error());
        assert!(!PlanError::NoPlaces.is_input_error());
        assert!(!PlanError::NoItinerary.is_input_error());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            PlanError::InvalidBudget(-5.0).to_string(),
            "Please enter a valid budget (got -5)"
        );
        assert!(PlanError::NoPlaces.to_string().starts_with("No places available"));
    }
}
