//! WanderNear - budget-constrained day itinerary planner
//!
//! Turns a flat list of nearby places and a trip budget into a day-by-day
//! schedule of meals and attractions, keeping estimated spend near the budget.
//!
//! # Architecture
//!
//! ```text
//! catalog (JSON / JSONL / Overpass) ──► Vec<Place>
//!                                          │
//!                      PlannerSession ─────┤  budget, days, mode
//!                                          ▼
//!                                  planner::build_itinerary
//!                                          │
//!                                          ▼
//!                       Itinerary ──► render (text / json) | export (json / md)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use wandernear::catalog::{FileCatalog, PlaceCatalog};
//! use wandernear::planner::PlannerSession;
//!
//! let places = FileCatalog::open("places.json").places()?;
//! let mut session = PlannerSession::new(300.0, 2);
//! session.generate(&places)?;
//! let itinerary = session.require_itinerary()?;
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod export;
pub mod planner;
pub mod render;

pub use domain::{Category, Itinerary, Place, PlaceId};
pub use planner::{BudgetBreakdown, PlanError, PlannerSession, build_itinerary};
