//! Domain types for WanderNear
//!
//! Places come in from the catalog; itineraries go out to the renderer.
//! Neither side is mutated by the planner once handed over.

mod category;
mod itinerary;
mod place;

pub use category::Category;
pub use itinerary::{Activity, ActivityType, DailyPlan, DayPart, DaySlots, Itinerary, ItinerarySummary};
pub use place::{Place, PlaceId};
