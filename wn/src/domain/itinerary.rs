//! Itinerary output types

use serde::{Deserialize, Serialize};

use super::{Place, PlaceId};

/// What an activity is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Food,
    Attraction,
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Food => write!(f, "food"),
            Self::Attraction => write!(f, "attraction"),
        }
    }
}

/// Time-of-day bucket within a daily plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Morning,
    Afternoon,
    Evening,
}

impl DayPart {
    pub const ALL: [DayPart; 3] = [DayPart::Morning, DayPart::Afternoon, DayPart::Evening];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
        }
    }

    pub fn start(&self) -> &'static str {
        match self {
            Self::Morning => "08:00",
            Self::Afternoon => "12:00",
            Self::Evening => "17:00",
        }
    }

    pub fn end(&self) -> &'static str {
        match self {
            Self::Morning => "12:00",
            Self::Afternoon => "17:00",
            Self::Evening => "22:00",
        }
    }

    /// "08:00 - 12:00"
    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start(), self.end())
    }
}

/// A place scheduled at a fixed clock time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Literal clock time, e.g. "20:30"
    pub time: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub place: Place,
    pub estimated_cost: f64,
}

impl Activity {
    /// Icon for the activity, refined by the place's category
    pub fn icon(&self) -> &'static str {
        use super::Category;

        let category = self.place.category.as_ref();
        match self.activity_type {
            ActivityType::Food => match category {
                Some(Category::Cafe) => "☕",
                Some(Category::FastFood) => "🍔",
                _ => "🍽️",
            },
            ActivityType::Attraction => match category {
                Some(Category::Museum) => "🏛️",
                Some(Category::Park) => "🌳",
                _ => "🎯",
            },
        }
    }
}

/// Activities of one day, bucketed by time of day
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaySlots {
    pub morning: Vec<Activity>,
    pub afternoon: Vec<Activity>,
    pub evening: Vec<Activity>,
}

impl DaySlots {
    pub fn get(&self, part: DayPart) -> &[Activity] {
        match part {
            DayPart::Morning => &self.morning,
            DayPart::Afternoon => &self.afternoon,
            DayPart::Evening => &self.evening,
        }
    }

    pub(crate) fn get_mut(&mut self, part: DayPart) -> &mut Vec<Activity> {
        match part {
            DayPart::Morning => &mut self.morning,
            DayPart::Afternoon => &mut self.afternoon,
            DayPart::Evening => &mut self.evening,
        }
    }
}

/// Plan for a single day of the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPlan {
    /// 1-based day index
    pub day: u32,
    pub budget: f64,
    pub estimated_cost: f64,
    pub slots: DaySlots,
}

impl DailyPlan {
    pub fn new(day: u32, budget: f64) -> Self {
        Self {
            day,
            budget,
            estimated_cost: 0.0,
            slots: DaySlots::default(),
        }
    }

    /// All activities in schedule order
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        DayPart::ALL.into_iter().flat_map(|part| self.slots.get(part).iter())
    }

    pub fn activity_count(&self) -> usize {
        self.activities().count()
    }

    /// Estimated spend as a percentage of this day's budget
    pub fn utilization(&self) -> f64 {
        self.estimated_cost / self.budget * 100.0
    }
}

/// A complete multi-day plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub total_budget: f64,
    pub days: u32,
    pub budget_per_day: f64,
    pub daily_plans: Vec<DailyPlan>,
    pub total_estimated_cost: f64,
}

impl Itinerary {
    /// All activities of the trip in schedule order
    pub fn activities(&self) -> impl Iterator<Item = &Activity> {
        self.daily_plans.iter().flat_map(DailyPlan::activities)
    }

    /// Ids of every scheduled place, in schedule order
    pub fn scheduled_place_ids(&self) -> Vec<&PlaceId> {
        self.activities().map(|a| &a.place.id).collect()
    }

    pub fn summary(&self) -> ItinerarySummary {
        ItinerarySummary::from_itinerary(self)
    }
}

/// Derived figures shown alongside an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItinerarySummary {
    /// Estimated cost as a percentage of the total budget; may exceed 100
    pub budget_utilization: f64,
    /// Total budget minus estimated cost; negative on overspend
    pub remaining: f64,
    pub activity_count: usize,
    pub over_budget: bool,
}

impl ItinerarySummary {
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        let remaining = itinerary.total_budget - itinerary.total_estimated_cost;
        Self {
            budget_utilization: itinerary.total_estimated_cost / itinerary.total_budget * 100.0,
            remaining,
            activity_count: itinerary.activities().count(),
            over_budget: remaining < 0.0,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.over_budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;

    fn activity(time: &str, activity_type: ActivityType, place: Place, cost: f64) -> Activity {
        Activity {
            time: time.to_string(),
            activity_type,
            place,
            estimated_cost: cost,
        }
    }

    #[test]
    fn test_day_part_ranges() {
        assert_eq!(DayPart::Morning.time_range(), "08:00 - 12:00");
        assert_eq!(DayPart::Afternoon.time_range(), "12:00 - 17:00");
        assert_eq!(DayPart::Evening.time_range(), "17:00 - 22:00");
    }

    #[test]
    fn test_activities_in_schedule_order() {
        let mut plan = DailyPlan::new(1, 100.0);
        plan.slots.evening.push(activity(
            "19:00",
            ActivityType::Food,
            Place::new("3", "Dinner"),
            30.0,
        ));
        plan.slots.morning.push(activity(
            "08:00",
            ActivityType::Food,
            Place::new("1", "Breakfast"),
            10.0,
        ));

        let names: Vec<_> = plan.activities().map(|a| a.place.name.as_str()).collect();
        assert_eq!(names, vec!["Breakfast", "Dinner"]);
        assert_eq!(plan.activity_count(), 2);
    }

    #[test]
    fn test_activity_icons() {
        let cafe = activity(
            "08:00",
            ActivityType::Food,
            Place::new("1", "A").with_category(Category::Cafe),
            10.0,
        );
        assert_eq!(cafe.icon(), "☕");

        let park = activity(
            "10:00",
            ActivityType::Attraction,
            Place::new("2", "B").with_category(Category::Park),
            5.0,
        );
        assert_eq!(park.icon(), "🌳");

        let museum_as_food = activity(
            "13:00",
            ActivityType::Food,
            Place::new("3", "C").with_category(Category::Museum),
            15.0,
        );
        assert_eq!(museum_as_food.icon(), "🍽️");
    }

    #[test]
    fn test_summary_negative_remaining() {
        let itinerary = Itinerary {
            total_budget: 10.0,
            days: 1,
            budget_per_day: 10.0,
            daily_plans: vec![],
            total_estimated_cost: 25.0,
        };
        let summary = itinerary.summary();
        assert_eq!(summary.budget_utilization, 250.0);
        assert_eq!(summary.remaining, -15.0);
        assert!(summary.is_over_budget());
    }

    #[test]
    fn test_itinerary_serializes_camel_case() {
        let itinerary = Itinerary {
            total_budget: 300.0,
            days: 2,
            budget_per_day: 150.0,
            daily_plans: vec![DailyPlan::new(1, 150.0)],
            total_estimated_cost: 22.5,
        };
        let json = serde_json::to_value(&itinerary).unwrap();
        assert_eq!(json["totalBudget"], 300.0);
        assert_eq!(json["budgetPerDay"], 150.0);
        assert_eq!(json["dailyPlans"][0]["estimatedCost"], 0.0);
        assert!(json["dailyPlans"][0]["slots"]["morning"].as_array().unwrap().is_empty());
    }
}
