//! Itinerary construction
//!
//! A day is six fixed slots filled in order. Each slot draws from a category
//! pool with a spending ceiling derived from the day's budget:
//!
//! ```text
//! 08:00  morning    food        food        x 0.25
//! 10:00  morning    attraction  attractions x 0.40
//! 13:00  afternoon  food        food        x 0.40
//! 15:00  afternoon  attraction  attractions x 0.40
//! 19:00  evening    food        food        x 0.35
//! 20:30  evening    attraction  attractions x 0.20
//! ```
//!
//! Transport is charged once per day on top of whatever was scheduled.

use tracing::{debug, info};

use super::budget::{BudgetBreakdown, estimated_cost};
use super::selection::{PoolKind, UsedPlaces, filter_and_sort, select_place};
use crate::domain::{Activity, ActivityType, DailyPlan, DayPart, Itinerary, Place};

/// One fixed slot of the daily schedule
#[derive(Debug, Clone, Copy)]
pub struct SlotRule {
    pub time: &'static str,
    pub part: DayPart,
    pub activity_type: ActivityType,
    /// Fraction of the category sub-budget this slot may spend
    pub share: f64,
}

impl SlotRule {
    fn pool(&self) -> PoolKind {
        match self.activity_type {
            ActivityType::Food => PoolKind::Restaurants,
            ActivityType::Attraction => PoolKind::Attractions,
        }
    }

    /// Spending ceiling for this slot given the day's breakdown
    pub fn max_spend(&self, budgets: &BudgetBreakdown) -> f64 {
        match self.activity_type {
            ActivityType::Food => budgets.food * self.share,
            ActivityType::Attraction => budgets.attractions * self.share,
        }
    }
}

/// Slots in fill order
pub const DAILY_SLOTS: [SlotRule; 6] = [
    SlotRule {
        time: "08:00",
        part: DayPart::Morning,
        activity_type: ActivityType::Food,
        share: 0.25,
    },
    SlotRule {
        time: "10:00",
        part: DayPart::Morning,
        activity_type: ActivityType::Attraction,
        share: 0.4,
    },
    SlotRule {
        time: "13:00",
        part: DayPart::Afternoon,
        activity_type: ActivityType::Food,
        share: 0.40,
    },
    SlotRule {
        time: "15:00",
        part: DayPart::Afternoon,
        activity_type: ActivityType::Attraction,
        share: 0.4,
    },
    SlotRule {
        time: "19:00",
        part: DayPart::Evening,
        activity_type: ActivityType::Food,
        share: 0.35,
    },
    SlotRule {
        time: "20:30",
        part: DayPart::Evening,
        activity_type: ActivityType::Attraction,
        share: 0.2,
    },
];

/// Plan a whole trip
///
/// Expects `total_budget > 0` and `days >= 1`; callers validate (see
/// [`PlannerSession::validate`](super::PlannerSession::validate)). Every day
/// gets the same share of the budget and no place is scheduled twice across
/// the trip. The result depends only on the inputs.
pub fn build_itinerary(places: &[Place], total_budget: f64, days: u32) -> Itinerary {
    let budget_per_day = total_budget / f64::from(days);
    let mut itinerary = Itinerary {
        total_budget,
        days,
        budget_per_day,
        daily_plans: Vec::with_capacity(days as usize),
        total_estimated_cost: 0.0,
    };

    let mut used = UsedPlaces::new();

    for day in 1..=days {
        let plan = generate_daily_plan(places, budget_per_day, day, &mut used);
        itinerary.total_estimated_cost += plan.estimated_cost;
        itinerary.daily_plans.push(plan);
    }

    info!(
        days,
        total_budget,
        total_estimated_cost = itinerary.total_estimated_cost,
        places_scheduled = used.len(),
        "Built itinerary"
    );
    itinerary
}

/// Plan a single day, recording every scheduled place in `used`
pub fn generate_daily_plan(places: &[Place], day_budget: f64, day: u32, used: &mut UsedPlaces) -> DailyPlan {
    let mut plan = DailyPlan::new(day, day_budget);
    let budgets = BudgetBreakdown::for_day(day_budget);

    // Pools are snapshotted once per day; selection keeps them honest via `used`
    let restaurants = filter_and_sort(places, PoolKind::Restaurants, used);
    let attractions = filter_and_sort(places, PoolKind::Attractions, used);

    for rule in &DAILY_SLOTS {
        let pool = match rule.pool() {
            PoolKind::Restaurants => &restaurants,
            PoolKind::Attractions => &attractions,
        };
        let max_spend = rule.max_spend(&budgets);

        let Some(place) = select_place(pool, max_spend, used) else {
            debug!(day, time = rule.time, "No candidate for slot");
            continue;
        };

        let cost = estimated_cost(place);
        debug!(day, time = rule.time, place_id = %place.id, cost, max_spend, "Filled slot");

        plan.slots.get_mut(rule.part).push(Activity {
            time: rule.time.to_string(),
            activity_type: rule.activity_type,
            place: place.clone(),
            estimated_cost: cost,
        });
        plan.estimated_cost += cost;
    }

    plan.estimated_cost += budgets.transport;
    plan
}
