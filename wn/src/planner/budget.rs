//! Budget allocation and cost model

use serde::Serialize;

use crate::domain::{Category, Place};

/// Fractions of a day's budget per spending category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetAllocation {
    pub food: f64,
    pub attractions: f64,
    pub transport: f64,
    /// Never allocated to an activity; unspent headroom
    pub buffer: f64,
}

/// Fixed allocation; the fractions sum to exactly 1.0
pub const BUDGET_ALLOCATION: BudgetAllocation = BudgetAllocation {
    food: 0.40,
    attractions: 0.35,
    transport: 0.15,
    buffer: 0.10,
};

impl BudgetAllocation {
    pub fn total(&self) -> f64 {
        self.food + self.attractions + self.transport + self.buffer
    }
}

/// A day's budget split by category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub budget_per_day: f64,
    pub food: f64,
    pub attractions: f64,
    pub transport: f64,
    pub buffer: f64,
}

impl BudgetBreakdown {
    pub fn for_day(budget_per_day: f64) -> Self {
        Self {
            budget_per_day,
            food: budget_per_day * BUDGET_ALLOCATION.food,
            attractions: budget_per_day * BUDGET_ALLOCATION.attractions,
            transport: budget_per_day * BUDGET_ALLOCATION.transport,
            buffer: budget_per_day * BUDGET_ALLOCATION.buffer,
        }
    }

    /// Split a whole-trip budget evenly across `days`, then by category
    pub fn for_trip(total_budget: f64, days: u32) -> Self {
        Self::for_day(total_budget / f64::from(days))
    }
}

/// Expected spend at a venue; only `avg` feeds planning
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostRange {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl CostRange {
    const fn new(min: f64, max: f64, avg: f64) -> Self {
        Self { min, max, avg }
    }
}

const RESTAURANT_COST: CostRange = CostRange::new(15.0, 50.0, 30.0);

/// Cost tier for a category; unknown or missing categories use the restaurant tier
pub fn cost_range(category: Option<&Category>) -> CostRange {
    match category {
        Some(Category::Cafe) => CostRange::new(5.0, 20.0, 10.0),
        Some(Category::FastFood) => CostRange::new(8.0, 15.0, 12.0),
        Some(Category::TouristAttraction) => CostRange::new(10.0, 40.0, 20.0),
        Some(Category::Museum) => CostRange::new(8.0, 25.0, 15.0),
        Some(Category::Lodging) => CostRange::new(50.0, 200.0, 100.0),
        Some(Category::Park) => CostRange::new(0.0, 10.0, 5.0),
        Some(Category::Restaurant) | Some(Category::Other(_)) | None => RESTAURANT_COST,
    }
}

/// Estimated spend for a visit to `place`
pub fn estimated_cost(place: &Place) -> f64 {
    cost_range(place.effective_category().as_ref()).avg
}

/// Every known category with its tier, in display order
pub fn cost_table() -> Vec<(Category, CostRange)> {
    [
        Category::Restaurant,
        Category::Cafe,
        Category::FastFood,
        Category::TouristAttraction,
        Category::Museum,
        Category::Lodging,
        Category::Park,
    ]
    .into_iter()
    .map(|category| {
        let range = cost_range(Some(&category));
        (category, range)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_sums_to_one() {
        assert_eq!(BUDGET_ALLOCATION.total(), 1.0);
        assert_eq!(0.40 + 0.35 + 0.15 + 0.10, 1.0);
    }

    #[test]
    fn test_breakdown_for_trip() {
        let breakdown = BudgetBreakdown::for_trip(300.0, 2);
        assert_eq!(breakdown.budget_per_day, 150.0);
        assert_eq!(breakdown.food, 60.0);
        assert_eq!(breakdown.transport, 22.5);
        assert_eq!(breakdown.buffer, 15.0);
    }

    #[test]
    fn test_cost_tiers() {
        assert_eq!(cost_range(Some(&Category::Cafe)).avg, 10.0);
        assert_eq!(cost_range(Some(&Category::Lodging)).max, 200.0);
        assert_eq!(cost_range(Some(&Category::Park)).min, 0.0);
    }

    #[test]
    fn test_unknown_category_uses_restaurant_tier() {
        assert_eq!(cost_range(None), RESTAURANT_COST);
        assert_eq!(cost_range(Some(&Category::Other("bar".to_string()))), RESTAURANT_COST);
    }

    #[test]
    fn test_estimated_cost_uses_raw_category_fallback() {
        let place = Place::new("1", "Corner Park").with_raw_category("park");
        assert_eq!(estimated_cost(&place), 5.0);

        let place = Place::new("2", "Mystery");
        assert_eq!(estimated_cost(&place), 30.0);
    }

    #[test]
    fn test_cost_table_lists_known_categories() {
        let table = cost_table();
        assert_eq!(table.len(), 7);
        assert_eq!(table[0].0, Category::Restaurant);
        assert_eq!(table[0].1.avg, 30.0);
    }
}
