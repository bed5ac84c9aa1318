//! End-to-end planner scenarios
//!
//! Each test drives the public API the way a front end would: build a
//! catalog, hand it to the planner, inspect the itinerary.

use std::fs;

use tempfile::TempDir;
use wandernear::catalog::{FileCatalog, PlaceCatalog};
use wandernear::domain::{ActivityType, Category, DayPart, Place};
use wandernear::planner::{BUDGET_ALLOCATION, GenerateOutcome, PlanError, PlanMode, PlannerSession, build_itinerary};

fn place(id: &str, name: &str, category: Category) -> Place {
    Place::new(id, name).with_category(category)
}

// =============================================================================
// Trip-level scenarios
// =============================================================================

#[test]
fn test_allocation_fractions_sum_to_one() {
    assert_eq!(BUDGET_ALLOCATION.total(), 1.0);
}

#[test]
fn test_empty_catalog_charges_transport_only() {
    let itinerary = build_itinerary(&[], 300.0, 2);

    assert_eq!(itinerary.daily_plans.len(), 2);
    for plan in &itinerary.daily_plans {
        assert_eq!(plan.activity_count(), 0);
        assert!(plan.slots.morning.is_empty());
        assert!(plan.slots.afternoon.is_empty());
        assert!(plan.slots.evening.is_empty());
        assert_eq!(plan.estimated_cost, 22.5);
    }
    assert_eq!(itinerary.total_estimated_cost, 45.0);
}

#[test]
fn test_single_restaurant_used_once_across_days() {
    let places = vec![place("r1", "Only Diner", Category::Restaurant)];
    let itinerary = build_itinerary(&places, 1000.0, 3);

    let day1 = &itinerary.daily_plans[0];
    assert_eq!(day1.slots.morning.len(), 1);
    assert_eq!(day1.slots.morning[0].time, "08:00");
    assert_eq!(day1.slots.morning[0].place.name, "Only Diner");
    assert_eq!(day1.activity_count(), 1);

    for plan in &itinerary.daily_plans[1..] {
        assert_eq!(plan.activity_count(), 0);
    }
    assert_eq!(itinerary.scheduled_place_ids().len(), 1);
}

#[test]
fn test_higher_rated_attraction_comes_first() {
    let places = vec![
        place("a", "Garden A", Category::Park).with_rating(4.0),
        place("b", "Garden B", Category::Park).with_rating(4.8),
    ];
    let itinerary = build_itinerary(&places, 1000.0, 1);
    let plan = &itinerary.daily_plans[0];

    let morning: Vec<_> = plan
        .slots
        .get(DayPart::Morning)
        .iter()
        .filter(|a| a.activity_type == ActivityType::Attraction)
        .collect();
    assert_eq!(morning[0].place.name, "Garden B");
    assert_eq!(morning[0].time, "10:00");

    assert_eq!(plan.slots.afternoon[0].place.name, "Garden A");
}

#[test]
fn test_accented_name_takes_breakfast() {
    let places = vec![
        place("z", "Zoo Diner", Category::Restaurant),
        place("e", "École Bistro", Category::Restaurant),
    ];
    let itinerary = build_itinerary(&places, 1000.0, 1);
    let plan = &itinerary.daily_plans[0];

    assert_eq!(plan.slots.morning[0].time, "08:00");
    assert_eq!(plan.slots.morning[0].place.name, "École Bistro");
    assert_eq!(plan.slots.afternoon[0].time, "13:00");
    assert_eq!(plan.slots.afternoon[0].place.name, "Zoo Diner");
}

#[test]
fn test_mixed_rated_museums_schedule_in_pool_order() {
    let places = vec![
        place("a", "A", Category::Museum),
        place("c", "C", Category::Museum),
        place("b", "B", Category::Museum).with_rating(4.0),
        place("d", "D", Category::Museum).with_rating(5.0),
    ];
    let itinerary = build_itinerary(&places, 1000.0, 1);

    let scheduled: Vec<(&str, &str)> = itinerary
        .activities()
        .map(|a| (a.time.as_str(), a.place.name.as_str()))
        .collect();
    assert_eq!(scheduled, vec![("10:00", "A"), ("15:00", "D"), ("20:30", "B")]);
}

#[test]
fn test_over_budget_attraction_still_scheduled() {
    let places = vec![place("t", "Grand Tower", Category::TouristAttraction)];
    let itinerary = build_itinerary(&places, 10.0, 1);
    let plan = &itinerary.daily_plans[0];

    assert_eq!(plan.slots.morning.len(), 1);
    assert_eq!(plan.slots.morning[0].time, "10:00");
    assert_eq!(plan.slots.morning[0].estimated_cost, 20.0);
    assert_eq!(plan.estimated_cost, 21.5);
    assert!(plan.utilization() > 100.0);
    assert!(itinerary.summary().is_over_budget());
}

#[test]
fn test_unknown_category_is_not_scheduled() {
    let places = vec![
        place("l", "Harbor Hotel", Category::Lodging),
        place("x", "Mystery Spot", Category::Other("bar".to_string())),
    ];
    let itinerary = build_itinerary(&places, 500.0, 1);
    assert_eq!(itinerary.daily_plans[0].activity_count(), 0);
}

// =============================================================================
// Session + catalog
// =============================================================================

#[test]
fn test_session_plans_from_overpass_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("overpass.json");
    fs::write(
        &path,
        r#"{"elements": [
            {"type": "node", "id": 1, "lat": 48.85, "lon": 2.35,
             "tags": {"amenity": "restaurant", "name": "Chez Nous", "addr:street": "Rue A", "addr:city": "Paris"}},
            {"type": "node", "id": 2, "lat": 48.86, "lon": 2.36,
             "tags": {"tourism": "museum", "name": "Musée"}},
            {"type": "way", "id": 3, "tags": {"amenity": "cafe", "name": "Not a node"}}
        ]}"#,
    )
    .expect("Failed to write catalog");

    let places = FileCatalog::open(&path).places().expect("Failed to load catalog");
    assert_eq!(places.len(), 2);
    assert_eq!(places[0].address, "Rue A Paris");

    let mut session = PlannerSession::new(200.0, 1);
    let outcome = session.generate(&places).expect("Failed to plan");
    let GenerateOutcome::Planned(itinerary) = outcome else {
        panic!("auto mode should plan");
    };
    assert_eq!(itinerary.activities().count(), 2);
}

#[test]
fn test_session_regeneration_is_reproducible() {
    let places = vec![
        place("1", "Alder Diner", Category::Restaurant).with_rating(4.2),
        place("2", "Bean Cafe", Category::Cafe),
        place("3", "City Museum", Category::Museum).with_rating(4.9),
        place("4", "River Park", Category::Park),
    ];
    let mut session = PlannerSession::new(400.0, 2);
    let first = session.regenerate(&places).expect("plan").clone();
    let second = session.regenerate(&places).expect("plan").clone();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).expect("serialize"),
        serde_json::to_string(&second).expect("serialize")
    );
}

#[test]
fn test_session_manual_mode_has_nothing_to_export() {
    let places = vec![place("1", "Alder Diner", Category::Restaurant)];
    let mut session = PlannerSession::new(100.0, 1);
    session.set_mode(PlanMode::Manual);

    assert_eq!(session.generate(&places), Ok(GenerateOutcome::ManualSelection));
    assert_eq!(session.require_itinerary(), Err(PlanError::NoItinerary));
}
