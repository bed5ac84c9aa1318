//! Candidate pools and per-slot place selection

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::LazyLock;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use tracing::{debug, warn};

use super::budget::estimated_cost;
use super::sort::timsort_by;
use crate::domain::{Category, Place, PlaceId};

/// Places already scheduled during one planning run
///
/// Shared across every day of the trip, so no place is visited twice.
#[derive(Debug, Default, Clone)]
pub struct UsedPlaces {
    ids: HashSet<PlaceId>,
}

impl UsedPlaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.ids.contains(id)
    }

    /// Record a place as used; returns false if it already was
    pub fn mark(&mut self, id: &PlaceId) -> bool {
        self.ids.insert(id.clone())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Which candidate pool a slot draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolKind {
    /// restaurant, fast_food, cafe
    Restaurants,
    /// tourist_attraction, museum, park
    Attractions,
}

impl PoolKind {
    pub fn admits(&self, category: &Category) -> bool {
        match self {
            Self::Restaurants => matches!(category, Category::Restaurant | Category::FastFood | Category::Cafe),
            Self::Attractions => matches!(category, Category::TouristAttraction | Category::Museum | Category::Park),
        }
    }
}

/// Unused places of the pool's categories, best candidates first
pub fn filter_and_sort<'a>(places: &'a [Place], pool: PoolKind, used: &UsedPlaces) -> Vec<&'a Place> {
    let mut candidates: Vec<&Place> = places
        .iter()
        .filter(|place| place.effective_category().is_some_and(|c| pool.admits(&c)))
        .filter(|place| !used.contains(&place.id))
        .collect();

    timsort_by(&mut candidates, |a, b| compare_places(a, b));
    candidates
}

/// Higher rating first when both places are rated, otherwise by name
///
/// Mixed rated/unrated comparisons fall through to the name, so this is not a
/// total order over arbitrary lists.
pub fn compare_places(a: &Place, b: &Place) -> Ordering {
    if let (Some(ra), Some(rb)) = (a.usable_rating(), b.usable_rating()) {
        return rb.partial_cmp(&ra).unwrap_or(Ordering::Equal);
    }
    compare_names(&a.name, &b.name)
}

/// Root-locale collator at its default (tertiary) strength
static NAME_COLLATOR: LazyLock<Option<CollatorBorrowed<'static>>> = LazyLock::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .inspect_err(|e| warn!(error = %e, "Collation data unavailable, names compare by code point"))
        .ok()
});

/// Locale-aware name order; lowercase sorts before uppercase
///
/// Accents and case are secondary to the base letters, so "École" sorts with
/// the E's rather than after "Z".
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let collated = match NAME_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a.to_lowercase().cmp(&b.to_lowercase()),
    };
    collated.then_with(|| b.cmp(a))
}

/// Pick a place for one slot
///
/// Takes the first unused candidate whose average cost fits `max_spend`. When
/// none fits, falls back to the pool's first candidate even though it is over
/// budget, as long as it is still unused.
pub fn select_place<'a>(pool: &[&'a Place], max_spend: f64, used: &mut UsedPlaces) -> Option<&'a Place> {
    for place in pool {
        if estimated_cost(place) <= max_spend && !used.contains(&place.id) {
            used.mark(&place.id);
            return Some(*place);
        }
    }

    let first = pool.first()?;
    if used.contains(&first.id) {
        return None;
    }
    debug!(place_id = %first.id, max_spend, "No candidate within budget, using first in pool");
    used.mark(&first.id);
    Some(*first)
}
