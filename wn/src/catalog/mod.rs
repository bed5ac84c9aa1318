//! Place catalog providers
//!
//! The planner only needs a flat list of places. Catalogs hide where that
//! list comes from: memory, a JSON/JSONL export, or a raw Overpass response.

mod error;
mod file;
mod overpass;

use std::collections::HashSet;

use crate::domain::{Category, Place};

pub use error::CatalogError;
pub use file::{CatalogFormat, FileCatalog};
pub use overpass::{OverpassElement, OverpassResponse, normalize_category, place_from_element};

/// Source of candidate places
pub trait PlaceCatalog {
    fn places(&self) -> Result<Vec<Place>, CatalogError>;
}

impl PlaceCatalog for Vec<Place> {
    fn places(&self) -> Result<Vec<Place>, CatalogError> {
        Ok(self.clone())
    }
}

impl PlaceCatalog for [Place] {
    fn places(&self) -> Result<Vec<Place>, CatalogError> {
        Ok(self.to_vec())
    }
}

/// Places whose normalized category equals `category`; `None` keeps all
pub fn filter_by_category<'a>(places: &'a [Place], category: Option<&Category>) -> Vec<&'a Place> {
    match category {
        None => places.iter().collect(),
        Some(wanted) => places.iter().filter(|p| p.category.as_ref() == Some(wanted)).collect(),
    }
}

/// Reject catalogs that reuse an identifier
pub fn ensure_unique_ids(places: &[Place]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for place in places {
        if !seen.insert(&place.id) {
            return Err(CatalogError::DuplicateId(place.id.to_string()));
        }
    }
    Ok(())
}
