//! Overpass API responses
//!
//! Converts OSM nodes into catalog places. Restaurants, cafes and bars come
//! in under `amenity`, hotels and museums under `tourism`, parks and venues
//! under `leisure`.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::domain::{Category, Place, PlaceId};

/// Top-level Overpass JSON document
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One OSM element as returned by Overpass
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassElement {
    fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl OverpassResponse {
    /// Places for every usable node, in response order
    pub fn into_places(self) -> Vec<Place> {
        self.elements.iter().filter_map(place_from_element).collect()
    }
}

/// Map an OSM tag value to the filter category it belongs to
pub fn normalize_category(tag: &str) -> Option<Category> {
    let category = match tag {
        "restaurant" | "fast_food" | "bar" => Category::Restaurant,
        "cafe" => Category::Cafe,
        "hotel" => Category::Lodging,
        "museum" | "gallery" => Category::Museum,
        "attraction" | "park" | "stadium" | "swimming_pool" | "tourism" => Category::TouristAttraction,
        _ => return None,
    };
    Some(category)
}

/// Build a place from a node; other element kinds and unplaced nodes are skipped
pub fn place_from_element(element: &OverpassElement) -> Option<Place> {
    if element.kind != "node" {
        return None;
    }
    let lat = element.lat.filter(|v| *v != 0.0)?;
    let lng = element.lon.filter(|v| *v != 0.0)?;

    let mut place = Place::new(PlaceId::from(element.id), element.tag("name").unwrap_or("Unnamed Place"))
        .with_coordinates(lat, lng)
        .with_address(address_of(element));
    place.website = element.tag("website").map(String::from);
    place.phone = element.tag("phone").map(String::from);

    if let Some(amenity) = element.tag("amenity") {
        place.raw_category = Some(amenity.to_string());
        place.category = Some(normalize_category(amenity).unwrap_or_else(|| Category::from_tag(amenity)));
    } else if let Some(raw) = element.tag("tourism").or_else(|| element.tag("leisure")) {
        place.raw_category = Some(raw.to_string());
        place.category = Some(normalize_category(raw).unwrap_or(Category::TouristAttraction));
    }

    Some(place)
}

fn address_of(element: &OverpassElement) -> String {
    if let Some(full) = element.tag("addr:full") {
        return full.to_string();
    }
    let street = element.tag("addr:street").unwrap_or("");
    let city = element.tag("addr:city").unwrap_or("");
    let joined = format!("{} {}", street, city);
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        "Address not available".to_string()
    } else {
        trimmed.to_string()
    }
}
