//! Candidate places supplied by the place catalog

use serde::{Deserialize, Serialize};

use super::Category;

/// Stable place identifier
///
/// Catalogs hand out either numeric OSM node ids or strings; both are kept
/// as their decimal/string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlaceId", into = "String")]
pub struct PlaceId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlaceId {
    Number(i64),
    Text(String),
}

impl From<RawPlaceId> for PlaceId {
    fn from(raw: RawPlaceId) -> Self {
        match raw {
            RawPlaceId::Number(n) => Self(n.to_string()),
            RawPlaceId::Text(s) => Self(s),
        }
    }
}

impl From<PlaceId> for String {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for PlaceId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A place as delivered by the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub lat: f64,

    #[serde(default)]
    pub lng: f64,

    #[serde(default)]
    pub address: String,

    /// 1-5, or absent
    #[serde(default)]
    pub rating: Option<f64>,

    /// Normalized category
    #[serde(default)]
    pub category: Option<Category>,

    /// Unnormalized catalog tag, used when `category` is absent
    #[serde(default, alias = "raw_category")]
    pub raw_category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

fn default_name() -> String {
    "Unnamed Place".to_string()
}

impl Place {
    /// Create a place with only an id and a name
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat: 0.0,
            lng: 0.0,
            address: String::new(),
            rating: None,
            category: None,
            raw_category: None,
            website: None,
            phone: None,
        }
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_raw_category(mut self, raw: impl Into<String>) -> Self {
        self.raw_category = Some(raw.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_coordinates(mut self, lat: f64, lng: f64) -> Self {
        self.lat = lat;
        self.lng = lng;
        self
    }

    /// Normalized category, falling back to the raw tag
    ///
    /// Only empty strings count as absent; a whitespace tag is kept and
    /// matches no known category.
    pub fn effective_category(&self) -> Option<Category> {
        if let Some(category) = self.category.as_ref().filter(|c| !c.is_blank()) {
            return Some(category.clone());
        }
        self.raw_category
            .as_deref()
            .filter(|raw| !raw.is_empty())
            .map(Category::from_tag)
    }

    /// Rating usable for ordering; zero and NaN count as unrated
    pub fn usable_rating(&self) -> Option<f64> {
        self.rating.filter(|r| *r != 0.0 && !r.is_nan())
    }

    /// Address for display, with the catalog's placeholder when empty
    pub fn display_address(&self) -> &str {
        if self.address.trim().is_empty() {
            "Address not available"
        } else {
            &self.address
        }
    }
}
