//! Venue categories

use serde::{Deserialize, Serialize};

/// Normalized venue category
///
/// Known categories drive cost tiers and pool membership. Anything else is
/// carried verbatim in `Other` and priced at the restaurant tier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Restaurant,
    Cafe,
    FastFood,
    Lodging,
    Museum,
    TouristAttraction,
    Park,
    Other(String),
}

impl Category {
    /// The snake_case tag used by the place catalog
    pub fn as_str(&self) -> &str {
        match self {
            Self::Restaurant => "restaurant",
            Self::Cafe => "cafe",
            Self::FastFood => "fast_food",
            Self::Lodging => "lodging",
            Self::Museum => "museum",
            Self::TouristAttraction => "tourist_attraction",
            Self::Park => "park",
            Self::Other(tag) => tag,
        }
    }

    /// Parse a tag; unknown tags become `Other`
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "restaurant" => Self::Restaurant,
            "cafe" => Self::Cafe,
            "fast_food" => Self::FastFood,
            "lodging" => Self::Lodging,
            "museum" => Self::Museum,
            "tourist_attraction" => Self::TouristAttraction,
            "park" => Self::Park,
            other => Self::Other(other.to_string()),
        }
    }

    /// True for an `Other` carrying an empty tag
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Other(tag) if tag.is_empty())
    }

    /// Display icon, matching both normalized and raw OSM tags
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Restaurant => "🍽️",
            Self::Cafe => "☕",
            Self::FastFood => "🍔",
            Self::Lodging => "🏨",
            Self::Museum => "🏛️",
            Self::TouristAttraction => "🎯",
            Self::Park => "🌳",
            Self::Other(tag) => match tag.as_str() {
                "bar" => "🍺",
                "hotel" => "🏨",
                "gallery" => "🖼️",
                "attraction" => "🎯",
                "stadium" => "🏟️",
                "swimming_pool" => "🏊",
                _ => "📍",
            },
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim().to_lowercase();
        if tag.is_empty() {
            return Err("Empty category".to_string());
        }
        Ok(Self::from_tag(&tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tags_round_trip() {
        for category in [
            Category::Restaurant,
            Category::Cafe,
            Category::FastFood,
            Category::Lodging,
            Category::Museum,
            Category::TouristAttraction,
            Category::Park,
        ] {
            assert_eq!(Category::from_tag(category.as_str()), category);
        }
    }

    #[test]
    fn test_unknown_tag_is_other() {
        assert_eq!(Category::from_tag("bar"), Category::Other("bar".to_string()));
        assert_eq!(Category::from_tag("bar").to_string(), "bar");
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Museum".parse::<Category>().unwrap(), Category::Museum);
        assert_eq!(" park ".parse::<Category>().unwrap(), Category::Park);
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde() {
        let json = serde_json::to_string(&Category::TouristAttraction).unwrap();
        assert_eq!(json, "\"tourist_attraction\"");

        let category: Category = serde_json::from_str("\"fast_food\"").unwrap();
        assert_eq!(category, Category::FastFood);

        let category: Category = serde_json::from_str("\"stadium\"").unwrap();
        assert_eq!(category, Category::Other("stadium".to_string()));
    }

    #[test]
    fn test_icons() {
        assert_eq!(Category::Cafe.icon(), "☕");
        assert_eq!(Category::Other("gallery".to_string()).icon(), "🖼️");
        assert_eq!(Category::Other("nightclub".to_string()).icon(), "📍");
    }

    #[test]
    fn test_is_blank() {
        assert!(Category::Other(String::new()).is_blank());
        assert!(!Category::Other("bar".to_string()).is_blank());
        assert!(!Category::Other(" ".to_string()).is_blank());
        assert!(!Category::Park.is_blank());
    }
}
