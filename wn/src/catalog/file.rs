//! File-backed place catalog

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info};

use super::error::CatalogError;
use super::overpass::OverpassResponse;
use super::{PlaceCatalog, ensure_unique_ids};
use crate::domain::Place;

/// On-disk layouts a catalog file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    /// JSON array of places
    Json,
    /// One place per line
    JsonLines,
    /// Raw Overpass API response
    Overpass,
}

impl CatalogFormat {
    /// Infer the format from the file extension, if it is decisive
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            _ => None,
        }
    }
}

/// Catalog read from a JSON, JSONL or Overpass file
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
    format: Option<CatalogFormat>,
}

impl FileCatalog {
    /// Catalog at `path`, format detected on load
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: None,
        }
    }

    /// Catalog at `path` with an explicit format
    pub fn with_format(path: impl AsRef<Path>, format: CatalogFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format: Some(format),
        }
    }

    fn read(&self) -> Result<String, CatalogError> {
        fs::read_to_string(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn json_error(&self, line: usize, source: serde_json::Error) -> CatalogError {
        CatalogError::Json {
            path: self.path.clone(),
            line,
            source,
        }
    }

    fn parse_lines(&self, content: &str) -> Result<Vec<Place>, CatalogError> {
        let mut places = Vec::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let place: Place = serde_json::from_str(line).map_err(|e| self.json_error(idx + 1, e))?;
            places.push(place);
        }
        Ok(places)
    }

    fn parse_document(&self, content: &str, format: Option<CatalogFormat>) -> Result<Vec<Place>, CatalogError> {
        let value: Value = serde_json::from_str(content).map_err(|e| {
            let line = e.line();
            self.json_error(line, e)
        })?;

        let format = match format {
            Some(format) => format,
            None if value.is_array() => CatalogFormat::Json,
            None if value.get("elements").is_some() => CatalogFormat::Overpass,
            None => return Err(CatalogError::UnknownFormat(self.path.display().to_string())),
        };
        debug!(path = %self.path.display(), ?format, "Parsing catalog");

        match format {
            CatalogFormat::Json => serde_json::from_value(value).map_err(|e| self.json_error(0, e)),
            CatalogFormat::Overpass => {
                let response: OverpassResponse = serde_json::from_value(value).map_err(|e| self.json_error(0, e))?;
                Ok(response.into_places())
            }
            CatalogFormat::JsonLines => self.parse_lines(content),
        }
    }
}

impl PlaceCatalog for FileCatalog {
    fn places(&self) -> Result<Vec<Place>, CatalogError> {
        let content = self.read()?;
        let format = self.format.or_else(|| CatalogFormat::from_extension(&self.path));

        let places = match format {
            Some(CatalogFormat::JsonLines) => self.parse_lines(&content)?,
            other => self.parse_document(&content, other)?,
        };
        ensure_unique_ids(&places)?;

        info!(path = %self.path.display(), count = places.len(), "Loaded place catalog");
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_json_array() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "places.json",
            r#"[{"id": 1, "name": "Bistro", "category": "restaurant"},
                {"id": 2, "name": "Park", "rawCategory": "park", "rating": 4.1}]"#,
        );
        let places = FileCatalog::open(&path).places().unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].category, Some(Category::Restaurant));
        assert_eq!(places[1].effective_category(), Some(Category::Park));
    }

    #[test]
    fn test_json_lines_skips_blank_lines() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "places.jsonl",
            "{\"id\": \"a\", \"name\": \"A\"}\n\n{\"id\": \"b\", \"name\": \"B\"}\n",
        );
        let places = FileCatalog::open(&path).places().unwrap();
        assert_eq!(places.len(), 2);
    }

    #[test]
    fn test_json_lines_reports_line() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "places.jsonl", "{\"id\": \"a\"}\nnot json\n");
        let err = FileCatalog::open(&path).places().unwrap_err();
        assert!(matches!(err, CatalogError::Json { line: 2, .. }));
        assert!(err.is_data_error());
    }

    #[test]
    fn test_overpass_detected() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "overpass.json",
            r#"{"version": 0.6, "elements": [
                {"type": "node", "id": 7, "lat": 1.0, "lon": 2.0, "tags": {"amenity": "cafe", "name": "Beans"}}
            ]}"#,
        );
        let places = FileCatalog::open(&path).places().unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].category, Some(Category::Cafe));
    }

    #[test]
    fn test_unknown_shape() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "odd.json", r#"{"places": []}"#);
        let err = FileCatalog::open(&path).places().unwrap_err();
        assert!(matches!(err, CatalogError::UnknownFormat(_)));
    }

    #[test]
    fn test_explicit_format_overrides_detection() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "export.txt", "{\"id\": 1, \"name\": \"A\"}\n");
        let places = FileCatalog::with_format(&path, CatalogFormat::JsonLines)
            .places()
            .unwrap();
        assert_eq!(places.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = FileCatalog::open("/nonexistent/places.json").places().unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(!err.is_data_error());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "dup.json", r#"[{"id": 1}, {"id": "1"}]"#);
        let err = FileCatalog::open(&path).places().unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(_)));
    }
}
