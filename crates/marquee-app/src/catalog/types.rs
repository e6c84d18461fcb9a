//! Movie catalog types

use serde::{Deserialize, Serialize};

/// A movie as returned by the catalog endpoint
///
/// `title` is the identity key; the other fields are display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title")]
    pub title: String,
    /// Poster image URL
    #[serde(rename = "Poster", default)]
    pub poster: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Runtime", default)]
    pub runtime: String,
}

impl MovieRecord {
    /// Create a record with only a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            poster: String::new(),
            year: String::new(),
            runtime: String::new(),
        }
    }

    /// Set the poster URL
    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = poster.into();
        self
    }

    /// Set year and runtime
    pub fn with_details(mut self, year: impl Into<String>, runtime: impl Into<String>) -> Self {
        self.year = year.into();
        self.runtime = runtime.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_endpoint_shape() {
        let json = r#"{
            "Title": "Inception",
            "Poster": "https://example.com/inception.jpg",
            "Year": "2010",
            "Runtime": "148 min",
            "Director": "ignored"
        }"#;
        let movie: MovieRecord = serde_json::from_str(json).unwrap();
        assert_eq!(
            movie,
            MovieRecord::new("Inception")
                .with_poster("https://example.com/inception.jpg")
                .with_details("2010", "148 min")
        );
    }

    #[test]
    fn test_missing_optional_fields_default_empty() {
        let movie: MovieRecord = serde_json::from_str(r#"{"Title": "Heat"}"#).unwrap();
        assert_eq!(movie.title, "Heat");
        assert!(movie.poster.is_empty());
        assert!(movie.year.is_empty());
        assert!(movie.runtime.is_empty());
    }

    #[test]
    fn test_missing_title_is_error() {
        let result: Result<MovieRecord, _> = serde_json::from_str(r#"{"Year": "1999"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_capitalized_names() {
        let json = serde_json::to_string(&MovieRecord::new("Alien")).unwrap();
        assert!(json.contains(r#""Title":"Alien""#));
        assert!(json.contains(r#""Runtime":"""#));
    }
}
