use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// TMDB movie identifier
pub type MovieId = u64;

/// Movie summary as returned by catalog list endpoints and held in the
/// watchlist and continue-watching collections.
///
/// Field names follow the catalog's wire format so list results deserialize
/// straight into this type. Identity is `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
}

impl MovieSummary {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: 0.0,
            overview: String::new(),
        }
    }

    /// Release year, if the release date is known
    pub fn year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.release_date.map(|d| d.year())
    }
}

/// The catalog sends `""` (or null) for unknown release dates.
pub(crate) fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_result() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null,
            "release_date": "1999-10-15",
            "vote_average": 8.4,
            "overview": "A ticking-time-bomb insomniac...",
            "popularity": 61.4,
            "adult": false
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 550);
        assert_eq!(movie.title, "Fight Club");
        assert_eq!(movie.backdrop_path, None);
        assert_eq!(movie.release_date, NaiveDate::from_ymd_opt(1999, 10, 15));
        assert_eq!(movie.year(), Some(1999));
    }

    #[test]
    fn test_empty_release_date_is_absent() {
        let json = r#"{"id": 1, "title": "Untitled", "release_date": ""}"#;
        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_date, None);
        assert_eq!(movie.vote_average, 0.0);
        assert!(movie.overview.is_empty());
    }

    #[test]
    fn test_malformed_release_date_is_rejected() {
        let json = r#"{"id": 1, "title": "Untitled", "release_date": "soon"}"#;
        assert!(serde_json::from_str::<MovieSummary>(json).is_err());
    }
}
