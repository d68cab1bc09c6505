use serde::{Deserialize, Serialize};
use crate::movie::{MovieId, MovieSummary};

/// An in-progress movie with its playback position.
///
/// Stored flat: the movie summary fields sit beside `progress`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinueWatchingEntry {
    #[serde(flatten)]
    pub movie: MovieSummary,
    /// Fraction watched, 0.0 to 1.0
    #[serde(default)]
    pub progress: f64,
}

impl ContinueWatchingEntry {
    pub fn new(movie: MovieSummary, progress: f64) -> Self {
        Self { movie, progress }
    }

    pub fn id(&self) -> MovieId {
        self.movie.id
    }

    /// Whether `progress` is a usable fraction
    pub fn is_valid_progress(progress: f64) -> bool {
        progress.is_finite() && (0.0..=1.0).contains(&progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let entry = ContinueWatchingEntry::new(MovieSummary::new(13, "Forrest Gump"), 0.25);
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["id"], 13);
        assert_eq!(value["title"], "Forrest Gump");
        assert_eq!(value["progress"], 0.25);
        assert!(value.get("movie").is_none());
    }

    #[test]
    fn test_progress_bounds() {
        assert!(ContinueWatchingEntry::is_valid_progress(0.0));
        assert!(ContinueWatchingEntry::is_valid_progress(1.0));
        assert!(!ContinueWatchingEntry::is_valid_progress(1.01));
        assert!(!ContinueWatchingEntry::is_valid_progress(-0.1));
        assert!(!ContinueWatchingEntry::is_valid_progress(f64::NAN));
    }
}
