use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::movie::{deserialize_optional_date, MovieId, MovieSummary};

/// Paginated list response (`/movie/popular`, `/search/movie`, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Full record from `/movie/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    /// Minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    #[serde(default)]
    pub homepage: Option<String>,
}

impl MovieDetails {
    /// The subset that gets stored in the watchlist or continue-watching list
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            release_date: self.release_date,
            vote_average: self.vote_average,
            overview: self.overview.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

/// `/movie/{id}/credits`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl Credits {
    /// Top-billed cast, ordered by billing
    pub fn top_cast(&self, limit: usize) -> Vec<&CastMember> {
        let mut cast: Vec<&CastMember> = self.cast.iter().collect();
        cast.sort_by_key(|c| c.order);
        cast.truncate(limit);
        cast
    }

    pub fn directors(&self) -> Vec<&CrewMember> {
        self.crew
            .iter()
            .filter(|c| c.job.as_deref() == Some("Director"))
            .collect()
    }
}

/// Entry from `/movie/{id}/videos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.site.eq_ignore_ascii_case("youtube") && self.video_type.eq_ignore_ascii_case("trailer")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

impl VideoList {
    /// Best trailer: official YouTube trailers first, then any YouTube trailer
    pub fn best_trailer(&self) -> Option<&Video> {
        let mut trailers = self.results.iter().filter(|v| v.is_youtube_trailer());
        let first = trailers.clone().next();
        trailers.find(|v| v.official).or(first)
    }
}

/// YouTube `/search` response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TrailerSearch {
    #[serde(default)]
    pub items: Vec<TrailerSearchItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrailerSearchItem {
    pub id: TrailerSearchId,
    #[serde(default)]
    pub snippet: Option<TrailerSnippet>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrailerSearchId {
    #[serde(rename = "videoId", default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrailerSnippet {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
}

impl TrailerSearch {
    pub fn first_video_id(&self) -> Option<&str> {
        self.items.iter().find_map(|item| item.id.video_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_of_summaries() {
        let json = r#"{
            "page": 1,
            "results": [
                {"id": 1, "title": "A", "release_date": "2020-01-01", "vote_average": 7},
                {"id": 2, "title": "B", "release_date": ""}
            ],
            "total_pages": 10,
            "total_results": 200
        }"#;
        let page: Page<MovieSummary> = serde_json::from_str(json).unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].vote_average, 7.0);
        assert_eq!(page.results[1].release_date, None);
        assert_eq!(page.total_results, 200);
    }

    #[test]
    fn test_best_trailer_prefers_official() {
        let videos: VideoList = serde_json::from_str(r#"{"results": [
            {"key": "teaser1", "site": "YouTube", "type": "Teaser", "official": true},
            {"key": "fan0000", "site": "YouTube", "type": "Trailer", "official": false},
            {"key": "offical", "site": "YouTube", "type": "Trailer", "official": true},
            {"key": "vimeo01", "site": "Vimeo", "type": "Trailer", "official": true}
        ]}"#).unwrap();
        assert_eq!(videos.best_trailer().map(|v| v.key.as_str()), Some("offical"));
    }

    #[test]
    fn test_trailer_search_first_video() {
        let search: TrailerSearch = serde_json::from_str(r#"{"items": [
            {"id": {"kind": "youtube#channel"}},
            {"id": {"kind": "youtube#video", "videoId": "SUXWAEX2jlg"},
             "snippet": {"title": "Fight Club - Trailer", "channelTitle": "Movieclips"}}
        ]}"#).unwrap();
        assert_eq!(search.first_video_id(), Some("SUXWAEX2jlg"));
    }

    #[test]
    fn test_credits_ordering() {
        let credits: Credits = serde_json::from_str(r#"{
            "cast": [
                {"id": 2, "name": "Second", "order": 1},
                {"id": 1, "name": "First", "order": 0},
                {"id": 3, "name": "Third", "order": 2}
            ],
            "crew": [
                {"id": 9, "name": "David Fincher", "job": "Director"},
                {"id": 8, "name": "Someone", "job": "Producer"}
            ]
        }"#).unwrap();
        let top: Vec<&str> = credits.top_cast(2).iter().map(|c| c.name.as_str()).collect();
        assert_eq!(top, vec!["First", "Second"]);
        assert_eq!(credits.directors().len(), 1);
    }
}
