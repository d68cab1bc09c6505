use crate::error::SourceError;
use crate::traits::{MovieCatalog, TrailerSource};
use crate::youtube::{embed_url, watch_url};
use movieflix_models::MovieId;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailerOrigin {
    /// Listed in the catalog's own video metadata
    Catalog,
    /// Found by free-text video search
    Search,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trailer {
    pub video_id: String,
    pub name: Option<String>,
    pub origin: TrailerOrigin,
}

impl Trailer {
    pub fn embed_url(&self) -> String {
        embed_url(&self.video_id)
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}

/// Find a trailer for a movie.
///
/// The catalog's own YouTube trailers win. Otherwise, when a search source is
/// available, the top search hit for the title is used. `Ok(None)` means
/// neither produced anything.
pub async fn resolve_trailer(
    catalog: &dyn MovieCatalog,
    search: Option<&dyn TrailerSource>,
    movie_id: MovieId,
    title: &str,
) -> Result<Option<Trailer>, SourceError> {
    let videos = catalog.movie_videos(movie_id).await?;
    if let Some(video) = videos.best_trailer() {
        debug!(movie_id, key = %video.key, "Using catalog trailer");
        return Ok(Some(Trailer {
            video_id: video.key.clone(),
            name: Some(video.name.clone()),
            origin: TrailerOrigin::Catalog,
        }));
    }

    let Some(search) = search else {
        debug!(movie_id, "No catalog trailer and no search source configured");
        return Ok(None);
    };

    let results = search.search_trailer(title).await?;
    let trailer = results.items.iter().find_map(|item| {
        let video_id = item.id.video_id.clone()?;
        Some(Trailer {
            video_id,
            name: item.snippet.as_ref().map(|s| s.title.clone()),
            origin: TrailerOrigin::Search,
        })
    });

    if trailer.is_none() {
        warn!("No trailer found for '{}'", title);
    }
    Ok(trailer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use movieflix_models::{
        Credits, GenreList, MovieDetails, MovieSummary, Page, TrailerSearch, Video, VideoList,
    };
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeCatalog {
        videos: VideoList,
    }

    fn empty_page() -> Page<MovieSummary> {
        serde_json::from_value(json!({"results": []})).unwrap()
    }

    #[async_trait]
    impl MovieCatalog for FakeCatalog {
        fn catalog_name(&self) -> &str {
            "fake"
        }
        async fn popular(&self, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn trending(&self, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn top_rated(&self, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn upcoming(&self, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn search(&self, _: &str, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn discover_by_genre(&self, _: u32, _: u32) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn recommendations(&self, _: MovieId) -> Result<Page<MovieSummary>, SourceError> {
            Ok(empty_page())
        }
        async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, SourceError> {
            Ok(serde_json::from_value(json!({"id": id, "title": "Fake"})).unwrap())
        }
        async fn movie_credits(&self, _: MovieId) -> Result<Credits, SourceError> {
            Ok(Credits::default())
        }
        async fn movie_videos(&self, _: MovieId) -> Result<VideoList, SourceError> {
            Ok(self.videos.clone())
        }
        async fn genres(&self) -> Result<GenreList, SourceError> {
            Ok(serde_json::from_value(json!({"genres": []})).unwrap())
        }
    }

    struct FakeSearch {
        calls: AtomicU32,
        result: TrailerSearch,
    }

    #[async_trait]
    impl TrailerSource for FakeSearch {
        async fn search_trailer(&self, _title: &str) -> Result<TrailerSearch, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.result.clone())
        }
    }

    fn video(key: &str, site: &str, kind: &str) -> Video {
        serde_json::from_value(json!({
            "key": key, "name": key, "site": site, "type": kind, "official": false
        }))
        .unwrap()
    }

    fn search_hit(video_id: &str) -> TrailerSearch {
        serde_json::from_value(json!({
            "items": [{"id": {"videoId": video_id}, "snippet": {"title": "Hit", "channelTitle": "Studio"}}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_catalog_trailer_preferred() {
        let catalog = FakeCatalog {
            videos: VideoList {
                results: vec![video("tease", "YouTube", "Teaser"), video("main", "YouTube", "Trailer")],
            },
        };
        let search = FakeSearch {
            calls: AtomicU32::new(0),
            result: search_hit("searchhit01"),
        };

        let trailer = resolve_trailer(&catalog, Some(&search), 1, "Heat")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(trailer.video_id, "main");
        assert_eq!(trailer.origin, TrailerOrigin::Catalog);
        assert_eq!(search.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_back_to_search() {
        let catalog = FakeCatalog {
            videos: VideoList {
                results: vec![video("vimeo", "Vimeo", "Trailer")],
            },
        };
        let search = FakeSearch {
            calls: AtomicU32::new(0),
            result: search_hit("searchhit01"),
        };

        let trailer = resolve_trailer(&catalog, Some(&search), 1, "Heat")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(trailer.origin, TrailerOrigin::Search);
        assert_eq!(
            trailer.embed_url(),
            "https://www.youtube.com/embed/searchhit01?autoplay=1&rel=0"
        );
    }

    #[tokio::test]
    async fn test_nothing_found() {
        let catalog = FakeCatalog {
            videos: VideoList::default(),
        };
        assert_eq!(resolve_trailer(&catalog, None, 1, "Heat").await.unwrap(), None);

        let search = FakeSearch {
            calls: AtomicU32::new(0),
            result: TrailerSearch::default(),
        };
        assert_eq!(
            resolve_trailer(&catalog, Some(&search), 1, "Heat").await.unwrap(),
            None
        );
    }
}
