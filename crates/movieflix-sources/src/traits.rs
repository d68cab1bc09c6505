use crate::error::SourceError;
use async_trait::async_trait;
use movieflix_models::{
    Credits, GenreList, MovieDetails, MovieId, MovieSummary, Page, TrailerSearch, VideoList,
};

/// Read-only movie catalog
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    fn catalog_name(&self) -> &str;

    // Lists
    async fn popular(&self, page: u32) -> Result<Page<MovieSummary>, SourceError>;
    async fn trending(&self, page: u32) -> Result<Page<MovieSummary>, SourceError>;
    async fn top_rated(&self, page: u32) -> Result<Page<MovieSummary>, SourceError>;
    async fn upcoming(&self, page: u32) -> Result<Page<MovieSummary>, SourceError>;
    async fn search(&self, query: &str, page: u32) -> Result<Page<MovieSummary>, SourceError>;
    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> Result<Page<MovieSummary>, SourceError>;
    async fn recommendations(&self, id: MovieId) -> Result<Page<MovieSummary>, SourceError>;

    // Single movie
    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, SourceError>;
    async fn movie_credits(&self, id: MovieId) -> Result<Credits, SourceError>;
    async fn movie_videos(&self, id: MovieId) -> Result<VideoList, SourceError>;

    async fn genres(&self) -> Result<GenreList, SourceError>;
}

/// Free-text trailer lookup, used when the catalog has no trailer of its own
#[async_trait]
pub trait TrailerSource: Send + Sync {
    async fn search_trailer(&self, title: &str) -> Result<TrailerSearch, SourceError>;
}
