//! TMDB (The Movie Database) catalog client.

use crate::error::SourceError;
use crate::http::JsonHttp;
use crate::retry::RetryPolicy;
use crate::traits::MovieCatalog;
use async_trait::async_trait;
use movieflix_config::{HttpConfig, TmdbConfig};
use movieflix_models::{
    Credits, GenreList, MovieDetails, MovieId, MovieSummary, Page, VideoList,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

const SERVICE: &str = "TMDB";

/// Poster size used when the caller doesn't ask for one
pub const DEFAULT_IMAGE_SIZE: &str = "w500";

pub struct TmdbClient {
    http: JsonHttp,
    api_key: String,
    base_url: String,
    image_base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    /// Fails with `MissingApiKey` on a blank key
    pub fn new(
        api_key: impl Into<String>,
        config: &TmdbConfig,
        http: &HttpConfig,
    ) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::MissingApiKey { service: SERVICE });
        }

        Ok(Self {
            http: JsonHttp::new(SERVICE, RetryPolicy::from_config(http))?,
            api_key,
            base_url: config.base_url.clone(),
            image_base_url: config.image_base_url.clone(),
            language: config.language.clone(),
        })
    }

    /// Raw GET against the API. The key (and language, if configured) is
    /// added to `params`.
    pub async fn fetch(&self, path: &str, params: &[(&str, String)]) -> Result<Value, SourceError> {
        let mut query: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        if let Some(language) = &self.language {
            query.push(("language", language.clone()));
        }
        query.extend(params.iter().cloned());

        self.http.get(&self.base_url, path, &query).await
    }

    async fn fetch_as<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let value = self.fetch(path, params).await?;
        serde_json::from_value(value).map_err(|source| SourceError::Decode {
            service: SERVICE,
            path: path.to_string(),
            source,
        })
    }

    async fn list(
        &self,
        path: &str,
        page: u32,
        extra: &[(&str, String)],
    ) -> Result<Page<MovieSummary>, SourceError> {
        let mut params = vec![("page", page.max(1).to_string())];
        params.extend(extra.iter().cloned());
        let result: Page<MovieSummary> = self.fetch_as(path, &params).await?;
        debug!(
            path = %path,
            page = result.page,
            results = result.results.len(),
            "Fetched movie list"
        );
        Ok(result)
    }

    /// Full image URL for a poster/backdrop path, e.g. `/abc.jpg`
    pub fn image_url(&self, path: &str, size: Option<&str>) -> String {
        format!(
            "{}/{}{}",
            self.image_base_url.trim_end_matches('/'),
            size.unwrap_or(DEFAULT_IMAGE_SIZE),
            path
        )
    }
}

#[async_trait]
impl MovieCatalog for TmdbClient {
    fn catalog_name(&self) -> &str {
        SERVICE
    }

    async fn popular(&self, page: u32) -> Result<Page<MovieSummary>, SourceError> {
        self.list("/movie/popular", page, &[]).await
    }

    async fn trending(&self, page: u32) -> Result<Page<MovieSummary>, SourceError> {
        self.list("/trending/movie/week", page, &[]).await
    }

    async fn top_rated(&self, page: u32) -> Result<Page<MovieSummary>, SourceError> {
        self.list("/movie/top_rated", page, &[]).await
    }

    async fn upcoming(&self, page: u32) -> Result<Page<MovieSummary>, SourceError> {
        self.list("/movie/upcoming", page, &[]).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<Page<MovieSummary>, SourceError> {
        self.list("/search/movie", page, &[("query", query.to_string())])
            .await
    }

    async fn discover_by_genre(
        &self,
        genre_id: u32,
        page: u32,
    ) -> Result<Page<MovieSummary>, SourceError> {
        self.list(
            "/discover/movie",
            page,
            &[("with_genres", genre_id.to_string())],
        )
        .await
    }

    async fn recommendations(&self, id: MovieId) -> Result<Page<MovieSummary>, SourceError> {
        self.list(&format!("/movie/{}/recommendations", id), 1, &[])
            .await
    }

    async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, SourceError> {
        debug!(movie_id = id, "Fetching movie details");
        self.fetch_as(&format!("/movie/{}", id), &[]).await
    }

    async fn movie_credits(&self, id: MovieId) -> Result<Credits, SourceError> {
        self.fetch_as(&format!("/movie/{}/credits", id), &[]).await
    }

    async fn movie_videos(&self, id: MovieId) -> Result<VideoList, SourceError> {
        self.fetch_as(&format!("/movie/{}/videos", id), &[]).await
    }

    async fn genres(&self) -> Result<GenreList, SourceError> {
        self.fetch_as("/genre/movie/list", &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::new("key", &TmdbConfig::default(), &HttpConfig::default()).unwrap()
    }

    #[test]
    fn test_blank_key_rejected() {
        let err = TmdbClient::new("  ", &TmdbConfig::default(), &HttpConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, SourceError::MissingApiKey { service: "TMDB" }));
    }

    #[test]
    fn test_image_url_default_size() {
        assert_eq!(
            client().image_url("/poster.jpg", None),
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
    }

    #[test]
    fn test_image_url_custom_size() {
        assert_eq!(
            client().image_url("/backdrop.jpg", Some("original")),
            "https://image.tmdb.org/t/p/original/backdrop.jpg"
        );
    }

    #[test]
    fn test_catalog_name() {
        assert_eq!(client().catalog_name(), "TMDB");
    }
}
