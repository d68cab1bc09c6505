use crate::error::SourceError;
use crate::http::JsonHttp;
use crate::retry::RetryPolicy;
use crate::traits::TrailerSource;
use async_trait::async_trait;
use movieflix_config::{HttpConfig, YouTubeConfig};
use movieflix_models::TrailerSearch;
use tracing::debug;

const SERVICE: &str = "YouTube";

/// YouTube video ids are always this long
const VIDEO_ID_LEN: usize = 11;

/// URL fragments that come right before a video id
const ID_MARKERS: [&str; 5] = ["youtu.be/", "v/", "embed/", "watch?v=", "&v="];

pub struct YouTubeClient {
    http: JsonHttp,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(
        api_key: impl Into<String>,
        config: &YouTubeConfig,
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
        })
    }
}

#[async_trait]
impl TrailerSource for YouTubeClient {
    /// Top video hit for "<title> official trailer"
    async fn search_trailer(&self, title: &str) -> Result<TrailerSearch, SourceError> {
        debug!(title = %title, "Searching YouTube for trailer");
        let params = [
            ("key", self.api_key.clone()),
            ("part", "snippet".to_string()),
            ("q", format!("{} official trailer", title)),
            ("type", "video".to_string()),
            ("maxResults", "1".to_string()),
        ];

        let value = self.http.get(&self.base_url, "/search", &params).await?;
        serde_json::from_value(value).map_err(|source| SourceError::Decode {
            service: SERVICE,
            path: "/search".to_string(),
            source,
        })
    }
}

/// Extract the video id from a watch, embed, short (`youtu.be`) or `/v/` URL.
///
/// The id is whatever follows the last recognised marker up to the next
/// `#`, `&` or `?`; anything not exactly 11 characters long is rejected.
pub fn video_id_from_url(url: &str) -> Option<String> {
    let (start, marker) = ID_MARKERS
        .iter()
        .filter_map(|marker| url.rfind(marker).map(|i| (i, *marker)))
        .max_by_key(|(i, _)| *i)?;

    let rest = &url[start + marker.len()..];
    let id: String = rest
        .chars()
        .take_while(|c| !matches!(c, '#' | '&' | '?'))
        .collect();

    (id.chars().count() == VIDEO_ID_LEN).then_some(id)
}

/// Autoplaying embed URL without related-video suggestions
pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}?autoplay=1&rel=0", video_id)
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_id_from_watch_url() {
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            video_id_from_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_video_id_from_other_forms() {
        for url in [
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
        ] {
            assert_eq!(video_id_from_url(url).as_deref(), Some("dQw4w9WgXcQ"), "{}", url);
        }
    }

    #[test]
    fn test_video_id_wrong_length() {
        assert_eq!(video_id_from_url("https://youtu.be/short"), None);
        assert_eq!(video_id_from_url("https://youtu.be/dQw4w9WgXcQXX"), None);
        assert_eq!(video_id_from_url("https://example.com/movie"), None);
    }

    #[test]
    fn test_embed_and_watch_urls() {
        assert_eq!(
            embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1&rel=0"
        );
        assert_eq!(watch_url("abc"), "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_blank_key_rejected() {
        let result = YouTubeClient::new("", &YouTubeConfig::default(), &HttpConfig::default());
        assert!(matches!(
            result,
            Err(SourceError::MissingApiKey { service: "YouTube" })
        ));
    }
}
