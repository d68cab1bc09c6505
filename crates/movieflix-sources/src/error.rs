use thiserror::Error;

/// Errors from the catalog and video-search clients.
///
/// Transport failures (nothing came back) are kept apart from HTTP failures
/// (the service answered with an error status) so callers can tell them apart.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{service} API key is not configured")]
    MissingApiKey { service: &'static str },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{service} request to {path} failed: {source}")]
    Transport {
        service: &'static str,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned HTTP {status} for {path}: {message}")]
    Http {
        service: &'static str,
        path: String,
        status: u16,
        message: String,
    },

    #[error("failed to decode {service} response from {path}: {source}")]
    Decode {
        service: &'static str,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SourceError {
    /// Whether a single retry might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::Transport { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_request()
            }
            SourceError::Http { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// HTTP status, when the service answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 429 and 5xx responses are worth one more try
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..600).contains(&status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> SourceError {
        SourceError::Http {
            service: "TMDB",
            path: "/movie/popular".to_string(),
            status,
            message: "nope".to_string(),
        }
    }

    #[test]
    fn test_retry_classification() {
        assert!(http(429).is_transient());
        assert!(http(500).is_transient());
        assert!(http(503).is_transient());
        assert!(!http(401).is_transient());
        assert!(!http(404).is_transient());
        assert!(!SourceError::MissingApiKey { service: "TMDB" }.is_transient());
    }

    #[test]
    fn test_status_only_for_http_errors() {
        assert_eq!(http(404).status(), Some(404));
        assert_eq!(SourceError::MissingApiKey { service: "YouTube" }.status(), None);
    }

    #[test]
    fn test_decode_error_is_not_transient() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = SourceError::Decode {
            service: "YouTube",
            path: "/search".to_string(),
            source,
        };
        assert!(!err.is_transient());
        assert!(err.to_string().contains("/search"));
    }
}
