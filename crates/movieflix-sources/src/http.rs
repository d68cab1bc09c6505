use crate::error::SourceError;
use crate::retry::RetryPolicy;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// GET-and-decode helper shared by the catalog and video-search clients
#[derive(Debug, Clone)]
pub struct JsonHttp {
    client: Client,
    retry: RetryPolicy,
    service: &'static str,
}

impl JsonHttp {
    pub fn new(service: &'static str, retry: RetryPolicy) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(retry.timeout)
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self {
            client,
            retry,
            service,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// GET `base_url + path` with query parameters, retrying transient failures.
    /// `params` may carry credentials, so only `path` is ever logged.
    pub async fn get(
        &self,
        base_url: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, SourceError> {
        let label = format!("{} {}", self.service, path);
        self.retry
            .run(&label, || self.get_once(base_url, path, params))
            .await
    }

    async fn get_once(
        &self,
        base_url: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, SourceError> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), path);
        debug!(service = self.service, path = %path, "GET");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| SourceError::Transport {
                service: self.service,
                path: path.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| SourceError::Transport {
                service: self.service,
                path: path.to_string(),
                source,
            })?;

        if !status.is_success() {
            let message = error_message(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(SourceError::Http {
                service: self.service,
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|source| SourceError::Decode {
            service: self.service,
            path: path.to_string(),
            source,
        })
    }
}

/// Pull the human-readable message out of an error body.
///
/// TMDB sends `{"status_message": ...}`, Google APIs send
/// `{"error": {"message": ...}}`.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("status_message")
        .or_else(|| value.get("error").and_then(|e| e.get("message")))
        .and_then(Value::as_str)
        .map(str::to_string)
}
