//! Shared request/response plumbing for both clients.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::{ClientError, Result};

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    base: Url,
    label: &'static str,
}

impl HttpClient {
    pub(crate) fn new(label: &'static str, base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let base = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url,
            base,
            label,
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.url(path)?;
        debug!("[{}] GET {}", self.label, url);

        let response = self
            .client
            .get(url)
            .headers(Self::headers())
            .query(query)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T> {
        let response = self.send_post(path, query, body).await?;
        Self::parse_response(response).await
    }

    /// POST where only the status matters.
    pub(crate) async fn post_unit<B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        body: Option<&B>,
    ) -> Result<()> {
        let response = self.send_post(path, &[], body).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(Self::api_error(status, &body))
    }

    async fn send_post<B: Serialize + ?Sized>(
        &self,
        path: &[&str],
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let url = self.url(path)?;
        debug!("[{}] POST {}", self.label, url);

        let mut request = self
            .client
            .post(url)
            .headers(Self::headers())
            .query(query);
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            ClientError::Decode(format!(
                "{} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
    }

    fn api_error(status: reqwest::StatusCode, body: &str) -> ClientError {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|err| err.error.or(err.detail).or(err.message))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.chars().take(200).collect()
                }
            });

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_normalization() {
        let client =
            HttpClient::new("Test", "http://localhost:8000/api/v1/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api/v1");
    }

    #[test]
    fn test_rejects_relative_base_url() {
        let err = HttpClient::new("Test", "api/v1", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let client =
            HttpClient::new("Test", "http://localhost:8000/api/v1", Duration::from_secs(1))
                .unwrap();
        let url = client.url(&["meme-tokens", "a/b c", "price-history"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/v1/meme-tokens/a%2Fb%20c/price-history"
        );

        let root = HttpClient::new("Test", "http://localhost:3001/", Duration::from_secs(1))
            .unwrap();
        assert_eq!(
            root.url(&["memecoins"]).unwrap().as_str(),
            "http://localhost:3001/memecoins"
        );
    }

    #[test]
    fn test_api_error_prefers_structured_message() {
        let status = reqwest::StatusCode::NOT_FOUND;

        let err = HttpClient::api_error(status, r#"{"detail":"Trade not found"}"#);
        assert_eq!(err.to_string(), "API error 404: Trade not found");

        let err = HttpClient::api_error(status, r#"{"error":"Failed to search coins"}"#);
        assert_eq!(err.to_string(), "API error 404: Failed to search coins");

        let err = HttpClient::api_error(status, "");
        assert_eq!(err.to_string(), "API error 404: 404 Not Found");
    }
}
