use std::time::Duration;

use futures_util::StreamExt;
use reader_core::{FailureKind, FetchError, HeadlinesResponse, WireArticle};
use reader_logging::{reader_debug, reader_warn};
use reqwest::header::CONTENT_TYPE;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/";
const HEADLINES_PATH: &str = "top-headlines";

#[derive(Debug, Clone)]
pub struct NewsApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for NewsApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Where headlines come from.
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_headlines(&self, source_id: &str) -> Result<Vec<WireArticle>, FetchError>;
}

/// `top-headlines` endpoint of a NewsAPI-compatible service.
#[derive(Debug, Clone)]
pub struct NewsApiSource {
    settings: NewsApiSettings,
    client: reqwest::Client,
}

impl NewsApiSource {
    pub fn new(settings: NewsApiSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, source_id: &str) -> Result<Url, FetchError> {
        let mut base = self.settings.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let mut url = Url::parse(&base)
            .and_then(|base| base.join(HEADLINES_PATH))
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("sources", source_id)
            .append_pair("apiKey", &self.settings.api_key);
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ContentSource for NewsApiSource {
    async fn fetch_headlines(&self, source_id: &str) -> Result<Vec<WireArticle>, FetchError> {
        let url = self.endpoint(source_id)?;
        reader_debug!(
            "GET {}{} sources={}",
            url.host_str().unwrap_or_default(),
            url.path(),
            source_id
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // Error bodies carry a human-readable message; fall back to the status line.
            let message = self
                .read_body(response)
                .await
                .ok()
                .and_then(|body| serde_json::from_slice::<HeadlinesResponse>(&body).ok())
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| status.to_string());
            reader_warn!("Headlines request failed with {}: {}", status, message);
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        if let Some(ct) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            if !is_json(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    format!("unsupported content type {ct}"),
                ));
            }
        }

        let body = self.read_body(response).await?;
        let envelope: HeadlinesResponse = serde_json::from_slice(&body)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;

        if !envelope.is_ok() {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("unexpected status {}", envelope.status));
            return Err(FetchError::new(
                FailureKind::Api {
                    code: envelope.code,
                },
                message,
            ));
        }

        Ok(envelope.articles)
    }
}

fn is_json(content_type: &str) -> bool {
    let ct = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    ct.eq_ignore_ascii_case("application/json") || ct.to_ascii_lowercase().ends_with("+json")
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
