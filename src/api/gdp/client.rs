use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use super::models::{ApiError, GdpResponse};
use tracing::{debug, warn};

/// HTTP client for the GDP dataset endpoint
pub struct GdpClient {
    http_client: HttpClient,
    source_url: String,
}

impl GdpClient {
    /// Create a client for the given dataset URL
    pub fn new(source_url: &str) -> Self {
        Self {
            http_client: HttpClient::new(),
            source_url: source_url.to_string(),
        }
    }

    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    /// GET the dataset
    ///
    /// One request, no retry. The body is decoded from text so a non-JSON
    /// payload served with any content type is reported as a deserialization error.
    pub async fn fetch_dataset(&self) -> Result<GdpResponse, ApiError> {
        debug!("Fetching dataset from {}", self.source_url);

        let response = self.http_client
            .get(&self.source_url)
            .headers(Self::create_headers())
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            warn!("Dataset request returned {}: {}", status.as_u16(), body_text);
            return Err(ApiError::HttpError(status.as_u16(), body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read body: {}", e)))?;

        serde_json::from_str::<GdpResponse>(&body_text)
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}
