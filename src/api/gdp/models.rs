use serde::{Deserialize, Serialize};

/// Body of the GDP dataset endpoint. Fields other than `data` are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdpResponse {
    /// `[date, billions of dollars]` pairs in chronological order
    pub data: Vec<(String, f64)>,
}

/// Error type for dataset requests
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Non-success HTTP status with the response body
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Body was not the expected JSON
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}
