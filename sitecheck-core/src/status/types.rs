use serde::{Deserialize, Serialize};

/// Successful response from the availability check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
    /// The URL that was requested
    pub url: String,
    /// The URL the response came from, after redirects
    pub final_url: String,
    /// HTTP status code (always 2xx)
    pub status: u16,
    /// Value of the Content-Type header, if sent
    pub content_type: Option<String>,
    /// Response body decoded as text
    #[serde(skip_serializing, default)]
    pub body: String,
}
