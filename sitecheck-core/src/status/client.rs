use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, instrument};

use super::types::PageResponse;
use crate::error::{Result, SiteCheckError};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_MAX_REDIRECTS: usize = 5;
const DEFAULT_USER_AGENT: &str = concat!("sitecheck/", env!("CARGO_PKG_VERSION"));

static TITLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("Invalid title regex")
});

/// Client for checking that a site answers with a successful status
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    timeout: Duration,
    user_agent: String,
    max_redirects: usize,
    use_system_proxy: bool,
}

impl Default for AvailabilityClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AvailabilityClient {
    /// Create a new AvailabilityClient with default settings
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            use_system_proxy: true,
        }
    }

    /// Set the timeout for the whole request, body included
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set how many redirects to follow (0 disables following)
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Connect directly, ignoring proxies configured in the environment
    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    /// GET `url` and return the page if the status is 2xx
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch(&self, url: &str) -> Result<PageResponse> {
        let redirect = if self.max_redirects == 0 {
            reqwest::redirect::Policy::none()
        } else {
            reqwest::redirect::Policy::limited(self.max_redirects)
        };

        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(redirect)
            .user_agent(self.user_agent.as_str());
        if !self.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| SiteCheckError::Config(format!("HTTP client: {}", e)))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        let status = response.status();
        let final_url = response.url().to_string();
        debug!(status = status.as_u16(), final_url = %final_url, "Received response");

        if !status.is_success() {
            return Err(SiteCheckError::HttpStatus {
                url: final_url,
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(url, e))?;

        debug!(bytes = body.len(), "Read response body");

        Ok(PageResponse {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}

fn classify_request_error(url: &str, error: reqwest::Error) -> SiteCheckError {
    if error.is_timeout() {
        SiteCheckError::Timeout(format!("request to {} timed out", url))
    } else if error.is_builder() {
        SiteCheckError::InvalidUrl(format!("{}: {}", url, error))
    } else {
        SiteCheckError::SiteUnreachable(format!("{}: {}", url, error))
    }
}

/// Extract the title from HTML content
pub fn extract_title(html: &str) -> Option<String> {
    TITLE_PATTERN
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}
