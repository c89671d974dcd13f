use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteCheckError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Site is unreachable: {0}")]
    SiteUnreachable(String),

    #[error("Site {url} responded with HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("DNS resolution failed: {0}")]
    DnsError(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Phone number not found on the site")]
    PhoneNotFound,

    #[error("Phone number does not match the expected format: {0}")]
    InvalidPhone(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Broad failure category, so callers can tell causes apart without
/// matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Connectivity,
    Extraction,
    Validation,
    Configuration,
}

impl SiteCheckError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SiteCheckError::InvalidUrl(_)
            | SiteCheckError::SiteUnreachable(_)
            | SiteCheckError::HttpStatus { .. }
            | SiteCheckError::DnsError(_)
            | SiteCheckError::Timeout(_) => ErrorKind::Connectivity,
            SiteCheckError::PhoneNotFound => ErrorKind::Extraction,
            SiteCheckError::InvalidPhone(_) => ErrorKind::Validation,
            SiteCheckError::Config(_) => ErrorKind::Configuration,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ErrorKind::Connectivity => "connectivity",
            ErrorKind::Extraction => "extraction",
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, SiteCheckError>;
