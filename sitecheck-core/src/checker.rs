//! The site check pipeline.
//!
//! A [`SiteChecker`] is bound to one URL and runs four steps in order:
//! availability, host resolution, phone extraction, phone validation.
//! The first failure ends the run.

use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::CheckerConfig;
use crate::error::Result;
use crate::phone;
use crate::status::{extract_title, PageResponse};
use crate::validation::{hostname_from_url, request_url};

/// Outcome of a full, successful run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub url: String,
    pub ip_address: IpAddr,
    pub phone_number: String,
    pub http_status: u16,
    /// Content-Type the site answered with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "IP address: {}, Valid phone number: {}",
            self.ip_address, self.phone_number
        )
    }
}

/// Checks a single site
#[derive(Debug, Clone)]
pub struct SiteChecker {
    url: String,
    ip_address: Option<IpAddr>,
    config: CheckerConfig,
}

impl SiteChecker {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_config(url, CheckerConfig::default())
    }

    pub fn with_config(url: impl Into<String>, config: CheckerConfig) -> Self {
        Self {
            url: url.into(),
            ip_address: None,
            config,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Address found by [`fetch_ip_address`](Self::fetch_ip_address), if it has succeeded.
    pub fn ip_address(&self) -> Option<IpAddr> {
        self.ip_address
    }

    /// GET the site; fails on transport errors and non-2xx statuses.
    pub async fn check_site_availability(&self) -> Result<PageResponse> {
        self.config
            .availability_client()
            .fetch(&request_url(&self.url))
            .await
    }

    /// Resolve the site's host and remember the address.
    pub async fn fetch_ip_address(&mut self) -> Result<IpAddr> {
        let hostname = hostname_from_url(&self.url)?;
        let address = self.config.host_resolver().resolve(&hostname).await?;
        self.ip_address = Some(address);
        Ok(address)
    }

    /// First phone number in `page_text`, in canonical form.
    pub fn find_phone_number(&self, page_text: &str) -> Result<String> {
        phone::find_phone_number(page_text, &self.config.default_country_code)
            .map(|number| number.to_string())
    }

    /// Returns `candidate` unchanged if it is in canonical form.
    pub fn validate_phone_number(&self, candidate: &str) -> Result<String> {
        phone::validate_phone_number(candidate).map(String::from)
    }

    /// Run every step in order, stopping at the first failure.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn run_checks(&mut self) -> Result<CheckReport> {
        let page = self.check_site_availability().await?;
        debug!(status = page.status, "Site is available");

        let ip_address = self.fetch_ip_address().await?;
        debug!(ip = %ip_address, "Host resolved");

        let candidate = self.find_phone_number(&page.body)?;
        debug!(candidate = %candidate, "Phone number found");

        let phone_number = self.validate_phone_number(&candidate)?;

        Ok(CheckReport {
            url: self.url.clone(),
            ip_address,
            phone_number,
            http_status: page.status,
            title: extract_title(&page.body),
            content_type: page.content_type,
            checked_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SiteCheckError};
    use crate::test_support::{refused_url, TestServer};

    const CONTACTS_PAGE: &str = "<html><head><title>Contacts</title></head>\
        <body><p>Phone: +7 (912) 345-67-89</p></body></html>";

    fn local_config() -> CheckerConfig {
        CheckerConfig::new().without_proxy()
    }

    #[test]
    fn test_new_checker_has_no_address() {
        let checker = SiteChecker::new("http://sstmk.ru");
        assert_eq!(checker.url(), "http://sstmk.ru");
        assert_eq!(checker.ip_address(), None);
    }

    #[tokio::test]
    async fn test_check_site_availability() {
        let server = TestServer::respond(200, "OK", "text/html", CONTACTS_PAGE).await;
        let checker = SiteChecker::with_config(server.url("/"), local_config());

        let page = checker.check_site_availability().await.unwrap();
        assert_eq!(page.status, 200);
        assert_eq!(page.body, CONTACTS_PAGE);
    }

    #[tokio::test]
    async fn test_check_site_availability_unreachable() {
        let checker = SiteChecker::with_config(refused_url().await, local_config());

        let err = checker.check_site_availability().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }

    #[tokio::test]
    async fn test_fetch_ip_address_sets_state() {
        let mut checker = SiteChecker::new("http://127.0.0.1:8080/contacts?lang=ru");

        let ip = checker.fetch_ip_address().await.unwrap();
        assert_eq!(ip, "127.0.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(checker.ip_address(), Some(ip));
        assert!(!ip.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_ip_address_failure_leaves_state_unset() {
        let config = CheckerConfig::new().with_dns_timeout(std::time::Duration::from_secs(2));
        let mut checker = SiteChecker::with_config("http://no-such-host.invalid/", config);

        let err = checker.fetch_ip_address().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
        assert_eq!(checker.ip_address(), None);
    }

    #[tokio::test]
    async fn test_fetch_ip_address_without_host() {
        let mut checker = SiteChecker::new("http:///contacts");

        let err = checker.fetch_ip_address().await.unwrap_err();
        assert!(matches!(err, SiteCheckError::InvalidUrl(_)));
        assert_eq!(checker.ip_address(), None);
    }

    #[test]
    fn test_find_and_validate() {
        let checker = SiteChecker::new("http://sstmk.ru");

        let found = checker
            .find_phone_number("... +7 (912) 345-67-89 ...")
            .unwrap();
        assert_eq!(found, "+7(912)345-67-89");
        assert_eq!(checker.validate_phone_number(&found).unwrap(), found);

        let err = checker.find_phone_number("no digits here").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Extraction);

        let err = checker.validate_phone_number("not-a-phone").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_default_country_code_is_configurable() {
        let checker = SiteChecker::with_config(
            "http://sstmk.ru",
            CheckerConfig::new().with_default_country_code("+7"),
        );
        assert_eq!(
            checker.find_phone_number("тел. (3452) 500-00-00").unwrap(),
            "+7(3452)500-00-00"
        );
    }

    #[tokio::test]
    async fn test_run_checks_success() {
        let server = TestServer::respond(200, "OK", "text/html", CONTACTS_PAGE).await;
        let mut checker = SiteChecker::with_config(server.url("/contacts"), local_config());

        let report = checker.run_checks().await.unwrap();

        assert_eq!(report.ip_address, "127.0.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(report.phone_number, "+7(912)345-67-89");
        assert_eq!(report.http_status, 200);
        assert_eq!(report.title.as_deref(), Some("Contacts"));
        assert_eq!(report.content_type.as_deref(), Some("text/html"));
        assert_eq!(
            report.to_string(),
            "IP address: 127.0.0.1, Valid phone number: +7(912)345-67-89"
        );
        assert_eq!(checker.ip_address(), Some(report.ip_address));
    }

    #[tokio::test]
    async fn test_run_checks_without_phone_fails() {
        let server =
            TestServer::respond(200, "OK", "text/html", "<html><body>Welcome</body></html>")
                .await;
        let mut checker = SiteChecker::with_config(server.url("/"), local_config());

        let err = checker.run_checks().await.unwrap_err();
        assert!(matches!(err, SiteCheckError::PhoneNotFound));
    }

    #[tokio::test]
    async fn test_run_checks_stops_at_unavailable_site() {
        let server = TestServer::respond(500, "Internal Server Error", "text/html", "").await;
        let mut checker = SiteChecker::with_config(server.url("/"), local_config());

        let err = checker.run_checks().await.unwrap_err();
        assert!(matches!(err, SiteCheckError::HttpStatus { status: 500, .. }));
        // Resolution never ran
        assert_eq!(checker.ip_address(), None);
    }
}
