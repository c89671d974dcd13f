use std::time::Duration;

use crate::dns::HostResolver;
use crate::phone::DEFAULT_COUNTRY_CODE;
use crate::status::AvailabilityClient;

/// Settings for one site check.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Timeout for the HTTP request, body included.
    pub http_timeout: Duration,
    /// Timeout for the DNS lookup.
    pub dns_timeout: Duration,
    /// Nameserver IP to query; the system configuration when `None`.
    pub nameserver: Option<String>,
    pub user_agent: String,
    /// Redirects to follow before giving up (0 disables following).
    pub max_redirects: usize,
    /// Honor HTTP(S)_PROXY and friends.
    pub use_system_proxy: bool,
    /// Country code used when a number on the page has none.
    pub default_country_code: String,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            http_timeout: Duration::from_secs(10),
            dns_timeout: Duration::from_secs(5),
            nameserver: None,
            user_agent: concat!("sitecheck/", env!("CARGO_PKG_VERSION")).to_string(),
            max_redirects: 5,
            use_system_proxy: true,
            default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }
}

impl CheckerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    pub fn with_nameserver(mut self, nameserver: impl Into<String>) -> Self {
        self.nameserver = Some(nameserver.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn without_proxy(mut self) -> Self {
        self.use_system_proxy = false;
        self
    }

    pub fn with_default_country_code(mut self, code: impl Into<String>) -> Self {
        self.default_country_code = code.into();
        self
    }

    pub(crate) fn availability_client(&self) -> AvailabilityClient {
        let client = AvailabilityClient::new()
            .with_timeout(self.http_timeout)
            .with_user_agent(self.user_agent.as_str())
            .with_max_redirects(self.max_redirects);
        if self.use_system_proxy {
            client
        } else {
            client.without_proxy()
        }
    }

    pub(crate) fn host_resolver(&self) -> HostResolver {
        let resolver = HostResolver::new().with_timeout(self.dns_timeout);
        match &self.nameserver {
            Some(ns) => resolver.with_nameserver(ns.as_str()),
            None => resolver,
        }
    }
}
