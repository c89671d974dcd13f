use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use tracing::{debug, instrument, warn};

use crate::error::{Result, SiteCheckError};

/// Default timeout for the whole lookup (5 seconds).
/// DNS is typically fast; longer timeouts indicate network issues or unreachable servers.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves a hostname to a single IP address.
///
/// Uses the system resolver configuration by default (falling back to
/// Google DNS when it cannot be read), or a single custom nameserver.
#[derive(Debug, Clone)]
pub struct HostResolver {
    timeout: Duration,
    nameserver: Option<String>,
}

impl Default for HostResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl HostResolver {
    /// Creates a new resolver with default settings.
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            nameserver: None,
        }
    }

    /// Sets the timeout for the lookup.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Queries only the given nameserver instead of the system configuration.
    ///
    /// Accepts an IP address (port 53) or an `ip:port` socket address.
    pub fn with_nameserver(mut self, nameserver: impl Into<String>) -> Self {
        self.nameserver = Some(nameserver.into());
        self
    }

    fn nameserver_addr(&self) -> Result<Option<SocketAddr>> {
        self.nameserver
            .as_deref()
            .map(|ns| {
                let ns = ns.trim_start_matches('@');
                ns.parse::<SocketAddr>()
                    .or_else(|_| ns.parse::<IpAddr>().map(|ip| SocketAddr::new(ip, 53)))
                    .map_err(|_| SiteCheckError::Config(format!("invalid nameserver: {}", ns)))
            })
            .transpose()
    }

    fn create_resolver(&self, nameserver: Option<SocketAddr>) -> TokioAsyncResolver {
        let (config, mut opts) = match nameserver {
            Some(addr) => {
                let mut config = ResolverConfig::new();
                config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
                let mut opts = ResolverOpts::default();
                opts.use_hosts_file = false;
                (config, opts)
            }
            None => match read_system_conf() {
                Ok(system) => system,
                Err(e) => {
                    warn!(error = %e, "Could not read system resolver config, using Google DNS");
                    (ResolverConfig::google(), ResolverOpts::default())
                }
            },
        };
        opts.timeout = self.timeout;
        opts.attempts = 2;

        TokioAsyncResolver::tokio(config, opts)
    }

    /// Resolves `hostname` to one address, preferring IPv4.
    ///
    /// IP literals are returned as-is without a query.
    #[instrument(skip(self), fields(hostname = %hostname))]
    pub async fn resolve(&self, hostname: &str) -> Result<IpAddr> {
        let nameserver = self.nameserver_addr()?;

        if let Ok(ip) = hostname.parse::<IpAddr>() {
            debug!("Hostname is an IP literal");
            return Ok(ip);
        }

        let resolver = self.create_resolver(nameserver);
        debug!(
            nameserver = self.nameserver.as_deref().unwrap_or("system"),
            "Resolving host"
        );

        let lookup = tokio::time::timeout(self.timeout, resolver.lookup_ip(hostname))
            .await
            .map_err(|_| {
                SiteCheckError::Timeout(format!("DNS lookup for {} timed out", hostname))
            })?
            .map_err(|e| {
                let timed_out = match e.kind() {
                    ResolveErrorKind::Timeout => true,
                    ResolveErrorKind::Proto(proto) => {
                        matches!(proto.kind(), ProtoErrorKind::Timeout)
                    }
                    _ => false,
                };
                if timed_out {
                    SiteCheckError::Timeout(format!("DNS lookup for {} timed out", hostname))
                } else {
                    SiteCheckError::DnsError(format!("{}: {}", hostname, e))
                }
            })?;

        let address = lookup
            .iter()
            .find(IpAddr::is_ipv4)
            .or_else(|| lookup.iter().next())
            .ok_or_else(|| {
                SiteCheckError::DnsError(format!("no addresses found for {}", hostname))
            })?;

        debug!(address = %address, "Resolved host");
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_resolve_ip_literal() {
        let resolver = HostResolver::new();
        assert_eq!(
            resolver.resolve("127.0.0.1").await.unwrap(),
            "127.0.0.1".parse::<IpAddr>().unwrap()
        );
        assert_eq!(
            resolver.resolve("::1").await.unwrap(),
            "::1".parse::<IpAddr>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_invalid_nameserver() {
        let resolver = HostResolver::new().with_nameserver("dns.example");
        let err = resolver.resolve("127.0.0.1").await.unwrap_err();
        assert!(matches!(err, SiteCheckError::Config(_)));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_nameserver_addr() {
        let resolver = HostResolver::new().with_nameserver("@8.8.8.8");
        assert_eq!(
            resolver.nameserver_addr().unwrap(),
            Some("8.8.8.8:53".parse().unwrap())
        );
        assert_eq!(HostResolver::new().nameserver_addr().unwrap(), None);

        let resolver = HostResolver::new().with_nameserver("127.0.0.1:5353");
        assert_eq!(
            resolver.nameserver_addr().unwrap(),
            Some("127.0.0.1:5353".parse().unwrap())
        );
        let resolver = HostResolver::new().with_nameserver("[::1]:5353");
        assert_eq!(
            resolver.nameserver_addr().unwrap(),
            Some("[::1]:5353".parse().unwrap())
        );
    }

    #[tokio::test]
    async fn test_resolve_times_out_on_silent_nameserver() {
        // Bound but never read, so queries go unanswered
        let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let nameserver = socket.local_addr().unwrap().to_string();

        let resolver = HostResolver::new()
            .with_nameserver(nameserver)
            .with_timeout(Duration::from_millis(300));
        let started = std::time::Instant::now();
        let err = resolver.resolve("example.com").await.unwrap_err();

        assert!(matches!(err, SiteCheckError::Timeout(_)), "got {:?}", err);
        assert_eq!(err.kind(), ErrorKind::Connectivity);
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(socket);
    }

    #[tokio::test]
    async fn test_resolve_unresolvable_host() {
        let resolver = HostResolver::new().with_timeout(Duration::from_secs(2));
        let err = resolver
            .resolve("no-such-host.invalid")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connectivity);
    }
}
