//! URL handling: deriving the bare host used for DNS resolution

use crate::error::{Result, SiteCheckError};

const SCHEMES: [&str; 2] = ["http://", "https://"];

/// Derive the bare hostname from a site URL
///
/// This function:
/// - Removes http:// and https:// prefixes (any case)
/// - Removes the path, query string and fragment
/// - Removes userinfo (`user:pass@`) and the port
/// - Unwraps bracketed IPv6 literals
/// - Converts to lowercase
///
/// Unlike strict domain validation it keeps `www.` and accepts single-label
/// names such as `localhost`, since whatever is left is handed to the
/// resolver as-is.
pub fn hostname_from_url(url: &str) -> Result<String> {
    let trimmed = url.trim();
    let rest = strip_scheme(trimmed).unwrap_or(trimmed);

    // Authority ends at the first path, query or fragment delimiter
    let authority = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(rest);

    let host_port = authority
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(authority);

    let host = if let Some(bracketed) = host_port.strip_prefix('[') {
        bracketed
            .split_once(']')
            .map(|(host, _)| host)
            .ok_or_else(|| SiteCheckError::InvalidUrl(url.to_string()))?
    } else if host_port.matches(':').count() == 1 {
        host_port.split(':').next().unwrap_or(host_port)
    } else {
        // No port, or an unbracketed IPv6 literal
        host_port
    };

    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return Err(SiteCheckError::InvalidUrl(url.to_string()));
    }

    Ok(host.to_lowercase())
}

/// The URL the availability check requests
///
/// Inputs without a scheme are treated as plain HTTP.
pub fn request_url(url: &str) -> String {
    let trimmed = url.trim();
    if strip_scheme(trimmed).is_some() {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn strip_scheme(url: &str) -> Option<&str> {
    SCHEMES.iter().find_map(|scheme| {
        url.get(..scheme.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .map(|_| &url[scheme.len()..])
    })
}
