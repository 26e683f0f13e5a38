//! Host extraction and subdomain depth.

use std::net::IpAddr;

/// Extracts the lowercase host of `url`.
///
/// Uses `url::Url` when the string parses with a host; otherwise falls back to
/// the text between `://` (if any) and the first `/`, `?` or `#`, with userinfo
/// and port stripped. Returns None when nothing usable remains.
pub fn extract_host(url: &str) -> Option<String> {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(host) = parsed.host_str() {
            if !host.is_empty() {
                return Some(host.trim_matches(|c| c == '[' || c == ']').to_ascii_lowercase());
            }
        }
    }

    let rest = match url.find("://") {
        Some(i) => &url[i + 3..],
        None => url,
    };
    let authority = rest
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    let host = host_port.split(':').next().unwrap_or("").trim();
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

/// Number of dot-separated labels beyond `domain.tld`. IP literals have depth 0.
pub fn subdomain_depth(host: &str) -> usize {
    if host.parse::<IpAddr>().is_ok() {
        return 0;
    }
    let labels = host.split('.').filter(|l| !l.is_empty()).count();
    labels.saturating_sub(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_from_absolute_url() {
        assert_eq!(
            extract_host("https://Login.Example.com:8443/a?b#c").as_deref(),
            Some("login.example.com")
        );
        assert_eq!(
            extract_host("http://user:pw@bank.example.org/x").as_deref(),
            Some("bank.example.org")
        );
    }

    #[test]
    fn host_without_scheme_falls_back() {
        assert_eq!(extract_host("bit.ly/fake-link").as_deref(), Some("bit.ly"));
        assert_eq!(
            extract_host("example.com:8080/path").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn host_missing() {
        assert_eq!(extract_host(""), None);
        assert_eq!(extract_host("file:///etc/passwd"), None);
    }

    #[test]
    fn depth_counts_labels_beyond_domain_tld() {
        assert_eq!(subdomain_depth("example.com"), 0);
        assert_eq!(subdomain_depth("www.example.com"), 1);
        assert_eq!(subdomain_depth("a.b.c.example.com"), 3);
        assert_eq!(subdomain_depth("localhost"), 0);
    }

    #[test]
    fn depth_ignores_ip_literals() {
        assert_eq!(subdomain_depth("192.168.10.20"), 0);
        assert_eq!(subdomain_depth("::1"), 0);
    }
}
