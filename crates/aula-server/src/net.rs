//! Client network metadata extraction from proxy headers.

use axum::http::HeaderMap;

/// Fallback IP when no proxy header resolves.
pub const UNKNOWN_IP: &str = "unknown";

/// Resolve the client IP from proxy headers, best-effort.
///
/// Checks, in order: `x-forwarded-for` (first comma-separated element,
/// trimmed), `x-real-ip`, `cf-connecting-ip`. Falls back to
/// [`UNKNOWN_IP`] when none resolves.
#[must_use]
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for") {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        return real_ip.to_string();
    }
    if let Some(cf_ip) = header_str(headers, "cf-connecting-ip") {
        return cf_ip.to_string();
    }
    UNKNOWN_IP.to_string()
}

/// The client user agent, empty when absent or non-ASCII.
#[must_use]
pub fn user_agent(headers: &HeaderMap) -> String {
    header_str(headers, "user-agent").unwrap_or_default().to_string()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            let _ = map.insert(
                axum::http::HeaderName::try_from(*name).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn forwarded_for_takes_first_element() {
        let map = headers(&[("x-forwarded-for", "203.0.113.5, 10.0.0.1, 172.16.0.2")]);
        assert_eq!(client_ip(&map), "203.0.113.5");
    }

    #[test]
    fn forwarded_for_trims_whitespace() {
        let map = headers(&[("x-forwarded-for", "  203.0.113.5  ,10.0.0.1")]);
        assert_eq!(client_ip(&map), "203.0.113.5");
    }

    #[test]
    fn forwarded_for_wins_over_real_ip() {
        let map = headers(&[
            ("x-forwarded-for", "203.0.113.5"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(client_ip(&map), "203.0.113.5");
    }

    #[test]
    fn real_ip_used_when_no_forwarded_for() {
        let map = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_ip(&map), "198.51.100.2");
    }

    #[test]
    fn cdn_header_is_last_resort() {
        let map = headers(&[("cf-connecting-ip", "192.0.2.33")]);
        assert_eq!(client_ip(&map), "192.0.2.33");
    }

    #[test]
    fn unknown_when_nothing_present() {
        assert_eq!(client_ip(&HeaderMap::new()), "unknown");
    }

    #[test]
    fn empty_forwarded_for_falls_through() {
        let map = headers(&[("x-forwarded-for", "   "), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(client_ip(&map), "198.51.100.2");
    }

    #[test]
    fn user_agent_extracted() {
        let map = headers(&[("user-agent", "Mozilla/5.0 (X11; Linux)")]);
        assert_eq!(user_agent(&map), "Mozilla/5.0 (X11; Linux)");
    }

    #[test]
    fn user_agent_defaults_to_empty() {
        assert_eq!(user_agent(&HeaderMap::new()), "");
    }
}
