//! Absolute `http`/`https` web addresses.

use url::Url;

const WEB_SCHEMES: [&str; 2] = ["http://", "https://"];

/// True if the target is an absolute URL with an `http` or `https` scheme
/// and a non-empty host.
pub fn is_web_address(target: &str) -> bool {
    web_address_host(target).is_some()
}

/// Kept for compatibility with older callers; same as [`is_web_address`].
pub fn is_url(target: &str) -> bool {
    is_web_address(target)
}

/// Returns the host of a web address as written, without userinfo, port
/// and the brackets around IPv6 literals.
///
/// The URL parser only validates: its normalized host (lowercased, IDNA
/// encoded, numeric IPv4 forms rewritten) is never returned.
///
/// `None` if the target is not a web address.
pub fn web_address_host(target: &str) -> Option<String> {
    // The URL parser silently trims and strips these, the raw identifier must not have them.
    if target.trim() != target || target.chars().any(|c| c.is_ascii_control()) {
        return None;
    }

    let authority = WEB_SCHEMES.iter().find_map(|scheme| strip_prefix_ignore_case(target, scheme))?;
    if authority.starts_with(['/', '\\']) {
        return None;
    }

    let url = Url::parse(target).ok()?;
    url.host()?;

    let host = raw_host(authority);
    if host.is_empty() { None } else { Some(host.to_string()) }
}

/// Host part of everything after `scheme://`.
fn raw_host(after_scheme: &str) -> &str {
    let end = after_scheme.find(['/', '\\', '?', '#']).unwrap_or(after_scheme.len());
    let authority = &after_scheme[..end];
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host_port)| host_port);

    if let Some(bracketed) = host_port.strip_prefix('[') {
        return bracketed.split_once(']').map_or(bracketed, |(host, _)| host);
    }
    host_port.split_once(':').map_or(host_port, |(host, _)| host)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}
