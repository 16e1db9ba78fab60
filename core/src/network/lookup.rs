use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::sync::Arc;

use assay_common::classify::is_ip;
use tracing::debug;

/// Forward (A/AAAA) resolution of a hostname.
pub trait HostLookup: Send + Sync {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>>;
}

impl<T: HostLookup + ?Sized> HostLookup for Arc<T> {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        (**self).lookup(host)
    }
}

/// Resolves through the operating system resolver (`/etc/hosts`, DNS, ...).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl HostLookup for SystemLookup {
    fn lookup(&self, host: &str) -> io::Result<Vec<IpAddr>> {
        let addrs = (host, 0u16).to_socket_addrs()?;
        Ok(addrs.map(|addr| addr.ip()).collect())
    }
}

/// True if the target is not an IP but resolves to at least one IP.
///
/// Every resolution failure counts as "not a hostname".
pub fn is_hostname(lookup: &dyn HostLookup, target: &str) -> bool {
    // If the target is an IP it can not be a hostname.
    if is_ip(target) || is_numeric_ipv4_form(target) {
        return false;
    }

    match lookup.lookup(target) {
        Ok(addrs) => !addrs.is_empty(),
        Err(e) => {
            debug!(target, error = %e, "hostname did not resolve");
            false
        }
    }
}

/// Shorthand IPv4 forms the C resolver turns into addresses without a
/// query: `31337`, `192.168.1`, `0x7f.1`, `0177.0.0.1`.
fn is_numeric_ipv4_form(target: &str) -> bool {
    let parts: Vec<&str> = target.split('.').collect();
    parts.len() <= 4 && parts.iter().all(|part| is_c_integer(part))
}

/// Decimal, `0x` hexadecimal or `0` prefixed octal.
fn is_c_integer(part: &str) -> bool {
    if let Some(hex) = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X")) {
        return hex.bytes().all(|b| b.is_ascii_hexdigit());
    }
    if let Some(octal) = part.strip_prefix('0') {
        return octal.bytes().all(|b| (b'0'..=b'7').contains(&b));
    }
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
