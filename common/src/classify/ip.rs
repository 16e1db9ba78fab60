//! IP literals and CIDR blocks.

use std::net::IpAddr;

use pnet::ipnetwork::IpNetwork;

/// True if the target is a bare IPv4 or IPv6 literal.
pub fn is_ip(target: &str) -> bool {
    target.parse::<IpAddr>().is_ok()
}

/// True if the target is written as `address/prefix` for either family.
pub fn is_cidr(target: &str) -> bool {
    parse_cidr(target).is_some()
}

/// True if the target is a CIDR with a `/32` mask.
///
/// The mask is compared without regard to the address family, so `::1/32`
/// counts as a host as well.
pub fn is_host(target: &str) -> bool {
    parse_cidr(target).is_some_and(|network| network.prefix() == 32)
}

/// True for any CIDR denoting a single address: a `/32` ([`is_host`]) or an
/// IPv6 `/128`.
pub fn is_host_route(target: &str) -> bool {
    parse_cidr(target).is_some_and(|network| match network {
        IpNetwork::V4(_) => network.prefix() == 32,
        IpNetwork::V6(_) => matches!(network.prefix(), 32 | 128),
    })
}

/// Parses CIDR notation like "192.168.1.0/24" or "2001:db8::/32".
///
/// The address keeps its host bits: "192.168.1.7/24" is accepted as is.
pub fn parse_cidr(target: &str) -> Option<IpNetwork> {
    let (ip_str, prefix_str) = target.split_once('/')?;

    let ip_addr = ip_str.parse::<IpAddr>().ok()?;

    // u8::from_str would also take a leading '+'
    if prefix_str.is_empty() || !prefix_str.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix = prefix_str.parse::<u8>().ok()?;

    IpNetwork::new(ip_addr, prefix).ok()
}
