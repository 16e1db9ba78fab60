//! Network classifiers and the detection engine.
//!
//! The free functions below use the operating system resolver and the
//! process-wide `/etc/resolv.conf` snapshot. Build a [`detector::Detector`]
//! to inject other lookups, transports or configuration.

use assay_common::asset::AssetType;

pub mod detector;
pub mod error;
pub mod network;
pub mod resolver;

use error::{DetectError, DnsError};
use network::lookup::SystemLookup;
use resolver::soa::SoaProbe;

/// True if `target` is not an IP and resolves to at least one address.
pub fn is_hostname(target: &str) -> bool {
    network::lookup::is_hostname(&SystemLookup, target)
}

/// True if `target` is the apex of a DNS zone.
pub fn is_domain_name(target: &str) -> Result<bool, DnsError> {
    SoaProbe::system().is_domain_name(target)
}

pub fn detect_asset_types(identifier: &str) -> Result<Vec<AssetType>, DetectError> {
    detector::Detector::system().detect(identifier)
}
