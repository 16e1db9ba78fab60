//! # Detection Orchestrator
//!
//! Runs the classifiers against one identifier and collects its asset types.
//!
//! Identifiers matching an *exclusive* category (cloud account, image,
//! repository, IP, CIDR) get exactly that type. Everything else goes down the
//! *composite* path, where hostname, web address and domain name are
//! accumulated.

use std::sync::atomic::{AtomicUsize, Ordering};

use assay_common::asset::AssetType;
use assay_common::classify::{
    is_aws_account, is_cidr, is_docker_image, is_git_repository, is_host_route,
    is_hostname_no_dns_resolution, is_ip, web_address_host,
};
use assay_common::config::Config;
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::DetectError;
use crate::network::lookup::{self, HostLookup, SystemLookup};
use crate::network::transport::NetworkTransport;
use crate::resolver::config::ResolverConfig;
use crate::resolver::soa::SoaProbe;

type Predicate = fn(&str) -> bool;

/// Checked in order; the first match is the only type reported.
const EXCLUSIVE: [(Predicate, AssetType); 6] = [
    (is_aws_account, AssetType::AWSAccount),
    (is_docker_image, AssetType::DockerImage),
    (is_git_repository, AssetType::GitRepository),
    (is_ip, AssetType::IP),
    // single-address networks are reported as plain IPs
    (is_host_route, AssetType::IP),
    (is_cidr, AssetType::IPRange),
];

/// The exclusive type of `identifier`, if any.
pub fn exclusive_type(identifier: &str) -> Option<AssetType> {
    EXCLUSIVE
        .iter()
        .find(|(predicate, _)| predicate(identifier))
        .map(|(_, asset_type)| *asset_type)
}

enum HostnameCheck {
    Resolve(Box<dyn HostLookup>),
    ShapeOnly,
}

pub struct Detector {
    hostname: HostnameCheck,
    authority: Option<SoaProbe>,
}

impl Detector {
    pub fn new(lookup: Box<dyn HostLookup>, authority: SoaProbe) -> Self {
        Self {
            hostname: HostnameCheck::Resolve(lookup),
            authority: Some(authority),
        }
    }

    /// OS resolver for hostnames and the process-wide `/etc/resolv.conf`
    /// snapshot for SOA queries.
    pub fn system() -> Self {
        Self::new(Box::new(SystemLookup), SoaProbe::system())
    }

    /// Never touches the network: hostnames are judged by shape and
    /// domain names are never reported.
    pub fn offline() -> Self {
        Self {
            hostname: HostnameCheck::ShapeOnly,
            authority: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.no_dns {
            return Self::offline();
        }
        Self::new(Box::new(SystemLookup), SoaProbe::from_config(config))
    }

    /// Uses explicit nameservers instead of any configuration file.
    pub fn with_resolver(config: ResolverConfig) -> Self {
        let probe = SoaProbe::new(config, Box::new(NetworkTransport::default()));
        Self::new(Box::new(SystemLookup), probe)
    }

    pub fn is_offline(&self) -> bool {
        self.authority.is_none()
    }

    pub fn resolver_config(&self) -> Option<Result<&ResolverConfig, crate::error::DnsError>> {
        self.authority.as_ref().map(SoaProbe::config)
    }

    /// Asset types of `identifier`, in detection order.
    ///
    /// An identifier matching nothing yields an empty list. A failed SOA
    /// query discards everything found so far.
    pub fn detect(&self, identifier: &str) -> Result<Vec<AssetType>, DetectError> {
        if let Some(asset_type) = exclusive_type(identifier) {
            trace!(identifier, %asset_type, "exclusive match");
            return Ok(vec![asset_type]);
        }

        let original_identifier: &str = identifier;
        let web_host: Option<String> = web_address_host(original_identifier);
        let host_for_lookup: &str = web_host.as_deref().unwrap_or(original_identifier);

        let mut asset_types: Vec<AssetType> = Vec::new();

        if self.is_hostname(host_for_lookup) {
            asset_types.push(AssetType::Hostname);
            // only web addresses with a valid host count
            if web_host.is_some() {
                asset_types.push(AssetType::WebAddress);
            }
        }

        if let Some(probe) = &self.authority {
            if probe.is_domain_name(host_for_lookup)? {
                asset_types.push(AssetType::DomainName);
            }
        }

        debug!(identifier = original_identifier, ?asset_types, "detection finished");
        Ok(asset_types)
    }

    /// Detects every identifier in parallel. Results keep the input order.
    ///
    /// `on_progress` receives the number of identifiers finished so far.
    pub fn detect_all(
        &self,
        identifiers: &[String],
        on_progress: Option<&(dyn Fn(usize) + Sync)>,
    ) -> Vec<Result<Vec<AssetType>, DetectError>> {
        let done = AtomicUsize::new(0);

        identifiers
            .par_iter()
            .map(|identifier| {
                let result = self.detect(identifier);
                let finished: usize = done.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(callback) = on_progress {
                    callback(finished);
                }
                result
            })
            .collect()
    }

    fn is_hostname(&self, target: &str) -> bool {
        match &self.hostname {
            HostnameCheck::Resolve(lookup) => lookup::is_hostname(lookup.as_ref(), target),
            HostnameCheck::ShapeOnly => is_hostname_no_dns_resolution(target),
        }
    }
}
