//! # Resolver Configuration
//!
//! Reads the system DNS client configuration in `resolv.conf(5)` format.
//!
//! Only the directives the SOA probe and the `resolvers` command care about
//! are kept: `nameserver`, `domain`, `search` and the `ndots`, `timeout` and
//! `attempts` options. Everything else is ignored.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

pub const DNS_PORT: u16 = 53;

const DEFAULT_NDOTS: u8 = 1;
const MAX_NDOTS: u8 = 15;
const DEFAULT_TIMEOUT_SECS: u32 = 5;
const DEFAULT_ATTEMPTS: u32 = 2;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cannot read resolver configuration {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
}

/// Snapshot of the DNS client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub servers: Vec<IpAddr>,
    pub port: u16,
    pub search: Vec<String>,
    pub ndots: u8,
    pub timeout_secs: u32,
    pub attempts: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            servers: Vec::new(),
            port: DNS_PORT,
            search: Vec::new(),
            ndots: DEFAULT_NDOTS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl ResolverConfig {
    /// Uses the given servers on the standard DNS port.
    pub fn with_servers(servers: Vec<IpAddr>) -> Self {
        Self {
            servers,
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path: &Path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let config = Self::parse(&contents);
        debug!(
            path = %path.display(),
            servers = config.servers.len(),
            "loaded resolver configuration"
        );
        Ok(config)
    }

    /// Parses `resolv.conf` contents. Unknown directives and malformed
    /// entries are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut config = Self::default();

        for line in contents.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let Some((directive, args)) = fields.split_first() else {
                continue;
            };

            match *directive {
                "nameserver" => {
                    if let Some(server) = args.first() {
                        parse_nameserver(server, &mut config.servers);
                    }
                }
                "domain" => {
                    config.search = args.first().map(|d| vec![d.to_string()]).unwrap_or_default();
                }
                "search" => {
                    config.search = args.iter().map(|d| d.to_string()).collect();
                }
                "options" => {
                    for option in args {
                        parse_option(option, &mut config);
                    }
                }
                // comments ('#', ';') and unsupported directives
                _ => {}
            }
        }

        config
    }

    /// Server sockets in configuration order.
    pub fn socket_addrs(&self) -> impl Iterator<Item = SocketAddr> + '_ {
        self.servers.iter().map(|ip| SocketAddr::new(*ip, self.port))
    }
}

fn parse_nameserver(server: &str, servers: &mut Vec<IpAddr>) {
    match server.parse::<IpAddr>() {
        Ok(ip_addr) => servers.push(ip_addr),
        Err(_) => warn!("Ignoring nameserver entry '{server}': not an IP address"),
    }
}

fn parse_option(option: &str, config: &mut ResolverConfig) {
    if let Some(value) = option.strip_prefix("ndots:") {
        config.ndots = number_or_zero(value).clamp(0, MAX_NDOTS as i64) as u8;
    } else if let Some(value) = option.strip_prefix("timeout:") {
        config.timeout_secs = number_or_zero(value).clamp(1, u32::MAX as i64) as u32;
    } else if let Some(value) = option.strip_prefix("attempts:") {
        config.attempts = number_or_zero(value).clamp(1, u32::MAX as i64) as u32;
    }
}

/// Malformed numbers read as 0 and are then clamped by the caller.
fn number_or_zero(value: &str) -> i64 {
    value.parse::<i64>().unwrap_or(0)
}
