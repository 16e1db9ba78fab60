use std::path::PathBuf;

/// Conventional location of the system DNS client configuration.
pub const DEFAULT_RESOLV_CONF: &str = "/etc/resolv.conf";

#[derive(Debug, Clone)]
pub struct Config {
    /// Disables every DNS query during detection.
    ///
    /// Hostnames are then recognised by shape only and domain authority is
    /// never checked.
    pub no_dns: bool,
    /// 0 prints everything, 1 drops headers, 2 prints only the detected types.
    pub quiet: u8,
    /// Resolver configuration read for SOA lookups.
    pub resolv_conf: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_dns: false,
            quiet: 0,
            resolv_conf: PathBuf::from(DEFAULT_RESOLV_CONF),
        }
    }
}
