use super::ip::is_ip;

/// True if the target could be a hostname, without asking DNS.
///
/// IPs are never hostnames, and names without a dot are rejected so bare
/// top-level labels are not onboarded.
pub fn is_hostname_no_dns_resolution(target: &str) -> bool {
    if is_ip(target) {
        return false;
    }

    target.contains('.')
}
