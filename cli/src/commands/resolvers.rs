use anyhow::Context;
use assay_common::config::Config;
use assay_core::resolver::config::ResolverConfig;
use colored::*;

use crate::mprint;
use crate::terminal::{colors, print};

pub fn resolvers(cfg: &Config) -> anyhow::Result<()> {
    let resolver: ResolverConfig = ResolverConfig::from_file(&cfg.resolv_conf)
        .with_context(|| format!("failed to load {}", cfg.resolv_conf.display()))?;

    if cfg.quiet > 1 {
        for server in resolver.socket_addrs() {
            mprint!(&server.to_string());
        }
        return Ok(());
    }

    print::set_key_width(["Path", "Search", "Ndots", "Timeout", "Attempts", "Nameservers"]);
    print::aligned_line("Path", cfg.resolv_conf.display().to_string());
    print::aligned_line("Search", search_list(&resolver));
    print::aligned_line("Ndots", resolver.ndots.to_string());
    print::aligned_line("Timeout", format!("{}s", resolver.timeout_secs));
    print::aligned_line("Attempts", resolver.attempts.to_string());

    if resolver.servers.is_empty() {
        print::aligned_line("Nameservers", "none".color(colors::FAILURE));
        return Ok(());
    }

    print::aligned_line("Nameservers", resolver.servers.len().to_string());
    mprint!();
    for (idx, server) in resolver.socket_addrs().enumerate() {
        print::tree_head(idx, &server.to_string());
    }

    Ok(())
}

fn search_list(resolver: &ResolverConfig) -> ColoredString {
    if resolver.search.is_empty() {
        return "none".color(colors::VERDICT_NO);
    }
    resolver.search.join(" ").color(colors::SECONDARY)
}
