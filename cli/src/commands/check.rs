use assay_common::classify;
use assay_common::config::Config;
use assay_core::detector;
use assay_core::resolver::soa::SoaProbe;
use colored::*;

use crate::mprint;
use crate::terminal::{colors, format, print};

type Classifier = (&'static str, fn(&str) -> bool);

const SYNTACTIC: &[Classifier] = &[
    ("IP", classify::is_ip),
    ("CIDR", classify::is_cidr),
    ("Host (/32)", classify::is_host),
    ("Host route", classify::is_host_route),
    ("AWS ARN", classify::is_aws_arn),
    ("AWS account", classify::is_aws_account),
    ("Docker image", classify::is_docker_image),
    ("Git repository", classify::is_git_repository),
    ("GCP project ID", classify::is_gcp_project_id),
    ("Web address", classify::is_web_address),
    ("Hostname shape", classify::is_hostname_no_dns_resolution),
];

const HOSTNAME_KEY: &str = "Hostname";
const DOMAIN_KEY: &str = "Domain name";
const EXCLUSIVE_KEY: &str = "Exclusive type";

/// Prints every classifier verdict, then the DNS-backed checks.
pub fn check(identifier: &str, cfg: &Config) -> anyhow::Result<()> {
    let keys = SYNTACTIC
        .iter()
        .map(|(key, _)| *key)
        .chain([HOSTNAME_KEY, DOMAIN_KEY, EXCLUSIVE_KEY]);
    print::set_key_width(keys);

    if cfg.quiet < 2 {
        print::tree_head(0, identifier);
        mprint!();
    }

    for (key, classifier) in SYNTACTIC {
        print::aligned_line(key, format::verdict(classifier(identifier)));
    }

    if let Some(host) = classify::web_address_host(identifier) {
        print::aligned_line("Web host", host.color(colors::SECONDARY));
    }

    let exclusive: ColoredString = match detector::exclusive_type(identifier) {
        Some(asset_type) => asset_type.as_str().color(format::asset_type_color(asset_type)).bold(),
        None => "none".color(colors::VERDICT_NO),
    };
    print::aligned_line(EXCLUSIVE_KEY, exclusive);

    if cfg.no_dns {
        print::aligned_line(HOSTNAME_KEY, format::skipped());
        print::aligned_line(DOMAIN_KEY, format::skipped());
        return Ok(());
    }

    print::aligned_line(HOSTNAME_KEY, format::verdict(assay_core::is_hostname(identifier)));

    let domain: ColoredString = match SoaProbe::from_config(cfg).is_domain_name(identifier) {
        Ok(is_domain) => format::verdict(is_domain),
        Err(e) => format::error_chain(&e).color(colors::FAILURE),
    };
    print::aligned_line(DOMAIN_KEY, domain);

    Ok(())
}
