use std::error::Error;

use assay_common::asset::AssetType;
use assay_core::error::DetectError;
use colored::*;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn asset_type_color(asset_type: AssetType) -> Color {
    match asset_type {
        AssetType::AWSAccount => colors::ASSET_CLOUD,
        AssetType::DockerImage | AssetType::GitRepository => colors::ASSET_CODE,
        AssetType::IP | AssetType::IPRange => colors::ASSET_NETWORK,
        AssetType::DomainName | AssetType::Hostname | AssetType::WebAddress => colors::ASSET_NAME,
    }
}

pub fn asset_types_to_string(asset_types: &[AssetType]) -> String {
    asset_types
        .iter()
        .map(|asset_type| asset_type.as_str())
        .collect::<Vec<&str>>()
        .join(",")
}

/// One `Type` row per detected type, or a single row saying none matched.
pub fn asset_types_to_detail(asset_types: &[AssetType]) -> Vec<Detail> {
    if asset_types.is_empty() {
        return vec![("Type".to_string(), "none".color(colors::VERDICT_NO))];
    }

    asset_types
        .iter()
        .map(|asset_type| {
            let value: ColoredString = asset_type.as_str().color(asset_type_color(*asset_type)).bold();
            ("Type".to_string(), value)
        })
        .collect()
}

/// The error and all its causes on one line.
pub fn error_chain(err: &dyn Error) -> String {
    let mut chain: Vec<String> = vec![err.to_string()];
    let mut source: Option<&dyn Error> = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain.join(": ")
}

pub fn error_to_detail(err: &DetectError) -> Detail {
    ("Error".to_string(), error_chain(err).color(colors::FAILURE))
}

pub fn verdict(value: bool) -> ColoredString {
    if value {
        "yes".color(colors::VERDICT_YES).bold()
    } else {
        "no".color(colors::VERDICT_NO)
    }
}

pub fn skipped() -> ColoredString {
    "skipped (--no-dns)".color(colors::SKIPPED)
}
