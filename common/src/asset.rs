//! # Asset Types
//!
//! The closed set of categories an identifier can be classified into.
//!
//! Persisted records use the empty string for "unspecified". That value is
//! accepted by [`AssetType::is_valid_name`] but is never produced by parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown type: {0}")]
pub struct UnknownAssetType(pub String);

/// Category of an onboarded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetType {
    AWSAccount,
    DockerImage,
    GitRepository,
    IP,
    IPRange,
    DomainName,
    Hostname,
    WebAddress,
}

impl AssetType {
    pub const ALL: [AssetType; 8] = [
        AssetType::AWSAccount,
        AssetType::DockerImage,
        AssetType::GitRepository,
        AssetType::IP,
        AssetType::IPRange,
        AssetType::DomainName,
        AssetType::Hostname,
        AssetType::WebAddress,
    ];

    /// External spelling of the type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AssetType::AWSAccount => "AWSAccount",
            AssetType::DockerImage => "DockerImage",
            AssetType::GitRepository => "GitRepository",
            AssetType::IP => "IP",
            AssetType::IPRange => "IPRange",
            AssetType::DomainName => "DomainName",
            AssetType::Hostname => "Hostname",
            AssetType::WebAddress => "WebAddress",
        }
    }

    /// Parses the external spelling of an asset type.
    ///
    /// The empty string is rejected like any other unknown value.
    pub fn parse(s: &str) -> Result<Self, UnknownAssetType> {
        AssetType::ALL
            .into_iter()
            .find(|asset_type| asset_type.as_str() == s)
            .ok_or_else(|| UnknownAssetType(s.to_string()))
    }

    /// Reports whether a stored textual value denotes a known asset type.
    ///
    /// The empty value ("unspecified") is valid.
    pub fn is_valid_name(s: &str) -> bool {
        s.is_empty() || AssetType::parse(s).is_ok()
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetType {
    type Err = UnknownAssetType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetType::parse(s)
    }
}
