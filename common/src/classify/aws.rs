//! AWS resource names.

use std::str::FromStr;

use thiserror::Error;

const ARN_PREFIX: &str = "arn:";
const ARN_SECTIONS: usize = 6;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArnError {
    #[error("arn: invalid prefix")]
    InvalidPrefix,
    #[error("arn: not enough sections")]
    InvalidSections,
}

/// An Amazon Resource Name: `arn:partition:service:region:account-id:resource`.
///
/// Only the section layout is checked. The resource keeps any further `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl FromStr for Arn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.starts_with(ARN_PREFIX) {
            return Err(ArnError::InvalidPrefix);
        }

        let sections: Vec<&str> = s.splitn(ARN_SECTIONS, ':').collect();
        let [_, partition, service, region, account_id, resource] = sections[..] else {
            return Err(ArnError::InvalidSections);
        };

        Ok(Arn {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            resource: resource.to_string(),
        })
    }
}

impl Arn {
    /// An account ARN has the format "arn:aws:iam::123456789012:root".
    pub fn is_account_root(&self) -> bool {
        self.service == "iam" && self.resource == "root"
    }
}

/// True if the target is an AWS ARN.
pub fn is_aws_arn(target: &str) -> bool {
    target.parse::<Arn>().is_ok()
}

/// True if the target is the ARN of an AWS account root.
pub fn is_aws_account(target: &str) -> bool {
    target.parse::<Arn>().is_ok_and(|arn| arn.is_account_root())
}
