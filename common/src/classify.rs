//! # Syntactic Classifiers
//!
//! Predicates deciding membership of an identifier in a category from its
//! shape alone.
//!
//! Every predicate is total: malformed input, the empty string and arbitrary
//! unicode all yield `false`. None of them perform I/O.

pub mod aws;
pub mod docker;
pub mod gcp;
pub mod git;
pub mod hostname;
pub mod ip;
pub mod web;

pub use aws::{Arn, ArnError, is_aws_account, is_aws_arn};
pub use docker::{ImageReference, ReferenceError, is_docker_image};
pub use gcp::is_gcp_project_id;
pub use git::is_git_repository;
pub use hostname::is_hostname_no_dns_resolution;
pub use ip::{is_cidr, is_host, is_host_route, is_ip, parse_cidr};
pub use web::{is_url, is_web_address, web_address_host};
