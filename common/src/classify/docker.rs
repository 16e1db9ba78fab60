//! # Docker Image References
//!
//! Parses image references following the grammar of the distribution
//! project (`[domain/]path[:tag][@digest]`) and accepts only references that
//! are already written in canonical form, i.e. with an explicit registry.
//!
//! * Valid: `registry.hub.docker.com/metasploitframework/metasploit-framework:latest`
//! * Valid: `registry.hub.docker.com/path1/path2/artifact`
//! * Valid: `localhost:5500/library/debian`
//! * Valid: `docker.io/library/busybox`
//! * Not valid: `metasploitframework/metasploit-framework:latest`
//! * Not valid: `debian`

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::ip::is_cidr;

const DEFAULT_DOMAIN: &str = "docker.io";
const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";
const OFFICIAL_REPO_PREFIX: &str = "library/";
const NAME_TOTAL_LENGTH_MAX: usize = 255;

const ALPHA_NUMERIC: &str = r"[a-z0-9]+";
const SEPARATOR: &str = r"(?:[._]|__|[-]*)";
const DOMAIN_COMPONENT: &str = r"(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])";
const IPV6_LITERAL: &str = r"\[(?:[a-fA-F0-9:]+)\]";
const TAG: &str = r"[A-Za-z0-9_][A-Za-z0-9_.-]{0,127}";
const DIGEST: &str = r"[A-Za-z][A-Za-z0-9]*(?:[-_+.][A-Za-z][A-Za-z0-9]*)*:[0-9a-fA-F]{32,}";

fn name_component() -> String {
    format!("{ALPHA_NUMERIC}(?:{SEPARATOR}{ALPHA_NUMERIC})*")
}

fn domain() -> String {
    let domain_name = format!(r"{DOMAIN_COMPONENT}(?:\.{DOMAIN_COMPONENT})*");
    format!(r"(?:{domain_name}|{IPV6_LITERAL})(?::[0-9]+)?")
}

static REFERENCE: Lazy<Regex> = Lazy::new(|| {
    let component = name_component();
    let name = format!("(?:{}/)?{component}(?:/{component})*", domain());
    Regex::new(&format!("^({name})(?::({TAG}))?(?:@({DIGEST}))?$")).unwrap()
});

static ANCHORED_NAME: Lazy<Regex> = Lazy::new(|| {
    let component = name_component();
    Regex::new(&format!("^(?:({})/)?({component}(?:/{component})*)$", domain())).unwrap()
});

static ANCHORED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-f0-9]{64}$").unwrap());

// Unanchored: a component only needs to contain a match.
static PATH_COMPONENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z0-9]+(?:[._-][a-z0-9]+)*").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("repository name must have at least one component")]
    NameEmpty,
    #[error("invalid reference format")]
    InvalidFormat,
    #[error("repository name must be lowercase")]
    NameContainsUppercase,
    #[error("repository name must not be more than {NAME_TOTAL_LENGTH_MAX} characters")]
    NameTooLong,
    #[error("invalid repository name (64-byte hexadecimal strings are reserved)")]
    IdentifierNotAllowed,
    #[error("unsupported or invalid digest")]
    InvalidDigest,
    #[error("repository name must be canonical")]
    NameNotCanonical,
}

/// A fully qualified image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub domain: String,
    pub path: String,
    pub tag: Option<String>,
    pub digest: Option<String>,
}

impl ImageReference {
    /// `domain/path`, without tag or digest.
    pub fn name(&self) -> String {
        format!("{}/{}", self.domain, self.path)
    }

    pub fn path_components(&self) -> impl Iterator<Item = &str> {
        self.path.split('/')
    }
}

impl std::fmt::Display for ImageReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())?;
        if let Some(tag) = &self.tag {
            write!(f, ":{tag}")?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{digest}")?;
        }
        Ok(())
    }
}

impl FromStr for ImageReference {
    type Err = ReferenceError;

    /// Parses a reference and requires it to be canonical: normalising it
    /// (default registry, `library/` prefix) must not change it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reference = parse_normalized(s)?;
        if reference.to_string() != s {
            return Err(ReferenceError::NameNotCanonical);
        }
        Ok(reference)
    }
}

/// Parses a possibly shortened reference, filling in the default registry.
fn parse_normalized(s: &str) -> Result<ImageReference, ReferenceError> {
    if ANCHORED_IDENTIFIER.is_match(s) {
        return Err(ReferenceError::IdentifierNotAllowed);
    }

    let (domain, remainder) = split_docker_domain(s);
    // tags may carry uppercase, the repository name may not
    let remote_name: &str = remainder.split_once(':').map_or(remainder.as_str(), |(name, _)| name);
    if remote_name.to_lowercase() != remote_name {
        return Err(ReferenceError::NameContainsUppercase);
    }

    parse(&format!("{domain}/{remainder}"))
}

/// Splits the registry off a reference, defaulting to Docker Hub when the
/// first component does not look like a host.
fn split_docker_domain(name: &str) -> (String, String) {
    let (mut domain, mut remainder) = match name.split_once('/') {
        Some((first, rest))
            if first.contains(['.', ':'])
                || first == "localhost"
                || first.to_lowercase() != first =>
        {
            (first.to_string(), rest.to_string())
        }
        _ => (DEFAULT_DOMAIN.to_string(), name.to_string()),
    };

    if domain == LEGACY_DEFAULT_DOMAIN {
        domain = DEFAULT_DOMAIN.to_string();
    }
    if domain == DEFAULT_DOMAIN && !remainder.contains('/') {
        remainder = format!("{OFFICIAL_REPO_PREFIX}{remainder}");
    }

    (domain, remainder)
}

fn parse(s: &str) -> Result<ImageReference, ReferenceError> {
    let Some(captures) = REFERENCE.captures(s) else {
        if s.is_empty() {
            return Err(ReferenceError::NameEmpty);
        }
        if REFERENCE.is_match(&s.to_lowercase()) {
            return Err(ReferenceError::NameContainsUppercase);
        }
        return Err(ReferenceError::InvalidFormat);
    };

    let name = captures.get(1).map_or("", |m| m.as_str());
    if name.len() > NAME_TOTAL_LENGTH_MAX {
        return Err(ReferenceError::NameTooLong);
    }

    let (domain, path) = match ANCHORED_NAME.captures(name) {
        Some(name_captures) => (
            name_captures.get(1).map_or("", |m| m.as_str()),
            name_captures.get(2).map_or("", |m| m.as_str()),
        ),
        None => ("", name),
    };

    let digest = captures.get(3).map(|m| m.as_str().to_string());
    if let Some(digest) = &digest {
        validate_digest(digest)?;
    }

    Ok(ImageReference {
        domain: domain.to_string(),
        path: path.to_string(),
        tag: captures.get(2).map(|m| m.as_str().to_string()),
        digest,
    })
}

fn validate_digest(digest: &str) -> Result<(), ReferenceError> {
    let (algorithm, encoded) = digest.split_once(':').ok_or(ReferenceError::InvalidDigest)?;
    let expected_len: usize = match algorithm {
        "sha256" => 64,
        "sha384" => 96,
        "sha512" => 128,
        _ => return Err(ReferenceError::InvalidDigest),
    };

    let is_lower_hex = encoded.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if encoded.len() != expected_len || !is_lower_hex {
        return Err(ReferenceError::InvalidDigest);
    }
    Ok(())
}

/// True if the target is a Docker image with an explicit registry.
///
/// CIDRs are never images. Some improbable CIDRs such as `192.0.2.1/32` are
/// also valid references and are resolved in favour of the CIDR.
pub fn is_docker_image(target: &str) -> bool {
    if is_cidr(target) {
        return false;
    }

    let Ok(reference) = target.parse::<ImageReference>() else {
        return false;
    };

    if reference.domain.is_empty() {
        return false;
    }

    reference
        .path_components()
        .all(|component| PATH_COMPONENT.is_match(component))
}
