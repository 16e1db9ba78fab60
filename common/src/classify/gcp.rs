use once_cell::sync::Lazy;
use regex::Regex;

static GCP_PROJECT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][-a-z0-9]{4,28}[a-z0-9]$").unwrap());

/// True if the target is a GCP project id.
///
/// A project id is 6 to 30 lowercase ASCII letters, digits or hyphens. It
/// starts with a letter and cannot end with a hyphen.
pub fn is_gcp_project_id(target: &str) -> bool {
    GCP_PROJECT_ID.is_match(target)
}
