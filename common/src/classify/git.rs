//! Source repository URLs.

use once_cell::sync::Lazy;
use regex::Regex;

static GIT_REPOSITORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:git|ssh|https?|git@[A-Za-z0-9_.]+):(?://)?[A-Za-z0-9_.@:/~-]+\.git/?$").unwrap()
});

/// True if the target has the format of a Git repository URL.
///
/// Accepted forms are `git://`, `ssh://`, `http(s)://` URLs and the
/// `git@host:path` shorthand, ending in `.git` with an optional trailing slash.
pub fn is_git_repository(target: &str) -> bool {
    GIT_REPOSITORY.is_match(target)
}
