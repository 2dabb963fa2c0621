//! Fully-qualified domain name validation

use regex::Regex;
use std::sync::LazyLock;

static LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$").expect("valid label regex")
});

const MAX_LENGTH: usize = 253;

/// Whether `host` is a syntactically valid FQDN.
///
/// Requires at least two labels; the top-level label must be at least two
/// characters and not all digits, so IP addresses and bare names such as
/// `localhost` are rejected. One trailing dot is allowed.
pub fn is_valid_fqdn(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_LENGTH {
        return false;
    }

    let labels: Vec<&str> = host.split('.').collect();
    if labels.len() < 2 || !labels.iter().all(|l| LABEL.is_match(l)) {
        return false;
    }

    let tld = labels[labels.len() - 1];
    tld.len() >= 2 && !tld.chars().all(|c| c.is_ascii_digit())
}
