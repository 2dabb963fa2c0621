//! Missing-collection detection.
//!
//! Compares required collections against the text listing printed by
//! `ansible-galaxy collection list`. A requirement counts as installed when
//! its name occurs anywhere in the listing. Versions are not compared.

/// Required collections that do not appear in `installed_listing`,
/// in requirement order.
pub fn missing_collections(required: &[String], installed_listing: &str) -> Vec<String> {
    required
        .iter()
        .filter(|name| !installed_listing.contains(name.as_str()))
        .cloned()
        .collect()
}
