//! Server candidate media types
//!
//! From the route configuration, builds the ordered list of media types
//! the server is willing to accept: most specific and most recent first,
//! so that tie-breaks in the matcher favor newer API versions and
//! vendor-qualified types over generic ones.

use crate::config::NegotiationConfig;

/// Builds the ordered candidate list for a configuration.
///
/// Order: per format, per version newest-first, the formatted then
/// unformatted vendor+version types; then the vendor+format types; then
/// the bare vendor type; finally each format's canonical media type.
/// For `N` versions and `F` formats the list has `N*2*F + F + 1 + F`
/// entries.
///
/// # Examples
///
/// ```
/// use accept_versioning::{NegotiationConfig, candidate_media_types};
///
/// let config = NegotiationConfig::new("acme")
/// 	.with_versions(["v1", "v2"])
/// 	.with_format("json", "application/json");
///
/// assert_eq!(
/// 	candidate_media_types(&config),
/// 	vec![
/// 		"application/vnd.acme-v2+json",
/// 		"application/vnd.acme-v2",
/// 		"application/vnd.acme-v1+json",
/// 		"application/vnd.acme-v1",
/// 		"application/vnd.acme+json",
/// 		"application/vnd.acme",
/// 		"application/json",
/// 	]
/// );
/// ```
pub fn candidate_media_types(config: &NegotiationConfig) -> Vec<String> {
	let vendor = &config.vendor;
	let capacity = config.versions.len() * 2 * config.formats.len() + config.formats.len() * 2 + 1;
	let mut candidates = Vec::with_capacity(capacity);

	for (extension, _) in &config.formats {
		for version in config.versions.iter().rev() {
			candidates.push(format!("application/vnd.{vendor}-{version}+{extension}"));
			candidates.push(format!("application/vnd.{vendor}-{version}"));
		}
	}
	for (extension, _) in &config.formats {
		candidates.push(format!("application/vnd.{vendor}+{extension}"));
	}
	candidates.push(format!("application/vnd.{vendor}"));
	for (_, media_type) in &config.formats {
		candidates.push(media_type.clone());
	}

	candidates
}
