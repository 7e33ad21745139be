//! Negotiation configuration
//!
//! Server-side, set once per route mount: the vendor name, the ordered
//! list of supported versions, the ordered format map and the
//! strict/cascade policy. Immutable for the lifetime of a route and safe
//! to share across concurrent requests.

use serde::{Deserialize, Serialize};

/// Configuration for Accept-header negotiation on a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationConfig {
	/// Vendor name used in the `vnd.<vendor>` subtype tree
	pub vendor: String,

	/// Supported versions, oldest first; candidates are generated
	/// newest-first so tie-breaks prefer recent versions
	pub versions: Vec<String>,

	/// Ordered mapping of format extension to its canonical media type,
	/// e.g. `("json", "application/json")`
	pub formats: Vec<(String, String)>,

	/// Require a well-formed, non-wildcard Accept header and a match
	pub strict: bool,

	/// Attach `X-Cascade: pass` to failures so the outer routing layer
	/// may try another route instead of terminating the request
	pub cascade: bool,
}

impl NegotiationConfig {
	/// Create a configuration for the given vendor.
	///
	/// Defaults: no versions, no formats, lenient, cascading.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::NegotiationConfig;
	///
	/// let config = NegotiationConfig::new("acme")
	/// 	.with_versions(["v1", "v2"])
	/// 	.with_format("json", "application/json")
	/// 	.with_strict(true);
	///
	/// assert_eq!(config.vendor, "acme");
	/// assert_eq!(config.versions, vec!["v1", "v2"]);
	/// assert!(config.strict);
	/// assert!(config.cascade);
	/// ```
	pub fn new(vendor: impl Into<String>) -> Self {
		Self {
			vendor: vendor.into(),
			versions: Vec::new(),
			formats: Vec::new(),
			strict: false,
			cascade: true,
		}
	}

	/// Append a supported version (newest last).
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.versions.push(version.into());
		self
	}

	/// Replace the supported versions (oldest first, newest last).
	pub fn with_versions<I, S>(mut self, versions: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.versions = versions.into_iter().map(Into::into).collect();
		self
	}

	/// Append a format extension and its canonical media type.
	pub fn with_format(
		mut self,
		extension: impl Into<String>,
		media_type: impl Into<String>,
	) -> Self {
		self.formats.push((extension.into(), media_type.into()));
		self
	}

	/// Enable or disable strict mode.
	pub fn with_strict(mut self, strict: bool) -> Self {
		self.strict = strict;
		self
	}

	/// Enable or disable the cascade marker on failures.
	pub fn with_cascade(mut self, cascade: bool) -> Self {
		self.cascade = cascade;
		self
	}

	/// Load a configuration from `ACCEPT_VERSIONING_*` environment variables.
	///
	/// `ACCEPT_VERSIONING_VENDOR` is required. `ACCEPT_VERSIONING_VERSIONS`
	/// is a comma-separated list, `ACCEPT_VERSIONING_FORMATS` a
	/// comma-separated list of `extension=media/type` pairs,
	/// `ACCEPT_VERSIONING_STRICT` defaults to `false` and
	/// `ACCEPT_VERSIONING_CASCADE` to `true`.
	pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
		let vendor = std::env::var("ACCEPT_VERSIONING_VENDOR")?;

		let versions = std::env::var("ACCEPT_VERSIONING_VERSIONS")
			.map(|v| {
				v.split(',')
					.map(|s| s.trim().to_string())
					.filter(|s| !s.is_empty())
					.collect()
			})
			.unwrap_or_default();

		let formats = match std::env::var("ACCEPT_VERSIONING_FORMATS") {
			Ok(raw) => parse_format_mappings(&raw)?,
			Err(_) => Vec::new(),
		};

		let strict = std::env::var("ACCEPT_VERSIONING_STRICT")
			.map(|v| v.to_lowercase() == "true")
			.unwrap_or(false);

		let cascade = std::env::var("ACCEPT_VERSIONING_CASCADE")
			.map(|v| v.to_lowercase() != "false")
			.unwrap_or(true);

		Ok(Self {
			vendor,
			versions,
			formats,
			strict,
			cascade,
		})
	}
}

fn parse_format_mappings(raw: &str) -> Result<Vec<(String, String)>, Box<dyn std::error::Error>> {
	let mut formats = Vec::new();
	for entry in raw.split(',') {
		let entry = entry.trim();
		if entry.is_empty() {
			continue;
		}
		let Some((extension, media_type)) = entry.split_once('=') else {
			return Err(format!("invalid format mapping: {entry:?}").into());
		};
		formats.push((extension.trim().to_string(), media_type.trim().to_string()));
	}
	Ok(formats)
}
