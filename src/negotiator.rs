//! Negotiation entry point
//!
//! Wraps parsing, candidate matching and vendor-tree decomposition in the
//! strict/lenient validation policy: an ordered sequence of guard clauses
//! producing a match, a pass-through, or an `InvalidAcceptHeader`.

use http::HeaderMap;
use http::header::ACCEPT;
use tracing::debug;

use crate::accept::AcceptHeader;
use crate::candidates::candidate_media_types;
use crate::config::NegotiationConfig;
use crate::error::InvalidAcceptHeader;
use crate::matcher::best_match;
use crate::media_type::MediaType;
use crate::vendor::VendorSubtype;

/// Outcome of a negotiation pass that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Negotiation {
	/// A candidate was selected for the request.
	Matched(NegotiatedMediaType),
	/// No candidate matched and the client did not insist on a vendor or
	/// version; the caller may skip this route and try another.
	PassThrough,
}

/// The media type selected for a request, decomposed for downstream
/// handlers.
///
/// `main_type` and `subtype` are always set; `vendor`, `version` and
/// `format` are set iff the subtype matched the vendor-tree grammar, each
/// independently optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedMediaType {
	pub main_type: String,
	pub subtype: String,
	pub vendor: Option<String>,
	pub version: Option<String>,
	pub format: Option<String>,
}

impl NegotiatedMediaType {
	/// Full `type/subtype` string of the selected media type.
	pub fn media_type(&self) -> String {
		format!("{}/{}", self.main_type, self.subtype)
	}

	fn from_media_type(media_type: MediaType) -> Self {
		let decomposed = VendorSubtype::decompose(&media_type.subtype);
		let (vendor, version, format) = match decomposed {
			Some(subtype) => (Some(subtype.vendor), subtype.version, subtype.format),
			None => (None, None, None),
		};
		Self {
			main_type: media_type.main_type,
			subtype: media_type.subtype,
			vendor,
			version,
			format,
		}
	}
}

/// Per-route negotiator: owns the immutable configuration and the
/// precomputed candidate list, shared read-only across requests.
#[derive(Debug, Clone)]
pub struct Negotiator {
	config: NegotiationConfig,
	candidates: Vec<String>,
}

impl Negotiator {
	/// Builds a negotiator for a route configuration.
	pub fn new(config: NegotiationConfig) -> Self {
		let candidates = candidate_media_types(&config);
		Self { config, candidates }
	}

	pub fn config(&self) -> &NegotiationConfig {
		&self.config
	}

	/// The ordered media types this route is willing to accept.
	pub fn candidates(&self) -> &[String] {
		&self.candidates
	}

	/// Negotiates a request's `Accept` header against this route.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::{NegotiationConfig, Negotiation, Negotiator};
	///
	/// let negotiator = Negotiator::new(
	/// 	NegotiationConfig::new("acme")
	/// 		.with_versions(["v1", "v2"])
	/// 		.with_format("json", "application/json"),
	/// );
	///
	/// match negotiator.negotiate(Some("application/vnd.acme-v2+json")).unwrap() {
	/// 	Negotiation::Matched(selected) => {
	/// 		assert_eq!(selected.vendor.as_deref(), Some("acme"));
	/// 		assert_eq!(selected.version.as_deref(), Some("v2"));
	/// 		assert_eq!(selected.format.as_deref(), Some("json"));
	/// 	}
	/// 	Negotiation::PassThrough => unreachable!(),
	/// }
	///
	/// // a plain request that matches nothing is passed through, not failed
	/// let out = negotiator.negotiate(Some("text/plain")).unwrap();
	/// assert_eq!(out, Negotiation::PassThrough);
	/// ```
	pub fn negotiate(&self, accept: Option<&str>) -> Result<Negotiation, InvalidAcceptHeader> {
		let header = match accept {
			Some(raw) => AcceptHeader::parse(raw).map_err(|e| self.fail(e.message))?,
			None => AcceptHeader::empty(),
		};

		let header = if self.config.strict {
			if header.is_empty() {
				return Err(self.fail("Accept header must be set."));
			}
			let concrete = header.without_ranges();
			if concrete.is_empty() {
				return Err(self.fail("Accept header must not contain ranges (\"*\")."));
			}
			concrete
		} else {
			header
		};

		match best_match(&header, &self.candidates) {
			Some(media_type) => {
				let selected = NegotiatedMediaType::from_media_type(media_type);
				debug!(
					media_type = %selected.media_type(),
					version = ?selected.version,
					format = ?selected.format,
					"accept negotiation matched"
				);
				Ok(Negotiation::Matched(selected))
			}
			None if self.config.strict => Err(self.fail("406 Not Acceptable")),
			None if header.wants_vendor_or_version() => {
				Err(self.fail("API vendor or version not found."))
			}
			None => {
				debug!("accept negotiation found no candidate, passing through");
				Ok(Negotiation::PassThrough)
			}
		}
	}

	/// Negotiates directly from a request's header map.
	///
	/// A header value the `http` primitive cannot expose as a string
	/// surfaces as an `InvalidAcceptHeader` carrying its diagnostic.
	pub fn negotiate_from_headers(
		&self,
		headers: &HeaderMap,
	) -> Result<Negotiation, InvalidAcceptHeader> {
		let accept = match headers.get(ACCEPT) {
			Some(value) => Some(value.to_str().map_err(|e| self.fail(e.to_string()))?),
			None => None,
		};
		self.negotiate(accept)
	}

	fn fail(&self, message: impl Into<String>) -> InvalidAcceptHeader {
		if self.config.cascade {
			InvalidAcceptHeader::with_cascade(message)
		} else {
			InvalidAcceptHeader::new(message)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use http::HeaderValue;

	fn negotiator(strict: bool) -> Negotiator {
		Negotiator::new(
			NegotiationConfig::new("acme")
				.with_versions(["v1", "v2"])
				.with_format("json", "application/json")
				.with_strict(strict),
		)
	}

	#[test]
	fn test_matched_result_decomposes_vendor_tree() {
		let out = negotiator(false)
			.negotiate(Some("application/vnd.acme-v1+json"))
			.unwrap();
		let Negotiation::Matched(selected) = out else {
			panic!("expected a match");
		};
		assert_eq!(selected.main_type, "application");
		assert_eq!(selected.subtype, "vnd.acme-v1+json");
		assert_eq!(selected.vendor.as_deref(), Some("acme"));
		assert_eq!(selected.version.as_deref(), Some("v1"));
		assert_eq!(selected.format.as_deref(), Some("json"));
	}

	#[test]
	fn test_generic_match_has_no_vendor_fields() {
		let out = negotiator(false)
			.negotiate(Some("application/json;q=0.9"))
			.unwrap();
		let Negotiation::Matched(selected) = out else {
			panic!("expected a match");
		};
		// vendor candidates outrank the canonical one for a generic request
		// only when the client accepts them; application/json is exact here
		assert_eq!(selected.media_type(), "application/json");
		assert_eq!(selected.vendor, None);
		assert_eq!(selected.version, None);
		assert_eq!(selected.format, None);
	}

	#[test]
	fn test_unversioned_vendor_request_selects_newest_version() {
		let out = negotiator(false)
			.negotiate(Some("application/vnd.acme+json"))
			.unwrap();
		let Negotiation::Matched(selected) = out else {
			panic!("expected a match");
		};
		assert_eq!(selected.version.as_deref(), Some("v2"));
	}

	#[test]
	fn test_strict_missing_header() {
		let err = negotiator(true).negotiate(None).unwrap_err();
		assert_eq!(err.message, "Accept header must be set.");
		assert!(err.cascades());
	}

	#[test]
	fn test_strict_empty_header() {
		let err = negotiator(true).negotiate(Some("")).unwrap_err();
		assert_eq!(err.message, "Accept header must be set.");
	}

	#[test]
	fn test_strict_ranges_only() {
		let err = negotiator(true).negotiate(Some("*/*")).unwrap_err();
		assert_eq!(err.message, "Accept header must not contain ranges (\"*\").");
	}

	#[test]
	fn test_strict_ranges_are_stripped_before_matching() {
		// the concrete entry still matches; the range is just ignored
		let out = negotiator(true)
			.negotiate(Some("*/*;q=0.1, application/vnd.acme-v2+json"))
			.unwrap();
		assert!(matches!(out, Negotiation::Matched(_)));
	}

	#[test]
	fn test_strict_no_match() {
		let err = negotiator(true).negotiate(Some("text/plain")).unwrap_err();
		assert_eq!(err.message, "406 Not Acceptable");
	}

	#[test]
	fn test_lenient_unsupported_version() {
		let err = negotiator(false)
			.negotiate(Some("application/vnd.acme-v99+json"))
			.unwrap_err();
		assert_eq!(err.message, "API vendor or version not found.");
		assert!(err.cascades());
	}

	#[test]
	fn test_lenient_plain_no_match_passes_through() {
		let out = negotiator(false).negotiate(Some("text/plain")).unwrap();
		assert_eq!(out, Negotiation::PassThrough);
	}

	#[test]
	fn test_lenient_missing_header_passes_through() {
		let out = negotiator(false).negotiate(None).unwrap();
		assert_eq!(out, Negotiation::PassThrough);
	}

	#[test]
	fn test_mixed_entries_still_fail_on_vendor_intent() {
		// one vendor-qualified entry is enough to fail instead of passing
		let err = negotiator(false)
			.negotiate(Some("text/plain, application/vnd.acme-v99+json"))
			.unwrap_err();
		assert_eq!(err.message, "API vendor or version not found.");
	}

	#[test]
	fn test_cascade_disabled() {
		let negotiator = Negotiator::new(
			NegotiationConfig::new("acme")
				.with_versions(["v1"])
				.with_format("json", "application/json")
				.with_strict(true)
				.with_cascade(false),
		);
		let err = negotiator.negotiate(Some("text/plain")).unwrap_err();
		assert!(!err.cascades());
		assert!(err.headers.is_empty());
	}

	#[test]
	fn test_parse_failure_carries_cascade() {
		let err = negotiator(false)
			.negotiate(Some("application/json;q=nope"))
			.unwrap_err();
		assert!(err.message.contains("\"nope\""));
		assert!(err.cascades());
	}

	#[test]
	fn test_negotiate_from_headers() {
		let mut headers = HeaderMap::new();
		headers.insert(
			ACCEPT,
			HeaderValue::from_static("application/vnd.acme-v2+json"),
		);
		let out = negotiator(false).negotiate_from_headers(&headers).unwrap();
		assert!(matches!(out, Negotiation::Matched(_)));

		let out = negotiator(false)
			.negotiate_from_headers(&HeaderMap::new())
			.unwrap();
		assert_eq!(out, Negotiation::PassThrough);
	}
}
