//! Accept-header media-type negotiation for API versioning
//!
//! Given a client's `Accept` header and a route's supported vendor,
//! versions and formats, determines which API version/format the client
//! is requesting, or rejects the request when none can be satisfied.
//! Implements RFC 7231 quality-value matching, wildcard handling, the
//! `vnd.<vendor>-<version>+<format>` vendor-tree subtype convention and a
//! strict/lenient validation policy with cascade-aware failures.
//!
//! Negotiation is pure and synchronous: the per-route [`Negotiator`] is
//! immutable and safely shared across concurrent requests, and each pass
//! is bounded by the header length and candidate count.
//!
//! # Examples
//!
//! ```
//! use accept_versioning::{NegotiationConfig, Negotiation, Negotiator};
//!
//! let negotiator = Negotiator::new(
//! 	NegotiationConfig::new("acme")
//! 		.with_versions(["v1", "v2"])
//! 		.with_format("json", "application/json"),
//! );
//!
//! // an unversioned vendor request resolves to the newest version
//! match negotiator.negotiate(Some("application/vnd.acme+json")).unwrap() {
//! 	Negotiation::Matched(selected) => {
//! 		assert_eq!(selected.version.as_deref(), Some("v2"));
//! 		assert_eq!(selected.format.as_deref(), Some("json"));
//! 	}
//! 	Negotiation::PassThrough => unreachable!(),
//! }
//! ```

pub mod accept;
pub mod candidates;
pub mod config;
pub mod error;
pub mod matcher;
pub mod media_type;
pub mod negotiator;
pub mod vendor;

pub use accept::{AcceptHeader, QualityValue};
pub use candidates::candidate_media_types;
pub use config::NegotiationConfig;
pub use error::{CASCADE_HEADER, CASCADE_PASS, InvalidAcceptHeader};
pub use matcher::best_match;
pub use media_type::{MediaType, Specificity};
pub use negotiator::{NegotiatedMediaType, Negotiation, Negotiator};
pub use vendor::VendorSubtype;
