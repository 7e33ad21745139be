//! Negotiation failure type

use http::{HeaderMap, HeaderValue};

/// Response header signalling the outer routing layer that it may try
/// another candidate route instead of terminating the request.
pub const CASCADE_HEADER: &str = "x-cascade";

/// Value carried by the cascade header on negotiation failures.
pub const CASCADE_PASS: &str = "pass";

/// The single failure kind of negotiation: the `Accept` header could not
/// be satisfied.
///
/// Carries the human-readable reason and the response headers the
/// error-rendering layer should attach (typically `X-Cascade: pass`).
/// Terminal for this component; rendered as HTTP 406 by the collaborator.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct InvalidAcceptHeader {
	pub message: String,
	pub headers: HeaderMap,
}

impl InvalidAcceptHeader {
	/// Failure without the cascade marker: the request terminates here.
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			headers: HeaderMap::new(),
		}
	}

	/// Failure carrying `X-Cascade: pass`.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::InvalidAcceptHeader;
	///
	/// let err = InvalidAcceptHeader::with_cascade("406 Not Acceptable");
	/// assert_eq!(err.to_string(), "406 Not Acceptable");
	/// assert!(err.cascades());
	///
	/// let terminal = InvalidAcceptHeader::new("406 Not Acceptable");
	/// assert!(!terminal.cascades());
	/// ```
	pub fn with_cascade(message: impl Into<String>) -> Self {
		let mut headers = HeaderMap::new();
		headers.insert(CASCADE_HEADER, HeaderValue::from_static(CASCADE_PASS));
		Self {
			message: message.into(),
			headers,
		}
	}

	/// Whether the failure allows the routing layer to try another route.
	pub fn cascades(&self) -> bool {
		self.headers
			.get(CASCADE_HEADER)
			.is_some_and(|value| value.as_bytes() == CASCADE_PASS.as_bytes())
	}
}
