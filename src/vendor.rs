//! Vendor-tree subtype grammar
//!
//! Subtypes of the form `vnd.<vendor>[-<version>][+<format>]` encode the
//! API vendor, version and serialization format inside a media type, e.g.
//! `application/vnd.acme-v2.1+json`. Decomposition is deterministic: when
//! the grammar matches, the vendor is always captured while version and
//! format are independently optional.

use std::sync::LazyLock;

use regex::Regex;

static VENDOR_SUBTYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)^vnd\.(?P<vendor>[a-z0-9*.]+)(?:-(?P<version>[a-z0-9*.\-]+))?(?:\+(?P<format>[a-z0-9*.\-+]+))?$",
	)
	.unwrap()
});

// Prefix probes for client intent; unanchored at the end so a malformed
// tail does not hide that the client asked for a vendor or version.
static HAS_VENDOR_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^vnd\.[a-z0-9*.\-]+").unwrap());

static HAS_VERSION_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)^vnd\.[a-z0-9*.]+-[a-z0-9*.\-]+").unwrap());

/// The vendor, version and format extracted from a vendor-tree subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorSubtype {
	pub vendor: String,
	pub version: Option<String>,
	pub format: Option<String>,
}

impl VendorSubtype {
	/// Decomposes a subtype under the vendor-tree grammar.
	///
	/// Non-vendor subtypes (e.g. the `json` of `application/json`) yield
	/// `None`; the negotiated result then carries type/subtype only.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::VendorSubtype;
	///
	/// let subtype = VendorSubtype::decompose("vnd.acme-v2.1+json").unwrap();
	/// assert_eq!(subtype.vendor, "acme");
	/// assert_eq!(subtype.version.as_deref(), Some("v2.1"));
	/// assert_eq!(subtype.format.as_deref(), Some("json"));
	///
	/// let bare = VendorSubtype::decompose("vnd.acme").unwrap();
	/// assert_eq!(bare.vendor, "acme");
	/// assert_eq!(bare.version, None);
	/// assert_eq!(bare.format, None);
	///
	/// assert!(VendorSubtype::decompose("json").is_none());
	/// ```
	pub fn decompose(subtype: &str) -> Option<Self> {
		let captures = VENDOR_SUBTYPE_RE.captures(subtype)?;
		Some(Self {
			vendor: captures["vendor"].to_ascii_lowercase(),
			version: captures
				.name("version")
				.map(|m| m.as_str().to_ascii_lowercase()),
			format: captures
				.name("format")
				.map(|m| m.as_str().to_ascii_lowercase()),
		})
	}

	/// Whether this (client-side) subtype accepts a candidate subtype.
	///
	/// Vendors must agree. An absent or `*` client version accepts any
	/// candidate version (an unversioned request means "whatever you
	/// have", resolved to the newest candidate by list order); a present
	/// version must match exactly and never matches an unversioned
	/// candidate. Formats name concrete representations, so they must
	/// agree exactly, `*` aside.
	pub fn accepts(&self, candidate: &VendorSubtype) -> bool {
		component_accepts(&self.vendor, &candidate.vendor)
			&& match self.version.as_deref() {
				None | Some("*") => true,
				Some(version) => candidate.version.as_deref() == Some(version),
			} && match (self.format.as_deref(), candidate.format.as_deref()) {
				(Some("*"), _) => true,
				(want, have) => want == have,
			}
	}
}

fn component_accepts(want: &str, have: &str) -> bool {
	want == "*" || want == have
}

/// True when the subtype opens a vendor tree (`vnd.` prefix).
pub fn has_vendor(subtype: &str) -> bool {
	HAS_VENDOR_RE.is_match(subtype)
}

/// True when the subtype carries a vendor-tree version segment.
pub fn has_version(subtype: &str) -> bool {
	HAS_VERSION_RE.is_match(subtype)
}
