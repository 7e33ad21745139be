//! Media-type value type and range matching

use std::fmt;

use crate::vendor::VendorSubtype;

/// A parsed `type/subtype` pair, e.g. `("application", "vnd.acme-v2+json")`.
///
/// Both components are normalized to lowercase; parameters (including the
/// quality value) are handled by the Accept-header parser, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
	pub main_type: String,
	pub subtype: String,
}

/// How specifically a client entry matched a server candidate.
///
/// Higher is more specific; the matcher scores each candidate by the
/// quality of its most specific matching entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
	/// `*/*`
	FullRange,
	/// `type/*` or a partial subtype wildcard such as `application/vnd.acme*`
	TypeRange,
	/// Vendor-tree compatibility, e.g. `vnd.acme+json` against `vnd.acme-v2+json`
	VendorTree,
	/// Exact type and subtype equality
	Exact,
}

impl MediaType {
	/// Creates a media type from its two components, normalizing case.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::MediaType;
	///
	/// let media_type = MediaType::new("Application", "JSON");
	/// assert_eq!(media_type.main_type, "application");
	/// assert_eq!(media_type.subtype, "json");
	/// ```
	pub fn new(main_type: impl Into<String>, subtype: impl Into<String>) -> Self {
		Self {
			main_type: main_type.into().to_ascii_lowercase(),
			subtype: subtype.into().to_ascii_lowercase(),
		}
	}

	/// Parses a bare `type/subtype` token.
	///
	/// Returns `None` for anything that is not two non-empty token-character
	/// sequences joined by a single slash; callers treat that as a skipped
	/// entry rather than a failure.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::MediaType;
	///
	/// let media_type = MediaType::parse("application/vnd.acme-v2+json").unwrap();
	/// assert_eq!(media_type.main_type, "application");
	/// assert_eq!(media_type.subtype, "vnd.acme-v2+json");
	///
	/// assert!(MediaType::parse("application").is_none());
	/// assert!(MediaType::parse("a/b/c").is_none());
	/// ```
	pub fn parse(token: &str) -> Option<Self> {
		let (main_type, subtype) = token.trim().split_once('/')?;
		let main_type = main_type.trim();
		let subtype = subtype.trim();
		if main_type.is_empty() || subtype.is_empty() {
			return None;
		}
		if !is_token(main_type) || !is_token(subtype) {
			return None;
		}
		Some(Self::new(main_type, subtype))
	}

	/// True when the type or subtype contains a wildcard segment.
	pub fn has_range(&self) -> bool {
		self.main_type.contains('*') || self.subtype.contains('*')
	}

	/// Matches this (client-side) media type against a server candidate.
	///
	/// Wildcards are honored on the client side only: `*/*` matches any
	/// candidate, `type/*` and partial subtype globs match within a type,
	/// and a vendor-tree subtype with an absent (or `*`) version matches
	/// any candidate version of the same vendor and format. A
	/// client-supplied version must equal the candidate's exactly.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::MediaType;
	///
	/// let entry = MediaType::parse("application/vnd.acme+json").unwrap();
	/// let candidate = MediaType::parse("application/vnd.acme-v2+json").unwrap();
	/// assert!(entry.matches(&candidate).is_some());
	///
	/// let versioned = MediaType::parse("application/vnd.acme-v99+json").unwrap();
	/// assert!(versioned.matches(&candidate).is_none());
	/// ```
	pub fn matches(&self, candidate: &MediaType) -> Option<Specificity> {
		if self.main_type == "*" {
			return (self.subtype == "*").then_some(Specificity::FullRange);
		}
		if self.main_type != candidate.main_type {
			return None;
		}
		if self.subtype == candidate.subtype {
			return Some(Specificity::Exact);
		}
		if self.subtype == "*" {
			return Some(Specificity::TypeRange);
		}
		if let Some(want) = VendorSubtype::decompose(&self.subtype)
			&& let Some(have) = VendorSubtype::decompose(&candidate.subtype)
			&& want.accepts(&have)
		{
			return Some(Specificity::VendorTree);
		}
		if self.subtype.contains('*') && glob_match(&self.subtype, &candidate.subtype) {
			return Some(Specificity::TypeRange);
		}
		None
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.main_type, self.subtype)
	}
}

fn is_token(value: &str) -> bool {
	value
		.chars()
		.all(|c| c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c))
}

/// Matches `text` against a pattern whose `*` segments span any run of
/// characters. A pattern without `*` requires full equality.
fn glob_match(pattern: &str, text: &str) -> bool {
	let Some((first, rest)) = pattern.split_once('*') else {
		return pattern == text;
	};
	let Some(remaining) = text.strip_prefix(first) else {
		return false;
	};
	let mut remaining = remaining;
	let mut segments: Vec<&str> = rest.split('*').collect();
	let last = segments.pop().unwrap_or("");
	for segment in segments {
		if segment.is_empty() {
			continue;
		}
		match remaining.find(segment) {
			Some(at) => remaining = &remaining[at + segment.len()..],
			None => return false,
		}
	}
	remaining.ends_with(last)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_normalizes_case() {
		let media_type = MediaType::parse("Application/VND.Acme-V2+JSON").unwrap();
		assert_eq!(media_type.main_type, "application");
		assert_eq!(media_type.subtype, "vnd.acme-v2+json");
	}

	#[test]
	fn test_parse_rejects_malformed_tokens() {
		assert!(MediaType::parse("").is_none());
		assert!(MediaType::parse("application").is_none());
		assert!(MediaType::parse("/json").is_none());
		assert!(MediaType::parse("application/").is_none());
		assert!(MediaType::parse("application/a/b").is_none());
		assert!(MediaType::parse("appli cation/json").is_none());
	}

	#[test]
	fn test_exact_match() {
		let entry = MediaType::new("application", "json");
		let candidate = MediaType::new("application", "json");
		assert_eq!(entry.matches(&candidate), Some(Specificity::Exact));
	}

	#[test]
	fn test_full_range_matches_anything() {
		let entry = MediaType::new("*", "*");
		let candidate = MediaType::new("text", "plain");
		assert_eq!(entry.matches(&candidate), Some(Specificity::FullRange));
	}

	#[test]
	fn test_type_range() {
		let entry = MediaType::new("application", "*");
		assert_eq!(
			entry.matches(&MediaType::new("application", "json")),
			Some(Specificity::TypeRange)
		);
		assert!(entry.matches(&MediaType::new("text", "plain")).is_none());
	}

	#[test]
	fn test_vendor_tree_accepts_any_version_when_unversioned() {
		let entry = MediaType::new("application", "vnd.acme+json");
		let candidate = MediaType::new("application", "vnd.acme-v2+json");
		assert_eq!(entry.matches(&candidate), Some(Specificity::VendorTree));
	}

	#[test]
	fn test_vendor_tree_version_must_agree() {
		let entry = MediaType::new("application", "vnd.acme-v99+json");
		let candidate = MediaType::new("application", "vnd.acme-v2+json");
		assert!(entry.matches(&candidate).is_none());

		// a client version never matches an unversioned candidate
		let unversioned = MediaType::new("application", "vnd.acme+json");
		assert!(entry.matches(&unversioned).is_none());
	}

	#[test]
	fn test_partial_subtype_wildcard() {
		let entry = MediaType::new("application", "vnd.acme*");
		assert_eq!(
			entry.matches(&MediaType::new("application", "vnd.acme-v1+json")),
			Some(Specificity::TypeRange)
		);
		assert!(
			entry
				.matches(&MediaType::new("application", "vnd.other-v1+json"))
				.is_none()
		);
	}

	#[test]
	fn test_specificity_ordering() {
		assert!(Specificity::Exact > Specificity::VendorTree);
		assert!(Specificity::VendorTree > Specificity::TypeRange);
		assert!(Specificity::TypeRange > Specificity::FullRange);
	}

	#[test]
	fn test_glob_match() {
		assert!(glob_match("vnd.acme*", "vnd.acme-v1+json"));
		assert!(glob_match("vnd.*+json", "vnd.acme-v1+json"));
		assert!(glob_match("vnd.acme", "vnd.acme"));
		assert!(!glob_match("vnd.acme", "vnd.acme-v1"));
		assert!(!glob_match("vnd.*+xml", "vnd.acme-v1+json"));
	}

	#[test]
	fn test_display_round_trip() {
		let media_type = MediaType::parse("application/vnd.acme-v1").unwrap();
		assert_eq!(media_type.to_string(), "application/vnd.acme-v1");
	}
}
