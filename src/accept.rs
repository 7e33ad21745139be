//! Accept header parsing

use crate::error::InvalidAcceptHeader;
use crate::media_type::MediaType;
use crate::vendor;

/// A media type paired with the client's preference weight.
///
/// Weights default to 1.0 when the entry carries no `q` parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityValue {
	pub media_type: MediaType,
	pub quality: f32,
}

/// The parsed `Accept` header: an ordered set of weighted media types.
///
/// Entries keep their header order; the matcher uses that order to break
/// ties between equally specific entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
	pub entries: Vec<QualityValue>,
}

impl AcceptHeader {
	/// Parses a raw `Accept` header value.
	///
	/// Malformed media-type tokens are skipped rather than failing the
	/// whole header; they simply cannot match anything. A `q` parameter
	/// the float primitive refuses to parse, or outside [0.0, 1.0], fails
	/// the header with the primitive's diagnostic attached.
	///
	/// # Examples
	///
	/// ```
	/// use accept_versioning::AcceptHeader;
	///
	/// let header = AcceptHeader::parse("application/json, text/html;q=0.9").unwrap();
	/// assert_eq!(header.entries.len(), 2);
	/// assert_eq!(header.entries[0].quality, 1.0);
	/// assert_eq!(header.entries[1].quality, 0.9);
	///
	/// let skipped = AcceptHeader::parse("not-a-media-type, text/html").unwrap();
	/// assert_eq!(skipped.entries.len(), 1);
	///
	/// assert!(AcceptHeader::parse("text/html;q=abc").is_err());
	/// ```
	pub fn parse(header: &str) -> Result<Self, InvalidAcceptHeader> {
		let mut entries = Vec::new();
		for item in header.split(',') {
			let item = item.trim();
			if item.is_empty() {
				continue;
			}
			let (token, params) = match item.split_once(';') {
				Some((token, params)) => (token, Some(params)),
				None => (item, None),
			};
			let quality = match params {
				Some(params) => parse_quality(params)?,
				None => 1.0,
			};
			let Some(media_type) = MediaType::parse(token) else {
				continue;
			};
			entries.push(QualityValue { media_type, quality });
		}
		Ok(Self { entries })
	}

	/// An empty header: no weighted media types at all.
	pub fn empty() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Copy of this header with every wildcard-bearing entry removed.
	///
	/// Strict mode matches only against the concrete entries.
	pub fn without_ranges(&self) -> Self {
		Self {
			entries: self
				.entries
				.iter()
				.filter(|entry| !entry.media_type.has_range())
				.cloned()
				.collect(),
		}
	}

	/// Whether any entry asks for a vendor tree or a version.
	///
	/// Inclusive OR over all entries: one vendor-qualified media type is
	/// enough to treat a failed match as a hard error in lenient mode.
	pub fn wants_vendor_or_version(&self) -> bool {
		self.entries.iter().any(|entry| {
			vendor::has_vendor(&entry.media_type.subtype)
				|| vendor::has_version(&entry.media_type.subtype)
		})
	}
}

fn parse_quality(params: &str) -> Result<f32, InvalidAcceptHeader> {
	for param in params.split(';') {
		let Some((name, value)) = param.split_once('=') else {
			continue;
		};
		if !name.trim().eq_ignore_ascii_case("q") {
			continue;
		}
		let raw = value.trim();
		let quality: f32 = raw.parse().map_err(|e: std::num::ParseFloatError| {
			InvalidAcceptHeader::new(format!("invalid quality value {raw:?}: {e}"))
		})?;
		if !(0.0..=1.0).contains(&quality) {
			return Err(InvalidAcceptHeader::new(format!(
				"invalid quality value {raw:?}: out of range"
			)));
		}
		return Ok(quality);
	}
	Ok(1.0)
}
