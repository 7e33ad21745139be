//! Best-match selection between client preferences and server candidates

use tracing::trace;

use crate::accept::AcceptHeader;
use crate::media_type::{MediaType, Specificity};

/// Selects the server candidate the client prefers most.
///
/// Each candidate is scored with the quality of the most specific client
/// entry matching it; among equally specific entries the earlier one in
/// the header wins, and among equally scored candidates the earlier one
/// in the server list wins (the list is ordered most-specific,
/// newest-version first). An explicit `q=0` on the most specific match
/// rejects the candidate outright, even when a broader entry would have
/// accepted it.
pub fn best_match(header: &AcceptHeader, candidates: &[String]) -> Option<MediaType> {
	let mut best: Option<(f32, MediaType)> = None;
	for raw in candidates {
		let Some(candidate) = MediaType::parse(raw) else {
			continue;
		};
		let Some(score) = score_candidate(header, &candidate) else {
			continue;
		};
		trace!(candidate = %raw, score, "scored candidate");
		if score <= 0.0 {
			continue;
		}
		match &best {
			Some((top, _)) if *top >= score => {}
			_ => best = Some((score, candidate)),
		}
	}
	best.map(|(_, media_type)| media_type)
}

/// Quality of the most specific client entry matching the candidate, or
/// `None` when no entry matches at all.
fn score_candidate(header: &AcceptHeader, candidate: &MediaType) -> Option<f32> {
	let mut found: Option<(Specificity, f32)> = None;
	for entry in &header.entries {
		let Some(specificity) = entry.media_type.matches(candidate) else {
			continue;
		};
		match &found {
			Some((top, _)) if *top >= specificity => {}
			_ => found = Some((specificity, entry.quality)),
		}
	}
	found.map(|(_, quality)| quality)
}
