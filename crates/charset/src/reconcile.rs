//! Confidence reconciliation.
//!
//! The detector's score for a declared charset is neither necessary nor
//! sufficient evidence. A charset outside the detector's model scores 0 even
//! when the content decodes perfectly, and a statistical score can be high
//! for content with a malformed sequence the detector never looked at. A full
//! decode settles both cases:
//!
//! | declared / candidates | decodes | detector score | result |
//! |---|---|---|---|
//! | either absent | - | - | 0 |
//! | present | no | any | 0 |
//! | present | yes | 0 | [`DECODABLE_FLOOR`] |
//! | present | yes | n > 0 | n |

use crate::detect::CharsetCandidate;
use crate::equivalence::are_equivalent;

/// Confidence reported for a charset the content decodes under but the
/// detector did not score.
pub const DECODABLE_FLOOR: u8 = 1;

/// Returns the detector's confidence for `charset`, or 0 if no candidate is
/// equivalent to it.
pub fn confidence_of(candidates: &[CharsetCandidate], charset: &str) -> u8 {
	candidates
		.iter()
		.find(|candidate| are_equivalent(candidate.name(), charset))
		.map_or(0, CharsetCandidate::confidence)
}

/// Computes the authoritative confidence of the declared charset.
///
/// `is_decodable` performs the full decode and is only invoked when both the
/// declared charset and the candidate list are present.
pub fn reconcile<F>(declared: Option<&str>, candidates: Option<&[CharsetCandidate]>, is_decodable: F) -> u8
where
	F: FnOnce(&str) -> bool,
{
	let (Some(declared), Some(candidates)) = (declared, candidates) else {
		return 0;
	};
	let reported = confidence_of(candidates, declared);
	match (is_decodable(declared), reported) {
		(false, _) => 0,
		(true, 0) => DECODABLE_FLOOR,
		(true, reported) => reported,
	}
}
