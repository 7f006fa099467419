//! Charset detection.
//!
//! The heuristic itself belongs to `chardetng`; this module owns reading the
//! stream, polling the detector, and shaping its answers into a ranked list of
//! [`CharsetCandidate`]s.
//!
//! `chardetng` yields one guess per query, biased by an optional top-level
//! domain hint. The ranking polls it once without a hint and once per hint in
//! [`TLD_HINTS`]; each distinct guess becomes a candidate whose confidence is
//! its share of the weighted votes. Two cases bypass the vote:
//!
//! * A byte order mark is conclusive and yields that encoding alone at 100.
//! * Input that is strictly valid UTF-8 pins UTF-8 at 100. If the input is
//!   pure ASCII, the detector's regional fallbacks carry no evidence and their
//!   shares are halved.
//!
//! `chardetng` names Western European text `windows-1252` even when none of
//! the bytes 0x80..=0x9F occur. Such input is reported as `ISO-8859-1`, the
//! charset the two agree on.

use std::io::Read;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, ISO_2022_JP, UTF_8, WINDOWS_1252};
use serde::Serialize;

use crate::decode::read_all;
use crate::error::Result;

/// Upper bound of every confidence value.
pub const MAX_CONFIDENCE: u8 = 100;

/// Vote weight of the guess made without a domain hint.
const UNHINTED_WEIGHT: u32 = 3;

/// Domain hints polled to surface regional alternatives.
const TLD_HINTS: &[&[u8]] = &[
	b"jp", b"cn", b"tw", b"kr", b"ru", b"ua", b"gr", b"il", b"eg", b"th", b"tr", b"pl", b"lt", b"vn", b"de",
];

/// A charset the detector considers consistent with the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CharsetCandidate {
	name: String,
	confidence: u8,
}

impl CharsetCandidate {
	/// Creates a candidate; confidence is clamped to [`MAX_CONFIDENCE`].
	pub fn new(name: impl Into<String>, confidence: u8) -> Self {
		Self {
			name: name.into(),
			confidence: confidence.min(MAX_CONFIDENCE),
		}
	}

	/// Charset name as reported by the detector.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Confidence in `0..=100`.
	pub fn confidence(&self) -> u8 {
		self.confidence
	}
}

/// Reads `reader` to the end and ranks the charsets it may be encoded in.
///
/// The stream is released before returning, whether reading succeeds or not.
/// Empty input yields an empty list. Candidates are ordered by descending
/// confidence, ties kept in detection order.
pub fn detect_all<R: Read>(reader: R) -> Result<Vec<CharsetCandidate>> {
	let bytes = read_all(reader)?;
	Ok(detect_bytes(&bytes))
}

/// Ranks the charsets `bytes` may be encoded in. See [`detect_all`].
pub fn detect_bytes(bytes: &[u8]) -> Vec<CharsetCandidate> {
	if bytes.is_empty() {
		return Vec::new();
	}

	if let Some((encoding, _)) = Encoding::for_bom(bytes) {
		tracing::trace!(encoding = encoding.name(), "charset from byte order mark");
		return vec![CharsetCandidate::new(encoding.name(), MAX_CONFIDENCE)];
	}

	let mut detector = EncodingDetector::new();
	detector.feed(bytes, true);

	// Escape sequences are ASCII bytes, so ISO-2022-JP input also passes the
	// ASCII and UTF-8 checks below.
	let escaped = detector.guess(None, true) == ISO_2022_JP;
	let ascii_only = !escaped && Encoding::ascii_valid_up_to(bytes) == bytes.len();
	let strict_utf8 = !escaped && std::str::from_utf8(bytes).is_ok();

	let mut ranking = Ranking::default();
	if strict_utf8 {
		ranking.offer(UTF_8, MAX_CONFIDENCE);
	}

	let total = UNHINTED_WEIGHT + TLD_HINTS.len() as u32;
	for (encoding, weight) in tally(&detector) {
		let mut confidence = (weight * u32::from(MAX_CONFIDENCE) / total) as u8;
		if ascii_only {
			confidence /= 2;
		}
		ranking.offer(encoding, confidence);
	}

	let latin1 = !bytes.iter().any(|byte| (0x80..=0x9F).contains(byte));
	let candidates = ranking.into_candidates(latin1);
	tracing::trace!(len = bytes.len(), ?candidates, "detected charsets");
	candidates
}

/// Polls the detector with and without hints, accumulating vote weight per
/// distinct guess in first-seen order.
fn tally(detector: &EncodingDetector) -> Vec<(&'static Encoding, u32)> {
	let guesses = std::iter::once((detector.guess(None, true), UNHINTED_WEIGHT))
		.chain(TLD_HINTS.iter().map(|tld| (detector.guess(Some(*tld), true), 1)));

	let mut votes: Vec<(&'static Encoding, u32)> = Vec::new();
	for (encoding, weight) in guesses {
		match votes.iter_mut().find(|(seen, _)| *seen == encoding) {
			Some((_, total)) => *total += weight,
			None => votes.push((encoding, weight)),
		}
	}
	votes
}

/// Deduplicating accumulator; an encoding offered twice keeps its best score.
#[derive(Default)]
struct Ranking {
	entries: Vec<(&'static Encoding, u8)>,
}

impl Ranking {
	fn offer(&mut self, encoding: &'static Encoding, confidence: u8) {
		if confidence == 0 {
			return;
		}
		match self.entries.iter_mut().find(|(seen, _)| *seen == encoding) {
			Some((_, best)) => *best = (*best).max(confidence),
			None => self.entries.push((encoding, confidence)),
		}
	}

	/// With `latin1`, `windows-1252` is reported as `ISO-8859-1`.
	fn into_candidates(mut self, latin1: bool) -> Vec<CharsetCandidate> {
		// Stable: equal confidences keep the order they were offered in.
		self.entries.sort_by(|a, b| b.1.cmp(&a.1));
		self.entries
			.into_iter()
			.map(|(encoding, confidence)| {
				let name = if latin1 && encoding == WINDOWS_1252 {
					"ISO-8859-1"
				} else {
					encoding.name()
				};
				CharsetCandidate::new(name, confidence)
			})
			.collect()
	}
}
