//! Encoding snapshots.

use encinfo_charset::{CharsetCandidate, reconcile};
use serde::Serialize;

/// What is known about the active document's encoding at one point in time.
///
/// Snapshots are immutable values; a change produces a new snapshot. The
/// reconciled confidence is always derived from the declared encoding and
/// the candidates, never set on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EncodingSnapshot {
	document_name: Option<String>,
	declared_encoding: Option<String>,
	detected_candidates: Option<Vec<CharsetCandidate>>,
	reconciled_confidence: u8,
}

impl EncodingSnapshot {
	/// Snapshot for "no document" or a document without encoding support.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Snapshot for a document whose bytes cannot be inspected.
	pub fn undetected(document_name: Option<String>, declared_encoding: Option<String>) -> Self {
		Self {
			document_name,
			declared_encoding,
			detected_candidates: None,
			reconciled_confidence: 0,
		}
	}

	/// Builds a snapshot from detector output, reconciling the declared
	/// encoding's confidence with a full decode through `is_decodable`.
	///
	/// An empty candidate list counts as absent. Candidates are kept in
	/// descending confidence order; equal confidences keep their given order.
	pub fn evaluate<F>(
		document_name: Option<String>,
		declared_encoding: Option<String>,
		detected_candidates: Option<Vec<CharsetCandidate>>,
		is_decodable: F,
	) -> Self
	where
		F: FnOnce(&str) -> bool,
	{
		let detected_candidates = detected_candidates
			.filter(|candidates| !candidates.is_empty())
			.map(|mut candidates| {
				candidates.sort_by(|a, b| b.confidence().cmp(&a.confidence()));
				candidates
			});
		let reconciled_confidence = reconcile(
			declared_encoding.as_deref(),
			detected_candidates.as_deref(),
			is_decodable,
		);
		Self {
			document_name,
			declared_encoding,
			detected_candidates,
			reconciled_confidence,
		}
	}

	pub fn document_name(&self) -> Option<&str> {
		self.document_name.as_deref()
	}

	pub fn declared_encoding(&self) -> Option<&str> {
		self.declared_encoding.as_deref()
	}

	/// Detected candidates, highest confidence first. `None` if detection was
	/// impossible (no byte access, unreadable or deleted content, empty content).
	pub fn detected_candidates(&self) -> Option<&[CharsetCandidate]> {
		self.detected_candidates.as_deref()
	}

	/// Candidate with the highest confidence.
	pub fn top_candidate(&self) -> Option<&CharsetCandidate> {
		self.detected_candidates().and_then(<[CharsetCandidate]>::first)
	}

	/// Authoritative confidence of the declared encoding, `0..=100`.
	pub fn reconciled_confidence(&self) -> u8 {
		self.reconciled_confidence
	}
}
