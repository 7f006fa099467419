use encinfo_agent::EncodingSnapshot;
use encinfo_charset::are_equivalent;

use crate::{SegmentStyle, StatusSegment};

/// Confidence at or above which a better-ranked candidate is worth a warning.
pub const DEFAULT_WARN_CONFIDENCE: u8 = 50;

/// Rendering knobs for [`status_segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOptions {
	pub warn_confidence: u8,
}

impl Default for StatusOptions {
	fn default() -> Self {
		Self {
			warn_confidence: DEFAULT_WARN_CONFIDENCE,
		}
	}
}

/// Renders the status segment for `snapshot`, or `None` when there is no
/// declared encoding to show.
///
/// * `UTF-8(undetected)` when the bytes could not be inspected.
/// * `UTF-8(100%)` when the best candidate agrees with the declaration.
/// * `UTF-8(0%) => Shift_JIS(62%)?` when it does not.
pub fn status_segment(snapshot: &EncodingSnapshot, options: &StatusOptions) -> Option<StatusSegment> {
	let declared = snapshot.declared_encoding()?;
	let confidence = snapshot.reconciled_confidence();
	let Some(top) = snapshot.top_candidate() else {
		return Some(StatusSegment {
			text: format!("{declared}(undetected)"),
			style: SegmentStyle::Normal,
			tooltip: None,
		});
	};

	let (text, warn) = if are_equivalent(declared, top.name()) {
		(format!("{declared}({confidence}%)"), confidence == 0)
	} else {
		(
			format!("{declared}({confidence}%) => {}({}%)?", top.name(), top.confidence()),
			confidence == 0 || top.confidence() >= options.warn_confidence,
		)
	};
	Some(StatusSegment {
		text,
		style: if warn { SegmentStyle::Warning } else { SegmentStyle::Normal },
		tooltip: snapshot
			.document_name()
			.map(|name| format!("Right-click to change the encoding of '{name}'")),
	})
}
