//! Presentation of encoding snapshots.
//!
//! Turns an [`EncodingSnapshot`] into a short status segment and into the
//! entries of an encoding menu. Front ends decide how to draw them; this
//! crate only decides text, style hints and which entries are usable.
//!
//! [`EncodingSnapshot`]: encinfo_agent::EncodingSnapshot

mod menu;
mod segment;

pub use menu::{MenuEntry, SAVE_FIRST, encoding_menu};
pub use segment::{DEFAULT_WARN_CONFIDENCE, StatusOptions, status_segment};
use serde::Serialize;

/// A rendered segment with styling information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSegment {
	/// The text content.
	pub text: String,
	/// Style hint for the segment.
	pub style: SegmentStyle,
	/// Hover text, if the segment offers an encoding menu.
	pub tooltip: Option<String>,
}

/// Style hints for segments (actual colors handled by the front end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
	/// Default style.
	#[default]
	Normal,
	/// The declared encoding looks wrong.
	Warning,
}
