use encinfo_agent::EncodingSnapshot;
use encinfo_charset::are_equivalent;
use serde::Serialize;

/// Label of the entry shown above the candidates while the document is dirty.
pub const SAVE_FIRST: &str = "Please save the document first.";

/// One entry of the encoding menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
	pub label: String,
	/// Encoding to hand to `set_encoding` when chosen. `None` for notices.
	pub encoding: Option<String>,
	/// Entry matches the declared encoding.
	pub selected: bool,
	pub enabled: bool,
}

/// Builds the encoding menu for `snapshot`, highest confidence last.
///
/// Returns no entries when there are no candidates. While `dirty`, every
/// candidate is disabled and a disabled notice comes first.
pub fn encoding_menu(snapshot: &EncodingSnapshot, dirty: bool) -> Vec<MenuEntry> {
	let Some(candidates) = snapshot.detected_candidates() else {
		return Vec::new();
	};
	let declared = snapshot.declared_encoding();

	let mut entries = Vec::with_capacity(candidates.len() + 1);
	if dirty {
		entries.push(MenuEntry {
			label: SAVE_FIRST.to_owned(),
			encoding: None,
			selected: false,
			enabled: false,
		});
	}
	entries.extend(candidates.iter().rev().map(|candidate| MenuEntry {
		label: format!("{}\t(Confidence:{}%)", candidate.name(), candidate.confidence()),
		encoding: Some(candidate.name().to_owned()),
		selected: declared.is_some_and(|declared| are_equivalent(candidate.name(), declared)),
		enabled: !dirty,
	}));
	entries
}
