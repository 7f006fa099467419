//! Per-file reports.

use std::path::{Path, PathBuf};

use anyhow::Context;
use encinfo_agent::{ActiveDocumentTracker, EncodingSnapshot};
use encinfo_charset::canonical_name;
use encinfo_status::{MenuEntry, SegmentStyle, StatusOptions, StatusSegment, encoding_menu, status_segment};
use serde::Serialize;

use crate::host::{FileDocument, FileHost};

/// Settings shared by every file of one run.
#[derive(Debug, Clone)]
pub struct ReportOptions {
	pub default_encoding: String,
	/// Encoding to declare before reporting.
	pub encoding: Option<String>,
	pub status: StatusOptions,
	pub show_candidates: bool,
}

#[derive(Debug, Serialize)]
pub struct FileReport {
	pub path: PathBuf,
	pub snapshot: EncodingSnapshot,
	pub status: Option<StatusSegment>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub menu: Vec<MenuEntry>,
}

/// Runs a tracker over `path` and collects what a status bar would show.
pub fn inspect(id: u64, path: &Path, options: &ReportOptions) -> anyhow::Result<FileReport> {
	let host = FileHost::new(FileDocument::new(id, path, &options.default_encoding));
	let mut tracker = ActiveDocumentTracker::new(host, |snapshot: &EncodingSnapshot| {
		tracing::info!(declared = ?snapshot.declared_encoding(), "declared encoding changed");
	});
	tracker.start();

	if let Some(encoding) = &options.encoding {
		tracker
			.set_encoding(encoding)
			.with_context(|| format!("setting encoding of {}", path.display()))?;
	}

	let snapshot = tracker.current_snapshot();
	let menu = if options.show_candidates {
		encoding_menu(&snapshot, tracker.is_document_dirty())
	} else {
		Vec::new()
	};
	tracker.stop();

	Ok(FileReport {
		path: path.to_path_buf(),
		status: status_segment(&snapshot, &options.status),
		snapshot,
		menu,
	})
}

/// Fails if `encoding` is not a charset name the detector understands.
pub fn validate_encoding(encoding: &str) -> anyhow::Result<()> {
	canonical_name(encoding).with_context(|| format!("--encoding {encoding}"))?;
	Ok(())
}

/// Plain-text rendering: one label line, then the menu indented.
pub fn render_text(report: &FileReport) -> String {
	let mut out = format!("{}: ", report.path.display());
	match &report.status {
		Some(segment) => {
			out.push_str(&segment.text);
			if segment.style == SegmentStyle::Warning {
				out.push_str(" [warning]");
			}
		}
		None => out.push('-'),
	}
	for entry in &report.menu {
		let mark = match (entry.enabled, entry.selected) {
			(_, true) => "[x]",
			(true, false) => "[ ]",
			(false, false) => "   ",
		};
		out.push_str(&format!("\n  {mark} {}", entry.label));
	}
	out
}
