use std::sync::Arc;

use encinfo_charset::{CharsetCandidate, detect_bytes, is_decodable_reader, read_all};

use super::encoded::EncodedDocument;
use crate::error::EncodingError;
use crate::host::{ByteSource, ResourcePath};
use crate::snapshot::EncodingSnapshot;

/// Declared-encoding state plus detection over the document's bytes.
///
/// Backs the Workspace, Non-workspace and Storage variants; they differ only
/// in how a new encoding is persisted and in whether a resource is tracked.
pub struct ByteBacked {
	base: EncodedDocument,
	bytes: Arc<dyn ByteSource>,
	resource: Option<ResourcePath>,
	snapshot: EncodingSnapshot,
}

impl ByteBacked {
	pub(crate) fn new(base: EncodedDocument, bytes: Arc<dyn ByteSource>, resource: Option<ResourcePath>) -> Self {
		let mut backed = Self {
			base,
			bytes,
			resource,
			snapshot: EncodingSnapshot::empty(),
		};
		backed.snapshot = backed.detect();
		backed
	}

	pub(crate) fn base(&self) -> &EncodedDocument {
		&self.base
	}

	pub(crate) fn resource(&self) -> Option<&ResourcePath> {
		self.resource.as_ref()
	}

	pub(crate) fn snapshot(&self) -> &EncodingSnapshot {
		&self.snapshot
	}

	/// Re-reads the declared encoding and re-runs detection. Both parts are
	/// always evaluated; the result is true if either observed a change.
	pub(crate) fn update(&mut self) -> bool {
		let declared_changed = self.base.update();
		let detection_changed = self.update_detection();
		declared_changed | detection_changed
	}

	pub(crate) fn persist(&self, encoding: &str) -> Result<(), EncodingError> {
		self.base.persist(encoding)
	}

	fn update_detection(&mut self) -> bool {
		let next = self.detect();
		let changed = next.detected_candidates() != self.snapshot.detected_candidates()
			|| next.reconciled_confidence() != self.snapshot.reconciled_confidence();
		self.snapshot = next;
		changed
	}

	fn detect(&self) -> EncodingSnapshot {
		let candidates = match self.read_candidates() {
			Ok(candidates) => Some(candidates),
			Err(error) => {
				tracing::warn!(doc = ?self.base.document().id(), %error, "document bytes unavailable, detection skipped");
				None
			}
		};
		EncodingSnapshot::evaluate(
			self.base.name().map(str::to_owned),
			self.base.declared().map(str::to_owned),
			candidates,
			|charset| self.decodes_as(charset),
		)
	}

	fn read_candidates(&self) -> Result<Vec<CharsetCandidate>, EncodingError> {
		let content = read_all(self.bytes.open_read()?)?;
		Ok(detect_bytes(&content))
	}

	/// Second, independent read: the detector may not have looked at every byte.
	fn decodes_as(&self, charset: &str) -> bool {
		match self.bytes.open_read() {
			Ok(reader) => is_decodable_reader(reader, charset),
			Err(error) => {
				tracing::debug!(doc = ?self.base.document().id(), %error, "document bytes unavailable for decoding");
				false
			}
		}
	}
}
