//! Capability-selected document sources.
//!
//! A [`DocumentSource`] wraps the active document with the strategy matching
//! what the document can do. [`DocumentSource::resolve`] is the only place a
//! variant is chosen; it tries the variants in priority order:
//!
//! 1. No document, or no encoding setting: [`VariantKind::None`].
//! 2. Bytes inside the tracked workspace: [`VariantKind::Workspace`].
//! 3. Bytes outside the workspace: [`VariantKind::NonWorkspace`].
//! 4. Read-only bytes: [`VariantKind::Storage`].
//! 5. Encoding setting but no bytes: [`VariantKind::Generic`].
//!
//! Variants are composed rather than layered: every variant with an encoding
//! setting holds the same declared-encoding state, and byte-backed variants
//! add detection on top.

mod bytes;
mod encoded;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use self::bytes::ByteBacked;
use self::encoded::EncodedDocument;
use crate::error::EncodingError;
use crate::host::{DocumentId, DocumentInput, HostDocument, ResourcePath};
use crate::snapshot::EncodingSnapshot;

/// Which strategy a [`DocumentSource`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantKind {
	None,
	Workspace,
	NonWorkspace,
	Storage,
	Generic,
}

/// The active document, wrapped in its capability-specific strategy.
pub enum DocumentSource {
	/// Queries return nothing, changes are ignored. Still remembers the
	/// document it stands for so that identity checks work.
	None(Option<Arc<dyn HostDocument>>),
	/// Re-detects from live workspace bytes. Encoding changes are confirmed
	/// by the host's resource feed, not synchronously.
	Workspace(ByteBacked),
	/// Re-detects from bytes outside the workspace. No feed exists, so
	/// encoding changes refresh synchronously.
	NonWorkspace(ByteBacked),
	/// Detection only; encoding changes are unsupported.
	Storage(ByteBacked),
	/// Declared encoding only.
	Generic(EncodedDocument),
}

impl DocumentSource {
	/// Picks and builds the most capable variant for `document`.
	pub fn resolve(document: Option<Arc<dyn HostDocument>>) -> Self {
		let Some(document) = document else {
			return Self::None(None);
		};
		let Some(accessor) = document.encoding() else {
			return Self::None(Some(document));
		};
		let input = document.input();
		let base = EncodedDocument::new(document, accessor);
		let source = match input {
			DocumentInput::Workspace { resource, bytes } => Self::Workspace(ByteBacked::new(base, bytes, Some(resource))),
			DocumentInput::External { bytes } => Self::NonWorkspace(ByteBacked::new(base, bytes, None)),
			DocumentInput::Storage { bytes } => Self::Storage(ByteBacked::new(base, bytes, None)),
			DocumentInput::Opaque => Self::Generic(base),
		};
		tracing::debug!(doc = ?source.underlying_identity(), kind = ?source.kind(), "resolved document source");
		source
	}

	/// Source for "no active document".
	pub fn none() -> Self {
		Self::None(None)
	}

	pub fn kind(&self) -> VariantKind {
		match self {
			Self::None(_) => VariantKind::None,
			Self::Workspace(_) => VariantKind::Workspace,
			Self::NonWorkspace(_) => VariantKind::NonWorkspace,
			Self::Storage(_) => VariantKind::Storage,
			Self::Generic(_) => VariantKind::Generic,
		}
	}

	/// Identity of the wrapped document. The tracker compares it with the
	/// host's active document to decide whether this source is still current.
	pub fn underlying_identity(&self) -> Option<DocumentId> {
		self.document().map(|document| document.id())
	}

	pub fn name(&self) -> Option<&str> {
		self.encoded().and_then(EncodedDocument::name)
	}

	pub fn declared_encoding(&self) -> Option<&str> {
		self.encoded().and_then(EncodedDocument::declared)
	}

	pub fn snapshot(&self) -> EncodingSnapshot {
		match self {
			Self::None(_) => EncodingSnapshot::empty(),
			Self::Workspace(backed) | Self::NonWorkspace(backed) | Self::Storage(backed) => backed.snapshot().clone(),
			Self::Generic(encoded) => encoded.snapshot(),
		}
	}

	/// Workspace resource whose changes concern this source.
	pub fn tracked_resource(&self) -> Option<&ResourcePath> {
		match self {
			Self::Workspace(backed) => backed.resource(),
			_ => None,
		}
	}

	pub fn is_dirty(&self) -> bool {
		self.document().is_some_and(|document| document.is_dirty())
	}

	/// Recomputes the encoding state. Returns true if anything observable
	/// changed.
	///
	/// Suppressed while the document is dirty: the on-disk bytes are stale
	/// relative to the editor contents and the declared encoding of an
	/// unsaved document is not settled yet.
	pub fn refresh(&mut self) -> bool {
		if self.is_dirty() {
			tracing::trace!(doc = ?self.underlying_identity(), "refresh suppressed for dirty document");
			return false;
		}
		self.update()
	}

	/// Requests a new declared encoding.
	///
	/// Returns `Ok(true)` if the change is already reflected in
	/// [`Self::snapshot`] and the observer should be told. The Workspace
	/// variant returns `Ok(false)`: its state updates when the host reports
	/// the resource change that persisting triggers. On failure the current
	/// state is left as it was.
	pub fn set_declared_encoding(&mut self, encoding: &str) -> Result<bool, EncodingError> {
		match self {
			Self::None(_) => Ok(false),
			Self::Storage(_) => Err(EncodingError::Unsupported),
			Self::Workspace(backed) => {
				backed.persist(encoding)?;
				Ok(false)
			}
			Self::NonWorkspace(backed) => {
				backed.persist(encoding)?;
				Ok(backed.update())
			}
			Self::Generic(encoded) => {
				encoded.persist(encoding)?;
				Ok(encoded.update())
			}
		}
	}

	fn update(&mut self) -> bool {
		match self {
			Self::None(_) => false,
			Self::Workspace(backed) | Self::NonWorkspace(backed) | Self::Storage(backed) => backed.update(),
			Self::Generic(encoded) => encoded.update(),
		}
	}

	fn encoded(&self) -> Option<&EncodedDocument> {
		match self {
			Self::None(_) => None,
			Self::Workspace(backed) | Self::NonWorkspace(backed) | Self::Storage(backed) => Some(backed.base()),
			Self::Generic(encoded) => Some(encoded),
		}
	}

	fn document(&self) -> Option<&Arc<dyn HostDocument>> {
		match self {
			Self::None(document) => document.as_ref(),
			_ => self.encoded().map(EncodedDocument::document),
		}
	}
}

impl std::fmt::Debug for DocumentSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DocumentSource")
			.field("kind", &self.kind())
			.field("doc", &self.underlying_identity())
			.finish()
	}
}
