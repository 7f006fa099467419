use std::sync::Arc;

use crate::error::EncodingError;
use crate::host::{EncodingAccessor, HostDocument};
use crate::snapshot::EncodingSnapshot;

/// Declared-encoding state shared by every variant that has an encoding
/// setting. On its own it is the Generic variant.
pub struct EncodedDocument {
	document: Arc<dyn HostDocument>,
	accessor: Arc<dyn EncodingAccessor>,
	name: Option<String>,
	declared: Option<String>,
}

impl EncodedDocument {
	pub(crate) fn new(document: Arc<dyn HostDocument>, accessor: Arc<dyn EncodingAccessor>) -> Self {
		let name = document.name();
		let declared = read_declared(accessor.as_ref());
		Self {
			document,
			accessor,
			name,
			declared,
		}
	}

	pub(crate) fn document(&self) -> &Arc<dyn HostDocument> {
		&self.document
	}

	pub(crate) fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub(crate) fn declared(&self) -> Option<&str> {
		self.declared.as_deref()
	}

	pub(crate) fn snapshot(&self) -> EncodingSnapshot {
		EncodingSnapshot::undetected(self.name.clone(), self.declared.clone())
	}

	/// Re-reads name and declared encoding. Returns true if either changed.
	pub(crate) fn update(&mut self) -> bool {
		let name = self.document.name();
		let declared = read_declared(self.accessor.as_ref());
		let changed = name != self.name || declared != self.declared;
		self.name = name;
		self.declared = declared;
		changed
	}

	/// Hands the new encoding to the host. Local state is left untouched.
	pub(crate) fn persist(&self, encoding: &str) -> Result<(), EncodingError> {
		self.accessor.set(encoding).map_err(|source| {
			tracing::warn!(doc = ?self.document.id(), encoding, error = %source, "failed to persist encoding");
			EncodingError::PersistFailed {
				encoding: encoding.to_owned(),
				source,
			}
		})
	}
}

/// Declared encoding, falling back to the host default.
fn read_declared(accessor: &dyn EncodingAccessor) -> Option<String> {
	accessor.declared().or_else(|| accessor.default_encoding())
}
