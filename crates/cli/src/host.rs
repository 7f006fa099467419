//! Single-document host over the filesystem.
//!
//! A command-line run has no editor around it: the "active document" is the
//! file being reported on, its bytes live outside any tracked workspace, and
//! nothing ever changes behind the tracker's back. Subscriptions are
//! therefore detached.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use encinfo_agent::{
	ByteSource, DocumentId, DocumentInput, EncodingAccessor, EncodingSetting, FileBytes, Host, HostDocument, Subscription, Topic,
};

pub struct FileDocument {
	id: DocumentId,
	bytes: Arc<FileBytes>,
	setting: Arc<EncodingSetting>,
}

impl FileDocument {
	pub fn new(id: u64, path: impl Into<PathBuf>, default_encoding: &str) -> Self {
		Self {
			id: DocumentId(id),
			bytes: Arc::new(FileBytes::new(path)),
			setting: Arc::new(EncodingSetting::new(None, Some(default_encoding.to_owned()))),
		}
	}

	pub fn path(&self) -> &Path {
		self.bytes.path()
	}
}

impl HostDocument for FileDocument {
	fn id(&self) -> DocumentId {
		self.id
	}

	fn name(&self) -> Option<String> {
		self.path().file_name().map(|name| name.to_string_lossy().into_owned())
	}

	fn is_dirty(&self) -> bool {
		false
	}

	fn encoding(&self) -> Option<Arc<dyn EncodingAccessor>> {
		Some(Arc::clone(&self.setting) as Arc<dyn EncodingAccessor>)
	}

	fn input(&self) -> DocumentInput {
		DocumentInput::External {
			bytes: Arc::clone(&self.bytes) as Arc<dyn ByteSource>,
		}
	}
}

/// Host whose active document never changes.
pub struct FileHost {
	document: Arc<FileDocument>,
}

impl FileHost {
	pub fn new(document: FileDocument) -> Arc<Self> {
		Arc::new(Self {
			document: Arc::new(document),
		})
	}
}

impl Host for FileHost {
	fn active_document(&self) -> Option<Arc<dyn HostDocument>> {
		Some(Arc::clone(&self.document) as Arc<dyn HostDocument>)
	}

	fn subscribe(&self, topic: Topic) -> Subscription {
		tracing::trace!(?topic, "file host has no change feeds");
		Subscription::detached()
	}
}
