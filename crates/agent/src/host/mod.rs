//! Host capabilities.
//!
//! The tracker never talks to a concrete editor. Everything it needs from the
//! host environment is expressed here: which document is active, what that
//! document can do, where its bytes live, and how to subscribe to the host's
//! change feeds.

mod fs;
mod setting;
mod subscription;

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

pub use fs::FileBytes;
pub use setting::EncodingSetting;
pub use subscription::Subscription;

use crate::error::HostError;

/// Opaque identity of a host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Path of a resource inside the host's tracked workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(PathBuf);

impl ResourcePath {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self(path.into())
	}

	/// Returns true if a change reported at `changed` affects this resource:
	/// the resource itself or one of its ancestors changed.
	pub fn is_affected_by(&self, changed: &ResourcePath) -> bool {
		self.0.starts_with(&changed.0)
	}
}

/// Persisted bytes of a document.
///
/// Every call opens a fresh stream; callers read it to the end and drop it.
/// Implementations must tolerate being opened repeatedly.
pub trait ByteSource: Send + Sync {
	fn open_read(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Read/write access to a document's declared encoding setting.
pub trait EncodingAccessor: Send + Sync {
	/// Encoding explicitly declared for the document.
	fn declared(&self) -> Option<String>;
	/// Encoding the host falls back to when nothing is declared.
	fn default_encoding(&self) -> Option<String>;
	/// Persists a new declared encoding.
	fn set(&self, encoding: &str) -> Result<(), HostError>;
}

/// How a document's content is backed.
#[derive(Clone)]
pub enum DocumentInput {
	/// Addressable bytes inside the tracked workspace. The host reports
	/// changes to `resource` through the [`Topic::Resources`] feed.
	Workspace { resource: ResourcePath, bytes: Arc<dyn ByteSource> },
	/// Addressable bytes outside the workspace, with no change feed.
	External { bytes: Arc<dyn ByteSource> },
	/// Read-only bytes without write-back (history or comparison views).
	Storage { bytes: Arc<dyn ByteSource> },
	/// No byte access.
	Opaque,
}

impl std::fmt::Debug for DocumentInput {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Workspace { resource, .. } => f.debug_struct("Workspace").field("resource", resource).finish_non_exhaustive(),
			Self::External { .. } => f.write_str("External"),
			Self::Storage { .. } => f.write_str("Storage"),
			Self::Opaque => f.write_str("Opaque"),
		}
	}
}

/// A document as exposed by the host.
pub trait HostDocument: Send + Sync {
	fn id(&self) -> DocumentId;
	/// Display name, usually the file name.
	fn name(&self) -> Option<String>;
	/// Whether the document has unsaved modifications.
	fn is_dirty(&self) -> bool;
	/// Encoding setting, if the document supports one.
	fn encoding(&self) -> Option<Arc<dyn EncodingAccessor>>;
	/// Current content backing. May change over the document's lifetime;
	/// the host then reports a [`PropertyKind::Input`] change.
	fn input(&self) -> DocumentInput;
}

/// Host change feeds a tracker can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
	/// Active document and selection changes.
	Activation,
	/// Workspace resource changes.
	Resources,
	/// Property changes of one document.
	Properties(DocumentId),
}

/// The host environment.
pub trait Host: Send + Sync {
	/// Document currently active in the host, if any.
	fn active_document(&self) -> Option<Arc<dyn HostDocument>>;
	/// Registers interest in a feed until the returned guard is dropped.
	fn subscribe(&self, topic: Topic) -> Subscription;
}

/// Kind of a document property change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
	/// The document's input was replaced.
	Input,
	/// The dirty flag flipped, typically on save.
	Dirty,
	/// Any other property.
	Other(u32),
}

/// A notification delivered by one of the host feeds.
#[derive(Debug, Clone)]
pub enum HostEvent {
	/// Activation or selection changed; the active document may differ.
	Activation,
	/// A property of `document` changed.
	Property { document: DocumentId, kind: PropertyKind },
	/// Workspace resources changed.
	Resources(Vec<ResourcePath>),
}
