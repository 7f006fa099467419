//! Encoding information for whatever document the user is looking at.
//!
//! [`ActiveDocumentTracker`] follows the host's active document, picks the
//! [`DocumentSource`] variant matching the document's capabilities, and tells
//! its observer once per observable change. Observers read the current
//! [`EncodingSnapshot`] and render it however they like.

/// Error types for encoding changes and byte access.
pub mod error;
/// Capabilities the host environment provides.
pub mod host;
/// Immutable encoding snapshots handed to observers.
pub mod snapshot;
/// Capability-specific document sources.
pub mod source;
/// Active-document state machine.
pub mod tracker;

#[cfg(test)]
mod test_host;

pub use error::{EncodingError, HostError};
pub use host::{
	ByteSource, DocumentId, DocumentInput, EncodingAccessor, EncodingSetting, FileBytes, Host, HostDocument, HostEvent,
	PropertyKind, ResourcePath, Subscription, Topic,
};
pub use snapshot::EncodingSnapshot;
pub use source::{DocumentSource, VariantKind};
pub use tracker::ActiveDocumentTracker;
