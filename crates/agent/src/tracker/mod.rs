//! Active-document encoding tracker.
//!
//! # Purpose
//!
//! * Follows the host's active document and keeps one [`DocumentSource`] for it.
//! * Re-resolves the source variant whenever the active document (or its input) changes.
//! * Tells a single observer once per observable change; the observer re-reads
//!   [`ActiveDocumentTracker::current_snapshot`].
//!
//! # Mental model
//!
//! * Two states:
//!   * Stopped: no subscriptions, source is the None-variant.
//!   * Running: subscribed to the activation and resource feeds, plus the
//!     property feed of the current document.
//! * The source is replaced, never patched: detach the old document's
//!   property subscription, resolve the new source, attach its subscription.
//! * Every host event runs to completion on the calling thread. Refreshing a
//!   byte-backed source reads the document twice (detection, then a full decode).
//!
//! # Key types
//!
//! | Type | Meaning | Constraints | Constructed / mutated in |
//! |---|---|---|---|
//! | [`ActiveDocumentTracker`] | State machine + observer | Must fire at most one notification per event | this module |
//! | [`DocumentSource`] | Current capability-specific strategy | Exactly one alive; replaced atomically | `replace_source` |
//! | [`Subscription`] | Scoped host feed registration | At most one property subscription alive | `start`, `stop`, `replace_source` |
//! | [`HostEvent`] | Feed notification | Ignored while stopped | `handle` |
//!
//! # Invariants
//!
//! * Must not notify on `start` or `stop`.
//! * Must notify exactly once when the active document identity changes.
//! * Must re-resolve from the host when a property event names a document other than the current one.
//! * Must only refresh on resource events that affect the tracked resource.
//! * Must hold no subscription after `stop`.
//!
//! # Lifecycle
//!
//! * Create with [`ActiveDocumentTracker::new`].
//! * Call `start`, then read `current_snapshot`.
//! * Forward host feed notifications through `handle` or the `on_*` methods.
//! * Call `stop` before disposal; dropping a running tracker also releases its subscriptions.
//!
//! # Failure modes & recovery
//!
//! * Unreadable bytes: the source reports no candidates and zero confidence until the next event.
//! * Persist failure: `set_encoding` returns the error and the snapshot stays as it was.
//! * Late events about a previous document: treated as an activation change.


use std::sync::Arc;

use crate::error::EncodingError;
use crate::host::{DocumentId, Host, HostDocument, HostEvent, PropertyKind, ResourcePath, Subscription, Topic};
use crate::snapshot::EncodingSnapshot;
use crate::source::{DocumentSource, VariantKind};

type Observer = Box<dyn FnMut(&EncodingSnapshot) + Send>;

enum TrackerState {
	Stopped,
	Running {
		_activation: Subscription,
		_resources: Subscription,
	},
}

/// Tracks the encoding of the host's active document for one observer.
pub struct ActiveDocumentTracker {
	host: Arc<dyn Host>,
	observer: Observer,
	state: TrackerState,
	source: DocumentSource,
	properties: Option<Subscription>,
}

impl ActiveDocumentTracker {
	/// Creates a stopped tracker. `observer` is called with the new snapshot
	/// after every observable change.
	pub fn new(host: Arc<dyn Host>, observer: impl FnMut(&EncodingSnapshot) + Send + 'static) -> Self {
		Self {
			host,
			observer: Box::new(observer),
			state: TrackerState::Stopped,
			source: DocumentSource::none(),
			properties: None,
		}
	}

	pub fn is_running(&self) -> bool {
		matches!(self.state, TrackerState::Running { .. })
	}

	/// Subscribes to the host feeds and resolves the source for the document
	/// active right now. Does not notify.
	pub fn start(&mut self) {
		if self.is_running() {
			return;
		}
		self.state = TrackerState::Running {
			_activation: self.host.subscribe(Topic::Activation),
			_resources: self.host.subscribe(Topic::Resources),
		};
		self.replace_source(self.host.active_document());
		tracing::debug!(doc = ?self.source.underlying_identity(), kind = ?self.source.kind(), "encoding tracker started");
	}

	/// Releases every subscription and reverts to the None-variant. Does not
	/// notify.
	pub fn stop(&mut self) {
		if !self.is_running() {
			return;
		}
		self.state = TrackerState::Stopped;
		self.replace_source(None);
		tracing::debug!("encoding tracker stopped");
	}

	pub fn current_snapshot(&self) -> EncodingSnapshot {
		self.source.snapshot()
	}

	pub fn current_variant(&self) -> VariantKind {
		self.source.kind()
	}

	/// Whether the active document has unsaved changes. Front ends disable
	/// encoding changes while this is true.
	pub fn is_document_dirty(&self) -> bool {
		self.source.is_dirty()
	}

	/// Declares a new encoding for the active document.
	///
	/// Notifies synchronously when the change is already visible. For
	/// workspace documents the notification follows the host's resource event.
	pub fn set_encoding(&mut self, encoding: &str) -> Result<(), EncodingError> {
		if self.source.set_declared_encoding(encoding)? {
			self.notify();
		}
		Ok(())
	}

	/// Dispatches one host feed notification. Returns true if the observer
	/// was notified.
	pub fn handle(&mut self, event: HostEvent) -> bool {
		match event {
			HostEvent::Activation => {
				let active = self.host.active_document();
				self.on_active_document_changed(active)
			}
			HostEvent::Property { document, kind } => self.on_property_changed(document, kind),
			HostEvent::Resources(changed) => self.on_resource_changed(&changed),
		}
	}

	/// Switches to `active` if it is not the document already tracked.
	pub fn on_active_document_changed(&mut self, active: Option<Arc<dyn HostDocument>>) -> bool {
		if !self.is_running() {
			return false;
		}
		let identity = active.as_ref().map(|document| document.id());
		if identity == self.source.underlying_identity() {
			return false;
		}
		self.replace_source(active);
		self.notify();
		true
	}

	/// Handles a property change of `document`.
	///
	/// An event about another document means the tracked source is stale and
	/// is handled as an activation change. An input change re-resolves the
	/// variant for the same document. Anything else refreshes the source.
	pub fn on_property_changed(&mut self, document: DocumentId, kind: PropertyKind) -> bool {
		if !self.is_running() {
			return false;
		}
		if Some(document) != self.source.underlying_identity() {
			tracing::debug!(doc = ?document, current = ?self.source.underlying_identity(), "property event for untracked document");
			let active = self.host.active_document();
			return self.on_active_document_changed(active);
		}
		if kind == PropertyKind::Input {
			self.replace_source(self.host.active_document());
			self.notify();
			return true;
		}
		self.refresh()
	}

	/// Refreshes the source if any of `changed` affects its tracked resource.
	pub fn on_resource_changed(&mut self, changed: &[ResourcePath]) -> bool {
		if !self.is_running() {
			return false;
		}
		let affected = self
			.source
			.tracked_resource()
			.is_some_and(|resource| changed.iter().any(|path| resource.is_affected_by(path)));
		if !affected {
			return false;
		}
		self.refresh()
	}

	fn refresh(&mut self) -> bool {
		if !self.source.refresh() {
			return false;
		}
		self.notify();
		true
	}

	/// Detaches the old source's property subscription, then resolves and
	/// attaches the new one. Never leaves two documents subscribed.
	fn replace_source(&mut self, document: Option<Arc<dyn HostDocument>>) {
		self.properties = None;
		self.source = DocumentSource::resolve(document);
		if self.is_running()
			&& let Some(id) = self.source.underlying_identity()
		{
			self.properties = Some(self.host.subscribe(Topic::Properties(id)));
		}
	}

	fn notify(&mut self) {
		let snapshot = self.source.snapshot();
		tracing::debug!(
			doc = ?self.source.underlying_identity(),
			declared = ?snapshot.declared_encoding(),
			confidence = snapshot.reconciled_confidence(),
			"encoding info changed"
		);
		(self.observer)(&snapshot);
	}
}
