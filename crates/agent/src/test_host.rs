//! In-memory host used by the unit tests.

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::error::HostError;
use crate::host::{
	ByteSource, DocumentId, DocumentInput, EncodingAccessor, Host, HostDocument, ResourcePath, Subscription, Topic,
};
use crate::snapshot::EncodingSnapshot;

#[derive(Default)]
struct HostState {
	active: Option<Arc<TestDocument>>,
	live: BTreeMap<u64, Topic>,
	next_token: u64,
}

/// Host with a settable active document that records live subscriptions.
#[derive(Default)]
pub(crate) struct TestHost {
	state: Arc<Mutex<HostState>>,
}

impl TestHost {
	pub(crate) fn new() -> Arc<Self> {
		Arc::new(Self::default())
	}

	pub(crate) fn activate(&self, document: Option<&Arc<TestDocument>>) {
		self.state.lock().active = document.cloned();
	}

	pub(crate) fn live_topics(&self) -> Vec<Topic> {
		self.state.lock().live.values().copied().collect()
	}

	pub(crate) fn is_subscribed(&self, topic: Topic) -> bool {
		self.state.lock().live.values().any(|live| *live == topic)
	}
}

impl Host for TestHost {
	fn active_document(&self) -> Option<Arc<dyn HostDocument>> {
		let active = self.state.lock().active.clone();
		active.map(|document| document as Arc<dyn HostDocument>)
	}

	fn subscribe(&self, topic: Topic) -> Subscription {
		let token = {
			let mut state = self.state.lock();
			let token = state.next_token;
			state.next_token += 1;
			state.live.insert(token, topic);
			token
		};
		let state = Arc::clone(&self.state);
		Subscription::new(move || {
			state.lock().live.remove(&token);
		})
	}
}

/// Content that can be replaced or deleted, counting how often it is opened.
#[derive(Default)]
pub(crate) struct MemoryBytes {
	content: Mutex<Option<Vec<u8>>>,
	opens: AtomicUsize,
}

impl MemoryBytes {
	pub(crate) fn opens(&self) -> usize {
		self.opens.load(Ordering::SeqCst)
	}
}

impl ByteSource for MemoryBytes {
	fn open_read(&self) -> io::Result<Box<dyn Read + '_>> {
		self.opens.fetch_add(1, Ordering::SeqCst);
		match self.content.lock().clone() {
			Some(content) => Ok(Box::new(Cursor::new(content))),
			None => Err(io::Error::new(io::ErrorKind::NotFound, "deleted")),
		}
	}
}

/// Encoding setting that can be told to reject writes.
#[derive(Default)]
pub(crate) struct TestAccessor {
	declared: Mutex<Option<String>>,
	default: Option<String>,
	reject: AtomicBool,
	writes: AtomicUsize,
}

impl TestAccessor {
	pub(crate) fn reject_writes(&self) {
		self.reject.store(true, Ordering::SeqCst);
	}

	pub(crate) fn writes(&self) -> usize {
		self.writes.load(Ordering::SeqCst)
	}

	/// Changes the setting behind the tracker's back, as another host view would.
	pub(crate) fn overwrite(&self, encoding: Option<&str>) {
		*self.declared.lock() = encoding.map(str::to_owned);
	}
}

impl EncodingAccessor for TestAccessor {
	fn declared(&self) -> Option<String> {
		self.declared.lock().clone()
	}

	fn default_encoding(&self) -> Option<String> {
		self.default.clone()
	}

	fn set(&self, encoding: &str) -> Result<(), HostError> {
		self.writes.fetch_add(1, Ordering::SeqCst);
		if self.reject.load(Ordering::SeqCst) {
			return Err(HostError::Rejected("setting is locked".into()));
		}
		*self.declared.lock() = Some(encoding.to_owned());
		Ok(())
	}
}

/// Input backing a [`TestDocument`].
#[derive(Debug, Clone)]
pub(crate) enum TestInput {
	Workspace(ResourcePath),
	External,
	Storage,
	Opaque,
}

pub(crate) struct TestDocument {
	id: DocumentId,
	dirty: AtomicBool,
	accessor: Option<Arc<TestAccessor>>,
	input: Mutex<TestInput>,
	bytes: Arc<MemoryBytes>,
}

impl TestDocument {
	fn build(id: u64, input: TestInput, content: &[u8], accessor: Option<TestAccessor>) -> Arc<Self> {
		Arc::new(Self {
			id: DocumentId(id),
			dirty: AtomicBool::new(false),
			accessor: accessor.map(Arc::new),
			input: Mutex::new(input),
			bytes: Arc::new(MemoryBytes {
				content: Mutex::new(Some(content.to_vec())),
				opens: AtomicUsize::new(0),
			}),
		})
	}

	fn accessor_with(declared: Option<&str>) -> TestAccessor {
		TestAccessor {
			declared: Mutex::new(declared.map(str::to_owned)),
			default: Some("UTF-8".into()),
			..TestAccessor::default()
		}
	}

	pub(crate) fn workspace(id: u64, content: &[u8], declared: Option<&str>) -> Arc<Self> {
		let resource = ResourcePath::new(format!("/project/doc-{id}.txt"));
		Self::build(id, TestInput::Workspace(resource), content, Some(Self::accessor_with(declared)))
	}

	pub(crate) fn external(id: u64, content: &[u8], declared: Option<&str>) -> Arc<Self> {
		Self::build(id, TestInput::External, content, Some(Self::accessor_with(declared)))
	}

	pub(crate) fn storage(id: u64, content: &[u8], declared: Option<&str>) -> Arc<Self> {
		Self::build(id, TestInput::Storage, content, Some(Self::accessor_with(declared)))
	}

	pub(crate) fn generic(id: u64, declared: Option<&str>) -> Arc<Self> {
		Self::build(id, TestInput::Opaque, b"", Some(Self::accessor_with(declared)))
	}

	/// A document without an encoding setting, e.g. an image viewer.
	pub(crate) fn plain(id: u64) -> Arc<Self> {
		Self::build(id, TestInput::External, b"\x89PNG", None)
	}

	pub(crate) fn id(&self) -> DocumentId {
		self.id
	}

	pub(crate) fn resource(&self) -> Option<ResourcePath> {
		match &*self.input.lock() {
			TestInput::Workspace(resource) => Some(resource.clone()),
			_ => None,
		}
	}

	pub(crate) fn accessor(&self) -> &Arc<TestAccessor> {
		self.accessor.as_ref().expect("document has no encoding setting")
	}

	pub(crate) fn bytes(&self) -> &Arc<MemoryBytes> {
		&self.bytes
	}

	pub(crate) fn set_dirty(&self, dirty: bool) {
		self.dirty.store(dirty, Ordering::SeqCst);
	}

	pub(crate) fn set_input(&self, input: TestInput) {
		*self.input.lock() = input;
	}

	pub(crate) fn write_bytes(&self, content: &[u8]) {
		*self.bytes.content.lock() = Some(content.to_vec());
	}

	pub(crate) fn delete_bytes(&self) {
		*self.bytes.content.lock() = None;
	}
}

impl HostDocument for TestDocument {
	fn id(&self) -> DocumentId {
		self.id
	}

	fn name(&self) -> Option<String> {
		Some(format!("doc-{}.txt", self.id.0))
	}

	fn is_dirty(&self) -> bool {
		self.dirty.load(Ordering::SeqCst)
	}

	fn encoding(&self) -> Option<Arc<dyn EncodingAccessor>> {
		self.accessor.clone().map(|accessor| accessor as Arc<dyn EncodingAccessor>)
	}

	fn input(&self) -> DocumentInput {
		let bytes = Arc::clone(&self.bytes) as Arc<dyn ByteSource>;
		match self.input.lock().clone() {
			TestInput::Workspace(resource) => DocumentInput::Workspace { resource, bytes },
			TestInput::External => DocumentInput::External { bytes },
			TestInput::Storage => DocumentInput::Storage { bytes },
			TestInput::Opaque => DocumentInput::Opaque,
		}
	}
}

/// Observer that keeps every snapshot it is handed.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
	seen: Arc<Mutex<Vec<EncodingSnapshot>>>,
}

impl Recorder {
	pub(crate) fn observer(&self) -> impl FnMut(&EncodingSnapshot) + Send + 'static {
		let seen = Arc::clone(&self.seen);
		move |snapshot: &EncodingSnapshot| seen.lock().push(snapshot.clone())
	}

	pub(crate) fn count(&self) -> usize {
		self.seen.lock().len()
	}

	pub(crate) fn last(&self) -> Option<EncodingSnapshot> {
		self.seen.lock().last().cloned()
	}
}
