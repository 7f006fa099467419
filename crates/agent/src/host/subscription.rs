use std::fmt;

/// Scoped registration on a host feed.
///
/// Dropping the guard cancels the registration exactly once.
#[must_use = "dropping a subscription cancels it immediately"]
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
	/// Creates a guard that runs `cancel` when dropped.
	pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Creates a guard with nothing to cancel, for hosts without the feed.
	pub fn detached() -> Self {
		Self { cancel: None }
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription")
			.field("attached", &self.cancel.is_some())
			.finish()
	}
}
