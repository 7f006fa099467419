use parking_lot::Mutex;

use super::EncodingAccessor;
use crate::error::HostError;

/// In-memory encoding setting with an optional host default.
#[derive(Debug, Default)]
pub struct EncodingSetting {
	declared: Mutex<Option<String>>,
	default: Option<String>,
}

impl EncodingSetting {
	pub fn new(declared: Option<String>, default: Option<String>) -> Self {
		Self {
			declared: Mutex::new(declared),
			default,
		}
	}
}

impl EncodingAccessor for EncodingSetting {
	fn declared(&self) -> Option<String> {
		self.declared.lock().clone()
	}

	fn default_encoding(&self) -> Option<String> {
		self.default.clone()
	}

	fn set(&self, encoding: &str) -> Result<(), HostError> {
		*self.declared.lock() = Some(encoding.to_owned());
		Ok(())
	}
}
