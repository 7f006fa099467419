use thiserror::Error;

/// Failure reported by a host capability.
#[derive(Debug, Error)]
pub enum HostError {
	/// The host refused the request.
	#[error("{0}")]
	Rejected(String),
}

/// Errors surfaced by encoding queries and changes.
///
/// Only [`EncodingError::Unsupported`] and [`EncodingError::PersistFailed`]
/// ever reach a caller of `set_encoding`; byte access failures are downgraded
/// to an absent detection inside the refresh cycle.
#[derive(Debug, Error)]
pub enum EncodingError {
	/// The active document cannot have its encoding changed.
	#[error("changing the encoding is not supported for this document")]
	Unsupported,
	/// The host did not accept the new declared encoding.
	#[error("failed to persist encoding {encoding}: {source}")]
	PersistFailed {
		/// Encoding that was requested.
		encoding: String,
		/// Host failure.
		#[source]
		source: HostError,
	},
	/// The document bytes could not be read.
	#[error("document bytes unavailable: {0}")]
	ByteSourceUnavailable(#[from] std::io::Error),
}
