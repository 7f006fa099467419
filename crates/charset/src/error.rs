use thiserror::Error;

/// Errors produced by charset lookup and stream reading.
#[derive(Debug, Error)]
pub enum CharsetError {
	/// The name does not resolve to an encoding.
	#[error("unknown charset: {0}")]
	UnknownCharset(String),
	/// The byte stream could not be read to the end.
	#[error("failed to read byte stream: {0}")]
	Io(#[from] std::io::Error),
}

/// Result alias for charset operations.
pub type Result<T> = std::result::Result<T, CharsetError>;
