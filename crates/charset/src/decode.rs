//! Full-decode checks.
//!
//! A detector scores a charset from statistics and may stop short of the end
//! of the input. These helpers answer the stricter question: does the whole
//! byte content decode under a charset without a single malformed sequence?

use std::io::Read;

use encoding_rs::Encoding;

use crate::equivalence::{CanonicalId, Charset, canonical_name};

/// Reads a stream to the end and releases it.
///
/// The reader is taken by value so it is dropped (closed) when this returns,
/// on success and on error alike.
pub fn read_all<R: Read>(mut reader: R) -> std::io::Result<Vec<u8>> {
	let mut bytes = Vec::new();
	reader.read_to_end(&mut bytes)?;
	Ok(bytes)
}

/// Returns true if `bytes` decode under `charset` without any error.
///
/// An unknown charset is never decodable. The BOM is not sniffed: a UTF-8 BOM
/// under a UTF-8 charset decodes to U+FEFF, any other BOM is just bytes.
pub fn is_decodable(bytes: &[u8], charset: &str) -> bool {
	canonical_name(charset).is_ok_and(|id| decodes(id, bytes))
}

fn decodes(id: CanonicalId, bytes: &[u8]) -> bool {
	match id.0 {
		Charset::Ascii => Encoding::ascii_valid_up_to(bytes) == bytes.len(),
		Charset::Latin1 => true,
		Charset::Whatwg(encoding) => encoding
			.decode_without_bom_handling_and_without_replacement(bytes)
			.is_some(),
	}
}

/// Reads `reader` to the end and checks it with [`is_decodable`].
///
/// Read failures count as "not decodable". The charset is resolved first so an
/// unknown name does not cost a read.
pub fn is_decodable_reader<R: Read>(reader: R, charset: &str) -> bool {
	if canonical_name(charset).is_err() {
		return false;
	}
	match read_all(reader) {
		Ok(bytes) => is_decodable(&bytes, charset),
		Err(error) => {
			tracing::debug!(charset, %error, "decodability check could not read stream");
			false
		}
	}
}
