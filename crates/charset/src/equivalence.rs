//! Charset name equivalence.
//!
//! Names are resolved through the WHATWG label table of `encoding_rs`, which
//! already folds ASCII case and surrounding whitespace and knows the common
//! aliases (`utf8`, `sjis`, ...). On top of that, a name whose separators are
//! spelled differently (`utf_8`, `ISO_8859-2`, `euc_jp`) is retried with
//! normalized separators before giving up.
//!
//! The WHATWG table folds `US-ASCII` and `ISO-8859-1` into `windows-1252`.
//! Those two are kept as charsets of their own: US-ASCII rejects every byte
//! above 0x7F, and ISO-8859-1 has no printable characters in 0x80..=0x9F.
//!
//! Unknown names never compare equal to anything, not even to themselves.

use std::fmt;

use encoding_rs::Encoding;

use crate::error::{CharsetError, Result};

/// Labels of 7-bit US-ASCII, lower case.
const ASCII_LABELS: &[&str] = &[
	"us-ascii",
	"ascii",
	"ansi_x3.4-1968",
	"ansi_x3.4-1986",
	"iso646-us",
	"iso_646.irv:1991",
	"iso-ir-6",
	"us",
	"cp367",
	"ibm367",
	"csascii",
	"646",
];

/// Labels of ISO-8859-1, lower case.
const LATIN1_LABELS: &[&str] = &[
	"iso-8859-1",
	"iso8859-1",
	"iso88591",
	"iso_8859-1",
	"iso_8859-1:1987",
	"iso-ir-100",
	"latin1",
	"l1",
	"ibm819",
	"cp819",
	"csisolatin1",
	"819",
	"8859_1",
];

/// Canonical identity of a charset.
///
/// Two names are equivalent iff they resolve to the same `CanonicalId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalId(pub(crate) Charset);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Charset {
	/// US-ASCII; bytes above 0x7F are malformed.
	Ascii,
	/// ISO-8859-1; every byte is the code point of the same value.
	Latin1,
	Whatwg(&'static Encoding),
}

impl CanonicalId {
	/// Returns the canonical spelling, e.g. `UTF-8` or `Shift_JIS`.
	pub fn name(self) -> &'static str {
		match self.0 {
			Charset::Ascii => "US-ASCII",
			Charset::Latin1 => "ISO-8859-1",
			Charset::Whatwg(encoding) => encoding.name(),
		}
	}
}

impl fmt::Display for CanonicalId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Resolves a charset name to its canonical identity.
///
/// Labels that map to the WHATWG "replacement" encoding (`iso-2022-kr`,
/// `hz-gb-2312`, ...) are treated as unknown: nothing can be decoded with them.
pub fn canonical_name(name: &str) -> Result<CanonicalId> {
	label_spellings(name)
		.into_iter()
		.flatten()
		.find_map(|label| lookup(&label))
		.map(CanonicalId)
		.ok_or_else(|| CharsetError::UnknownCharset(name.to_owned()))
}

/// Returns true if both names resolve to the same charset.
///
/// Lookup failures are swallowed: an unknown name on either side yields false.
pub fn are_equivalent(a: &str, b: &str) -> bool {
	match (canonical_name(a), canonical_name(b)) {
		(Ok(a), Ok(b)) => a == b,
		_ => false,
	}
}

fn lookup(label: &str) -> Option<Charset> {
	let known = |labels: &[&str]| labels.iter().any(|known| known.eq_ignore_ascii_case(label));
	if known(ASCII_LABELS) {
		return Some(Charset::Ascii);
	}
	if known(LATIN1_LABELS) {
		return Some(Charset::Latin1);
	}
	Encoding::for_label_no_replacement(label.as_bytes()).map(Charset::Whatwg)
}

/// Spellings tried in order: as given, `_` to `-`, `-` to `_`, separators dropped.
fn label_spellings(name: &str) -> [Option<String>; 4] {
	let name = name.trim();
	if name.is_empty() {
		return [None, None, None, None];
	}
	let has_separator = name.contains(['-', '_']);
	[
		Some(name.to_owned()),
		has_separator.then(|| name.replace('_', "-")),
		has_separator.then(|| name.replace('-', "_")),
		has_separator.then(|| name.replace(['-', '_'], "")),
	]
}
