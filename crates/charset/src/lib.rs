//! Charset identity, detection, and confidence reconciliation.
//!
//! The pieces here are pure functions over bytes and charset names. They know
//! nothing about documents or hosts; `encinfo-agent` composes them into the
//! per-document refresh cycle.

/// Decodability checks and scoped stream reading.
pub mod decode;
/// Statistical charset detection over a whole byte stream.
pub mod detect;
/// Charset name normalization and equivalence.
pub mod equivalence;
/// Error types shared by the charset helpers.
pub mod error;
/// Reconciliation of detector confidence with actual decodability.
pub mod reconcile;

pub use decode::{is_decodable, is_decodable_reader, read_all};
pub use detect::{CharsetCandidate, MAX_CONFIDENCE, detect_all, detect_bytes};
pub use equivalence::{CanonicalId, are_equivalent, canonical_name};
pub use error::{CharsetError, Result};
pub use reconcile::{DECODABLE_FLOOR, confidence_of, reconcile};
