use std::sync::Arc;

use super::*;
use crate::test_host::{TestDocument, TestInput};

/// "日本語のテキストです。" encoded as Shift_JIS; not valid UTF-8.
const SHIFT_JIS: &[u8] = b"\x93\xfa\x96\x7b\x8c\xea\x82\xcc\x83\x65\x83\x4c\x83\x58\x83\x67\x82\xc5\x82\xb7\x81\x42";

fn resolve(document: &Arc<TestDocument>) -> DocumentSource {
	DocumentSource::resolve(Some(Arc::clone(document) as Arc<dyn HostDocument>))
}

#[test]
fn no_document_resolves_to_none() {
	let source = DocumentSource::resolve(None);
	assert_eq!(source.kind(), VariantKind::None);
	assert_eq!(source.underlying_identity(), None);
	assert_eq!(source.snapshot(), EncodingSnapshot::empty());
}

#[test]
fn document_without_setting_keeps_identity() {
	let document = TestDocument::plain(7);
	let mut source = resolve(&document);
	assert_eq!(source.kind(), VariantKind::None);
	assert_eq!(source.underlying_identity(), Some(DocumentId(7)));
	assert_eq!(source.name(), None);
	assert_eq!(source.snapshot(), EncodingSnapshot::empty());
	assert!(!source.refresh());
	assert!(matches!(source.set_declared_encoding("UTF-8"), Ok(false)));
	assert_eq!(document.bytes().opens(), 0);
}

#[test]
fn variants_follow_document_capabilities() {
	let cases = [
		(TestDocument::workspace(1, b"abc", None), VariantKind::Workspace),
		(TestDocument::external(2, b"abc", None), VariantKind::NonWorkspace),
		(TestDocument::storage(3, b"abc", None), VariantKind::Storage),
		(TestDocument::generic(4, None), VariantKind::Generic),
	];
	for (document, kind) in cases {
		let source = resolve(&document);
		assert_eq!(source.kind(), kind);
		assert_eq!(source.underlying_identity(), Some(document.id()));
	}
}

#[test]
fn only_workspace_tracks_a_resource() {
	let workspace = TestDocument::workspace(1, b"abc", None);
	assert_eq!(resolve(&workspace).tracked_resource(), workspace.resource().as_ref());
	assert_eq!(resolve(&TestDocument::external(2, b"abc", None)).tracked_resource(), None);
}

#[test]
fn matching_declaration_is_fully_confident() {
	let document = TestDocument::workspace(1, "Grüße aus Köln".as_bytes(), Some("UTF-8"));
	let snapshot = resolve(&document).snapshot();
	assert_eq!(snapshot.document_name(), Some("doc-1.txt"));
	assert_eq!(snapshot.declared_encoding(), Some("UTF-8"));
	assert_eq!(snapshot.reconciled_confidence(), 100);
	assert!(snapshot.top_candidate().is_some());
}

#[test]
fn undecodable_declaration_has_zero_confidence() {
	let document = TestDocument::external(1, SHIFT_JIS, Some("UTF-8"));
	let snapshot = resolve(&document).snapshot();
	assert!(snapshot.detected_candidates().is_some());
	assert_eq!(snapshot.reconciled_confidence(), 0);
}

#[test]
fn decodable_but_unranked_declaration_has_floor_confidence() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("IBM866"));
	assert_eq!(resolve(&document).snapshot().reconciled_confidence(), 1);
}

#[test]
fn missing_declaration_falls_back_to_host_default() {
	let document = TestDocument::external(1, b"plain ascii text\n", None);
	let source = resolve(&document);
	assert_eq!(source.declared_encoding(), Some("UTF-8"));
	assert_eq!(source.snapshot().reconciled_confidence(), 100);
}

#[test]
fn detection_reads_bytes_twice() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("UTF-8"));
	let _source = resolve(&document);
	assert_eq!(document.bytes().opens(), 2);
}

#[test]
fn generic_reports_declaration_only() {
	let document = TestDocument::generic(1, Some("windows-1252"));
	let snapshot = resolve(&document).snapshot();
	assert_eq!(snapshot.declared_encoding(), Some("windows-1252"));
	assert_eq!(snapshot.detected_candidates(), None);
	assert_eq!(snapshot.reconciled_confidence(), 0);
}

#[test]
fn unreadable_bytes_leave_candidates_absent() {
	let document = TestDocument::external(1, b"abc", Some("UTF-8"));
	document.delete_bytes();
	let snapshot = resolve(&document).snapshot();
	assert_eq!(snapshot.declared_encoding(), Some("UTF-8"));
	assert_eq!(snapshot.detected_candidates(), None);
	assert_eq!(snapshot.reconciled_confidence(), 0);
}

#[test]
fn storage_rejects_encoding_changes() {
	let document = TestDocument::storage(1, b"abc", Some("UTF-8"));
	let mut source = resolve(&document);
	assert!(matches!(source.set_declared_encoding("ISO-8859-1"), Err(EncodingError::Unsupported)));
	assert_eq!(document.accessor().writes(), 0);
}

#[test]
fn non_workspace_change_is_visible_immediately() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("UTF-8"));
	let mut source = resolve(&document);
	assert!(matches!(source.set_declared_encoding("IBM866"), Ok(true)));
	assert_eq!(source.declared_encoding(), Some("IBM866"));
	assert_eq!(source.snapshot().reconciled_confidence(), 1);
}

#[test]
fn generic_change_is_visible_immediately() {
	let document = TestDocument::generic(1, Some("UTF-8"));
	let mut source = resolve(&document);
	assert!(matches!(source.set_declared_encoding("UTF-16LE"), Ok(true)));
	assert_eq!(source.snapshot().declared_encoding(), Some("UTF-16LE"));
}

#[test]
fn workspace_change_waits_for_refresh() {
	let document = TestDocument::workspace(1, b"plain ascii text\n", Some("UTF-8"));
	let mut source = resolve(&document);
	assert!(matches!(source.set_declared_encoding("IBM866"), Ok(false)));
	assert_eq!(source.declared_encoding(), Some("UTF-8"));
	assert!(source.refresh());
	assert_eq!(source.declared_encoding(), Some("IBM866"));
}

#[test]
fn rejected_write_leaves_state_untouched() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("UTF-8"));
	document.accessor().reject_writes();
	let mut source = resolve(&document);
	let before = source.snapshot();
	let error = source.set_declared_encoding("IBM866").unwrap_err();
	assert!(matches!(error, EncodingError::PersistFailed { ref encoding, .. } if encoding == "IBM866"));
	assert_eq!(source.snapshot(), before);
}

#[test]
fn refresh_reports_only_real_changes() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("UTF-8"));
	let mut source = resolve(&document);
	assert!(!source.refresh());
	document.write_bytes(SHIFT_JIS);
	assert!(source.refresh());
	assert_eq!(source.snapshot().reconciled_confidence(), 0);
}

#[test]
fn dirty_document_suppresses_refresh() {
	let document = TestDocument::external(1, b"plain ascii text\n", Some("UTF-8"));
	let mut source = resolve(&document);
	document.set_dirty(true);
	document.accessor().overwrite(Some("IBM866"));
	assert!(source.is_dirty());
	assert!(!source.refresh());
	assert_eq!(source.declared_encoding(), Some("UTF-8"));
	document.set_dirty(false);
	assert!(source.refresh());
}

#[test]
fn dirty_document_keeps_snapshot_when_bytes_change() {
	let document = TestDocument::workspace(1, b"plain ascii text\n", Some("UTF-8"));
	let mut source = resolve(&document);
	let before = source.snapshot();
	assert_eq!(before.reconciled_confidence(), 100);

	document.set_dirty(true);
	document.write_bytes(SHIFT_JIS);
	assert!(!source.refresh());
	assert_eq!(source.snapshot(), before);

	document.set_dirty(false);
	assert!(source.refresh());
	assert_ne!(source.snapshot().detected_candidates(), before.detected_candidates());
	assert_eq!(source.snapshot().reconciled_confidence(), 0);
}

#[test]
fn set_on_dirty_document_still_recomputes() {
	let document = TestDocument::generic(1, Some("UTF-8"));
	document.set_dirty(true);
	let mut source = resolve(&document);
	assert!(matches!(source.set_declared_encoding("Shift_JIS"), Ok(true)));
	assert_eq!(source.declared_encoding(), Some("Shift_JIS"));
}

#[test]
fn input_is_read_at_resolution() {
	let document = TestDocument::external(1, b"abc", None);
	document.set_input(TestInput::Opaque);
	assert_eq!(resolve(&document).kind(), VariantKind::Generic);
}
