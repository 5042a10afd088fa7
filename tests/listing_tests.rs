//! Document listing view-model against an in-memory server.

mod common;

use common::{classifier, date, FakeServer};
use kometro_docs::api::DocumentFilter;
use kometro_docs::error::{BulkActionErrorKind, KometroError};
use kometro_docs::listing::{DocumentListing, StatusLevel, EMPTY_MESSAGE};
use kometro_docs::model::{Document, DocumentStatus, LabelColor, NewDocument};
use kometro_docs::selection::HeaderState;

fn listing(server: &FakeServer, rows: usize) -> DocumentListing<'_> {
    DocumentListing::new(server, classifier())
        .with_rows_per_page(rows)
        .unwrap()
}

#[test]
fn test_select_all_after_page_change_holds_only_new_page() {
    let server = FakeServer::with_documents(10);
    let mut listing = listing(&server, 5);

    listing.load().unwrap();
    listing.select_all(true);
    assert_eq!(listing.selection().ids(), vec![1, 2, 3, 4, 5]);
    assert_eq!(listing.header_state(), HeaderState::All);

    listing.set_page(1);
    listing.load().unwrap();
    listing.select_all(true);
    assert_eq!(listing.selection().ids(), vec![6, 7, 8, 9, 10]);
}

#[test]
fn test_loading_another_page_prunes_selection() {
    let server = FakeServer::with_documents(10);
    let mut listing = listing(&server, 5);

    listing.load().unwrap();
    listing.toggle(2);
    listing.toggle(4);
    assert_eq!(listing.header_state(), HeaderState::Some);

    listing.set_page(1);
    listing.load().unwrap();
    assert!(listing.selection().is_empty());
    assert!(!listing.is_selected(2));
    assert_eq!(listing.header_state(), HeaderState::None);
}

#[test]
fn test_toggle_ignores_ids_not_on_page() {
    let server = FakeServer::with_documents(3);
    let mut listing = listing(&server, 5);
    listing.load().unwrap();

    assert!(!listing.toggle(99));
    assert!(listing.selection().is_empty());
    assert!(listing.toggle(3));
}

#[test]
fn test_query_reflects_page_size_and_filters() {
    let server = FakeServer::with_documents(30);
    let mut listing = listing(&server, 10);
    listing.set_page(2);
    listing.load().unwrap();
    assert_eq!(listing.pagination().total(), 30);
    assert_eq!(listing.page_ids().first(), Some(&21));

    listing.set_filter(DocumentFilter {
        code: Some("pq-1".to_string()),
        ..DocumentFilter::default()
    });
    assert_eq!(listing.pagination().page(), 0);
    listing.load().unwrap();

    let query = server.last_query().unwrap();
    assert_eq!(query.page, 0);
    assert_eq!(query.page_size, 10);
    assert_eq!(query.filter.code.as_deref(), Some("pq-1"));
    assert_eq!(listing.page_ids(), (10..=19).collect::<Vec<_>>());
}

#[test]
fn test_rows_per_page_change_resets_to_first_page() {
    let server = FakeServer::with_documents(30);
    let mut listing = listing(&server, 10);
    listing.set_page(2);
    listing.set_rows_per_page(25).unwrap();
    assert_eq!(listing.pagination().page(), 0);
    assert!(listing.set_rows_per_page(7).is_err());
    assert_eq!(listing.pagination().rows_per_page(), 25);
}

#[test]
fn test_empty_listing_message() {
    let server = FakeServer::default();
    let mut listing = listing(&server, 10);
    assert_eq!(listing.empty_message(), None);

    listing.load().unwrap();
    assert_eq!(listing.empty_message(), Some(EMPTY_MESSAGE));
    assert!(!listing.can_export());
}

#[test]
fn test_load_failure_is_reported_in_status() {
    let server = FakeServer::with_documents(3);
    server.fail_fetch.set(true);
    let mut listing = listing(&server, 10);

    assert!(listing.load().is_err());
    assert!(listing.status().is_error());
    assert!(listing.page().is_none());
}

#[test]
fn test_delete_selected_clears_selection_and_reloads() {
    let server = FakeServer::with_documents(3);
    let mut listing = listing(&server, 10);
    listing.load().unwrap();
    listing.toggle(1);
    listing.toggle(3);

    let loads_before = server.query_count();
    assert_eq!(listing.delete_selected().unwrap(), 2);

    assert_eq!(server.deleted.borrow().as_slice(), &[vec![1, 3]]);
    assert!(listing.selection().is_empty());
    assert_eq!(server.query_count(), loads_before + 1);
    assert_eq!(listing.page_ids(), vec![2]);
    assert_eq!(listing.status().level(), Some(StatusLevel::Success));
}

#[test]
fn test_delete_failure_keeps_selection() {
    let server = FakeServer::with_documents(3);
    let mut listing = listing(&server, 10);
    listing.load().unwrap();
    listing.select_all(true);

    server.fail_delete.set(true);
    let err = listing.delete_selected().unwrap_err();
    assert!(matches!(
        err,
        KometroError::BulkAction {
            source: BulkActionErrorKind::Request(_),
            ..
        }
    ));
    assert_eq!(listing.selection().ids(), vec![1, 2, 3]);
    assert!(listing.status().is_error());
}

#[test]
fn test_delete_with_empty_selection_is_rejected() {
    let server = FakeServer::with_documents(3);
    let mut listing = listing(&server, 10);
    listing.load().unwrap();

    let err = listing.delete_selected().unwrap_err();
    assert!(matches!(
        err,
        KometroError::BulkAction {
            source: BulkActionErrorKind::EmptySelection,
            ..
        }
    ));
    assert!(server.deleted.borrow().is_empty());
}

#[test]
fn test_deleting_the_last_page_steps_back() {
    let server = FakeServer::with_documents(11);
    let mut listing = listing(&server, 10);
    listing.set_page(1);
    listing.load().unwrap();
    listing.select_all(true);

    listing.delete_selected().unwrap();
    assert_eq!(listing.pagination().page(), 0);
    assert_eq!(listing.page_ids().len(), 10);
}

#[test]
fn test_create_validates_before_request() {
    let server = FakeServer::with_documents(1);
    let mut listing = listing(&server, 10);
    listing.load().unwrap();

    let err = listing.create(&NewDocument::new("", "Manual")).unwrap_err();
    assert!(matches!(err, KometroError::Validation(_)));
    assert!(server.created.borrow().is_empty());

    listing.create(&NewDocument::new("PQ-02", "Manual")).unwrap();
    assert_eq!(server.created.borrow().len(), 1);
    assert_eq!(listing.page_ids(), vec![1, 2]);
}

#[test]
fn test_export_uses_selection() {
    let server = FakeServer::with_documents(3);
    let mut listing = listing(&server, 10);
    listing.load().unwrap();
    assert!(!listing.can_export());

    listing.toggle(2);
    let content = listing.export().unwrap().content().to_string();
    assert_eq!(content, "codigo,titulo\nPQ-01,Manual");
    assert_eq!(server.exports.borrow()[0].selected, vec![2]);

    listing.unmount();
    assert!(listing.artifact().is_none());
}

#[test]
fn test_rows_are_formatted_for_display() {
    let server = FakeServer::default();
    server.documents.borrow_mut().push(
        Document::new(8, DocumentStatus::Review)
            .with_code("pq-08")
            .with_title("manual da qualidade")
            .with_creator("ana")
            .with_validity_date(date(2026, 3, 7))
            .with_last_critical_analysis(date(2024, 1, 1))
            .with_revision(31, "Revisão geral"),
    );
    let mut listing = listing(&server, 10);
    listing.load().unwrap();
    listing.toggle(8);

    let rows = listing.rows();
    let row = &rows[0];
    assert!(row.selected);
    assert_eq!(row.code, "PQ-08");
    assert_eq!(row.title, "Manual Da Qualidade");
    assert_eq!(row.status.text, "In review");
    assert_eq!(row.validity, "07/03/2026");
    assert_eq!(row.critical_analysis.as_ref().unwrap().color, LabelColor::Error);
    assert_eq!(row.target, "/admin/documento/8/31");
    assert_eq!(
        listing.navigation_target_for(8).as_deref(),
        Some("/admin/documento/8/31")
    );
}
