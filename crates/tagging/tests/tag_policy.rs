//! Scenario tests for the tag engine
//! Exercises the batch policy end to end and the shape of the reports a
//! presentation layer receives.

use governance_model::{DocId, ErrorCode, Report};
use proptest::prelude::*;
use serde_json::json;
use tagging::{add_tags, edit_tag, normalize, remove_tags};

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn tag_lifecycle_on_one_document() {
    let doc = DocId::from("file_42");

    let tags = add_tags(&doc, &["Invoices", "2024", "Vendor_A"], Vec::new())
        .unwrap()
        .collection;
    assert_eq!(tags, vec!["invoices", "2024", "vendor_a"]);

    let tags = edit_tag(&doc, "VENDOR_A", "vendor-a", tags).unwrap().collection;
    assert_eq!(tags, vec!["invoices", "2024", "vendor-a"]);

    let tags = add_tags(&doc, &["invoices", "paid"], tags).unwrap().collection;
    assert_eq!(tags, vec!["invoices", "2024", "vendor-a", "paid"]);

    let tags = remove_tags(&doc, &["2024", "never-there"], tags).collection;
    assert_eq!(tags, vec!["invoices", "vendor-a", "paid"]);
}

#[test]
fn rejected_batch_report() {
    let doc = DocId::from("d1");
    let transition = add_tags(&doc, &["fine", "No Spaces"], tags(&["kept"]));
    let report = serde_json::to_value(Report::from_transition(&transition)).unwrap();

    assert_eq!(report["success"], json!(false));
    assert_eq!(report["code"], json!(ErrorCode::InvalidFormat.as_str()));
    assert_eq!(
        report["error"],
        json!("Tag \"No Spaces\" can only contain letters, numbers, hyphens, and underscores")
    );
}

#[test]
fn remove_report_is_successful_noop() {
    let doc = DocId::from("d1");
    let applied = remove_tags(&doc, &["missing"], tags(&["a", "b"]));
    let report = serde_json::to_value(Report::ok(applied.outcome.clone())).unwrap();

    assert_eq!(applied.collection, tags(&["a", "b"]));
    assert_eq!(report["success"], json!(true));
    assert_eq!(report["removed"], json!([]));
    assert_eq!(report["documentId"], json!("d1"));
}

proptest! {
    #[test]
    fn normalize_round_trip(s in "\\PC*") {
        prop_assert_eq!(normalize(&normalize(&s)), normalize(&s));
    }

    #[test]
    fn successful_add_keeps_tags_unique(
        existing in prop::collection::btree_set("[a-z]{2,5}", 0..5),
        batch in prop::collection::btree_set("[a-zA-Z]{2,5}", 0..5),
    ) {
        let doc = DocId::from("d");
        let existing: Vec<String> = existing.into_iter().collect();
        let batch: Vec<String> = batch.into_iter().collect();

        if let Ok(applied) = add_tags(&doc, batch.as_slice(), existing.clone()) {
            let mut folded: Vec<String> =
                applied.collection.iter().map(|t| t.to_lowercase()).collect();
            let total = folded.len();
            folded.sort();
            folded.dedup();
            prop_assert_eq!(folded.len(), total);
            prop_assert_eq!(&applied.collection[..existing.len()], &existing[..]);
        }
    }
}
