//! Integration tests for the extraction engine over the shipped rule
//! table, exercising 880 pairing end to end.

mod common;

use catalog_api::{rules_for, BibRecord, Extractor, Field};
use common::paired_record;

#[test]
fn direct_fields_pair_with_their_880s() {
    let record = paired_record();
    let extractor = Extractor::new(&record);

    let contributors = extractor.paired_fields(rules_for("contributors"));
    // 700 pairs with its 880; the orphan 880 (710-05) renders original-only.
    assert_eq!(contributors.len(), 2);

    let paired = &contributors[0];
    let translit = paired.transliterated.as_ref().unwrap();
    assert_eq!(translit.text, "Shi, Nai'an.");
    assert_eq!(paired.original.text, "施耐庵.");

    let orphan = &contributors[1];
    assert!(orphan.transliterated.is_none());
    assert_eq!(orphan.original.text, "人民文学出版社.");
}

#[test]
fn search_and_browse_values_come_from_their_own_subfield_sets() {
    let record = paired_record();
    let extractor = Extractor::new(&record);

    let contributors = extractor.paired_fields(rules_for("contributors"));
    let translit = contributors[0].transliterated.as_ref().unwrap();
    let search = translit.search.as_ref().unwrap();
    assert_eq!(search[0].field, "author");
    assert_eq!(search[0].value, "Shi, Nai'an.");
    assert_eq!(translit.browse.as_deref(), Some("Shi, Nai'an."));
}

#[test]
fn summary_and_content_advice_split_on_the_first_indicator() {
    let record = paired_record();
    let extractor = Extractor::new(&record);

    let summary = extractor.paired_fields(rules_for("summary"));
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].original.text, "An outlaw epic.");

    let advice = extractor.paired_fields(rules_for("content_advice"));
    assert_eq!(advice.len(), 1);
    assert_eq!(advice[0].original.text, "Contains depictions of violence.");
}

#[test]
fn unpaired_extraction_dedupes_identical_values() {
    let record = paired_record();
    let extractor = Extractor::new(&record);

    // Both 785s carry the same $x.
    let issns = extractor.unpaired_fields(rules_for("new_title_issn"));
    assert_eq!(issns.len(), 1);
    assert_eq!(issns[0].text, "1234-5678");
}

#[test]
fn new_title_carries_split_search_targets() {
    let record = paired_record();
    let extractor = Extractor::new(&record);

    let new_titles = extractor.paired_fields(rules_for("new_title"));
    assert_eq!(new_titles.len(), 1);
    let search = new_titles[0].original.search.as_ref().unwrap();
    // $a is absent so only the title search target survives.
    assert_eq!(search.len(), 1);
    assert_eq!(search[0].field, "title");
    assert_eq!(search[0].value, "New serial title");
}

#[test]
fn preferred_title_distinguishes_730_by_indicator() {
    let mut record = BibRecord::new();
    record.add_field(
        Field::new("730", '0', '2').with_subfield('a', "Collected works. Selections"),
    );
    record.add_field(Field::new("730", '0', ' ').with_subfield('a', "Related uniform title"));
    let extractor = Extractor::new(&record);

    let preferred = extractor.paired_fields(rules_for("preferred_title"));
    assert_eq!(preferred.len(), 1);
    assert_eq!(preferred[0].original.text, "Collected works. Selections");

    let related = extractor.paired_fields(rules_for("related_title"));
    assert_eq!(related.len(), 1);
    assert_eq!(related[0].original.text, "Related uniform title");
}

#[test]
fn in_collection_prefers_title_over_control_number() {
    let mut record = BibRecord::new();
    record.add_field(
        Field::new("773", '0', ' ')
            .with_subfield('t', "Host journal")
            .with_subfield('w', "(OCoLC)12345"),
    );
    record.add_field(Field::new("773", '0', ' ').with_subfield('w', "(OCoLC)67890"));
    let extractor = Extractor::new(&record);

    let hosts = extractor.paired_fields(rules_for("in_collection"));
    assert_eq!(hosts.len(), 2);
    assert_eq!(hosts[0].original.text, "Host journal");
    assert_eq!(hosts[1].original.text, "(OCoLC)67890");
    // Both variants search the control number.
    let search = hosts[0].original.search.as_ref().unwrap();
    assert_eq!(search[0].field, "isn");
    assert_eq!(search[0].value, "(OCoLC)12345");
}

#[test]
fn rule_order_wins_over_document_order() {
    // preferred_title lists 130/240/243 before 730 so a 730 earlier in
    // the record still renders after them.
    let mut record = BibRecord::new();
    record.add_field(Field::new("730", '0', '2').with_subfield('a', "Second"));
    record.add_field(Field::new("240", '1', '0').with_subfield('a', "First"));
    let extractor = Extractor::new(&record);

    let preferred = extractor.paired_fields(rules_for("preferred_title"));
    assert_eq!(preferred.len(), 2);
    assert_eq!(preferred[0].original.text, "First");
    assert_eq!(preferred[1].original.text, "Second");
}

#[test]
fn unknown_rule_name_yields_nothing() {
    let record = paired_record();
    let extractor = Extractor::new(&record);
    assert!(extractor.paired_fields(rules_for("no_such_member")).is_empty());
}
