//! Shared fixtures for the integration suites.

use catalog_api::{BibRecord, Field};
use serde_json::{json, Value};

/// A record with romanized/original 880 pairs, an orphan 880, and a
/// spread of note fields.
#[allow(dead_code)]
pub fn paired_record() -> BibRecord {
    let mut record = BibRecord::new();
    record.add_control_field("001", "990012345");

    record.add_field(
        Field::new("245", '1', '0')
            .with_subfield('6', "880-01")
            .with_subfield('a', "Shui hu zhuan /")
            .with_subfield('c', "Shi Nai'an."),
    );
    record.add_field(
        Field::new("880", '1', '0')
            .with_subfield('6', "245-01")
            .with_subfield('a', "水浒传 /")
            .with_subfield('c', "施耐庵."),
    );

    record.add_field(
        Field::new("700", '1', ' ')
            .with_subfield('6', "880-02")
            .with_subfield('a', "Shi, Nai'an."),
    );
    record.add_field(
        Field::new("880", '1', ' ')
            .with_subfield('6', "700-02")
            .with_subfield('a', "施耐庵."),
    );

    // Orphan 880 with no direct counterpart.
    record.add_field(
        Field::new("880", '1', ' ')
            .with_subfield('6', "710-05")
            .with_subfield('a', "人民文学出版社."),
    );

    record.add_field(
        Field::new("520", ' ', ' ').with_subfield('a', "An outlaw epic."),
    );
    record.add_field(
        Field::new("520", '4', ' ').with_subfield('a', "Contains depictions of violence."),
    );
    record.add_field(
        Field::new("785", '0', '0')
            .with_subfield('t', "New serial title")
            .with_subfield('x', "1234-5678"),
    );
    record.add_field(Field::new("785", '0', '0').with_subfield('x', "1234-5678"));

    record
}

/// MARCXML serialization matching [`paired_record`] closely enough for
/// facade tests.
#[allow(dead_code)]
pub const PAIRED_MARCXML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.loc.gov/MARC21/slim">
  <leader>01447cam a2200301 i 4500</leader>
  <controlfield tag="001">990012345</controlfield>
  <datafield tag="245" ind1="1" ind2="0">
    <subfield code="6">880-01</subfield>
    <subfield code="a">Shui hu zhuan /</subfield>
    <subfield code="c">Shi Nai'an.</subfield>
  </datafield>
  <datafield tag="880" ind1="1" ind2="0">
    <subfield code="6">245-01</subfield>
    <subfield code="a">水浒传 /</subfield>
    <subfield code="c">施耐庵.</subfield>
  </datafield>
  <datafield tag="700" ind1="1" ind2=" ">
    <subfield code="6">880-02</subfield>
    <subfield code="a">Shi, Nai'an.</subfield>
  </datafield>
  <datafield tag="880" ind1="1" ind2=" ">
    <subfield code="6">700-02</subfield>
    <subfield code="a">施耐庵.</subfield>
  </datafield>
  <datafield tag="520" ind1=" " ind2=" ">
    <subfield code="a">An outlaw epic.</subfield>
  </datafield>
  <datafield tag="504" ind1=" " ind2=" ">
    <subfield code="a">Includes bibliographical references.</subfield>
  </datafield>
  <datafield tag="264" ind1=" " ind2="1">
    <subfield code="a">Beijing :</subfield>
    <subfield code="b">Renmin wen xue chu ban she,</subfield>
    <subfield code="c">1997.</subfield>
  </datafield>
</record>"#;

/// Holdings data covering every group.
#[allow(dead_code)]
pub fn holdings_json() -> Value {
    json!([
        {
            "library": "HATCH",
            "location": "GRAD",
            "display_name": "Hatcher Graduate Library",
            "callnumber": "PL2694 .S5",
            "hol_mmsid": "22123456780006381",
            "record_has_finding_aid": false,
            "items": [
                {
                    "item_id": "23123456780006381",
                    "barcode": "39015012345678",
                    "library": "HATCH",
                    "location": "GRAD",
                    "callnumber": "PL2694 .S5",
                    "can_reserve": false,
                    "material_type": "BOOK"
                }
            ]
        },
        {
            "library": "ELEC",
            "finding_aid": false,
            "link": "https://example.org/ebook",
            "status": "Available",
            "campuses": ["ann_arbor"]
        },
        {
            "library": "HathiTrust Digital Library",
            "items": [
                {"id": "mdp.39015012345678", "status": "Search only", "source": "University of Michigan"}
            ]
        }
    ])
}

/// A complete Solr document for one record.
#[allow(dead_code)]
pub fn solr_doc() -> Value {
    json!({
        "id": "990012345",
        "fullrecord": PAIRED_MARCXML,
        "format": ["Book"],
        "availability": ["physical"],
        "title_display": ["Shui hu zhuan /", "水浒传 /"],
        "publisher_display": ["Renmin wen xue chu ban she"],
        "edition": ["Di 1 ban."],
        "main_author_display": ["Shi, Nai'an", "施耐庵"],
        "main_author": ["Shi, Nai'an", "施耐庵"],
        "language": ["Chinese"],
        "isbn": ["9787020008735"],
        "callnumber_browse": ["PL2694 .S5"],
        "lc_subject_display": ["Outlaws -- China -- Fiction"],
        "hlb3Delimited": ["Humanities | East Asian Languages and Cultures | Chinese Literature"],
        "display_date": "1997",
        "date_of_index": "2026-08-01T00:00:00Z",
        "hol": holdings_json().to_string()
    })
}

/// Wrap a document in a Solr select response body.
#[allow(dead_code)]
pub fn select_response(docs: Vec<Value>) -> Value {
    json!({
        "responseHeader": {"status": 0},
        "response": {
            "numFound": docs.len(),
            "start": 0,
            "docs": docs
        }
    })
}
