//! MARCXML deserialization of bibliographic records.
//!
//! Solr documents embed the full bibliographic record as a MARCXML string
//! (LOC slim schema, <https://www.loc.gov/standards/marcxml/>). This module
//! parses that payload into the [`BibRecord`] model, accepting both
//! default-namespace (`<record xmlns="...">`) and prefix-namespace
//! (`<marc:record xmlns:marc="...">`) forms.
//!
//! It also renders the MARC-in-JSON dump exposed on the record response,
//! shaped `{"leader": ..., "fields": [{"001": "..."}, {"245": {...}}]}`.

use crate::error::{CatalogError, Result};
use crate::record::{BibRecord, Field};
use quick_xml::de::from_str as xml_from_str;
use serde::Deserialize;
use serde_json::{json, Value};

/// MARCXML record representation for deserialization.
#[derive(Debug, Deserialize)]
struct MarcxmlRecord {
    /// MARC leader string.
    #[serde(default)]
    leader: String,
    /// Control fields (tags 001-009).
    #[serde(default)]
    controlfield: Vec<MarcxmlControlField>,
    /// Data fields (tags 010+).
    #[serde(default)]
    datafield: Vec<MarcxmlDataField>,
}

#[derive(Debug, Deserialize)]
struct MarcxmlControlField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "$value", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct MarcxmlDataField {
    #[serde(rename = "@tag")]
    tag: String,
    #[serde(rename = "@ind1", default)]
    ind1: String,
    #[serde(rename = "@ind2", default)]
    ind2: String,
    #[serde(default)]
    subfield: Vec<MarcxmlSubfield>,
}

#[derive(Debug, Deserialize)]
struct MarcxmlSubfield {
    #[serde(rename = "@code")]
    code: String,
    #[serde(rename = "$value", default)]
    value: String,
}

/// Strip XML namespace prefixes and declarations from MARCXML input.
///
/// Handles both `marc:record` -> `record` (prefixed namespace) and
/// `xmlns="..."` / `xmlns:marc="..."` (namespace declarations).
fn strip_marcxml_ns(xml: &str) -> String {
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref RE_XMLNS: Regex = Regex::new(r#"\s+xmlns(?::\w+)?="[^"]*""#).unwrap();
        static ref RE_PREFIX: Regex = Regex::new(r"<(/?)(\w+):").unwrap();
    }

    let stripped = RE_XMLNS.replace_all(xml, "");
    RE_PREFIX.replace_all(&stripped, "<$1").to_string()
}

/// First character of an indicator attribute, with blank as the default.
fn indicator_char(raw: &str) -> char {
    raw.chars().next().unwrap_or(' ')
}

/// Parse a MARCXML string into a [`BibRecord`].
///
/// # Errors
///
/// Returns [`CatalogError::MalformedRecord`] when the payload is not valid
/// MARCXML. A parse failure is fatal for the request; there is no partial
/// recovery.
pub fn parse_record(xml: &str) -> Result<BibRecord> {
    let stripped = strip_marcxml_ns(xml);
    let parsed: MarcxmlRecord = xml_from_str(&stripped)
        .map_err(|e| CatalogError::MalformedRecord(e.to_string()))?;

    let mut record = BibRecord::new();
    record.leader = parsed.leader;

    for cf in &parsed.controlfield {
        record.add_control_field(&cf.tag, &cf.value);
    }

    for df in parsed.datafield {
        let mut field = Field::new(&df.tag, indicator_char(&df.ind1), indicator_char(&df.ind2));
        for sf in df.subfield {
            field.add_subfield(sf.code.chars().next().unwrap_or(' '), &sf.value);
        }
        record.add_field(field);
    }

    Ok(record)
}

/// Render a record as the MARC-in-JSON dump included on the response.
///
/// Control fields come first, then data fields in document order. Each
/// data field serializes as `{tag: {"subfields": [{code: value}, ...],
/// "ind1": ..., "ind2": ...}}`.
#[must_use]
pub fn marc_json(record: &BibRecord) -> Value {
    let mut fields = Vec::new();

    for (tag, value) in &record.control_fields {
        fields.push(json!({ tag.as_str(): value }));
    }

    for field in record.fields() {
        let subfields: Vec<Value> = field
            .subfields
            .iter()
            .map(|sf| json!({ sf.code.to_string(): sf.value }))
            .collect();
        fields.push(json!({
            field.tag.clone(): {
                "subfields": subfields,
                "ind1": field.indicator1.to_string(),
                "ind2": field.indicator2.to_string(),
            }
        }));
    }

    json!({ "leader": record.leader, "fields": fields })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<record xmlns="http://www.loc.gov/MARC21/slim">
  <leader>01234nam a2200289 a 4500</leader>
  <controlfield tag="001">990012345</controlfield>
  <controlfield tag="008">120523s2012    nyu           000 0 eng d</controlfield>
  <datafield tag="245" ind1="1" ind2="0">
    <subfield code="6">880-02</subfield>
    <subfield code="a">Title :</subfield>
    <subfield code="b">a subtitle /</subfield>
  </datafield>
  <datafield tag="880" ind1="1" ind2="0">
    <subfield code="6">245-02</subfield>
    <subfield code="a">Vernacular title</subfield>
  </datafield>
</record>"#;

    #[test]
    fn parses_default_namespace_record() {
        let record = parse_record(SAMPLE).unwrap();
        assert_eq!(record.leader, "01234nam a2200289 a 4500");
        assert_eq!(record.control_field("001"), Some("990012345"));
        assert_eq!(record.fields.len(), 2);

        let field = &record.fields[0];
        assert_eq!(field.tag, "245");
        assert_eq!(field.indicator1, '1');
        assert_eq!(field.indicator2, '0');
        assert_eq!(field.first_subfield('a'), Some("Title :"));
        assert_eq!(field.first_subfield('6'), Some("880-02"));
    }

    #[test]
    fn parses_prefixed_namespace_record() {
        let xml = r#"<marc:record xmlns:marc="http://www.loc.gov/MARC21/slim">
          <marc:leader>01234nam a2200289 a 4500</marc:leader>
          <marc:datafield tag="100" ind1="1" ind2=" ">
            <marc:subfield code="a">Author, An</marc:subfield>
          </marc:datafield>
        </marc:record>"#;
        let record = parse_record(xml).unwrap();
        assert_eq!(record.fields[0].tag, "100");
        assert_eq!(record.fields[0].first_subfield('a'), Some("Author, An"));
    }

    #[test]
    fn blank_indicator_attributes_become_spaces() {
        let xml = r#"<record>
          <datafield tag="500" ind1="" ind2="">
            <subfield code="a">A note</subfield>
          </datafield>
        </record>"#;
        let record = parse_record(xml).unwrap();
        assert_eq!(record.fields[0].indicator1, ' ');
        assert_eq!(record.fields[0].indicator2, ' ');
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(matches!(
            parse_record("this is not xml at all <record"),
            Err(CatalogError::MalformedRecord(_))
        ));
    }

    #[test]
    fn marc_json_shape() {
        let record = parse_record(SAMPLE).unwrap();
        let dump = marc_json(&record);
        assert_eq!(dump["leader"], "01234nam a2200289 a 4500");
        assert_eq!(dump["fields"][0]["001"], "990012345");
        let f245 = &dump["fields"][2]["245"];
        assert_eq!(f245["ind1"], "1");
        assert_eq!(f245["subfields"][1]["a"], "Title :");
    }
}
