//! MARC bibliographic record structures.
//!
//! This module provides the read-only record types the extraction engine
//! operates on:
//! - [`BibRecord`] — a parsed bibliographic record
//! - [`Field`] — variable data fields (010+)
//! - [`Subfield`] — coded data elements within fields
//!
//! Data fields are stored in a flat `Vec` in document order. Order matters:
//! the pairing engine breaks ties between repeated tags by position, so the
//! record must preserve exactly the order the fields appear in the source
//! serialization.
//!
//! # Examples
//!
//! ```ignore
//! use catalog_api::record::{BibRecord, Field};
//!
//! let mut record = BibRecord::new();
//! let mut field = Field::new("245", '1', '0');
//! field.add_subfield('a', "Title");
//! record.add_field(field);
//!
//! for field in record.fields_by_tag("245") {
//!     println!("{:?}", field.first_subfield('a'));
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A parsed MARC bibliographic record.
///
/// Immutable once parsed from the raw payload; one instance serves one
/// request. Control fields preserve insertion order via `IndexMap`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BibRecord {
    /// Record leader (24-character string), kept verbatim from the source.
    pub leader: String,
    /// Control fields (tags 001-009), tag -> value in insertion order.
    pub control_fields: IndexMap<String, String>,
    /// Data fields (tags 010+) in document order.
    pub fields: Vec<Field>,
}

/// A data field in a MARC record (fields 010 and higher).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field tag (3 digits).
    pub tag: String,
    /// First indicator (`' '` when blank).
    pub indicator1: char,
    /// Second indicator (`' '` when blank).
    pub indicator2: char,
    /// Subfields in source order (`SmallVec` avoids allocation for the
    /// typical field with 4 or fewer subfields).
    pub subfields: SmallVec<[Subfield; 4]>,
}

/// A subfield within a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subfield {
    /// Subfield code (single character).
    pub code: char,
    /// Subfield value.
    pub value: String,
}

impl BibRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        BibRecord::default()
    }

    /// Add a control field (000-009).
    pub fn add_control_field(&mut self, tag: &str, value: &str) {
        self.control_fields.insert(tag.to_string(), value.to_string());
    }

    /// Get a control field value.
    #[must_use]
    pub fn control_field(&self, tag: &str) -> Option<&str> {
        self.control_fields.get(tag).map(String::as_str)
    }

    /// Append a data field, preserving document order.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Iterate over all data fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Iterate over fields with a specific tag, in document order.
    pub fn fields_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Field> {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Iterate over fields whose tag is in the given list, in document
    /// order (not grouped by tag).
    ///
    /// The returned iterator owns its copy of the tag list, so it may
    /// outlive the `tags` borrow.
    pub fn fields_by_tags<'a>(&'a self, tags: &[&str]) -> impl Iterator<Item = &'a Field> {
        let tags: Vec<String> = tags.iter().map(ToString::to_string).collect();
        self.fields
            .iter()
            .filter(move |f| tags.iter().any(|t| *t == f.tag))
    }
}

impl Field {
    /// Create a new field with the given tag and indicators.
    #[must_use]
    pub fn new(tag: &str, indicator1: char, indicator2: char) -> Self {
        Field {
            tag: tag.to_string(),
            indicator1,
            indicator2,
            subfields: SmallVec::new(),
        }
    }

    /// Append a subfield, preserving source order.
    pub fn add_subfield(&mut self, code: char, value: &str) {
        self.subfields.push(Subfield {
            code,
            value: value.to_string(),
        });
    }

    /// Builder-style variant of [`Field::add_subfield`].
    #[must_use]
    pub fn with_subfield(mut self, code: char, value: &str) -> Self {
        self.add_subfield(code, value);
        self
    }

    /// Value of the first subfield with the given code.
    #[must_use]
    pub fn first_subfield(&self, code: char) -> Option<&str> {
        self.subfields
            .iter()
            .find(|sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Iterate over every value of the given subfield code, source order.
    pub fn subfields_by_code(&self, code: char) -> impl Iterator<Item = &str> {
        self.subfields
            .iter()
            .filter(move |sf| sf.code == code)
            .map(|sf| sf.value.as_str())
    }

    /// Whether the field carries a subfield with the given code.
    ///
    /// Presence only; an empty value still counts.
    #[must_use]
    pub fn has_subfield(&self, code: char) -> bool {
        self.subfields.iter().any(|sf| sf.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BibRecord {
        let mut record = BibRecord::new();
        record.add_control_field("001", "990012345");
        record.add_field(Field::new("245", '1', '0').with_subfield('a', "Title"));
        record.add_field(Field::new("650", ' ', '0').with_subfield('a', "Subject one"));
        record.add_field(Field::new("245", '0', ' ').with_subfield('a', "Other title"));
        record.add_field(Field::new("650", ' ', '0').with_subfield('a', "Subject two"));
        record
    }

    #[test]
    fn fields_by_tag_preserves_document_order() {
        let record = sample_record();
        let titles: Vec<&str> = record
            .fields_by_tag("245")
            .filter_map(|f| f.first_subfield('a'))
            .collect();
        assert_eq!(titles, vec!["Title", "Other title"]);
    }

    #[test]
    fn fields_by_tags_interleaves_in_document_order() {
        let record = sample_record();
        let tags: Vec<&str> = record
            .fields_by_tags(&["245", "650"])
            .map(|f| f.tag.as_str())
            .collect();
        assert_eq!(tags, vec!["245", "650", "245", "650"]);
    }

    #[test]
    fn fields_by_tags_iterator_outlives_the_tag_list() {
        let record = sample_record();
        let iter = {
            let tags = vec![String::from("650")];
            let refs: Vec<&str> = tags.iter().map(String::as_str).collect();
            record.fields_by_tags(&refs)
        };
        assert_eq!(iter.count(), 2);
    }

    #[test]
    fn repeated_subfield_codes_iterate_in_source_order() {
        let field = Field::new("505", '0', ' ')
            .with_subfield('a', "first")
            .with_subfield('t', "ignored")
            .with_subfield('a', "second");
        let values: Vec<&str> = field.subfields_by_code('a').collect();
        assert_eq!(values, vec!["first", "second"]);
    }

    #[test]
    fn has_subfield_checks_presence_only() {
        let field = Field::new("773", '0', ' ').with_subfield('t', "");
        assert!(field.has_subfield('t'));
        assert!(!field.has_subfield('w'));
    }

    #[test]
    fn control_field_lookup() {
        let record = sample_record();
        assert_eq!(record.control_field("001"), Some("990012345"));
        assert_eq!(record.control_field("008"), None);
    }
}
