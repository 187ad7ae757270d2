//! Field extraction rules and the central rule table.
//!
//! A [`FieldRule`] is an immutable description of one semantic extraction:
//! which tags to scan, which subfield codes form the display text, which
//! codes (if any) feed fielded search and browse values, and an optional
//! inclusion predicate over the raw field. One semantic output may use
//! several rules, applied in order with results concatenated.
//!
//! All rule tables are process-wide statics built once at startup; the
//! record facade looks its rules up here by semantic-output name.

use crate::entities::{FieldElement, SearchField};
use crate::record::Field;
use indexmap::IndexMap;
use lazy_static::lazy_static;

/// Default text subfield codes: every lowercase ASCII letter.
pub const ALL_LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";

/// Inclusion predicate over a raw field. Pure boolean check, never fails.
pub type FieldFilter = fn(&Field) -> bool;

/// One fielded-search extraction attached to a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    /// Subfield codes whose concatenation forms the search value.
    pub subfields: &'static str,
    /// Search index field name the value targets.
    pub field: &'static str,
}

/// Immutable configuration for one semantic field extraction.
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Tags this rule scans.
    pub tags: Vec<&'static str>,
    /// Subfield codes forming the display text.
    pub text_subfields: String,
    /// Fielded-search extractions; empty = no search output.
    pub search: Vec<SearchSpec>,
    /// Subfield codes forming the browse value, when declared.
    pub browse_subfields: Option<String>,
    /// Inclusion predicate applied to the pair's original raw field.
    pub filter: FieldFilter,
}

fn always(_field: &Field) -> bool {
    true
}

/// Concatenate a field's values for the requested subfield codes.
///
/// Codes are visited in requested order; within a code, occurrences keep
/// source order. All collected values are single-space-joined. Codes
/// absent from the field contribute nothing.
#[must_use]
pub fn subfield_concat(field: &Field, codes: &str) -> String {
    let mut values: Vec<&str> = Vec::new();
    for code in codes.chars() {
        values.extend(field.subfields_by_code(code));
    }
    values.join(" ")
}

/// The lowercase alphabet with the given codes removed.
///
/// Several rules use "all letters except ..." subfield sets (e.g. the
/// preferred-title rules drop `l` to keep language designations out of
/// the search value).
#[must_use]
pub fn lowercase_except(skip: &str) -> String {
    ALL_LOWERCASE
        .chars()
        .filter(|c| !skip.contains(*c))
        .collect()
}

impl FieldRule {
    /// New rule over the given tags, defaulting to all lowercase text
    /// subfields, no search or browse output, and an always-true filter.
    #[must_use]
    pub fn for_tags(tags: &[&'static str]) -> Self {
        FieldRule {
            tags: tags.to_vec(),
            text_subfields: ALL_LOWERCASE.to_string(),
            search: Vec::new(),
            browse_subfields: None,
            filter: always,
        }
    }

    /// Replace the text subfield codes.
    #[must_use]
    pub fn text_subfields(mut self, codes: impl Into<String>) -> Self {
        self.text_subfields = codes.into();
        self
    }

    /// Append a fielded-search extraction.
    #[must_use]
    pub fn search(mut self, subfields: &'static str, field: &'static str) -> Self {
        self.search.push(SearchSpec { subfields, field });
        self
    }

    /// Declare browse subfield codes.
    #[must_use]
    pub fn browse(mut self, codes: impl Into<String>) -> Self {
        self.browse_subfields = Some(codes.into());
        self
    }

    /// Set the inclusion predicate.
    #[must_use]
    pub fn filter(mut self, filter: FieldFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Whether the rule scans the given tag.
    #[must_use]
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }

    /// Whether the field has any text under this rule's text subfields.
    ///
    /// The qualifying check the engine applies before pairing: the raw
    /// (untrimmed) concatenation must be non-empty.
    #[must_use]
    pub fn has_text(&self, field: &Field) -> bool {
        !subfield_concat(field, &self.text_subfields).is_empty()
    }

    /// Render a field into its output shape under this rule.
    #[must_use]
    pub fn render(&self, field: &Field) -> FieldElement {
        let search = if self.search.is_empty() {
            None
        } else {
            Some(
                self.search
                    .iter()
                    .filter_map(|spec| {
                        let value = subfield_concat(field, spec.subfields);
                        (!value.is_empty()).then(|| SearchField {
                            field: spec.field.to_string(),
                            value,
                        })
                    })
                    .collect(),
            )
        };

        FieldElement {
            text: subfield_concat(field, &self.text_subfields).trim().to_string(),
            tag: Some(field.tag.clone()),
            search,
            browse: self
                .browse_subfields
                .as_deref()
                .map(|codes| subfield_concat(field, codes)),
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates shared across the rule table
// ---------------------------------------------------------------------------

fn has_title_subfield(field: &Field) -> bool {
    field.has_subfield('t')
}

fn is_linked_title(field: &Field) -> bool {
    has_title_subfield(field) && field.indicator2 != '2'
}

fn is_analytic_title(field: &Field) -> bool {
    has_title_subfield(field) && field.indicator2 == '2'
}

fn first_value_non_empty(field: &Field, code: char) -> bool {
    field.first_subfield(code).is_some_and(|v| !v.is_empty())
}

lazy_static! {
    /// Semantic-output name -> extraction rules, in application order.
    ///
    /// The complete declarative surface of the record facade lives here;
    /// each facade member is a thin lookup into this table.
    static ref RULE_TABLE: IndexMap<&'static str, Vec<FieldRule>> = {
        // Leaked once at table construction; these live for the process.
        let no_l: &'static str = Box::leak(lowercase_except("l").into_boxed_str());
        let no_i: &'static str = Box::leak(lowercase_except("i").into_boxed_str());
        let related_display = "abcdefgjklmnopqrst";

        let mut table: IndexMap<&'static str, Vec<FieldRule>> = IndexMap::new();

        table.insert("preferred_title", vec![
            FieldRule::for_tags(&["130", "240", "243"]).search(no_l, "title"),
            FieldRule::for_tags(&["730"])
                .text_subfields(no_i)
                .search(no_i, "title")
                .filter(|f| f.indicator2 == '2'),
        ]);

        table.insert("related_title", vec![
            FieldRule::for_tags(&["730"])
                .text_subfields(no_i)
                .search(no_i, "title")
                .filter(|f| f.indicator2 == ' '),
            FieldRule::for_tags(&["700", "710"])
                .text_subfields(related_display)
                .search("fjklmnoprst", "title")
                .filter(is_linked_title),
            FieldRule::for_tags(&["711"])
                .text_subfields(related_display)
                .search("fklmnoprst", "title")
                .filter(is_linked_title),
        ]);

        table.insert("other_titles", vec![
            FieldRule::for_tags(&["246", "247", "740"]).search(ALL_LOWERCASE, "title"),
            FieldRule::for_tags(&["700", "710"])
                .text_subfields(related_display)
                .search("fkjlmnoprst", "title")
                .filter(is_analytic_title),
            FieldRule::for_tags(&["711"])
                .text_subfields(related_display)
                .search("fklmnoprst", "title")
                .filter(is_analytic_title),
        ]);

        table.insert("new_title", vec![
            FieldRule::for_tags(&["785"])
                .text_subfields("ast")
                .search("a", "author")
                .search("st", "title"),
        ]);
        table.insert("new_title_issn", vec![
            FieldRule::for_tags(&["785"]).text_subfields("x"),
        ]);
        table.insert("previous_title", vec![
            FieldRule::for_tags(&["780"])
                .text_subfields("ast")
                .search("a", "author")
                .search("st", "title"),
        ]);
        table.insert("previous_title_issn", vec![
            FieldRule::for_tags(&["780"]).text_subfields("x"),
        ]);

        table.insert("contributors", vec![
            FieldRule::for_tags(&["700", "710", "711"])
                .text_subfields("abcdefgjklnpqu4")
                .search("abcdgjkqu", "author")
                .browse("abcdgjkqu")
                .filter(|f| !f.has_subfield('t') && f.indicator2 != '2'),
        ]);

        table.insert("created", vec![
            FieldRule::for_tags(&["264"]).filter(|f| f.indicator2 == '0'),
        ]);
        table.insert("distributed", vec![
            FieldRule::for_tags(&["264"]).filter(|f| f.indicator2 == '2'),
        ]);
        table.insert("manufactured", vec![
            FieldRule::for_tags(&["260"]).text_subfields("efg"),
            FieldRule::for_tags(&["264"]).filter(|f| f.indicator2 == '3'),
        ]);
        table.insert("copyright", vec![
            FieldRule::for_tags(&["264"]).filter(|f| f.indicator2 == '4'),
        ]);

        table.insert("series", vec![
            FieldRule::for_tags(&["400", "410", "411", "440", "490"]),
        ]);
        table.insert("series_statement", vec![
            FieldRule::for_tags(&["440", "800", "810", "811", "830"]),
        ]);

        table.insert("biography_history", vec![
            FieldRule::for_tags(&["545"]).text_subfields("a"),
        ]);
        table.insert("summary", vec![
            FieldRule::for_tags(&["520"])
                .text_subfields("abc3")
                .filter(|f| f.indicator1 != '4'),
        ]);
        table.insert("content_advice", vec![
            FieldRule::for_tags(&["520"])
                .text_subfields("abc3")
                .filter(|f| f.indicator1 == '4'),
        ]);

        table.insert("in_collection", vec![
            FieldRule::for_tags(&["773"])
                .text_subfields("t")
                .search("w", "isn")
                .filter(|f| first_value_non_empty(f, 't')),
            FieldRule::for_tags(&["773"])
                .text_subfields("w")
                .search("w", "isn")
                .filter(|f| !first_value_non_empty(f, 't')),
        ]);

        table.insert("access", vec![
            FieldRule::for_tags(&["506"]).text_subfields("abc"),
        ]);
        table.insert("finding_aids", vec![
            FieldRule::for_tags(&["555"])
                .text_subfields("abcd3")
                .filter(|f| !first_value_non_empty(f, 'u')),
        ]);
        table.insert("terms_of_use", vec![FieldRule::for_tags(&["540"])]);
        table.insert("language_note", vec![FieldRule::for_tags(&["546"])]);
        table.insert("performers", vec![
            FieldRule::for_tags(&["511"]).text_subfields("a"),
        ]);
        table.insert("date_place_of_event", vec![
            FieldRule::for_tags(&["518"]).text_subfields("adop23"),
        ]);
        table.insert("preferred_citation", vec![
            FieldRule::for_tags(&["524"]).text_subfields("a"),
        ]);
        table.insert("location_of_originals", vec![
            FieldRule::for_tags(&["535"]).text_subfields(format!("{ALL_LOWERCASE}3")),
        ]);
        table.insert("funding_information", vec![
            FieldRule::for_tags(&["536"]).text_subfields("a"),
        ]);
        table.insert("source_of_acquisition", vec![
            FieldRule::for_tags(&["541"]).text_subfields("a"),
        ]);
        table.insert("related_items", vec![
            FieldRule::for_tags(&["580"]).text_subfields("a"),
        ]);
        table.insert("numbering", vec![
            FieldRule::for_tags(&["362"]).text_subfields("a"),
        ]);
        table.insert("current_publication_frequency", vec![
            FieldRule::for_tags(&["310"]).text_subfields("ab"),
        ]);
        table.insert("former_publication_frequency", vec![
            FieldRule::for_tags(&["321"]).text_subfields("ab"),
        ]);
        table.insert("numbering_notes", vec![
            FieldRule::for_tags(&["515"]).text_subfields("a"),
        ]);
        table.insert("source_of_description_note", vec![
            FieldRule::for_tags(&["588"]).text_subfields("a"),
        ]);
        table.insert("copy_specific_note", vec![
            FieldRule::for_tags(&["590"]).text_subfields("a"),
        ]);
        table.insert("references", vec![FieldRule::for_tags(&["510"])]);
        table.insert("copyright_status_information", vec![
            FieldRule::for_tags(&["542"]),
        ]);
        table.insert("note", vec![
            FieldRule::for_tags(&[
                "500", "501", "502", "525", "526", "530", "547", "550", "552",
                "561", "565", "584", "585",
            ])
            .text_subfields("a"),
        ]);
        table.insert("arrangement", vec![
            FieldRule::for_tags(&["351"]).text_subfields("ab3"),
        ]);
        table.insert("physical_description", vec![FieldRule::for_tags(&["300"])]);
        table.insert("map_scale", vec![
            FieldRule::for_tags(&["255"]).text_subfields("a"),
        ]);
        table.insert("reproduction_note", vec![
            FieldRule::for_tags(&["533"]).text_subfields(format!("{ALL_LOWERCASE}35")),
        ]);
        table.insert("original_version_note", vec![
            FieldRule::for_tags(&["534"]).text_subfields(format!("{ALL_LOWERCASE}35")),
        ]);
        table.insert("playing_time", vec![
            FieldRule::for_tags(&["306"]).text_subfields("a"),
        ]);
        table.insert("media_format", vec![
            FieldRule::for_tags(&["538"]).text_subfields("a"),
        ]);
        table.insert("audience", vec![
            FieldRule::for_tags(&["521"]).text_subfields("a"),
        ]);
        table.insert("awards", vec![
            FieldRule::for_tags(&["586"]).text_subfields("a"),
        ]);
        table.insert("production_credits", vec![
            FieldRule::for_tags(&["508"]).text_subfields("a"),
        ]);
        table.insert("bibliography", vec![
            FieldRule::for_tags(&["504"]).text_subfields("a"),
        ]);
        table.insert("publisher_number", vec![
            FieldRule::for_tags(&["028"]).text_subfields("ab"),
        ]);
        table.insert("contents", vec![FieldRule::for_tags(&["505"])]);

        table
    };
}

/// Rules for a semantic output name; unknown names yield an empty slice.
#[must_use]
pub fn rules_for(name: &str) -> &'static [FieldRule] {
    RULE_TABLE.get(name).map_or(&[], Vec::as_slice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Field;

    #[test]
    fn subfield_concat_orders_by_requested_code() {
        let field = Field::new("245", '1', '0')
            .with_subfield('c', "z")
            .with_subfield('a', "x")
            .with_subfield('b', "y");
        assert_eq!(subfield_concat(&field, "abc"), "x y z");
    }

    #[test]
    fn subfield_concat_joins_repeated_codes_in_source_order() {
        let field = Field::new("505", '0', ' ')
            .with_subfield('a', "one")
            .with_subfield('a', "two");
        assert_eq!(subfield_concat(&field, "a"), "one two");
    }

    #[test]
    fn lowercase_except_drops_requested_codes() {
        assert_eq!(lowercase_except("l"), "abcdefghijkmnopqrstuvwxyz");
        assert_eq!(lowercase_except("i"), "abcdefghjklmnopqrstuvwxyz");
    }

    #[test]
    fn render_attaches_search_and_browse() {
        let rule = FieldRule::for_tags(&["700"])
            .text_subfields("ab")
            .search("a", "author")
            .browse("ab");
        let field = Field::new("700", '1', ' ')
            .with_subfield('a', "Name,")
            .with_subfield('b', "Jr.");
        let element = rule.render(&field);
        assert_eq!(element.text, "Name, Jr.");
        assert_eq!(element.tag.as_deref(), Some("700"));
        let search = element.search.unwrap();
        assert_eq!(search[0].field, "author");
        assert_eq!(search[0].value, "Name,");
        assert_eq!(element.browse.as_deref(), Some("Name, Jr."));
    }

    #[test]
    fn render_drops_empty_search_specs_but_keeps_the_list() {
        let rule = FieldRule::for_tags(&["785"])
            .text_subfields("ast")
            .search("a", "author")
            .search("st", "title");
        let field = Field::new("785", '0', '0').with_subfield('t', "Continued by");
        let element = rule.render(&field);
        let search = element.search.unwrap();
        assert_eq!(search.len(), 1);
        assert_eq!(search[0].field, "title");
    }

    #[test]
    fn render_without_search_specs_omits_the_member() {
        let rule = FieldRule::for_tags(&["300"]);
        let field = Field::new("300", ' ', ' ').with_subfield('a', "xii, 250 p.");
        assert!(rule.render(&field).search.is_none());
    }

    #[test]
    fn has_text_requires_a_value_under_the_rule_codes() {
        let rule = FieldRule::for_tags(&["785"]).text_subfields("x");
        let with = Field::new("785", '0', '0').with_subfield('x', "0028-0836");
        let without = Field::new("785", '0', '0').with_subfield('t', "Title only");
        assert!(rule.has_text(&with));
        assert!(!rule.has_text(&without));
    }

    #[test]
    fn rule_table_covers_the_semantic_surface() {
        for name in [
            "preferred_title",
            "related_title",
            "other_titles",
            "contributors",
            "note",
            "contents",
            "publisher_number",
        ] {
            assert!(!rules_for(name).is_empty(), "missing rules for {name}");
        }
        assert!(rules_for("no_such_output").is_empty());
    }

    #[test]
    fn contributors_filter_excludes_title_entries() {
        let rule = &rules_for("contributors")[0];
        let name_entry = Field::new("700", '1', ' ').with_subfield('a', "Author, An");
        let title_entry = Field::new("700", '1', '2')
            .with_subfield('a', "Author, An")
            .with_subfield('t', "Work title");
        assert!((rule.filter)(&name_entry));
        assert!(!(rule.filter)(&title_entry));
    }
}
