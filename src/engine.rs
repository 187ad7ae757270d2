//! The field-extraction and pairing engine.
//!
//! [`Extractor`] walks a parsed record once per rule, reconciling each
//! qualifying field with its alternate-script counterpart (an 880 field
//! linked through subfield 6) into a unified [`PairedField`].
//!
//! The script-precedence convention is positional, not language-aware:
//! when a pair is found, the 880 field is always rendered as `original`
//! and the directly-tagged field as `transliterated`. This mirrors how
//! vernacular content is cataloged into 880 fields, and it is applied
//! regardless of which script either field actually holds.

use crate::entities::{FieldElement, PairedField};
use crate::linkage::Linkage;
use crate::record::{BibRecord, Field};
use crate::rules::FieldRule;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Tag of the alternate-graphic-representation field.
const ALTERNATE_SCRIPT_TAG: &str = "880";

/// A matched candidate prior to filtering and rendering.
struct Candidate<'a> {
    original: &'a Field,
    transliterated: Option<&'a Field>,
}

/// Rule-driven extraction over one parsed record.
#[derive(Debug)]
pub struct Extractor<'a> {
    record: &'a BibRecord,
}

impl<'a> Extractor<'a> {
    /// Create an extractor borrowing the record for the request lifetime.
    #[must_use]
    pub fn new(record: &'a BibRecord) -> Self {
        Extractor { record }
    }

    /// Apply rules in order and emit paired results.
    ///
    /// Per rule: qualifying directly-tagged fields are visited in document
    /// order, each consuming its linked 880 counterpart when one exists;
    /// leftover 880 fields with qualifying text are emitted as
    /// original-only pairs (orphaned alternate representations). The
    /// rule's inclusion predicate runs against the candidate's original
    /// raw field; failing candidates are dropped before rendering.
    #[must_use]
    pub fn paired_fields(&self, rules: &[FieldRule]) -> Vec<PairedField> {
        let mut result = Vec::new();
        for rule in rules {
            for candidate in self.pair_candidates(rule) {
                if (rule.filter)(candidate.original) {
                    result.push(PairedField {
                        transliterated: candidate.transliterated.map(|f| rule.render(f)),
                        original: rule.render(candidate.original),
                    });
                }
            }
        }
        result
    }

    /// Extraction mode for outputs that never pair scripts (identifier
    /// lists and the like): render every qualifying field for every rule
    /// and discard structural duplicates. A field qualifies when it has
    /// text for the rule and passes the rule's inclusion predicate.
    ///
    /// The surviving entries keep first-occurrence order; callers must not
    /// rely on any particular order beyond determinism.
    #[must_use]
    pub fn unpaired_fields(&self, rules: &[FieldRule]) -> Vec<FieldElement> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();
        for rule in rules {
            for field in self.record.fields_by_tags(&rule.tags) {
                if rule.has_text(field) && (rule.filter)(field) {
                    let element = rule.render(field);
                    if seen.insert(element.clone()) {
                        result.push(element);
                    }
                }
            }
        }
        result
    }

    /// 880 fields whose linkage tag is one of the rule's tags, keyed by
    /// `"{linkage.tag}-{occurrence}"`. Later fields win on key collision
    /// (last-write-wins, original insertion position kept).
    fn alternate_script_map(&self, rule: &FieldRule) -> IndexMap<String, &'a Field> {
        let mut mapping = IndexMap::new();
        for field in self.record.fields_by_tag(ALTERNATE_SCRIPT_TAG) {
            let linkage = Linkage::parse(field);
            if linkage
                .tag
                .as_deref()
                .is_some_and(|tag| rule.matches_tag(tag))
            {
                mapping.insert(linkage.key(), field);
            }
        }
        mapping
    }

    fn pair_candidates(&self, rule: &FieldRule) -> Vec<Candidate<'a>> {
        let mut mapping = self.alternate_script_map(rule);
        let mut candidates = Vec::new();

        for field in self.record.fields_by_tags(&rule.tags) {
            if !rule.has_text(field) {
                continue;
            }
            match mapping.shift_remove(&Linkage::lookup_key(field)) {
                Some(alternate) => candidates.push(Candidate {
                    original: alternate,
                    transliterated: Some(field),
                }),
                None => candidates.push(Candidate {
                    original: field,
                    transliterated: None,
                }),
            }
        }

        // Orphaned alternate representations: 880s whose direct-tag
        // counterpart never qualified (or is absent from the record).
        for field in mapping.values() {
            if rule.has_text(field) {
                candidates.push(Candidate {
                    original: field,
                    transliterated: None,
                });
            }
        }

        candidates
    }
}
