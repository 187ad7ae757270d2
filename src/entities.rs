//! Output entities produced by the extraction engine.
//!
//! These are the shapes serialized into the record response: a rendered
//! field ([`FieldElement`]), its optional fielded-search values
//! ([`SearchField`]), and the unified original/transliterated pairing
//! ([`PairedField`]).
//!
//! Serialization convention: optional members that are `None` are omitted
//! from the JSON output entirely (never emitted as `null`). An empty
//! `search` list is still emitted when the producing rule declares search
//! specs but none yielded a value.

use serde::Serialize;

/// A fielded search value attached to a rendered field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchField {
    /// Search index field name (e.g. "title", "author", "isn").
    pub field: String,
    /// Value to search for.
    pub value: String,
}

/// One rendered field: the output of applying one rule to one field.
///
/// Index-sourced bare text values reuse this shape with only `text` set.
/// Derives `Eq`/`Hash` so the unpaired extraction path can de-duplicate
/// structurally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FieldElement {
    /// Display text (space-joined subfield values, trimmed).
    pub text: String,
    /// Tag of the source field; absent for index-sourced values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Fielded search values, present when the rule declares search specs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Vec<SearchField>>,
    /// Browse value, present when the rule declares browse subfields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse: Option<String>,
}

impl FieldElement {
    /// A bare text element with no tag, search, or browse members.
    #[must_use]
    pub fn bare(text: impl Into<String>) -> Self {
        FieldElement {
            text: text.into(),
            tag: None,
            search: None,
            browse: None,
        }
    }
}

impl std::fmt::Display for FieldElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// A field unified with its (optional) alternate-script counterpart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairedField {
    /// Counterpart rendering, when a linked field was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transliterated: Option<FieldElement>,
    /// Always present.
    pub original: FieldElement,
}

impl PairedField {
    /// A pair with no transliterated member.
    #[must_use]
    pub fn original_only(original: FieldElement) -> Self {
        PairedField {
            transliterated: None,
            original,
        }
    }

    /// Text preferred for citation output: the transliterated rendering
    /// when present, otherwise the original.
    #[must_use]
    pub fn citation_text(&self) -> &str {
        match &self.transliterated {
            Some(element) => &element.text,
            None => &self.original.text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn citation_text_prefers_transliterated() {
        let pair = PairedField {
            transliterated: Some(FieldElement::bare("romanized")),
            original: FieldElement::bare("vernacular"),
        };
        assert_eq!(pair.citation_text(), "romanized");

        let lone = PairedField::original_only(FieldElement::bare("only"));
        assert_eq!(lone.citation_text(), "only");
    }

    #[test]
    fn none_members_are_omitted_from_json() {
        let pair = PairedField::original_only(FieldElement::bare("text"));
        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json, serde_json::json!({"original": {"text": "text"}}));
    }
}
