//! Linkage resolution for MARC 880 (Alternate Graphic Representation) fields.
//!
//! Subfield 6 (Linkage) connects a field with its counterpart in another
//! script: an original field carries `$6 880-NN` and the matching 880 field
//! carries `$6 TAG-NN`, where `TAG` is the original field's tag and `NN` the
//! shared occurrence number.
//!
//! Parsing is deliberately lax: the value is split on `-` or `/` and the
//! first two tokens are taken as-is. Malformed values simply never match a
//! counterpart; they are not an error.

use crate::record::Field;
use std::fmt;

/// The (tag, occurrence-number) pair parsed from a field's subfield 6.
///
/// Both members are `None` when the field carries no linkage subfield.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Linkage {
    /// Tag of the linked counterpart field (e.g. "880", "245").
    pub tag: Option<String>,
    /// Occurrence number shared by the two linked fields.
    pub occurrence: Option<String>,
}

impl Linkage {
    /// Parse the linkage of a field from its first subfield 6.
    #[must_use]
    pub fn parse(field: &Field) -> Self {
        match field.first_subfield('6') {
            None => Linkage::default(),
            Some(value) => {
                let mut parts = value.split(['-', '/']);
                Linkage {
                    tag: parts.next().map(str::to_string),
                    occurrence: parts.next().map(str::to_string),
                }
            }
        }
    }

    /// Map key identifying this linkage: `"{tag}-{occurrence}"`.
    ///
    /// Absent members render as empty strings. The pairing engine uses the
    /// same formatting on both the build side (880 linkage) and the lookup
    /// side (direct field tag plus its own occurrence), so absent members
    /// still compare equal structurally.
    #[must_use]
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Lookup key for a direct field: its own tag plus its own linkage
    /// occurrence number.
    #[must_use]
    pub fn lookup_key(field: &Field) -> String {
        let occurrence = Linkage::parse(field).occurrence.unwrap_or_default();
        format!("{}-{}", field.tag, occurrence)
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.tag.as_deref().unwrap_or(""),
            self.occurrence.as_deref().unwrap_or("")
        )
    }
}
