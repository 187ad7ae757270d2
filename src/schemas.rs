//! Response schema types for the record endpoint.
//!
//! These structs fix the JSON shape of `GET /records/{id}`. Field-level
//! entities ([`crate::entities`]) serialize themselves; everything here is
//! the surrounding document: the full record response, holdings groups,
//! and the citation exports.

use crate::entities::{FieldElement, PairedField};
use serde::Serialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Holdings
// ---------------------------------------------------------------------------

/// An Alma digital representation.
#[derive(Debug, Clone, Serialize)]
pub struct AlmaDigitalItem {
    /// Delivery link.
    pub url: Option<String>,
    /// Delivery description (e.g. page ranges).
    pub delivery_description: Option<String>,
    /// Representation label.
    pub label: Option<String>,
    /// Public note.
    pub public_note: Option<String>,
}

/// A HathiTrust volume attached to the record.
#[derive(Debug, Clone, Serialize)]
pub struct HathiTrustItem {
    /// HathiTrust item id.
    pub id: String,
    /// Handle URL derived from the id.
    pub url: String,
    /// Enumeration/chronology description.
    pub description: Option<String>,
    /// Digitization source.
    pub source: Option<String>,
    /// Rights status.
    pub status: Option<String>,
}

/// An electronic (link-level) holding.
#[derive(Debug, Clone, Serialize)]
pub struct ElectronicItem {
    /// Access link.
    pub url: Option<String>,
    /// Campuses the link is scoped to.
    pub campuses: Vec<String>,
    /// Platform interface name.
    pub interface_name: Option<String>,
    /// Collection name.
    pub collection_name: Option<String>,
    /// Coverage description.
    pub description: Option<String>,
    /// Public note.
    pub public_note: Option<String>,
    /// Internal note.
    pub note: Option<String>,
    /// Whether the link is currently available.
    pub is_available: bool,
}

/// Library/location code pair.
#[derive(Debug, Clone, Serialize)]
pub struct LibLoc {
    /// Owning library code.
    pub library: Option<String>,
    /// Shelving location code.
    pub location: Option<String>,
}

/// A physical shelving location.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicalLocation {
    /// Location information link.
    pub url: Option<String>,
    /// Display name.
    pub text: Option<String>,
    /// Floor designation, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor: Option<String>,
    /// Library/location codes.
    pub code: LibLoc,
    /// Whether the item is in a temporary location.
    pub temporary: bool,
}

/// One finding-aid link.
#[derive(Debug, Clone, Serialize)]
pub struct FindingAidItem {
    /// Finding-aid link.
    pub url: Option<String>,
    /// Call number of the described physical holding.
    pub call_number: Option<String>,
    /// Description.
    pub description: Option<String>,
}

/// Finding aids grouped with the physical holding they describe.
#[derive(Debug, Clone, Serialize)]
pub struct FindingAids {
    /// Location of the described physical holding, when one is flagged.
    pub physical_location: Option<PhysicalLocation>,
    /// Finding-aid links.
    pub items: Vec<FindingAidItem>,
}

/// One barcoded physical item.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicalItem {
    /// Item id.
    pub item_id: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Fulfillment unit.
    pub fulfillment_unit: Option<String>,
    /// Item call number.
    pub call_number: Option<String>,
    /// Process type (in transit, missing, ...).
    pub process_type: Option<String>,
    /// Item policy.
    pub item_policy: Option<String>,
    /// Enumeration/chronology description.
    pub description: Option<String>,
    /// Inventory (fixed-shelf) number.
    pub inventory_number: Option<String>,
    /// Material type.
    pub material_type: Option<String>,
    /// Whether the item is requested through a reading-room reservation.
    pub reservable: bool,
    /// Shelving location.
    pub physical_location: PhysicalLocation,
    /// Request URL (reservation logon or get-this).
    pub url: Option<String>,
}

/// One physical holding with its items.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicalHolding {
    /// Holding id.
    pub holding_id: Option<String>,
    /// Holding-level call number.
    pub call_number: Option<String>,
    /// Summary holdings statement.
    pub summary: Option<String>,
    /// Public note.
    pub public_note: Option<String>,
    /// Shelving location.
    pub physical_location: PhysicalLocation,
    /// Items under this holding.
    pub items: Vec<PhysicalItem>,
}

/// All holdings groups for one record.
#[derive(Debug, Clone, Serialize)]
pub struct Holdings {
    /// HathiTrust volumes.
    pub hathi_trust_items: Vec<HathiTrustItem>,
    /// Alma digital representations.
    pub alma_digital_items: Vec<AlmaDigitalItem>,
    /// Electronic links.
    pub electronic_items: Vec<ElectronicItem>,
    /// Finding aids, when any holding carries them.
    pub finding_aids: Option<FindingAids>,
    /// Physical holdings.
    pub physical: Vec<PhysicalHolding>,
}

// ---------------------------------------------------------------------------
// Citation
// ---------------------------------------------------------------------------

/// One tagged citation entry: a content string with its RIS tag codes and
/// metadata names.
#[derive(Debug, Clone, Serialize)]
pub struct TaggedCitation {
    /// Rendered content.
    pub content: String,
    /// RIS tag codes this content serializes under.
    pub ris: Vec<String>,
    /// Highwire/meta names this content serializes under.
    pub meta: Vec<String>,
}

/// A CSL contributor: either a parsed personal name or a literal.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CslContributor {
    /// Family/given personal name.
    Name {
        /// Family name.
        family: String,
        /// Given name.
        given: String,
    },
    /// Unparsed name (corporate bodies, names without a comma).
    Literal {
        /// The literal string.
        literal: String,
    },
}

/// A CSL date rendered as a literal string.
#[derive(Debug, Clone, Serialize)]
pub struct CslLiteral {
    /// The literal value.
    pub literal: String,
}

/// CSL-JSON shaped citation data. Keys are kebab-case per the CSL schema,
/// with `ISBN`/`ISSN` uppercase.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Csl {
    /// Record id.
    pub id: Option<String>,
    /// CSL item type.
    #[serde(rename = "type")]
    pub csl_type: Option<String>,
    /// Title (245 abp).
    pub title: Option<String>,
    /// Edition statement.
    pub edition: Option<String>,
    /// Series title.
    pub collection_title: Option<String>,
    /// ISBNs.
    #[serde(rename = "ISBN")]
    pub isbn: Option<Vec<String>>,
    /// ISSNs.
    #[serde(rename = "ISSN")]
    pub issn: Option<Vec<String>>,
    /// First call number.
    pub call_number: Option<String>,
    /// Place of publication.
    pub publisher_place: Option<String>,
    /// Publisher.
    pub publisher: Option<String>,
    /// Issued date as a literal.
    pub issued: Option<CslLiteral>,
    /// Authors.
    pub author: Option<Vec<CslContributor>>,
    /// Editors.
    pub editor: Option<Vec<CslContributor>>,
    /// Report or series number.
    pub number: Option<String>,
}

/// Both citation exports.
#[derive(Debug, Clone, Serialize)]
pub struct Citation {
    /// RIS-tagged entries, in output order.
    pub tagged: Vec<TaggedCitation>,
    /// CSL-shaped data.
    pub csl: Csl,
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// An academic-discipline hierarchy (one path through the taxonomy).
#[derive(Debug, Clone, Serialize)]
pub struct AcademicDiscipline {
    /// Hierarchy levels, broadest first.
    pub list: Vec<String>,
}

/// The full record response for `GET /records/{id}`.
#[derive(Debug, Clone, Serialize)]
#[allow(missing_docs)] // members mirror the semantic properties one-to-one
pub struct RecordResponse {
    pub id: String,
    pub title: Vec<PairedField>,
    pub format: Vec<String>,
    pub availability: Vec<String>,
    pub main_author: Vec<PairedField>,
    pub preferred_title: Vec<PairedField>,
    pub related_title: Vec<PairedField>,
    pub other_titles: Vec<PairedField>,
    pub new_title: Vec<PairedField>,
    pub new_title_issn: Vec<FieldElement>,
    pub previous_title: Vec<PairedField>,
    pub previous_title_issn: Vec<FieldElement>,
    pub contributors: Vec<PairedField>,
    pub published: Vec<PairedField>,
    pub created: Vec<PairedField>,
    pub distributed: Vec<PairedField>,
    pub manufactured: Vec<PairedField>,
    pub edition: Vec<PairedField>,
    pub series: Vec<PairedField>,
    pub series_statement: Vec<PairedField>,
    pub biography_history: Vec<PairedField>,
    pub summary: Vec<PairedField>,
    pub in_collection: Vec<PairedField>,
    pub access: Vec<PairedField>,
    pub finding_aids: Vec<PairedField>,
    pub terms_of_use: Vec<PairedField>,
    pub language: Vec<FieldElement>,
    pub language_note: Vec<PairedField>,
    pub performers: Vec<PairedField>,
    pub date_place_of_event: Vec<PairedField>,
    pub preferred_citation: Vec<PairedField>,
    pub location_of_originals: Vec<PairedField>,
    pub funding_information: Vec<PairedField>,
    pub source_of_acquisition: Vec<PairedField>,
    pub related_items: Vec<PairedField>,
    pub numbering: Vec<PairedField>,
    pub current_publication_frequency: Vec<PairedField>,
    pub former_publication_frequency: Vec<PairedField>,
    pub numbering_notes: Vec<PairedField>,
    pub source_of_description_note: Vec<PairedField>,
    pub copy_specific_note: Vec<PairedField>,
    pub references: Vec<PairedField>,
    pub copyright_status_information: Vec<PairedField>,
    pub note: Vec<PairedField>,
    pub arrangement: Vec<PairedField>,
    pub copyright: Vec<PairedField>,
    pub physical_description: Vec<PairedField>,
    pub map_scale: Vec<PairedField>,
    pub reproduction_note: Vec<PairedField>,
    pub original_version_note: Vec<PairedField>,
    pub playing_time: Vec<PairedField>,
    pub media_format: Vec<PairedField>,
    pub audience: Vec<PairedField>,
    pub content_advice: Vec<PairedField>,
    pub awards: Vec<PairedField>,
    pub production_credits: Vec<PairedField>,
    pub bibliography: Vec<PairedField>,
    pub isbn: Vec<FieldElement>,
    pub issn: Vec<FieldElement>,
    pub call_number: Vec<FieldElement>,
    pub oclc: Vec<FieldElement>,
    pub gov_doc_number: Vec<FieldElement>,
    pub publisher_number: Vec<PairedField>,
    pub report_number: Vec<FieldElement>,
    pub lc_subjects: Vec<FieldElement>,
    pub remediated_lc_subjects: Vec<FieldElement>,
    pub other_subjects: Vec<FieldElement>,
    pub academic_discipline: Vec<AcademicDiscipline>,
    pub contents: Vec<PairedField>,
    pub bookplate: Vec<FieldElement>,
    pub indexing_date: Option<String>,
    pub holdings: Holdings,
    pub marc: Value,
    pub citation: Citation,
}
