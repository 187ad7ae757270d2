//! The record facade: one Solr document plus its parsed MARC record,
//! exposed as the full response surface.
//!
//! Index-sourced members read the Solr document through [`SolrDoc`];
//! MARC-sourced members run the pairing engine over the rule table in
//! [`crate::rules`]. [`CatalogRecord::response`] assembles the whole
//! response body in one pass.

use crate::citation::build_citation;
use crate::engine::Extractor;
use crate::entities::{FieldElement, PairedField};
use crate::error::{CatalogError, Result};
use crate::holdings::build_holdings;
use crate::marcxml;
use crate::record::BibRecord;
use crate::rules::rules_for;
use crate::schemas::{AcademicDiscipline, Holdings, RecordResponse};
use crate::solr::SolrDoc;
use serde_json::Value;
use tracing::warn;

/// One catalog record, backed by its Solr document and MARC data.
#[derive(Debug, Clone)]
pub struct CatalogRecord {
    doc: SolrDoc,
    record: BibRecord,
}

impl CatalogRecord {
    /// Build a record from a raw Solr document. The document's
    /// `fullrecord` member must hold the MARCXML serialization.
    pub fn from_doc(data: Value) -> Result<Self> {
        let fullrecord = data
            .get("fullrecord")
            .and_then(Value::as_str)
            .ok_or_else(|| CatalogError::MissingField("fullrecord".to_string()))?;
        let record = marcxml::parse_record(fullrecord)?;
        Ok(CatalogRecord {
            doc: SolrDoc::new(data),
            record,
        })
    }

    /// Build a record from an already-parsed MARC record.
    #[must_use]
    pub fn from_parts(data: Value, record: BibRecord) -> Self {
        CatalogRecord {
            doc: SolrDoc::new(data),
            record,
        }
    }

    /// The backing Solr document.
    #[must_use]
    pub fn doc(&self) -> &SolrDoc {
        &self.doc
    }

    /// The parsed MARC record.
    #[must_use]
    pub fn bib(&self) -> &BibRecord {
        &self.record
    }

    /// Record id.
    #[must_use]
    pub fn id(&self) -> String {
        self.doc.get_str("id").unwrap_or_default().to_string()
    }

    fn paired(&self, name: &str) -> Vec<PairedField> {
        Extractor::new(&self.record).paired_fields(rules_for(name))
    }

    fn unpaired(&self, name: &str) -> Vec<FieldElement> {
        Extractor::new(&self.record).unpaired_fields(rules_for(name))
    }

    // Index-sourced members the citation builder reads by name.

    /// Paired edition statements from the index.
    #[must_use]
    pub fn edition(&self) -> Vec<PairedField> {
        self.doc.paired_field("edition")
    }

    /// Library of Congress subject headings.
    #[must_use]
    pub fn lc_subjects(&self) -> Vec<FieldElement> {
        self.doc.text_fields("lc_subject_display")
    }

    /// Remediated LC subject headings.
    #[must_use]
    pub fn remediated_lc_subjects(&self) -> Vec<FieldElement> {
        self.doc.text_fields("remediated_lc_subject_display")
    }

    /// Subject headings from other vocabularies.
    #[must_use]
    pub fn other_subjects(&self) -> Vec<FieldElement> {
        self.doc.text_fields("non_lc_subject_display")
    }

    /// Languages of the item.
    #[must_use]
    pub fn language(&self) -> Vec<FieldElement> {
        self.doc.text_fields("language")
    }

    /// ISBNs.
    #[must_use]
    pub fn isbn(&self) -> Vec<FieldElement> {
        self.doc.text_fields("isbn")
    }

    /// ISSNs.
    #[must_use]
    pub fn issn(&self) -> Vec<FieldElement> {
        self.doc.text_fields("issn")
    }

    /// Browseable call numbers.
    #[must_use]
    pub fn call_number(&self) -> Vec<FieldElement> {
        self.doc.text_fields("callnumber_browse")
    }

    /// Report numbers.
    #[must_use]
    pub fn report_number(&self) -> Vec<FieldElement> {
        self.doc.text_fields("rptnum")
    }

    // MARC-sourced members the citation builder reads by name.

    /// Bibliography notes (504).
    #[must_use]
    pub fn bibliography(&self) -> Vec<PairedField> {
        self.paired("bibliography")
    }

    /// Summary notes (520, except content advice).
    #[must_use]
    pub fn summary(&self) -> Vec<PairedField> {
        self.paired("summary")
    }

    /// Content advice notes (520 with first indicator 4).
    #[must_use]
    pub fn content_advice(&self) -> Vec<PairedField> {
        self.paired("content_advice")
    }

    /// Preceding titles (780).
    #[must_use]
    pub fn previous_title(&self) -> Vec<PairedField> {
        self.paired("previous_title")
    }

    /// Series entries (4xx).
    #[must_use]
    pub fn series(&self) -> Vec<PairedField> {
        self.paired("series")
    }

    /// Numbering notes (362).
    #[must_use]
    pub fn numbering(&self) -> Vec<PairedField> {
        self.paired("numbering")
    }

    /// Academic disciplines, split from the delimited index field.
    #[must_use]
    pub fn academic_discipline(&self) -> Vec<AcademicDiscipline> {
        self.doc
            .get_list("hlb3Delimited")
            .into_iter()
            .map(|discipline| AcademicDiscipline {
                list: discipline.split(" | ").map(str::to_string).collect(),
            })
            .collect()
    }

    /// All holdings groups. A missing or malformed `hol` member yields
    /// empty holdings rather than an error.
    #[must_use]
    pub fn holdings(&self) -> Holdings {
        let data: Vec<Value> = match self.doc.get_str("hol") {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|err| {
                warn!(%err, id = %self.id(), "unparseable holdings data");
                Vec::new()
            }),
            None => Vec::new(),
        };
        build_holdings(&data, &self.id(), &self.record)
    }

    /// The full response body.
    #[must_use]
    pub fn response(&self) -> RecordResponse {
        RecordResponse {
            id: self.id(),
            title: self.doc.paired_field("title_display"),
            format: self.doc.get_list("format"),
            availability: self.doc.get_list("availability"),
            main_author: self.doc.main_author(),
            preferred_title: self.paired("preferred_title"),
            related_title: self.paired("related_title"),
            other_titles: self.paired("other_titles"),
            new_title: self.paired("new_title"),
            new_title_issn: self.unpaired("new_title_issn"),
            previous_title: self.previous_title(),
            previous_title_issn: self.unpaired("previous_title_issn"),
            contributors: self.paired("contributors"),
            published: self.doc.paired_field("publisher_display"),
            created: self.paired("created"),
            distributed: self.paired("distributed"),
            manufactured: self.paired("manufactured"),
            edition: self.edition(),
            series: self.series(),
            series_statement: self.paired("series_statement"),
            biography_history: self.paired("biography_history"),
            summary: self.summary(),
            in_collection: self.paired("in_collection"),
            access: self.paired("access"),
            finding_aids: self.paired("finding_aids"),
            terms_of_use: self.paired("terms_of_use"),
            language: self.language(),
            language_note: self.paired("language_note"),
            performers: self.paired("performers"),
            date_place_of_event: self.paired("date_place_of_event"),
            preferred_citation: self.paired("preferred_citation"),
            location_of_originals: self.paired("location_of_originals"),
            funding_information: self.paired("funding_information"),
            source_of_acquisition: self.paired("source_of_acquisition"),
            related_items: self.paired("related_items"),
            numbering: self.numbering(),
            current_publication_frequency: self.paired("current_publication_frequency"),
            former_publication_frequency: self.paired("former_publication_frequency"),
            numbering_notes: self.paired("numbering_notes"),
            source_of_description_note: self.paired("source_of_description_note"),
            copy_specific_note: self.paired("copy_specific_note"),
            references: self.paired("references"),
            copyright_status_information: self.paired("copyright_status_information"),
            note: self.paired("note"),
            arrangement: self.paired("arrangement"),
            copyright: self.paired("copyright"),
            physical_description: self.paired("physical_description"),
            map_scale: self.paired("map_scale"),
            reproduction_note: self.paired("reproduction_note"),
            original_version_note: self.paired("original_version_note"),
            playing_time: self.paired("playing_time"),
            media_format: self.paired("media_format"),
            audience: self.paired("audience"),
            content_advice: self.content_advice(),
            awards: self.paired("awards"),
            production_credits: self.paired("production_credits"),
            bibliography: self.bibliography(),
            isbn: self.isbn(),
            issn: self.issn(),
            call_number: self.call_number(),
            oclc: self.doc.text_fields("oclc"),
            gov_doc_number: self.doc.text_fields("sudoc"),
            publisher_number: self.paired("publisher_number"),
            report_number: self.report_number(),
            lc_subjects: self.lc_subjects(),
            remediated_lc_subjects: self.remediated_lc_subjects(),
            other_subjects: self.other_subjects(),
            academic_discipline: self.academic_discipline(),
            contents: self.paired("contents"),
            bookplate: self.doc.text_fields("bookplate"),
            indexing_date: self.doc.get_str("date_of_index").map(str::to_string),
            holdings: self.holdings(),
            marc: marcxml::marc_json(&self.record),
            citation: build_citation(self),
        }
    }
}
