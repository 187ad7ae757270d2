#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Catalog API
//!
//! A library-catalog record service: it looks records up in a Solr index,
//! parses their embedded MARCXML, runs a declarative field-extraction
//! engine over the MARC data (pairing 880 alternate-graphic fields with
//! their romanized counterparts), and assembles a single JSON response
//! carrying titles, contributors, notes, holdings, and RIS/CSL citation
//! data.
//!
//! ## Modules
//!
//! - [`record`] — Core MARC structures (`BibRecord`, `Field`, `Subfield`)
//! - [`marcxml`] — MARCXML parsing and the MARC-in-JSON rendering
//! - [`linkage`] — Subfield 6 linkage parsing for 880 pairing
//! - [`rules`] — The declarative rule table driving field extraction
//! - [`engine`] — The pairing/extraction engine itself
//! - [`entities`] — Extracted-field value types (`FieldElement`, `PairedField`)
//! - [`solr`] — Solr client and flat index-document access
//! - [`catalog_record`] — The record facade assembling the response surface
//! - [`holdings`] — Holdings classification and reservation URLs
//! - [`citation`] — RIS and CSL citation export
//! - [`schemas`] — Response body types
//! - [`api`] — Axum router and HTTP error mapping
//! - [`config`] — Environment-driven configuration
//! - [`error`] — Error types and result alias

pub mod api;
pub mod catalog_record;
pub mod citation;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod holdings;
pub mod linkage;
pub mod marcxml;
/// Core MARC record structures (`BibRecord`, `Field`, `Subfield`)
pub mod record;
pub mod rules;
pub mod schemas;
pub mod solr;

pub use api::{router, AppState};
pub use catalog_record::CatalogRecord;
pub use config::Config;
pub use engine::Extractor;
pub use entities::{FieldElement, PairedField, SearchField};
pub use error::{CatalogError, Result};
pub use linkage::Linkage;
pub use record::{BibRecord, Field, Subfield};
pub use rules::{rules_for, FieldRule};
pub use solr::{SolrClient, SolrDoc};
