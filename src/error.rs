//! Error types for catalog record operations.
//!
//! This module provides the [`CatalogError`] type for all catalog API
//! operations and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all catalog API operations.
///
/// Rule- and engine-level anomalies (missing subfields, absent tags,
/// unmatched linkages) are normal outcomes producing empty or partial
/// output and never surface here.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The search index returned zero documents for the requested id.
    #[error("record not found")]
    NotFound,

    /// The embedded MARCXML payload failed to parse.
    #[error("malformed MARC record: {0}")]
    MalformedRecord(String),

    /// The Solr document is missing a field the pipeline requires.
    #[error("solr document missing field: {0}")]
    MissingField(String),

    /// Transport-level failure talking to the search index.
    #[error("solr request failed: {0}")]
    Solr(#[from] reqwest::Error),

    /// The index response body was not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for [`std::result::Result`] with [`CatalogError`].
pub type Result<T> = std::result::Result<T, CatalogError>;
