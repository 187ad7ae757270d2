//! Solr client and flat index-document access.
//!
//! The client issues one keyword query (`id:{id}`) against the biblio
//! collection and hands back the first matching document. Zero matches is
//! [`CatalogError::NotFound`]; any transport or JSON failure propagates as
//! a typed error with no retries and no timeout policy of its own.
//!
//! [`SolrDoc`] wraps the returned document and implements the flat-field
//! extraction conventions, including the index-side pairing convention:
//! when a display field carries two or more values, the *first* is treated
//! as the transliterated member and the *second* as the original. This is
//! the opposite of the 880 engine's convention and is preserved as
//! observed behavior, not unified.

use crate::config::Config;
use crate::entities::{FieldElement, PairedField, SearchField};
use crate::error::{CatalogError, Result};
use serde_json::Value;
use tracing::debug;

/// HTTP client for the catalog Solr collection.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<(String, String)>,
}

impl SolrClient {
    /// Build a client from configuration. Basic auth is attached only
    /// when SolrCloud mode is on.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        SolrClient {
            http: reqwest::Client::new(),
            base_url: format!("{}/solr/biblio", config.solr_url),
            auth: config
                .solr_cloud_on
                .then(|| (config.solr_user.clone(), config.solr_password.clone())),
        }
    }

    /// Fetch the index document for one record id.
    ///
    /// # Errors
    ///
    /// [`CatalogError::NotFound`] when the index reports zero matches;
    /// [`CatalogError::Solr`] / [`CatalogError::Json`] on transport or
    /// body-shape failures.
    pub async fn get_record(&self, id: &str) -> Result<Value> {
        let url = format!("{}/select", self.base_url);
        let mut request = self.http.get(&url).query(&[("q", format!("id:{id}"))]);
        if let Some((user, password)) = &self.auth {
            request = request.basic_auth(user, Some(password));
        }

        debug!(id, %url, "querying solr");
        let body: Value = request.send().await?.json().await?;
        first_doc(body)
    }
}

/// Pull the first document out of a Solr select response body.
///
/// Split from the transport so the zero-results check is unit-testable.
///
/// # Errors
///
/// [`CatalogError::NotFound`] when `response.numFound` is zero or the
/// body lacks the expected shape.
pub fn first_doc(mut body: Value) -> Result<Value> {
    let num_found = body["response"]["numFound"].as_u64().unwrap_or(0);
    debug!(num_found, "solr response");
    if num_found == 0 {
        return Err(CatalogError::NotFound);
    }
    match body["response"]["docs"].get_mut(0) {
        Some(doc) => Ok(doc.take()),
        None => Err(CatalogError::NotFound),
    }
}

/// Flat-field access over one Solr document.
#[derive(Debug, Clone)]
pub struct SolrDoc {
    data: Value,
}

impl SolrDoc {
    /// Wrap a raw document.
    #[must_use]
    pub fn new(data: Value) -> Self {
        SolrDoc { data }
    }

    /// Raw member access.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// A member as a single string; for list members, the first string.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.data.get(key)? {
            Value::String(s) => Some(s),
            Value::Array(items) => items.first().and_then(Value::as_str),
            _ => None,
        }
    }

    /// A member as a list of strings. A bare string becomes a one-element
    /// list; anything absent or non-string yields nothing.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<String> {
        match self.data.get(key) {
            Some(Value::String(s)) => vec![s.clone()],
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Like [`SolrDoc::get_list`] but distinguishing a missing member
    /// (`None`) from an empty list.
    #[must_use]
    pub fn opt_list(&self, key: &str) -> Option<Vec<String>> {
        self.data.get(key)?;
        Some(self.get_list(key))
    }

    /// Each value of a list member as a bare text element.
    #[must_use]
    pub fn text_fields(&self, key: &str) -> Vec<FieldElement> {
        self.get_list(key)
            .into_iter()
            .map(FieldElement::bare)
            .collect()
    }

    /// The index-side pairing convention for display fields.
    ///
    /// Zero values: empty. One value: a single original-only pair. Two or
    /// more: one pair whose *first* value is the transliterated member and
    /// whose *second* is the original; values past the second are ignored.
    #[must_use]
    pub fn paired_field(&self, key: &str) -> Vec<PairedField> {
        let values = self.get_list(key);
        match values.as_slice() {
            [] => Vec::new(),
            [only] => vec![PairedField::original_only(FieldElement::bare(only))],
            [first, second, ..] => vec![PairedField {
                transliterated: Some(FieldElement::bare(first)),
                original: FieldElement::bare(second),
            }],
        }
    }

    /// The main-author pairing: display values from one member, parallel
    /// search/browse values from another. Missing search entries degrade
    /// to an element without search or browse members.
    #[must_use]
    pub fn main_author(&self) -> Vec<PairedField> {
        let display = self.get_list("main_author_display");
        let search = self.get_list("main_author");

        let element = |text: &str, search_value: Option<&String>| FieldElement {
            text: text.to_string(),
            tag: None,
            search: search_value.map(|v| {
                vec![SearchField {
                    field: "author".to_string(),
                    value: v.clone(),
                }]
            }),
            browse: search_value.cloned(),
        };

        match display.as_slice() {
            [] => Vec::new(),
            [only] => vec![PairedField::original_only(element(only, search.first()))],
            [first, second, ..] => vec![PairedField {
                transliterated: Some(element(first, search.first())),
                original: element(second, search.get(1)),
            }],
        }
    }
}
