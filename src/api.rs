//! HTTP surface.
//!
//! One route: `GET /records/{id}`. Failures serialize as
//! `{"detail": ...}` with 404 reserved for records the index does not
//! have; anything else is a 500 carrying the error text.

use crate::catalog_record::CatalogRecord;
use crate::error::CatalogError;
use crate::schemas::RecordResponse;
use crate::solr::SolrClient;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Solr client, shared across requests.
    pub solr: Arc<SolrClient>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/records/:id", get(get_record))
        .with_state(state)
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> std::result::Result<Json<RecordResponse>, ApiError> {
    info!(%id, "record request");
    let doc = state.solr.get_record(&id).await?;
    let record = CatalogRecord::from_doc(doc)?;
    Ok(Json(record.response()))
}

/// Error type at the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            CatalogError::NotFound => (StatusCode::NOT_FOUND, "Item not found".to_string()),
            err => {
                error!(%err, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
