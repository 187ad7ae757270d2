//! Process configuration.
//!
//! Built once at startup from the environment and passed to the components
//! that need it; there is no ambient global configuration object. Missing
//! variables silently fall back to the documented defaults — that is not
//! an error condition.

use serde::{Deserialize, Serialize};
use std::env;

/// Catalog API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Solr instance (default `http://solr:8983`).
    pub solr_url: String,
    /// Whether SolrCloud basic auth is in play (`SOLR_CLOUD_ON=true`).
    pub solr_cloud_on: bool,
    /// Basic-auth user for SolrCloud (default `solr`).
    pub solr_user: String,
    /// Basic-auth password for SolrCloud (default `SolrRocks`).
    pub solr_password: String,
    /// HTTP listen address (default `0.0.0.0:8000`).
    pub listen_addr: String,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Read configuration from the environment, applying defaults for
    /// anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        Config {
            solr_url: env_or("SOLR_URL", "http://solr:8983"),
            solr_cloud_on: env::var("SOLR_CLOUD_ON").as_deref() == Ok("true"),
            solr_user: env_or("SOLR_USER", "solr"),
            solr_password: env_or("SOLR_PASSWORD", "SolrRocks"),
            listen_addr: env_or("LISTEN_ADDR", "0.0.0.0:8000"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            solr_url: "http://solr:8983".to_string(),
            solr_cloud_on: false,
            solr_user: "solr".to_string(),
            solr_password: "SolrRocks".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
        }
    }
}
