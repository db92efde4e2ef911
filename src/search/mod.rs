pub mod crossref;
pub mod europe_pmc;
pub mod pubmed;
pub mod semantic_scholar;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::AppConfig;

/// Timeout for one search-API round trip.
const SEARCH_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Cannot reach {provider}")]
    Connect { provider: &'static str },

    #[error("{provider} request failed: {detail}")]
    Transport {
        provider: &'static str,
        detail: String,
    },

    #[error("{provider} returned error (status {status})")]
    Upstream {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Cannot decode {provider} response: {detail}")]
    Decode {
        provider: &'static str,
        detail: String,
    },
}

/// One bibliographic record, normalized across providers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    pub source: &'static str,
}

/// Shared HTTP client for the academic search passthroughs.
#[derive(Clone)]
pub struct SearchClient {
    pub(crate) http: reqwest::Client,
    pub(crate) ncbi_api_key: Option<String>,
    pub(crate) s2_api_key: Option<String>,
}

impl SearchClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            ncbi_api_key: config.ncbi_api_key.clone(),
            s2_api_key: config.semantic_scholar_api_key.clone(),
        }
    }
}

/// Send a prepared request and decode its JSON body, mapping transport
/// and status failures into the provider-tagged error taxonomy.
pub(crate) async fn send_json<T: DeserializeOwned>(
    provider: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, SearchError> {
    let response = request.send().await.map_err(|e| {
        if e.is_connect() {
            SearchError::Connect { provider }
        } else {
            SearchError::Transport {
                provider,
                detail: e.to_string(),
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchError::Upstream {
            provider,
            status: status.as_u16(),
            body,
        });
    }

    response.json().await.map_err(|e| SearchError::Decode {
        provider,
        detail: e.to_string(),
    })
}
