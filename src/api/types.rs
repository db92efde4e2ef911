//! Shared state and request/response DTOs for the gateway API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AppConfig;
use crate::llm::ChatCompletionsClient;
use crate::review::types::{ArticleInput, ClassificationRecord, ReviewCriteria};
use crate::search::{SearchClient, SearchHit};

/// Hits requested per search call when the client gives no limit.
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
/// Upper bound on hits per search call, regardless of the client.
pub const MAX_SEARCH_LIMIT: usize = 100;

/// Shared context for all gateway routes. Generic over the model client
/// so router tests can run against a scripted mock.
pub struct ApiContext<M = ChatCompletionsClient> {
    pub config: Arc<AppConfig>,
    pub model: Arc<M>,
    pub search: SearchClient,
}

impl ApiContext {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let model = Arc::new(ChatCompletionsClient::new(&config));
        let search = SearchClient::new(&config);
        Self {
            config,
            model,
            search,
        }
    }
}

impl<M> Clone for ApiContext<M> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            model: self.model.clone(),
            search: self.search.clone(),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Request / response bodies
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyRequest {
    pub criteria: ReviewCriteria,
    #[serde(default)]
    pub articles: Vec<ArticleInput>,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub results: Vec<ClassificationRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractionRequest {
    pub article: ArticleInput,
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeRequest {
    pub main_question: String,
    #[serde(default)]
    pub records: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManuscriptRequest {
    pub main_question: String,
    pub protocol: Value,
    pub narrative: Value,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default = "default_search_limit")]
    pub limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl SearchQuery {
    /// Effective hit count: client limit clamped to the gateway maximum.
    pub fn capped_limit(&self) -> usize {
        self.limit.clamp(1, MAX_SEARCH_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchHit>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_request_parses_camel_case_criteria() {
        let request: ClassifyRequest = serde_json::from_value(json!({
            "criteria": {
                "mainQuestion": "Q",
                "inclusionCriteria": ["a"],
                "exclusionCriteria": []
            },
            "articles": [{"id": "1", "title": "T", "abstract": "A"}]
        }))
        .unwrap();
        assert_eq!(request.criteria.main_question, "Q");
        assert_eq!(request.articles.len(), 1);
    }

    #[test]
    fn search_query_limit_defaults_and_caps() {
        let query: SearchQuery = serde_json::from_value(json!({"query": "x"})).unwrap();
        assert_eq!(query.capped_limit(), DEFAULT_SEARCH_LIMIT);

        let query: SearchQuery =
            serde_json::from_value(json!({"query": "x", "limit": 5000})).unwrap();
        assert_eq!(query.capped_limit(), MAX_SEARCH_LIMIT);

        let query: SearchQuery =
            serde_json::from_value(json!({"query": "x", "limit": 0})).unwrap();
        assert_eq!(query.capped_limit(), 1);
    }
}
