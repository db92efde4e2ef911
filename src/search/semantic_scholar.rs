//! Semantic Scholar passthrough — Graph API paper search. The API key
//! is optional; without one, requests share the public rate limit.

use serde::Deserialize;

use super::{send_json, SearchClient, SearchError, SearchHit};

const S2_BASE: &str = "https://api.semanticscholar.org/graph/v1";
const PROVIDER: &str = "Semantic Scholar";

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    data: Vec<Paper>,
}

#[derive(Deserialize)]
struct Paper {
    #[serde(rename = "paperId")]
    paper_id: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    year: Option<i32>,
    #[serde(rename = "externalIds")]
    external_ids: Option<ExternalIds>,
}

#[derive(Deserialize)]
struct ExternalIds {
    #[serde(rename = "DOI")]
    doi: Option<String>,
}

impl SearchClient {
    pub async fn semantic_scholar(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let limit = limit.to_string();
        let mut request = self
            .http
            .get(format!("{S2_BASE}/paper/search"))
            .query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("fields", "title,abstract,year,externalIds"),
            ]);
        if let Some(key) = &self.s2_api_key {
            request = request.header("x-api-key", key);
        }
        let envelope: SearchEnvelope = send_json(PROVIDER, request).await?;

        Ok(envelope.data.into_iter().filter_map(hit_from_paper).collect())
    }
}

fn hit_from_paper(paper: Paper) -> Option<SearchHit> {
    Some(SearchHit {
        id: paper.paper_id?,
        title: paper.title.unwrap_or_default(),
        abstract_text: paper.abstract_text,
        year: paper.year,
        doi: paper.external_ids.and_then(|ids| ids.doi),
        source: "semantic-scholar",
    })
}
