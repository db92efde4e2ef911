//! PubMed passthrough via the NCBI E-utilities: esearch for PMIDs,
//! esummary for the record fields. Esummary carries no abstracts;
//! PubMed hits come back without one.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use super::{send_json, SearchClient, SearchError, SearchHit};

const EUTILS_BASE: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
const PROVIDER: &str = "PubMed";

#[derive(Deserialize)]
struct EsearchEnvelope {
    esearchresult: EsearchResult,
}

#[derive(Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

#[derive(Deserialize)]
struct EsummaryEnvelope {
    result: Option<EsummaryResult>,
}

#[derive(Deserialize)]
struct EsummaryResult {
    #[serde(default)]
    uids: Vec<String>,
    #[serde(flatten)]
    docs: HashMap<String, Value>,
}

impl SearchClient {
    pub async fn pubmed(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let retmax = limit.to_string();
        let mut search = self
            .http
            .get(format!("{EUTILS_BASE}/esearch.fcgi"))
            .query(&[
                ("db", "pubmed"),
                ("retmode", "json"),
                ("retmax", retmax.as_str()),
                ("term", query),
            ]);
        if let Some(key) = &self.ncbi_api_key {
            search = search.query(&[("api_key", key)]);
        }
        let found: EsearchEnvelope = send_json(PROVIDER, search).await?;

        let ids = found.esearchresult.idlist;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let id_list = ids.join(",");
        let mut summary = self
            .http
            .get(format!("{EUTILS_BASE}/esummary.fcgi"))
            .query(&[
                ("db", "pubmed"),
                ("retmode", "json"),
                ("id", id_list.as_str()),
            ]);
        if let Some(key) = &self.ncbi_api_key {
            summary = summary.query(&[("api_key", key)]);
        }
        let summaries: EsummaryEnvelope = send_json(PROVIDER, summary).await?;

        let Some(result) = summaries.result else {
            return Ok(Vec::new());
        };
        Ok(result
            .uids
            .iter()
            .filter_map(|uid| result.docs.get(uid).map(|doc| hit_from_summary(uid, doc)))
            .collect())
    }
}

fn hit_from_summary(uid: &str, doc: &Value) -> SearchHit {
    let title = doc
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let year = doc
        .get("pubdate")
        .and_then(Value::as_str)
        .and_then(|date| date.get(..4))
        .and_then(|y| y.parse().ok());
    let doi = doc
        .get("articleids")
        .and_then(Value::as_array)
        .and_then(|ids| {
            ids.iter().find_map(|entry| {
                let idtype = entry.get("idtype").and_then(Value::as_str)?;
                if idtype == "doi" {
                    entry
                        .get("value")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                } else {
                    None
                }
            })
        });

    SearchHit {
        id: uid.to_string(),
        title,
        abstract_text: None,
        year,
        doi,
        source: "pubmed",
    }
}
