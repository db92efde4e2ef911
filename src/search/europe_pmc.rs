//! Europe PMC passthrough — single REST search call, abstracts included.

use serde::Deserialize;

use super::{send_json, SearchClient, SearchError, SearchHit};

const EUROPE_PMC_BASE: &str = "https://www.ebi.ac.uk/europepmc/webservices/rest";
const PROVIDER: &str = "Europe PMC";

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "resultList")]
    result_list: Option<ResultList>,
}

#[derive(Deserialize)]
struct ResultList {
    #[serde(default)]
    result: Vec<Record>,
}

#[derive(Deserialize)]
struct Record {
    id: Option<String>,
    title: Option<String>,
    #[serde(rename = "abstractText")]
    abstract_text: Option<String>,
    #[serde(rename = "pubYear")]
    pub_year: Option<String>,
    doi: Option<String>,
}

impl SearchClient {
    pub async fn europe_pmc(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let page_size = limit.to_string();
        let request = self
            .http
            .get(format!("{EUROPE_PMC_BASE}/search"))
            .query(&[
                ("query", query),
                ("format", "json"),
                ("resultType", "core"),
                ("pageSize", page_size.as_str()),
            ]);
        let envelope: SearchEnvelope = send_json(PROVIDER, request).await?;

        let records = envelope
            .result_list
            .map(|list| list.result)
            .unwrap_or_default();
        Ok(records.into_iter().filter_map(hit_from_record).collect())
    }
}

fn hit_from_record(record: Record) -> Option<SearchHit> {
    Some(SearchHit {
        id: record.id?,
        title: record.title.unwrap_or_default(),
        abstract_text: record.abstract_text,
        year: record.pub_year.and_then(|y| y.parse().ok()),
        doi: record.doi,
        source: "europe-pmc",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn records_are_normalized() {
        let envelope: SearchEnvelope = serde_json::from_value(json!({
            "resultList": {
                "result": [{
                    "id": "EPMC1",
                    "title": "A cohort study of Y",
                    "abstractText": "Background: ...",
                    "pubYear": "2019",
                    "doi": "10.1000/abc"
                }]
            }
        }))
        .unwrap();
        let hits: Vec<SearchHit> = envelope
            .result_list
            .unwrap()
            .result
            .into_iter()
            .filter_map(hit_from_record)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "EPMC1");
        assert_eq!(hits[0].year, Some(2019));
        assert_eq!(hits[0].abstract_text.as_deref(), Some("Background: ..."));
        assert_eq!(hits[0].source, "europe-pmc");
    }

    #[test]
    fn record_without_id_is_skipped() {
        let record = Record {
            id: None,
            title: Some("t".to_string()),
            abstract_text: None,
            pub_year: None,
            doi: None,
        };
        assert!(hit_from_record(record).is_none());
    }

    #[test]
    fn empty_result_list_parses() {
        let envelope: SearchEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.result_list.is_none());
    }
}
