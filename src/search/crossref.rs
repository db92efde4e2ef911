//! CrossRef passthrough — single works query, DOI-keyed records.

use serde::Deserialize;

use super::{send_json, SearchClient, SearchError, SearchHit};

const CROSSREF_BASE: &str = "https://api.crossref.org";
const PROVIDER: &str = "CrossRef";

#[derive(Deserialize)]
struct WorksEnvelope {
    message: WorksMessage,
}

#[derive(Deserialize)]
struct WorksMessage {
    #[serde(default)]
    items: Vec<Work>,
}

#[derive(Deserialize)]
struct Work {
    #[serde(rename = "DOI")]
    doi: Option<String>,
    #[serde(default)]
    title: Vec<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    issued: Option<DateField>,
}

#[derive(Deserialize)]
struct DateField {
    #[serde(rename = "date-parts", default)]
    date_parts: Vec<Vec<Option<i32>>>,
}

impl SearchClient {
    pub async fn crossref(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<SearchHit>, SearchError> {
        let rows = limit.to_string();
        let request = self
            .http
            .get(format!("{CROSSREF_BASE}/works"))
            .query(&[("query", query), ("rows", rows.as_str())]);
        let envelope: WorksEnvelope = send_json(PROVIDER, request).await?;

        Ok(envelope
            .message
            .items
            .into_iter()
            .filter_map(hit_from_work)
            .collect())
    }
}

fn hit_from_work(work: Work) -> Option<SearchHit> {
    let doi = work.doi?;
    let year = work
        .issued
        .and_then(|d| d.date_parts.into_iter().next())
        .and_then(|parts| parts.into_iter().next())
        .flatten();
    Some(SearchHit {
        id: doi.clone(),
        title: work.title.into_iter().next().unwrap_or_default(),
        abstract_text: work.abstract_text,
        year,
        doi: Some(doi),
        source: "crossref",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn works_are_normalized() {
        let envelope: WorksEnvelope = serde_json::from_value(json!({
            "message": {
                "items": [{
                    "DOI": "10.1000/xyz",
                    "title": ["A meta-analysis of Z"],
                    "abstract": "<jats:p>Text</jats:p>",
                    "issued": {"date-parts": [[2022, 3, 1]]}
                }]
            }
        }))
        .unwrap();
        let hits: Vec<SearchHit> = envelope
            .message
            .items
            .into_iter()
            .filter_map(hit_from_work)
            .collect();
        assert_eq!(hits[0].id, "10.1000/xyz");
        assert_eq!(hits[0].title, "A meta-analysis of Z");
        assert_eq!(hits[0].year, Some(2022));
        assert_eq!(hits[0].source, "crossref");
    }

    #[test]
    fn work_without_doi_is_skipped() {
        let work: Work = serde_json::from_value(json!({"title": ["t"]})).unwrap();
        assert!(hit_from_work(work).is_none());
    }

    #[test]
    fn null_date_parts_are_tolerated() {
        let work: Work = serde_json::from_value(json!({
            "DOI": "10.1000/a",
            "issued": {"date-parts": [[null]]}
        }))
        .unwrap();
        let hit = hit_from_work(work).unwrap();
        assert!(hit.year.is_none());
    }
}
