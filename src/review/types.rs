//! Domain records for the screening pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::decision::Decision;

/// Review framing sent by the client: the research question plus the
/// screening criteria the model judges articles against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCriteria {
    pub main_question: String,
    #[serde(default)]
    pub inclusion_criteria: Vec<String>,
    #[serde(default)]
    pub exclusion_criteria: Vec<String>,
}

/// One identity-bearing work item. The `id` is the join key correlating
/// model output back to input; the pipeline never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleInput {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

/// One screening outcome, normalized from a model-output entry.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationRecord {
    pub id: String,
    pub decision: Decision,
    pub justification: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtopic: Option<String>,
}

impl ClassificationRecord {
    /// Build a record from one model-output array entry.
    ///
    /// Requires both an `id` and a raw decision label; entries missing
    /// either are not records and return `None`. `justification`
    /// defaults to empty, `subtopic` stays absent when not given.
    pub fn from_entry(entry: &Value) -> Option<Self> {
        let id = entry_id(entry)?;
        let label = entry.get("decision").and_then(Value::as_str)?;
        Some(Self {
            id,
            decision: Decision::from_label(label),
            justification: entry
                .get("justification")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            subtopic: entry
                .get("subtopic")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }
}

/// Models echo ids back as strings or bare numbers; both are accepted
/// and normalized to the string form of the caller's id.
fn entry_id(entry: &Value) -> Option<String> {
    match entry.get("id")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_entry_is_retained() {
        let record = ClassificationRecord::from_entry(&json!({
            "id": "pmid-9",
            "decision": "include",
            "justification": "matches the population criterion",
            "subtopic": "dosage"
        }))
        .unwrap();
        assert_eq!(record.id, "pmid-9");
        assert_eq!(record.decision, Decision::Include);
        assert_eq!(record.justification, "matches the population criterion");
        assert_eq!(record.subtopic.as_deref(), Some("dosage"));
    }

    #[test]
    fn missing_subtopic_is_retained_as_absent() {
        let record = ClassificationRecord::from_entry(&json!({
            "id": "pmid-9",
            "decision": "exclude"
        }))
        .unwrap();
        assert!(record.subtopic.is_none());
        assert_eq!(record.justification, "");
    }

    #[test]
    fn entry_without_decision_label_is_dropped() {
        assert!(ClassificationRecord::from_entry(&json!({"id": "pmid-9"})).is_none());
    }

    #[test]
    fn entry_without_id_is_dropped() {
        assert!(
            ClassificationRecord::from_entry(&json!({"decision": "include"})).is_none()
        );
    }

    #[test]
    fn numeric_id_is_normalized_to_string() {
        let record = ClassificationRecord::from_entry(&json!({
            "id": 42,
            "decision": "uncertain"
        }))
        .unwrap();
        assert_eq!(record.id, "42");
    }

    #[test]
    fn record_serializes_without_null_subtopic() {
        let record = ClassificationRecord {
            id: "1".to_string(),
            decision: Decision::Include,
            justification: "j".to_string(),
            subtopic: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("subtopic").is_none());
        assert_eq!(json["decision"], "include");
    }

    #[test]
    fn article_abstract_uses_wire_name() {
        let article: ArticleInput = serde_json::from_value(json!({
            "id": "a1",
            "title": "T",
            "abstract": "body"
        }))
        .unwrap();
        assert_eq!(article.abstract_text, "body");
    }
}
