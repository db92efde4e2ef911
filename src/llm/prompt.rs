//! Prompt builders for each review task.
//!
//! Prompt wording is a collaborator contract, not core logic: builders
//! take task input and return a string; nothing downstream depends on
//! the phrasing beyond "the model was asked for JSON".

use serde_json::Value;

use crate::review::types::{ArticleInput, ReviewCriteria};

pub const PROTOCOL_SYSTEM_PROMPT: &str = "\
You are a systematic-review methodologist. You draft review protocols. \
Respond with a single valid JSON object and nothing else.";

pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are a data-extraction assistant for systematic reviews. You extract \
only information explicitly present in the article record. Use null for \
missing fields. Respond with a single valid JSON object and nothing else.";

pub const NARRATIVE_SYSTEM_PROMPT: &str = "\
You are an academic writing assistant. You synthesize extracted study \
records into a narrative review. Respond with a single valid JSON object \
and nothing else.";

pub const MANUSCRIPT_SYSTEM_PROMPT: &str = "\
You are an academic writing assistant. You assemble a structured review \
manuscript from a protocol and a narrative synthesis. Respond with a \
single valid JSON object and nothing else.";

pub const CLASSIFICATION_SYSTEM_PROMPT: &str = "\
You are a screening assistant for systematic reviews. You judge article \
relevance against explicit inclusion and exclusion criteria. Respond with \
a single valid JSON array and nothing else.";

fn render_criteria(criteria: &ReviewCriteria) -> String {
    let inclusion = render_list(&criteria.inclusion_criteria);
    let exclusion = render_list(&criteria.exclusion_criteria);
    format!(
        "Research question: {}\n\nInclusion criteria:\n{inclusion}\nExclusion criteria:\n{exclusion}",
        criteria.main_question
    )
}

fn render_list(items: &[String]) -> String {
    if items.is_empty() {
        return "- (none given)\n".to_string();
    }
    items.iter().map(|item| format!("- {item}\n")).collect()
}

pub fn build_protocol_prompt(criteria: &ReviewCriteria) -> String {
    format!(
        r#"{}

Draft a systematic-review protocol for the question above.

Return a JSON object with exactly these keys:
{{
  "title": "working title of the review",
  "objective": "one-paragraph objective",
  "picoQuestion": {{"population": "", "intervention": "", "comparison": "", "outcome": ""}},
  "searchStrategy": "boolean search string suitable for bibliographic databases",
  "databases": ["database names"],
  "screeningProcedure": "how records will be screened",
  "dataExtractionPlan": "which fields will be extracted per study"
}}"#,
        render_criteria(criteria)
    )
}

pub fn build_extraction_prompt(article: &ArticleInput, fields: &[String]) -> String {
    let field_list = if fields.is_empty() {
        render_list(&default_extraction_fields())
    } else {
        render_list(fields)
    };
    format!(
        r#"<article id="{}">
Title: {}
Abstract: {}
</article>

Extract the following fields from the article record above. Use null for
any field the record does not state.
{field_list}
Return a JSON object with one key per field, plus "id" set to "{}"."#,
        article.id, article.title, article.abstract_text, article.id
    )
}

fn default_extraction_fields() -> Vec<String> {
    [
        "objective",
        "studyDesign",
        "population",
        "sampleSize",
        "intervention",
        "outcomes",
        "keyFindings",
        "limitations",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn build_narrative_prompt(main_question: &str, records: &[Value]) -> String {
    let records_json =
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"Research question: {main_question}

Extracted study records:
{records_json}

Write a narrative synthesis of these records, organized by theme.

Return a JSON object with exactly these keys:
{{
  "narrative": "the synthesis text, with inline references by article id",
  "themes": [{{"name": "", "articleIds": [""], "summary": ""}}],
  "gaps": ["identified evidence gaps"]
}}"#
    )
}

pub fn build_manuscript_prompt(
    main_question: &str,
    protocol: &Value,
    narrative: &Value,
) -> String {
    let protocol_json =
        serde_json::to_string_pretty(protocol).unwrap_or_else(|_| "{}".to_string());
    let narrative_json =
        serde_json::to_string_pretty(narrative).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"Research question: {main_question}

Protocol:
{protocol_json}

Narrative synthesis:
{narrative_json}

Assemble a review manuscript draft from the material above.

Return a JSON object with exactly these keys:
{{
  "title": "",
  "abstract": "",
  "introduction": "",
  "methods": "",
  "results": "",
  "discussion": "",
  "conclusion": ""
}}"#
    )
}

pub fn build_classification_prompt(
    criteria: &ReviewCriteria,
    articles: &[ArticleInput],
) -> String {
    let articles_json =
        serde_json::to_string_pretty(articles).unwrap_or_else(|_| "[]".to_string());
    format!(
        r#"{}

Articles to screen:
{articles_json}

Classify EVERY article above against the criteria. Keep each article's
"id" exactly as given.

Return a JSON array where each element is:
{{
  "id": "the article id, unchanged",
  "decision": "include | exclude | uncertain",
  "justification": "one sentence citing the matching criterion",
  "subtopic": "short subtopic label, or null"
}}"#,
        render_criteria(criteria)
    )
}
