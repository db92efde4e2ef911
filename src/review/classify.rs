//! Batched relevance screening — the sequential batch loop and its
//! result aggregation.

use crate::llm::{
    build_classification_prompt, extract_records, LlmError, ModelInvoke, RawModelOutput,
    CLASSIFICATION_SYSTEM_PROMPT,
};

use super::batch::{plan_batches, CLASSIFY_BATCH_SIZE};
use super::types::{ArticleInput, ClassificationRecord, ReviewCriteria};

/// Screen `articles` against `criteria`, one model call per batch.
///
/// Batches run strictly in order, each call awaited to completion
/// before the next; records append in encounter order within a batch,
/// so the aggregate order is deterministic. Entries the model returns
/// without an id or a decision label are dropped silently; unusable
/// batch output contributes zero records (see `extract_records`).
///
/// No partial commit: the first hard failure (empty response, provider
/// error) aborts the whole aggregation and discards records already
/// gathered from earlier batches.
pub async fn classify_articles<M: ModelInvoke>(
    model: &M,
    criteria: &ReviewCriteria,
    articles: &[ArticleInput],
) -> Result<Vec<ClassificationRecord>, LlmError> {
    let batches = plan_batches(articles, CLASSIFY_BATCH_SIZE);
    let mut results: Vec<ClassificationRecord> = Vec::with_capacity(articles.len());

    for (index, batch) in batches.iter().enumerate() {
        let prompt = build_classification_prompt(criteria, batch);
        let raw = model.complete(CLASSIFICATION_SYSTEM_PROMPT, &prompt).await?;
        let entries = extract_records(RawModelOutput::Text(raw))?;

        let mut kept = 0usize;
        for entry in &entries {
            match ClassificationRecord::from_entry(entry) {
                Some(record) => {
                    results.push(record);
                    kept += 1;
                }
                None => tracing::debug!(
                    batch = index,
                    "dropping entry without id or decision label"
                ),
            }
        }
        tracing::debug!(
            batch = index,
            size = batch.len(),
            kept,
            dropped = entries.len() - kept,
            "classification batch complete"
        );
    }

    Ok(results)
}
