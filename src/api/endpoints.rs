//! Route handlers — thin: validate input, build the prompt, invoke the
//! model or a search shim, normalize, respond.

use axum::extract::{Query, State};
use axum::Json;
use serde_json::Value;

use crate::config::APP_VERSION;
use crate::llm::{
    build_extraction_prompt, build_manuscript_prompt, build_narrative_prompt,
    build_protocol_prompt, extract_object, ModelInvoke, RawModelOutput,
    EXTRACTION_SYSTEM_PROMPT, MANUSCRIPT_SYSTEM_PROMPT, NARRATIVE_SYSTEM_PROMPT,
    PROTOCOL_SYSTEM_PROMPT,
};
use crate::review::classify_articles;
use crate::review::types::ReviewCriteria;

use super::error::ApiError;
use super::types::{
    ApiContext, ClassifyRequest, ClassifyResponse, ExtractionRequest, HealthBody,
    ManuscriptRequest, NarrativeRequest, SearchQuery, SearchResponse,
};

pub async fn health() -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        version: APP_VERSION,
    })
}

/// Shared single-shot path: one model call, object-shaped output, every
/// failure surfaced as a request-level error.
async fn run_object_task<M: ModelInvoke>(
    model: &M,
    system: &str,
    prompt: &str,
) -> Result<Json<Value>, ApiError> {
    let raw = model.complete(system, prompt).await?;
    let object = extract_object(RawModelOutput::Text(raw))?;
    Ok(Json(Value::Object(object)))
}

pub async fn protocol<M: ModelInvoke>(
    State(ctx): State<ApiContext<M>>,
    Json(criteria): Json<ReviewCriteria>,
) -> Result<Json<Value>, ApiError> {
    require_question(&criteria.main_question)?;
    let prompt = build_protocol_prompt(&criteria);
    run_object_task(&*ctx.model, PROTOCOL_SYSTEM_PROMPT, &prompt).await
}

pub async fn extraction<M: ModelInvoke>(
    State(ctx): State<ApiContext<M>>,
    Json(request): Json<ExtractionRequest>,
) -> Result<Json<Value>, ApiError> {
    if request.article.id.trim().is_empty() {
        return Err(ApiError::BadRequest("article id must not be empty".into()));
    }
    let prompt = build_extraction_prompt(&request.article, &request.fields);
    run_object_task(&*ctx.model, EXTRACTION_SYSTEM_PROMPT, &prompt).await
}

pub async fn narrative<M: ModelInvoke>(
    State(ctx): State<ApiContext<M>>,
    Json(request): Json<NarrativeRequest>,
) -> Result<Json<Value>, ApiError> {
    require_question(&request.main_question)?;
    let prompt = build_narrative_prompt(&request.main_question, &request.records);
    run_object_task(&*ctx.model, NARRATIVE_SYSTEM_PROMPT, &prompt).await
}

pub async fn manuscript<M: ModelInvoke>(
    State(ctx): State<ApiContext<M>>,
    Json(request): Json<ManuscriptRequest>,
) -> Result<Json<Value>, ApiError> {
    require_question(&request.main_question)?;
    let prompt = build_manuscript_prompt(
        &request.main_question,
        &request.protocol,
        &request.narrative,
    );
    run_object_task(&*ctx.model, MANUSCRIPT_SYSTEM_PROMPT, &prompt).await
}

pub async fn classify<M: ModelInvoke>(
    State(ctx): State<ApiContext<M>>,
    Json(request): Json<ClassifyRequest>,
) -> Result<Json<ClassifyResponse>, ApiError> {
    require_question(&request.criteria.main_question)?;
    if request.articles.is_empty() {
        return Err(ApiError::BadRequest("articles must not be empty".into()));
    }

    tracing::info!(
        articles = request.articles.len(),
        "starting batched classification"
    );
    let results =
        classify_articles(&*ctx.model, &request.criteria, &request.articles).await?;
    tracing::info!(results = results.len(), "classification complete");

    Ok(Json(ClassifyResponse { results }))
}

fn require_question(main_question: &str) -> Result<(), ApiError> {
    if main_question.trim().is_empty() {
        return Err(ApiError::BadRequest("mainQuestion must not be empty".into()));
    }
    Ok(())
}

// ═══════════════════════════════════════════════════════════
// Search passthroughs
// ═══════════════════════════════════════════════════════════

fn require_query(query: &SearchQuery) -> Result<(), ApiError> {
    if query.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".into()));
    }
    Ok(())
}

pub async fn search_pubmed<M>(
    State(ctx): State<ApiContext<M>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_query(&query)?;
    let results = ctx.search.pubmed(&query.query, query.capped_limit()).await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn search_europe_pmc<M>(
    State(ctx): State<ApiContext<M>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_query(&query)?;
    let results = ctx
        .search
        .europe_pmc(&query.query, query.capped_limit())
        .await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn search_crossref<M>(
    State(ctx): State<ApiContext<M>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_query(&query)?;
    let results = ctx
        .search
        .crossref(&query.query, query.capped_limit())
        .await?;
    Ok(Json(SearchResponse { results }))
}

pub async fn search_semantic_scholar<M>(
    State(ctx): State<ApiContext<M>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    require_query(&query)?;
    let results = ctx
        .search
        .semantic_scholar(&query.query, query.capped_limit())
        .await?;
    Ok(Json(SearchResponse { results }))
}
