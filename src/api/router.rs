//! Gateway router.
//!
//! Returns a composable `Router` that can be mounted on any axum
//! server. Routes are nested under `/api/`. CORS is permissive unless
//! the configuration pins an origin.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::llm::ModelInvoke;

use super::endpoints;
use super::types::ApiContext;

/// Build the gateway router over a model client.
///
/// Generic over the model seam so tests can mount the same routes on a
/// scripted mock; production mounts `ApiContext<ChatCompletionsClient>`.
pub fn gateway_router<M>(ctx: ApiContext<M>) -> Router
where
    M: ModelInvoke + Send + Sync + 'static,
{
    let cors = cors_layer(ctx.config.cors_origin.as_deref());

    Router::new()
        .route("/api/health", get(endpoints::health))
        .route("/api/review/protocol", post(endpoints::protocol::<M>))
        .route("/api/review/extraction", post(endpoints::extraction::<M>))
        .route("/api/review/narrative", post(endpoints::narrative::<M>))
        .route("/api/review/manuscript", post(endpoints::manuscript::<M>))
        .route("/api/review/classify", post(endpoints::classify::<M>))
        .route("/api/search/pubmed", get(endpoints::search_pubmed::<M>))
        .route(
            "/api/search/europe-pmc",
            get(endpoints::search_europe_pmc::<M>),
        )
        .route("/api/search/crossref", get(endpoints::search_crossref::<M>))
        .route(
            "/api/search/semantic-scholar",
            get(endpoints::search_semantic_scholar::<M>),
        )
        .with_state(ctx)
        .layer(cors)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin.and_then(|o| o.parse::<HeaderValue>().ok()) {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}
