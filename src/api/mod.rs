//! Gateway HTTP surface.
//!
//! Thin handlers over the review pipeline and the search shims. The
//! router is composable — `gateway_router()` returns a `Router` that
//! can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod types;

pub use error::ApiError;
pub use router::gateway_router;
pub use types::ApiContext;
