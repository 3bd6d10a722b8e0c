pub mod health;
pub mod operations;
pub mod profiles;

use axum::{Router, routing::post};

use crate::state::AppState;

/// Build the lang2fhir operation routes (mounted under `/fhir`)
pub fn fhir_routes() -> Router<AppState> {
    Router::new()
        .route("/$nl-search", post(operations::nl_search))
        .route("/$nl-create", post(operations::nl_create))
        .route("/$rewrite", post(operations::rewrite))
}
