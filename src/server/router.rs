use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{graph_data, index};
use crate::server::state::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/graph-data", get(graph_data))
        // Path used by older copies of the client page
        .route("/api/hfmea_graph", get(graph_data))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
