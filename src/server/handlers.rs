use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use tracing::{debug, error};

use crate::error::GraphError;
use crate::models::GraphResponse;
use crate::server::state::AppState;
use crate::stages::graph_from_file;

const INDEX_HTML: &str = include_str!("../../templates/index.html");

impl IntoResponse for GraphError {
    fn into_response(self) -> Response {
        let status = match &self {
            GraphError::NotFound { .. } => StatusCode::NOT_FOUND,
            GraphError::Processing { .. } | GraphError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        error!("Graph request failed ({}): {:?}", status, self);

        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

/// Visualization client page
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Re-read the source file and return its graph
pub async fn graph_data(State(state): State<AppState>) -> Result<Json<GraphResponse>, GraphError> {
    let path = state.source_path.clone();
    debug!("Building graph from {:?}", path);

    let graph = tokio::task::spawn_blocking(move || graph_from_file(&path))
        .await
        .map_err(|e| GraphError::Internal(e.to_string()))??;

    Ok(Json(graph))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use axum::body::to_bytes;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_graph_data_ok() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "header\nRegister,Duplicate record,Name typo,Wrong history,MRN check,6,4,5,120\n"
        )
        .unwrap();
        file.flush().unwrap();

        let state = AppState::new(file.path().to_path_buf());
        let Json(graph) = graph_data(State(state)).await.unwrap();
        assert_eq!(graph.nodes.len(), 5);
        assert_eq!(graph.edges.len(), 4);
        assert_eq!(graph.nodes[0].label, "Register");
    }

    #[tokio::test]
    async fn test_missing_file_maps_to_404() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().join("hfmea2.csv"));

        let response = graph_data(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("hfmea2.csv"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_maps_to_500() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"header\n\xc3\x28,b,c,d,e,1,2,3,6\n").unwrap();
        file.flush().unwrap();

        let state = AppState::new(file.path().to_path_buf());
        let response = graph_data(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_empty_file_maps_to_500() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let state = AppState::new(file.path().to_path_buf());
        let response = graph_data(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("missing header line"));
    }

    #[tokio::test]
    async fn test_carriage_return_file_builds_all_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"h\rA,B,C,D,E,1,2,3,6\rF,G,H,I,J,1,2,3,6\r").unwrap();
        file.flush().unwrap();

        let state = AppState::new(file.path().to_path_buf());
        let Json(graph) = graph_data(State(state)).await.unwrap();
        assert_eq!(graph.nodes.len(), 10);
        assert_eq!(graph.edges.len(), 8);
    }

    #[tokio::test]
    async fn test_index_serves_page() {
        let Html(page) = index().await;
        assert!(page.contains("/api/graph-data"));
    }
}
