use axum::{Json, response::IntoResponse};

// Usage information
pub async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "GitHub Gists API",
        "usage": "GET /<username> to retrieve public gists for a user",
        "example": "/octocat",
        "query_parameters": {
            "per_page": "Number of results per page (default: 30, max: 100)",
            "page": "Page number (default: 1)"
        },
        "endpoints": {
            "/": "API information",
            "/<username>": "Get user gists",
            "/health": "Health check",
            "/metrics": "Prometheus metrics"
        }
    }))
}
