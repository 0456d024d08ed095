//! Root informational endpoint.

use axum::{Router, routing::get};

use crate::state::AppState;

/// Readiness message returned by `GET /`.
const READINESS_MESSAGE: &str = "Job Tracker API is running...";

/// GET / - Static readiness text.
async fn root() -> &'static str {
    READINESS_MESSAGE
}

/// Build the root route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_root_message() {
        let body = root().await;
        assert_eq!(body, "Job Tracker API is running...");
    }
}
