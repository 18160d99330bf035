// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Local HTTP server for the sample handlers.
//!
//! Mirrors what the cloud runtime does for an HTTP-triggered function so the
//! handlers can be exercised before deploying.

use std::net::SocketAddr;

use axum::{
    extract::State,
    routing::{any, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::calculator;
use crate::greeting::Greeter;

/// Build the handler router.
pub fn router(greeter: Greeter) -> Router {
    Router::new()
        .route("/multiply", post(calculator::handle))
        .route("/greeting", any(greeting_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(greeter)
}

async fn greeting_handler(State(greeter): State<Greeter>) -> String {
    greeter.greet()
}

/// Serve the handlers on `0.0.0.0:<port>` until the process is stopped.
pub async fn serve(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(Greeter::default());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Function server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_multiply_route() {
        let response = router(Greeter::default())
            .oneshot(
                Request::post("/multiply")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"x": 6, "y": 7}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "42");
    }

    #[tokio::test]
    async fn test_multiply_rejects_bad_body() {
        let response = router(Greeter::default())
            .oneshot(
                Request::post("/multiply")
                    .body(Body::from(r#"{"x": 6}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_greeting_route() {
        let response = router(Greeter::new("from tests "))
            .oneshot(Request::get("/greeting").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response)
            .await
            .starts_with("Hello world! from tests "));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = router(Greeter::default())
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
