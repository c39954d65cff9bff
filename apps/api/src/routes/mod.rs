pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route("/api/v1/sessions/:id", get(handlers::handle_get_session))
        .route("/api/v1/sessions/:id/login", post(handlers::handle_login))
        .route("/api/v1/sessions/:id/logout", post(handlers::handle_logout))
        .route("/api/v1/sessions/:id/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/sessions/:id/results",
            get(handlers::handle_get_results),
        )
        .route("/api/v1/sessions/:id/back", post(handlers::handle_back))
        // Multipart's own 2 MB default is replaced by the configured limit.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(upload_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::tests::test_analyzer;
    use crate::config::{Config, Heuristics};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const BOUNDARY: &str = "profiler-test-boundary";

    fn test_config() -> Config {
        Config {
            username: "admin".to_string(),
            password: "admin".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            lexicon_path: None,
            lexicon_url: None,
            section_header_pass: false,
            max_upload_bytes: 1024 * 1024,
            session_idle_secs: 1800,
            heuristics: Heuristics::default(),
        }
    }

    fn app() -> Router {
        build_router(AppState::new(test_config(), test_analyzer()))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response: Response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn post_empty(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    /// `files` are (filename, content type, content).
    fn multipart(uri: &str, jd: Option<&str>, files: &[(&str, &str, &str)]) -> Request<Body> {
        let mut body = String::new();
        if let Some(jd) = jd {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{jd}\r\n"
            ));
        }
        for (name, content_type, content) in files {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resumes\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n{content}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn logged_in_session(app: &Router) -> String {
        let (status, body) = send(app, post_empty("/api/v1/sessions")).await;
        assert_eq!(status, StatusCode::CREATED);
        let id = body["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            app,
            post_json(
                &format!("/api/v1/sessions/{id}/login"),
                json!({"username": "admin", "password": "admin"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "upload");
        id
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_new_session_starts_at_login() {
        let app = app();
        let (_, body) = send(&app, post_empty("/api/v1/sessions")).await;
        let id = body["id"].as_str().unwrap();

        let (status, body) = send(&app, get_req(&format!("/api/v1/sessions/{id}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "login");
    }

    #[tokio::test]
    async fn test_invalid_credentials_are_401() {
        let app = app();
        let (_, body) = send(&app, post_empty("/api/v1/sessions")).await;
        let id = body["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            post_json(
                &format!("/api/v1/sessions/{id}/login"),
                json!({"username": "admin", "password": "nope"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["message"], "Invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app(), get_req(&uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_analyze_before_login_is_409() {
        let app = app();
        let (_, body) = send(&app, post_empty("/api/v1/sessions")).await;
        let id = body["id"].as_str().unwrap();

        let (status, _) = send(
            &app,
            multipart(
                &format!("/api/v1/sessions/{id}/analyze"),
                Some("Python developer"),
                &[("a.pdf", "application/pdf", "python")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    /// Declares a multipart body whose content never matches the boundary.
    fn malformed_multipart(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from("not a multipart body"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_analyze_checks_session_before_reading_body() {
        let app = app();
        let (_, body) = send(&app, post_empty("/api/v1/sessions")).await;
        let id = body["id"].as_str().unwrap();

        // A Login-stage session is refused before the body is parsed.
        let (status, body) = send(
            &app,
            malformed_multipart(&format!("/api/v1/sessions/{id}/analyze")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "INVALID_TRANSITION");

        let unknown = format!("/api/v1/sessions/{}/analyze", uuid::Uuid::new_v4());
        let (status, _) = send(&app, malformed_multipart(&unknown)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_upload_in_upload_stage_is_400() {
        let app = app();
        let id = logged_in_session(&app).await;
        let (status, body) = send(
            &app,
            malformed_multipart(&format!("/api/v1/sessions/{id}/analyze")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_inputs_are_400_and_stage_unchanged() {
        let app = app();
        let id = logged_in_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/analyze");

        let (status, body) = send(&app, multipart(&uri, Some("Python developer"), &[])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Upload resumes and paste JD to proceed."
        );

        let (status, _) = send(
            &app,
            multipart(&uri, None, &[("a.pdf", "application/pdf", "python")]),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, get_req(&format!("/api/v1/sessions/{id}"))).await;
        assert_eq!(body["stage"], "upload");
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_rejected() {
        let app = app();
        let id = logged_in_session(&app).await;
        let (status, body) = send(
            &app,
            multipart(
                &format!("/api/v1/sessions/{id}/analyze"),
                Some("Python developer"),
                &[("notes.txt", "text/plain", "python")],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_full_flow_ranks_resumes() {
        let app = app();
        let id = logged_in_session(&app).await;

        let (status, report) = send(
            &app,
            multipart(
                &format!("/api/v1/sessions/{id}/analyze"),
                Some("Python developer with SQL"),
                &[
                    ("weak.pdf", "application/pdf", "Accountant"),
                    (
                        "strong.pdf",
                        "application/pdf",
                        "Python developer, SQL\nme@x.io 9876543210",
                    ),
                ],
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["results"][0]["name"], "strong.pdf");
        assert_eq!(report["results"][0]["email"], "me@x.io");
        assert_eq!(report["comparison"][1]["name"], "weak.pdf");

        let (status, stored) =
            send(&app, get_req(&format!("/api/v1/sessions/{id}/results"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stored, report);

        let (status, body) =
            send(&app, post_empty(&format!("/api/v1/sessions/{id}/back"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "upload");

        let (status, _) = send(&app, get_req(&format!("/api/v1/sessions/{id}/results"))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) =
            send(&app, post_empty(&format!("/api/v1/sessions/{id}/logout"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["stage"], "login");
    }
}
