pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::latex::handlers as latex;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Stateless generation
        .route("/api/v1/cv/default", get(latex::handle_default_cv))
        .route("/api/v1/cv/template", get(latex::handle_template_cv))
        .route("/api/v1/cv/latex", post(latex::handle_render))
        .route("/api/v1/cv/latex/download", post(latex::handle_download))
        // Editing sessions
        .route("/api/v1/sessions", post(editor::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(editor::handle_get_session).delete(editor::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/latex",
            get(editor::handle_session_latex),
        )
        .route(
            "/api/v1/sessions/:id/personal-info",
            put(editor::handle_put_personal_info),
        )
        .route("/api/v1/sessions/:id/style", put(editor::handle_put_style))
        .route(
            "/api/v1/sessions/:id/publications",
            put(editor::handle_put_publications),
        )
        .route(
            "/api/v1/sessions/:id/technologies",
            put(editor::handle_put_technologies),
        )
        .route(
            "/api/v1/sessions/:id/sections",
            post(editor::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id",
            put(editor::handle_update_section).delete(editor::handle_delete_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/entries",
            put(editor::handle_put_entries),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/fields",
            put(editor::handle_put_fields),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(empty_request(Method::GET, "/health"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["sessions"], 0);
    }

    #[tokio::test]
    async fn test_render_posted_cv() {
        let cv = json!({
            "personalInfo": { "fullName": "Jane Doe", "email": "jane@example.com" },
            "customSections": [{
                "id": "edu",
                "title": "Education",
                "type": "entries",
                "settings": { "title": "Education", "showLine": true, "topMargin": 0.3,
                              "bottomMargin": 0.2, "order": 1, "visible": true }
            }],
            "sectionEntries": { "edu": [{
                "id": "1", "leftTitle": "MIT", "subtitle": "BS CS",
                "rightSideValue": "", "isOneColumn": false,
                "bulletPoints": ["GPA 4.0"], "dateRange": "2018-2022"
            }] }
        });
        let response = app()
            .oneshot(json_request(Method::POST, "/api/v1/cv/latex", cv))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));

        let doc = body_text(response).await;
        assert!(doc.contains("\\mysection{Education}{true}{0.3}{0.1}{0.2}"));
        assert!(doc.contains("\\textbf{MIT}"));
        assert!(doc.ends_with("\\end{document}\n"));
    }

    #[tokio::test]
    async fn test_render_with_escaping() {
        let cv = json!({ "personalInfo": { "fullName": "Tom & Jerry" } });
        let response = app()
            .oneshot(json_request(Method::POST, "/api/v1/cv/latex?escape=true", cv))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("\\selectfont Tom \\& Jerry}"));
    }

    #[tokio::test]
    async fn test_download_matches_preview() {
        let cv = json!({ "personalInfo": { "fullName": "Jane Doe" } });
        let preview = app()
            .oneshot(json_request(Method::POST, "/api/v1/cv/latex", cv.clone()))
            .await
            .unwrap();
        let download = app()
            .oneshot(json_request(Method::POST, "/api/v1/cv/latex/download", cv))
            .await
            .unwrap();

        assert_eq!(
            download.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cv.tex\""
        );
        assert_eq!(body_text(preview).await, body_text(download).await);
    }

    #[tokio::test]
    async fn test_template_endpoint() {
        let response = app()
            .oneshot(empty_request(Method::GET, "/api/v1/cv/template"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["personalInfo"]["fullName"], "John Doe");
        assert_eq!(body["customSections"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_session_editing_flow() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/v1/sessions", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let session = body_json(response).await;
        let id = session["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/personal-info"),
                json!({ "fullName": "Jane Doe", "github": "https://github.com/jane" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{id}/sections"),
                json!({ "title": "Experience", "type": "entries" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let section = body_json(response).await;
        let section_id = section["id"].as_str().unwrap().to_string();
        assert_eq!(section["settings"]["order"], 1);

        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/sections/{section_id}/entries"),
                json!([{ "leftTitle": "Acme", "location": "Remote", "dateRange": "2020-2024" }]),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(empty_request(
                Method::GET,
                &format!("/api/v1/sessions/{id}/latex"),
            ))
            .await
            .unwrap();
        let doc = body_text(response).await;
        assert!(doc.contains("\\selectfont Jane Doe}"));
        assert!(doc.contains("\\mysection{Experience}"));
        assert!(doc.contains("\\textit{Remote}\\\\\n            \\textit{2020-2024}"));

        let response = app
            .clone()
            .oneshot(empty_request(
                Method::DELETE,
                &format!("/api/v1/sessions/{id}/sections/{section_id}"),
            ))
            .await
            .unwrap();
        let session = body_json(response).await;
        assert!(session["cv"]["customSections"].as_array().unwrap().is_empty());
        assert!(session["cv"]["sectionEntries"].as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_kind_is_rejected() {
        let app = app();
        let session = body_json(
            app.clone()
                .oneshot(json_request(
                    Method::POST,
                    "/api/v1/sessions",
                    json!({ "template": true }),
                ))
                .await
                .unwrap(),
        )
        .await;
        let id = session["id"].as_str().unwrap();

        // section "3" in the template is a technologies section
        let response = app
            .clone()
            .oneshot(json_request(
                Method::PUT,
                &format!("/api/v1/sessions/{id}/sections/3/entries"),
                json!([]),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let response = app()
            .oneshot(empty_request(
                Method::GET,
                "/api/v1/sessions/00000000-0000-0000-0000-000000000000",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_session_without_body_uses_empty_cv() {
        let response = app()
            .oneshot(empty_request(Method::POST, "/api/v1/sessions"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let session = body_json(response).await;
        assert!(session["cv"]["customSections"].as_array().unwrap().is_empty());
    }
}
