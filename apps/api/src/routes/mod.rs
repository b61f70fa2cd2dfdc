pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/notifications",
            get(handlers::handle_drain_notifications),
        )
        // Suggestion lifecycle
        .route(
            "/api/v1/sessions/:id/suggestions",
            get(handlers::handle_list_suggestions),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/:sid/dismiss",
            post(handlers::handle_dismiss),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/:sid/apply",
            post(handlers::handle_apply),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/:sid/copy",
            post(handlers::handle_copy),
        )
        // Bullet edits
        .route(
            "/api/v1/sessions/:id/bullets/:bid/quick-edit",
            post(handlers::handle_quick_edit),
        )
        .route(
            "/api/v1/sessions/:id/bullets/:bid/edit",
            post(handlers::handle_begin_edit)
                .put(handlers::handle_set_edit_text)
                .delete(handlers::handle_cancel_edit),
        )
        .route(
            "/api/v1/sessions/:id/bullets/:bid/edit/save",
            post(handlers::handle_save_edit),
        )
        // Stateless analysis
        .route("/api/v1/highlight", post(analysis::handle_highlight))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState::new(Config::default()))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn create_session(app: &Router) -> String {
        let (status, body) = send(app, "POST", "/api/v1/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    fn requirement_status<'a>(view: &'a Value, id: &str) -> &'a str {
        view["requirement_status"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["id"] == id)
            .unwrap()["status"]
            .as_str()
            .unwrap()
    }

    fn bullet<'a>(view: &'a Value, id: &str) -> &'a Value {
        view["bullets"]
            .as_array()
            .unwrap()
            .iter()
            .find(|b| b["id"] == id)
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "tailor-api");
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app(), "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_apply_rewrite_updates_coverage() {
        let app = app();
        let id = create_session(&app).await;

        let (_, before) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(requirement_status(&before, "6"), "missing");

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/sessions/{id}/suggestions/2/apply"),
            Some(json!({})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["outcome"], "rewrite_applied");
        assert_eq!(requirement_status(&body["view"], "6"), "partial");
        assert_eq!(body["view"]["completed_suggestions"][0]["id"], "2");

        let (_, notifications) = send(
            &app,
            "GET",
            &format!("/api/v1/sessions/{id}/notifications"),
            None,
        )
        .await;
        assert_eq!(notifications[0]["kind"], "rewrite_applied");
    }

    #[tokio::test]
    async fn test_stale_suggestion_is_ignored_not_error() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/suggestions/99/dismiss");

        let (status, body) = send(&app, "POST", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["outcome"], "ignored");
        assert_eq!(body["result"]["reason"], "unknown_suggestion");
    }

    #[tokio::test]
    async fn test_filter_suggestions() {
        let app = app();
        let id = create_session(&app).await;

        let uri = format!("/api/v1/sessions/{id}/suggestions?filter=quick-fix");
        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["suggestions"].as_array().unwrap().len(), 1);
        assert_eq!(body["suggestions"][0]["match_strength_label"], "Good");
        assert_eq!(body["counts"]["all"], 4);

        let uri = format!("/api/v1/sessions/{id}/suggestions?filter=bogus");
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_quick_edit_twice_is_idempotent() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/bullets/rb3/quick-edit");

        let (_, first) = send(&app, "POST", &uri, Some(json!({"action_id": "qa1"}))).await;
        assert_eq!(first["result"]["outcome"], "quick_edit_applied");

        let (_, second) = send(&app, "POST", &uri, Some(json!({"action_id": "qa1"}))).await;
        assert_eq!(second["result"]["reason"], "action_already_used");
        assert_eq!(bullet(&first["view"], "rb3")["text"], bullet(&second["view"], "rb3")["text"]);
        assert_eq!(bullet(&second["view"], "rb3")["used_actions"], json!(["qa1"]));
    }

    #[tokio::test]
    async fn test_direct_edit_flow() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/bullets/rb4/edit");

        send(&app, "POST", &uri, None).await;
        send(&app, "PUT", &uri, Some(json!({"text": "Owned API development."}))).await;
        let (status, body) = send(&app, "POST", &format!("{uri}/save"), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["changed"], true);
        assert_eq!(bullet(&body["view"], "rb4")["text"], "Owned API development.");
    }

    #[tokio::test]
    async fn test_copy_returns_selected_variant() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}/suggestions/4/copy");

        let (status, body) = send(&app, "POST", &uri, Some(json!({"variant_id": "alt3"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["copied"], true);
        assert!(body["text"].as_str().unwrap().starts_with("Developed GraphQL APIs"));

        // Copy never changes the session
        let (_, view) = send(&app, "GET", &format!("/api/v1/sessions/{id}"), None).await;
        assert_eq!(view["active_suggestions"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_copy_of_stale_suggestion_is_ignored_not_error() {
        let app = app();
        let id = create_session(&app).await;
        send(&app, "POST", &format!("/api/v1/sessions/{id}/suggestions/4/dismiss"), None).await;

        let uri = format!("/api/v1/sessions/{id}/suggestions/4/copy");
        let (status, body) = send(&app, "POST", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["copied"], false);
        assert_eq!(body["result"]["outcome"], "ignored");
        assert_eq!(body["result"]["reason"], "unknown_suggestion");
        assert!(body.get("text").is_none());
    }

    #[tokio::test]
    async fn test_filter_is_echoed_normalized() {
        let app = app();
        let id = create_session(&app).await;
        let (_, body) = send(&app, "GET", &format!("/api/v1/sessions/{id}/suggestions"), None).await;
        assert_eq!(body["filter"], "all");
    }

    #[tokio::test]
    async fn test_delete_session() {
        let app = app();
        let id = create_session(&app).await;
        let uri = format!("/api/v1/sessions/{id}");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_highlight_endpoint() {
        let (status, body) = send(
            &app(),
            "POST",
            "/api/v1/highlight",
            Some(json!({
                "text": "Built React dashboards",
                "keywords": ["React", "dashboard"],
                "active_keyword": "react"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let spans = body["spans"].as_array().unwrap();
        let react = spans.iter().find(|s| s["text"] == "React").unwrap();
        assert_eq!(react["is_keyword"], true);
        assert_eq!(react["is_highlighted"], true);
        // "dashboard" is single-word, so "dashboards" does not match
        assert!(spans.iter().all(|s| s["text"] != "dashboard"));
    }
}
