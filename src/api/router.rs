//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Auth validator → 2. Audit logger

use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the API router.
///
/// Middleware uses `Extension<ApiContext>` (injected as the outermost layer).
pub fn api_router(ctx: ApiContext) -> Router {
    // Protected routes: require a bearer token
    //
    // Layers are applied from bottom (innermost) to top (outermost):
    //   Extension (outermost) → Auth → Audit (innermost) → Handler
    let protected = Router::new()
        .route("/diabetes/risk", post(endpoints::risk::calculate))
        .route(
            "/diabetes/risk/assessment",
            post(endpoints::risk::assessment),
        )
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(axum::middleware::from_fn(middleware::auth::require_auth))
        // Extension must be outermost so middleware can extract ApiContext
        .layer(axum::Extension(ctx));

    // Unprotected routes
    let unprotected = Router::new().route("/health", get(endpoints::health::check));

    Router::new()
        .nest("/api", protected)
        .nest("/api", unprotected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::auth::{Claims, TokenVerifier};

    const SECRET: &[u8] = b"router-test-secret";

    fn test_router() -> Router {
        api_router(ApiContext::new(TokenVerifier::new(SECRET.to_vec(), 0)))
    }

    fn valid_token() -> String {
        TokenVerifier::new(SECRET.to_vec(), 0)
            .issue(&Claims::for_subject("dr.abernathy", 3600))
            .unwrap()
    }

    fn post_json(uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");

        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Bearer {t}"));
        }

        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn response_text(response: axum::http::Response<Body>) -> String {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn borderline_patient() -> serde_json::Value {
        serde_json::json!({
            "nom": "TestBorderline",
            "age": 77,
            "genre": "M",
            "note": [
                "Le patient déclare qu'il ressent beaucoup de stress au travail",
                "Il se plaint également que son audition est anormale dernièrement",
                "Le patient déclare avoir fait une réaction aux médicaments au cours des 3 derniers mois",
                "Il remarque également que son audition continue d'être anormale"
            ]
        })
    }

    // ── Authentication ───────────────────────────────────────

    #[tokio::test]
    async fn risk_requires_auth() {
        let req = post_json("/api/diabetes/risk", None, borderline_patient());
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn invalid_token_returns_401() {
        let req = post_json("/api/diabetes/risk", Some("not.a.jwt"), borderline_patient());
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "AUTH_REQUIRED");
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_returns_401() {
        let token = TokenVerifier::new(b"someone-else".to_vec(), 0)
            .issue(&Claims::for_subject("intruder", 3600))
            .unwrap();
        let req = post_json("/api/diabetes/risk", Some(&token), borderline_patient());
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_returns_token_expired() {
        let token = TokenVerifier::new(SECRET.to_vec(), 0)
            .issue(&Claims::for_subject("dr.abernathy", -600))
            .unwrap();
        let req = post_json("/api/diabetes/risk", Some(&token), borderline_patient());
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "TOKEN_EXPIRED");
    }

    #[tokio::test]
    async fn health_does_not_require_auth() {
        let req = Request::builder()
            .method("GET")
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let req = post_json("/api/unknown", Some(&valid_token()), serde_json::json!({}));
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    // ── Risk endpoint ────────────────────────────────────────

    #[tokio::test]
    async fn risk_returns_text_sentence() {
        let req = post_json("/api/diabetes/risk", Some(&valid_token()), borderline_patient());
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("Cache-Control").unwrap(), "no-store");
        assert_eq!(
            response_text(response).await,
            "Risk level for patient is: BORDERLINE"
        );
    }

    #[tokio::test]
    async fn risk_accepts_english_field_names() {
        let body = serde_json::json!({
            "name": "Young",
            "age": 18,
            "gender": "m",
            "notes": ["fumeur", "apnée anormales", "cholestérol LDL"]
        });
        let req = post_json("/api/diabetes/risk", Some(&valid_token()), body);
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(
            response_text(response).await,
            "Risk level for patient is: IN_DANGER"
        );
    }

    #[tokio::test]
    async fn omitted_notes_default_to_empty() {
        let body = serde_json::json!({ "nom": "NoNotes", "age": 40, "genre": "F" });
        let req = post_json("/api/diabetes/risk", Some(&valid_token()), body);
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response_text(response).await,
            "Risk level for patient is: NONE"
        );
    }

    #[tokio::test]
    async fn missing_age_is_classified_as_zero() {
        let body = serde_json::json!({ "genre": "M", "note": ["Fumeur", "Anormal", "Rechute"] });
        let req = post_json("/api/diabetes/risk/assessment", Some(&valid_token()), body);
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["risk_level"], "IN_DANGER");
        assert_eq!(json["trigger_count"], 3);
    }

    #[tokio::test]
    async fn missing_gender_returns_500_with_message() {
        let body = serde_json::json!({ "nom": "NoGender", "age": 40, "note": ["Fumeur"] });
        let req = post_json("/api/diabetes/risk", Some(&valid_token()), body);
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = response_text(response).await;
        assert_eq!(
            text,
            "Erreur lors du calcul du risque : Le genre (gender) ne peut pas être null."
        );
    }

    #[tokio::test]
    async fn malformed_body_returns_structured_400() {
        for uri in ["/api/diabetes/risk", "/api/diabetes/risk/assessment"] {
            let req = Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", valid_token()))
                .body(Body::from(r#"{"age":"old"}"#))
                .unwrap();
            let response = test_router().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            let json = response_json(response).await;
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
            assert!(json["error"]["message"].as_str().unwrap().contains("age"));
        }
    }

    #[tokio::test]
    async fn missing_content_type_returns_structured_400() {
        let req = Request::builder()
            .method("POST")
            .uri("/api/diabetes/risk")
            .header("Authorization", format!("Bearer {}", valid_token()))
            .body(Body::from(borderline_patient().to_string()))
            .unwrap();
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    // ── Assessment endpoint ──────────────────────────────────

    #[tokio::test]
    async fn assessment_response_shape() {
        let req = post_json(
            "/api/diabetes/risk/assessment",
            Some(&valid_token()),
            borderline_patient(),
        );
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["risk_level"], "BORDERLINE");
        assert_eq!(json["trigger_count"], 3);
    }

    #[tokio::test]
    async fn assessment_missing_gender_returns_structured_error() {
        let body = serde_json::json!({ "age": 20, "notes": [] });
        let req = post_json("/api/diabetes/risk/assessment", Some(&valid_token()), body);
        let response = test_router().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "RISK_ASSESSMENT_FAILED");
    }
}
