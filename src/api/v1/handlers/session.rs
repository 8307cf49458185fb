/*
 * Responsibility
 * - GET /auth/me     : cookie の token を検証し、ユーザーを解決して返す
 * - GET /auth/verify : Bearer token の署名と有効期限だけを確認する (store には触れない)
 * - どの失敗も status + boolean フラグの JSON に畳み込む (詳細はログのみ)
 */
use axum::{Json, extract::State, http::StatusCode};
use tracing::debug;

use crate::{
    api::v1::{
        dto::session::{MeResponse, VerifyResponse},
        extractors::{BearerToken, SessionCookie},
    },
    state::AppState,
};

pub async fn me(
    State(state): State<AppState>,
    SessionCookie(token): SessionCookie,
) -> (StatusCode, Json<MeResponse>) {
    let Some(token) = token else {
        debug!("no session cookie presented");
        return (StatusCode::UNAUTHORIZED, Json(MeResponse::unauthenticated()));
    };

    match state.session.current_user(&token).await {
        Ok(user) => (StatusCode::OK, Json(MeResponse::authenticated(user))),
        Err(err) => (err.status(), Json(MeResponse::unauthenticated())),
    }
}

pub async fn verify(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> (StatusCode, Json<VerifyResponse>) {
    let Some(token) = token else {
        debug!("missing or malformed Authorization header");
        return (StatusCode::UNAUTHORIZED, Json(VerifyResponse { valid: false }));
    };

    match state.session.verify_token(&token) {
        Ok(_) => (StatusCode::OK, Json(VerifyResponse { valid: true })),
        Err(err) => (err.status(), Json(VerifyResponse { valid: false })),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        Router,
        body::Body,
        http::{Request, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::api::v1::routes;
    use crate::repos::user_repo::testing::{FailingUserStore, MemoryUserStore, user_row};
    use crate::repos::user_repo::UserStore;
    use crate::services::auth::session_jwt::testing::{SECRET, now, sign, token_for};
    use crate::services::auth::{IdentityResolver, SessionService, SessionVerifier};
    use crate::state::AppState;

    use super::*;

    fn router_with(secret: Option<&str>, store: Arc<dyn UserStore>) -> Router {
        let session = SessionService::new(
            SessionVerifier::new(secret, 0),
            IdentityResolver::new(store),
        );
        routes().with_state(AppState::new(Arc::new(session)))
    }

    /// Router backed by an in-memory store holding Alice (admin).
    fn router_with_alice() -> (Router, Arc<MemoryUserStore>, Uuid) {
        let id = Uuid::new_v4();
        let store = Arc::new(MemoryUserStore::default());
        store.insert(user_row(id, "a@b.com", "Alice", "admin"));
        (router_with(Some(SECRET), store.clone()), store, id)
    }

    fn me_request(cookie: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().uri("/auth/me");
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }
        req.body(Body::empty()).unwrap()
    }

    fn verify_request(authorization: Option<&str>) -> Request<Body> {
        let mut req = Request::builder().uri("/auth/verify");
        if let Some(value) = authorization {
            req = req.header(header::AUTHORIZATION, value);
        }
        req.body(Body::empty()).unwrap()
    }

    async fn send(router: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn me_returns_whitelisted_profile_for_valid_cookie() {
        let (router, _, id) = router_with_alice();
        let cookie = format!("token={}", token_for(SECRET, &id.to_string(), 3600));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "authenticated": true,
                "user": {
                    "id": id.to_string(),
                    "email": "a@b.com",
                    "name": "Alice",
                    "role": "admin",
                }
            })
        );
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn me_without_cookie_is_unauthenticated() {
        let (router, _, _) = router_with_alice();

        let (status, body) = send(&router, me_request(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "authenticated": false }));

        let (status, body) = send(&router, me_request(Some("token="))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_ignores_bearer_header() {
        let (router, _, id) = router_with_alice();
        let token = token_for(SECRET, &id.to_string(), 3600);
        let req = Request::builder()
            .uri("/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let (status, _) = send(&router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn me_rejects_wrongly_signed_and_expired_tokens() {
        let (router, _, id) = router_with_alice();

        for token in [
            token_for("not-the-secret", &id.to_string(), 3600),
            token_for(SECRET, &id.to_string(), -3600),
            "garbage".to_string(),
        ] {
            let (status, body) = send(&router, me_request(Some(&format!("token={token}")))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({ "authenticated": false }));
        }
    }

    #[tokio::test]
    async fn me_for_unknown_user_is_not_found() {
        let (router, _, _) = router_with_alice();
        let cookie = format!("token={}", token_for(SECRET, &Uuid::new_v4().to_string(), 3600));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_is_repeatable_until_the_user_is_deleted() {
        let (router, store, id) = router_with_alice();
        let cookie = format!("token={}", token_for(SECRET, &id.to_string(), 3600));

        let first = send(&router, me_request(Some(&cookie))).await;
        let second = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(first.0, StatusCode::OK);
        assert_eq!(first, second);

        assert!(store.remove(id));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_with_non_uuid_subject_is_server_error() {
        let (router, _, _) = router_with_alice();
        let cookie = format!("token={}", token_for(SECRET, "u1", 3600));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_with_numeric_subject_is_server_error() {
        let (router, _, _) = router_with_alice();
        let token = sign(SECRET, &json!({ "userId": 12345, "exp": now() + 3600 }));
        let cookie = format!("token={token}");

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_with_store_failure_is_server_error() {
        let router = router_with(Some(SECRET), Arc::new(FailingUserStore));
        let cookie = format!("token={}", token_for(SECRET, &Uuid::new_v4().to_string(), 3600));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn me_without_secret_is_server_error() {
        let router = router_with(None, Arc::new(MemoryUserStore::default()));
        let cookie = format!("token={}", token_for(SECRET, &Uuid::new_v4().to_string(), 3600));

        let (status, body) = send(&router, me_request(Some(&cookie))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "authenticated": false }));
    }

    #[tokio::test]
    async fn verify_accepts_valid_bearer_token() {
        // Lightweight path: the subject need not exist in the store
        let router = router_with(Some(SECRET), Arc::new(FailingUserStore));
        let header = format!("Bearer {}", token_for(SECRET, "u1", 3600));

        let (status, body) = send(&router, verify_request(Some(&header))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "valid": true }));
    }

    #[tokio::test]
    async fn verify_rejects_missing_or_malformed_header() {
        let (router, _, _) = router_with_alice();
        let token = token_for(SECRET, "u1", 3600);

        for header in [
            None,
            Some(format!("bearer {token}")),
            Some(format!("Basic {token}")),
            Some(token.clone()),
            Some("Bearer ".to_string()),
        ] {
            let (status, body) = send(&router, verify_request(header.as_deref())).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{header:?}");
            assert_eq!(body, json!({ "valid": false }));
        }
    }

    #[tokio::test]
    async fn verify_ignores_session_cookie() {
        let (router, _, _) = router_with_alice();
        let req = Request::builder()
            .uri("/auth/verify")
            .header(header::COOKIE, format!("token={}", token_for(SECRET, "u1", 3600)))
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&router, req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "valid": false }));
    }

    #[tokio::test]
    async fn verify_rejects_expired_and_wrongly_signed_tokens() {
        let (router, _, _) = router_with_alice();

        for token in [
            token_for(SECRET, "u1", -3600),
            token_for("not-the-secret", "u1", 3600),
        ] {
            let header = format!("Bearer {token}");
            let (status, body) = send(&router, verify_request(Some(&header))).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body, json!({ "valid": false }));
        }
    }

    #[tokio::test]
    async fn verify_without_secret_is_server_error() {
        let router = router_with(None, Arc::new(MemoryUserStore::default()));

        for token in [token_for(SECRET, "u1", 3600), "anything".to_string()] {
            let header = format!("Bearer {token}");
            let (status, body) = send(&router, verify_request(Some(&header))).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "valid": false }));
        }

        // header is checked before the secret
        let (status, _) = send(&router, verify_request(None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let (router, _, _) = router_with_alice();
        let req = Request::builder()
            .uri("/auth/nope")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&router, req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }
}
