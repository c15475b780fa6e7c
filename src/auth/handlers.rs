use axum::{
    extract::{rejection::JsonRejection, FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, PublicUser, RegisterRequest, RegisterResponse},
        errors::AuthError,
        jwt::{AuthUser, JwtKeys},
        services,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AuthError> {
    let Json(payload) = payload?;
    services::register(state.users.as_ref(), payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let Json(payload) = payload?;
    let keys = JwtKeys::from_ref(&state);
    let res = services::login(state.users.as_ref(), &keys, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<PublicUser>, AuthError> {
    let user = services::profile(state.users.as_ref(), user_id).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::app::build_app;

    async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn register_then_duplicate_is_conflict() {
        let app = build_app(AppState::fake());
        let body = json!({"name": "Ada", "email": "ada@example.com", "password": "password123"});

        let (status, first) = send(&app, post_json("/api/auth/register", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(first, json!({"message": "User registered successfully"}));

        let (status, second) = send(&app, post_json("/api/auth/register", body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(second["message"], "Email already exists");
    }

    #[tokio::test]
    async fn login_wrong_password_then_success_and_me() {
        let app = build_app(AppState::fake());
        send(
            &app,
            post_json(
                "/api/auth/register",
                json!({"name": "Ada", "email": "ada@example.com", "password": "password123"}),
            ),
        )
        .await;

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                json!({"email": "ada@example.com", "password": "not-the-password"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid email or password");

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/login",
                json!({"email": "ada@example.com", "password": "password123"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = body["access_token"].as_str().expect("token").to_string();
        let user = body["user"].as_object().expect("user object");
        assert_eq!(user["name"], "Ada");
        assert!(!user.contains_key("password_hash"));
        assert!(!user.contains_key("password"));

        let me = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, me).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn me_requires_token() {
        let app = build_app(AppState::fake());
        let (status, _) = send(&app, Request::get("/api/auth/me").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let bogus = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, bogus).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn register_missing_fields_is_bad_request() {
        let app = build_app(AppState::fake());
        let (status, _) = send(&app, post_json("/api/auth/register", json!({"email": "x@y.zz"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_bodies_get_json_bad_request() {
        let app = build_app(AppState::fake());

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/register",
                json!({"name": 5, "email": "a@b.co", "password": "password123"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");

        let not_json = Request::post("/api/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let (status, body) = send(&app, not_json).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");

        let no_content_type = Request::post("/api/auth/register")
            .body(Body::from(r#"{"name":"Ada"}"#))
            .unwrap();
        let (status, body) = send(&app, no_content_type).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid request body");
    }
}
