//! Authentication routes: register, login, me.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobtrack_core::User;
use jobtrack_store::NewUser;

use crate::auth::{self, AuthenticatedUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Returned by both register and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: Uuid,
    pub username: String,
    pub expires_in_hours: u64,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub username: String,
    pub created: DateTime<Utc>,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.0,
            username: user.username,
            created: user.created,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if request.username.trim().is_empty() {
        return Err(ApiError::BadRequest("Username must not be empty".to_string()));
    }
    if request.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = auth::hash_password(&request.password)?;
    let user = state
        .store()
        .create_user(NewUser {
            username: request.username.trim().to_string(),
            password_hash,
        })
        .await?;

    let config = state.config();
    let token = auth::create_token(
        user.user_id(),
        &user.username,
        &config.jwt_secret,
        config.jwt_expiry_hours,
    )?;

    tracing::info!(user_id = %user.id, username = %user.username, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user_id: user.id,
            username: user.username,
            expires_in_hours: config.jwt_expiry_hours,
        }),
    ))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let user = state
        .store()
        .get_user_by_username(&request.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    let valid = auth::verify_password(&request.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid username or password".to_string(),
        ));
    }

    let config = state.config();
    let token = auth::create_token(
        user.user_id(),
        &user.username,
        &config.jwt_secret,
        config.jwt_expiry_hours,
    )?;

    tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user_id: user.id,
        username: user.username,
        expires_in_hours: config.jwt_expiry_hours,
    }))
}

/// GET /api/auth/me - current user info.
async fn me(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<Json<MeResponse>> {
    let user_doc = state.store().get_user_by_id(user.user_id).await?;
    let user = User::from(&user_doc);

    Ok(Json(MeResponse::from(user)))
}

/// Build auth routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_deserialize() {
        let json = r#"{"username": "alice", "password": "secret"}"#;
        let request: LoginRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "secret");
    }

    #[test]
    fn test_auth_response_serialize() {
        let response = AuthResponse {
            token: "jwt.token.here".to_string(),
            user_id: Uuid::nil(),
            username: "alice".to_string(),
            expires_in_hours: 24,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("token"));
        assert!(json.contains("user_id"));
    }

    #[test]
    fn test_me_response_from_user() {
        let user = User {
            id: jobtrack_core::UserId::new(),
            username: "alice".to_string(),
            created: chrono::Utc::now(),
        };
        let response = MeResponse::from(user.clone());
        assert_eq!(response.user_id, user.id.0);
        assert_eq!(response.username, user.username);
        assert_eq!(response.created, user.created);
    }

    #[test]
    fn test_register_request_deserialize() {
        let json = r#"{"username": "bob", "password": "longenough"}"#;
        let request: RegisterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.username, "bob");
    }
}
