use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::validation::{validate_password, validate_username};
use super::{ApiError, ApiResponse, AppState};
use crate::db::User;
use crate::models::Role;
use crate::services::post_login_redirect;

const SESSION_USER_KEY: &str = "user_id";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub username: String,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub username: String,
    pub role: Role,
    /// Where the client should land next, decided by role in one place.
    pub redirect_to: &'static str,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub redirect_to: &'static str,
}

// ============================================================================
// Access Control Gate
// ============================================================================

/// Resolve the session to a stored identity. No session, a stale session, or
/// a session pointing at a deleted account all come back as 401.
pub async fn current_user(session: &Session, state: &AppState) -> Result<User, ApiError> {
    let user_id: i32 = session
        .get(SESSION_USER_KEY)
        .await
        .map_err(|e| ApiError::internal(format!("Session error: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    state
        .store()
        .get_user_by_id(user_id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to load session user: {e}")))?
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))
}

/// Exact-match role check. Roles are not hierarchical: an admin does not pass
/// a user-only or coach-only gate.
pub fn require_role(user: &User, required: Role) -> Result<(), ApiError> {
    if user.role == required {
        return Ok(());
    }

    tracing::warn!(
        "Denied {} (role {}) on a {}-only route",
        user.username,
        user.role,
        required
    );
    Err(ApiError::forbidden(format!(
        "This page requires the {required} role"
    )))
}

/// Gate used by most handlers: resolve the session and check the role in one
/// step.
pub async fn require_user_with_role(
    session: &Session,
    state: &AppState,
    required: Role,
) -> Result<User, ApiError> {
    let user = current_user(session, state).await?;
    require_role(&user, required)?;
    Ok(user)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Routes an authenticated session to its role's landing page.
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<IndexResponse>>, ApiError> {
    let user = current_user(&session, &state).await?;

    Ok(Json(ApiResponse::success(IndexResponse {
        redirect_to: post_login_redirect(user.role),
    })))
}

/// POST /register
/// Creates an account with the `user` role and points the client at login.
/// The account is not logged in automatically.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<RegisterResponse>>, ApiError> {
    let username = validate_username(&payload.username)?;
    validate_password(&payload.password)?;

    let account = state
        .auth_service()
        .register(username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(RegisterResponse {
        username: account.username,
        role: account.role,
    })))
}

/// POST /login
/// Authenticates and stores the identity in the session. The failure message
/// is identical for unknown usernames and wrong passwords.
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    if payload.username.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let account = state
        .auth_service()
        .login(&payload.username, &payload.password)
        .await?;

    session
        .insert(SESSION_USER_KEY, account.id)
        .await
        .map_err(|e| ApiError::internal(format!("Failed to create session: {e}")))?;

    tracing::info!("User {} logged in", account.username);

    Ok(Json(ApiResponse::success(LoginResponse {
        username: account.username,
        role: account.role,
        redirect_to: post_login_redirect(account.role),
    })))
}

/// GET /logout
/// Invalidate the current session.
pub async fn logout(session: Session) -> impl IntoResponse {
    let _ = session.flush().await;
    Json(ApiResponse::success("Logged out"))
}
