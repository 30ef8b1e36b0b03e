use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user_with_role;
use super::{ApiError, ApiResponse, AppState};
use crate::models::Role;
use crate::services::AccountInfo;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /admin
/// Lists every account. Single handler for the path.
pub async fn admin_dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<AccountInfo>>>, ApiError> {
    require_user_with_role(&session, &state, Role::Admin).await?;

    let accounts = state.auth_service().list_accounts().await?;
    Ok(Json(ApiResponse::success(accounts)))
}

/// GET /admin/delete/{user_id}
/// Removes the account and every workout it owns. Comments on those workouts
/// are left behind.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_user_with_role(&session, &state, Role::Admin).await?;

    state.auth_service().delete_account_cascade(user_id).await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: format!("User {user_id} deleted"),
    })))
}
