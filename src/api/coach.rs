use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user_with_role;
use super::{ApiError, ApiResponse, AppState};
use crate::entities::comments;
use crate::models::Role;
use crate::services::RosterEntry;

#[derive(Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

/// GET /coach
/// Every user with their date-ordered workouts and attached comments.
pub async fn coach_dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<Vec<RosterEntry>>>, ApiError> {
    require_user_with_role(&session, &state, Role::Coach).await?;

    let roster = state.coach_service().roster().await?;
    Ok(Json(ApiResponse::success(roster)))
}

/// POST /coach/comment/{workout_id}
/// Any coach may comment on any workout; there is no per-user assignment.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(workout_id): Path<i32>,
    Json(payload): Json<CommentRequest>,
) -> Result<Json<ApiResponse<comments::Model>>, ApiError> {
    let coach = require_user_with_role(&session, &state, Role::Coach).await?;

    let comment = state
        .coach_service()
        .add_comment(coach.id, workout_id, &payload.content)
        .await?;

    Ok(Json(ApiResponse::success(comment)))
}
