use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::require_user_with_role;
use super::validation::validate_workout;
use super::{ApiError, ApiResponse, AppState};
use crate::models::Role;
use crate::services::{DashboardView, ProgressView, StatisticsView};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Deserialize)]
pub struct WorkoutRequest {
    pub date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

#[derive(Serialize)]
pub struct WorkoutDto {
    pub id: i32,
    pub date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

impl From<crate::entities::workouts::Model> for WorkoutDto {
    fn from(model: crate::entities::workouts::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            exercise: model.exercise,
            sets: model.sets,
            reps: model.reps,
            weight: model.weight,
        }
    }
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Handlers (all user-role gated)
// ============================================================================

/// GET /dashboard
/// Own workouts with comments, plus workout count and total lifted volume.
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    let view = state.workout_service().dashboard(user.id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// POST /add
pub async fn add_workout(
    State(state): State<Arc<AppState>>,
    session: Session,
    Json(payload): Json<WorkoutRequest>,
) -> Result<Json<ApiResponse<WorkoutDto>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    let input = validate_workout(
        &payload.date,
        &payload.exercise,
        payload.sets,
        payload.reps,
        payload.weight,
    )?;

    let workout = state.workout_service().add_workout(user.id, input).await?;
    Ok(Json(ApiResponse::success(workout.into())))
}

/// POST /edit/{id}
/// Owner-only; missing ids are 404, foreign ids are 403.
pub async fn edit_workout(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(workout_id): Path<i32>,
    Json(payload): Json<WorkoutRequest>,
) -> Result<Json<ApiResponse<WorkoutDto>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    let input = validate_workout(
        &payload.date,
        &payload.exercise,
        payload.sets,
        payload.reps,
        payload.weight,
    )?;

    let workout = state
        .workout_service()
        .edit_workout(&user, workout_id, input)
        .await?;
    Ok(Json(ApiResponse::success(workout.into())))
}

/// GET /delete/{id}
pub async fn delete_workout(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(workout_id): Path<i32>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    state
        .workout_service()
        .delete_workout(&user, workout_id)
        .await?;

    Ok(Json(ApiResponse::success(MessageResponse {
        message: format!("Workout {workout_id} deleted"),
    })))
}

/// GET /progress
/// Per-exercise (date, weight) series for trend lines.
pub async fn progress(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<ProgressView>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    let view = state.workout_service().progress(user.id).await?;
    Ok(Json(ApiResponse::success(view)))
}

/// GET /statistics
/// Monthly volume totals for the current calendar year.
pub async fn statistics(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Json<ApiResponse<StatisticsView>>, ApiError> {
    let user = require_user_with_role(&session, &state, Role::User).await?;

    let view = state.workout_service().statistics(user.id).await?;
    Ok(Json(ApiResponse::success(view)))
}
