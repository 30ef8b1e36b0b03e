//! Domain service for the coach dashboard: the roster of every user's
//! workouts and the comments coaches attach to them.

use serde::Serialize;
use thiserror::Error;

use crate::entities::comments;
use crate::services::workout_service::WorkoutWithComments;

pub const MAX_COMMENT_LEN: usize = 500;

#[derive(Debug, Error)]
pub enum CoachError {
    #[error("Workout not found")]
    WorkoutNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CoachError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One roster row: a user and their date-ordered, comment-decorated workouts.
#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub user_id: i32,
    pub username: String,
    pub workouts: Vec<WorkoutWithComments>,
}

/// Domain service trait for coaching.
#[async_trait::async_trait]
pub trait CoachService: Send + Sync {
    /// Assembles the full roster on every call. Naive O(users x workouts);
    /// acceptable at this scale.
    async fn roster(&self) -> Result<Vec<RosterEntry>, CoachError>;

    /// Appends a comment to a workout. Any coach may comment on any user's
    /// workout; there is no coach-to-user assignment.
    ///
    /// # Errors
    ///
    /// Returns [`CoachError::Validation`] for empty or over-length content,
    /// [`CoachError::WorkoutNotFound`] for a missing workout id.
    async fn add_comment(
        &self,
        coach_id: i32,
        workout_id: i32,
        content: &str,
    ) -> Result<comments::Model, CoachError>;
}
