//! Domain service for the workout ledger and its derived views.

use serde::Serialize;
use thiserror::Error;

use crate::db::{User, WorkoutInput};
use crate::entities::{comments, workouts};
use crate::services::aggregate::ExerciseSeries;

#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Wrong owner or wrong role. Only the owner, and only while the owner's
    /// role is `user`, may touch a workout.
    #[error("Access denied")]
    AccessDenied,

    #[error("Workout not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for WorkoutError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for WorkoutError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// One workout row decorated with its coach comments.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutWithComments {
    pub id: i32,
    pub date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub comments: Vec<comments::Model>,
}

impl WorkoutWithComments {
    #[must_use]
    pub fn new(workout: workouts::Model, comments: Vec<comments::Model>) -> Self {
        Self {
            id: workout.id,
            date: workout.date,
            exercise: workout.exercise,
            sets: workout.sets,
            reps: workout.reps,
            weight: workout.weight,
            comments,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub total_workouts: usize,
    pub total_weight: f64,
    pub workouts: Vec<WorkoutWithComments>,
}

#[derive(Debug, Serialize)]
pub struct ProgressView {
    pub exercises: Vec<ExerciseSeries>,
}

#[derive(Debug, Serialize)]
pub struct StatisticsView {
    pub year: i32,
    /// Index 0 is January. Zero-filled months stay present so charts always
    /// get 12 slots.
    pub monthly_totals: [f64; 12],
}

/// Domain service trait for workouts.
#[async_trait::async_trait]
pub trait WorkoutService: Send + Sync {
    /// Records a workout owned by `owner_id`. The caller has already passed
    /// the user-role gate.
    async fn add_workout(
        &self,
        owner_id: i32,
        input: WorkoutInput,
    ) -> Result<workouts::Model, WorkoutError>;

    /// Rewrites a workout's fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorkoutError::AccessDenied`] unless `requester` owns the
    /// workout and holds the `user` role; [`WorkoutError::NotFound`] for a
    /// missing id.
    async fn edit_workout(
        &self,
        requester: &User,
        workout_id: i32,
        input: WorkoutInput,
    ) -> Result<workouts::Model, WorkoutError>;

    /// Deletes a workout under the same ownership rule as editing.
    async fn delete_workout(
        &self,
        requester: &User,
        workout_id: i32,
    ) -> Result<(), WorkoutError>;

    /// Own workouts in insertion order, decorated with comments, plus totals.
    async fn dashboard(&self, owner_id: i32) -> Result<DashboardView, WorkoutError>;

    /// Per-exercise (date, weight) series, date ascending.
    async fn progress(&self, owner_id: i32) -> Result<ProgressView, WorkoutError>;

    /// Month-bucketed volume for the current calendar year.
    async fn statistics(&self, owner_id: i32) -> Result<StatisticsView, WorkoutError>;
}
