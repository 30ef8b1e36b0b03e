//! `SeaORM` implementation of the `WorkoutService` trait.

use async_trait::async_trait;
use chrono::Datelike;

use crate::db::{Store, User, WorkoutInput};
use crate::entities::workouts;
use crate::models::Role;
use crate::services::aggregate;
use crate::services::workout_service::{
    DashboardView, ProgressView, StatisticsView, WorkoutError, WorkoutService,
    WorkoutWithComments,
};

pub struct SeaOrmWorkoutService {
    store: Store,
}

impl SeaOrmWorkoutService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Loads the workout and enforces the ownership rule shared by edit and
    /// delete: owner only, and only while the owner's role is `user`.
    async fn get_owned(
        &self,
        requester: &User,
        workout_id: i32,
    ) -> Result<workouts::Model, WorkoutError> {
        let workout = self
            .store
            .get_workout(workout_id)
            .await?
            .ok_or(WorkoutError::NotFound)?;

        if workout.user_id != requester.id || requester.role != Role::User {
            return Err(WorkoutError::AccessDenied);
        }

        Ok(workout)
    }

    async fn decorate(
        &self,
        workouts: Vec<workouts::Model>,
    ) -> Result<Vec<WorkoutWithComments>, WorkoutError> {
        let mut decorated = Vec::with_capacity(workouts.len());
        for workout in workouts {
            let comments = self.store.comments_for_workout(workout.id).await?;
            decorated.push(WorkoutWithComments::new(workout, comments));
        }
        Ok(decorated)
    }
}

#[async_trait]
impl WorkoutService for SeaOrmWorkoutService {
    async fn add_workout(
        &self,
        owner_id: i32,
        input: WorkoutInput,
    ) -> Result<workouts::Model, WorkoutError> {
        let workout = self.store.add_workout(owner_id, &input).await?;
        tracing::info!(
            "Recorded workout {} ({}) for user {}",
            workout.id,
            workout.exercise,
            owner_id
        );
        Ok(workout)
    }

    async fn edit_workout(
        &self,
        requester: &User,
        workout_id: i32,
        input: WorkoutInput,
    ) -> Result<workouts::Model, WorkoutError> {
        self.get_owned(requester, workout_id).await?;

        // Last-write-wins: no versioning on concurrent edits to the same row.
        self.store
            .update_workout(workout_id, &input)
            .await?
            .ok_or(WorkoutError::NotFound)
    }

    async fn delete_workout(
        &self,
        requester: &User,
        workout_id: i32,
    ) -> Result<(), WorkoutError> {
        self.get_owned(requester, workout_id).await?;

        if !self.store.delete_workout(workout_id).await? {
            return Err(WorkoutError::NotFound);
        }
        Ok(())
    }

    async fn dashboard(&self, owner_id: i32) -> Result<DashboardView, WorkoutError> {
        let workouts = self.store.workouts_for_owner(owner_id).await?;
        let totals = aggregate::volume_totals(&workouts);
        let workouts = self.decorate(workouts).await?;

        Ok(DashboardView {
            total_workouts: totals.total_workouts,
            total_weight: totals.total_weight,
            workouts,
        })
    }

    async fn progress(&self, owner_id: i32) -> Result<ProgressView, WorkoutError> {
        let workouts = self.store.workouts_for_owner_by_date(owner_id).await?;

        Ok(ProgressView {
            exercises: aggregate::exercise_progress(&workouts),
        })
    }

    async fn statistics(&self, owner_id: i32) -> Result<StatisticsView, WorkoutError> {
        let workouts = self.store.workouts_for_owner(owner_id).await?;
        let year = chrono::Local::now().year();

        Ok(StatisticsView {
            year,
            monthly_totals: aggregate::monthly_volume(&workouts, year),
        })
    }
}
