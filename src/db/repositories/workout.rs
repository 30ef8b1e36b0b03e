use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::workouts;

/// Field values for creating or updating a workout. Validation happens at the
/// API boundary; the repository only persists.
#[derive(Debug, Clone)]
pub struct WorkoutInput {
    pub date: String,
    pub exercise: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

pub struct WorkoutRepository {
    conn: DatabaseConnection,
}

impl WorkoutRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, owner_id: i32, input: &WorkoutInput) -> Result<workouts::Model> {
        let active = workouts::ActiveModel {
            user_id: Set(owner_id),
            date: Set(input.date.clone()),
            exercise: Set(input.exercise.clone()),
            sets: Set(input.sets),
            reps: Set(input.reps),
            weight: Set(input.weight),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert workout")
    }

    pub async fn get(&self, id: i32) -> Result<Option<workouts::Model>> {
        workouts::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query workout")
    }

    pub async fn update(&self, id: i32, input: &WorkoutInput) -> Result<Option<workouts::Model>> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut active: workouts::ActiveModel = existing.into();
        active.date = Set(input.date.clone());
        active.exercise = Set(input.exercise.clone());
        active.sets = Set(input.sets);
        active.reps = Set(input.reps);
        active.weight = Set(input.weight);

        let updated = active
            .update(&self.conn)
            .await
            .context("Failed to update workout")?;

        Ok(Some(updated))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = workouts::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete workout")?;

        Ok(result.rows_affected > 0)
    }

    /// Insertion order, for the dashboard.
    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<workouts::Model>> {
        workouts::Entity::find()
            .filter(workouts::Column::UserId.eq(owner_id))
            .order_by_asc(workouts::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list workouts")
    }

    /// Date-ascending, for progress views and the coach roster.
    pub async fn list_by_owner_by_date(&self, owner_id: i32) -> Result<Vec<workouts::Model>> {
        workouts::Entity::find()
            .filter(workouts::Column::UserId.eq(owner_id))
            .order_by_asc(workouts::Column::Date)
            .all(&self.conn)
            .await
            .context("Failed to list workouts by date")
    }
}
