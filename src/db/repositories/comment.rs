use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::comments;

pub struct CommentRepository {
    conn: DatabaseConnection,
}

impl CommentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Append-only: there is no update or delete path for comments.
    pub async fn add(
        &self,
        workout_id: i32,
        coach_id: i32,
        content: &str,
        date: &str,
    ) -> Result<comments::Model> {
        let active = comments::ActiveModel {
            workout_id: Set(workout_id),
            coach_id: Set(coach_id),
            content: Set(content.to_string()),
            date: Set(date.to_string()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert comment")
    }

    pub async fn list_by_workout(&self, workout_id: i32) -> Result<Vec<comments::Model>> {
        comments::Entity::find()
            .filter(comments::Column::WorkoutId.eq(workout_id))
            .order_by_asc(comments::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list comments")
    }
}
