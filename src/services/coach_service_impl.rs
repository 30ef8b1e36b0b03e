//! `SeaORM` implementation of the `CoachService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::entities::comments;
use crate::models::Role;
use crate::services::coach_service::{CoachError, CoachService, MAX_COMMENT_LEN, RosterEntry};
use crate::services::workout_service::WorkoutWithComments;

pub struct SeaOrmCoachService {
    store: Store,
}

impl SeaOrmCoachService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CoachService for SeaOrmCoachService {
    async fn roster(&self) -> Result<Vec<RosterEntry>, CoachError> {
        let users = self.store.list_users_by_role(Role::User).await?;

        let mut roster = Vec::with_capacity(users.len());
        for user in users {
            let workouts = self.store.workouts_for_owner_by_date(user.id).await?;

            let mut decorated = Vec::with_capacity(workouts.len());
            for workout in workouts {
                let comments = self.store.comments_for_workout(workout.id).await?;
                decorated.push(WorkoutWithComments::new(workout, comments));
            }

            roster.push(RosterEntry {
                user_id: user.id,
                username: user.username,
                workouts: decorated,
            });
        }

        Ok(roster)
    }

    async fn add_comment(
        &self,
        coach_id: i32,
        workout_id: i32,
        content: &str,
    ) -> Result<comments::Model, CoachError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CoachError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(CoachError::Validation(format!(
                "Comment content must be {MAX_COMMENT_LEN} characters or less"
            )));
        }

        if self.store.get_workout(workout_id).await?.is_none() {
            return Err(CoachError::WorkoutNotFound);
        }

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let comment = self
            .store
            .add_comment(workout_id, coach_id, content, &date)
            .await?;

        tracing::info!(
            "Coach {} commented on workout {}",
            coach_id,
            workout_id
        );

        Ok(comment)
    }
}
