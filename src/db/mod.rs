use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::{comments, workouts};
use crate::models::Role;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;
pub use repositories::workout::WorkoutInput;

/// Facade over the connection pool and the per-entity repositories. Cloning
/// is cheap; the pool is shared.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.starts_with(":memory:") && !db_url.contains("memory") {
            let path_str = db_url.trim_start_matches("sqlite:").trim_start_matches("//");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn workout_repo(&self) -> repositories::workout::WorkoutRepository {
        repositories::workout::WorkoutRepository::new(self.conn.clone())
    }

    fn comment_repo(&self) -> repositories::comment::CommentRepository {
        repositories::comment::CommentRepository::new(self.conn.clone())
    }

    // Users

    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        role: Role,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        self.user_repo().create(username, password, role, config).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>> {
        self.user_repo().verify_password(username, password).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list_all().await
    }

    pub async fn list_users_by_role(&self, role: Role) -> Result<Vec<User>> {
        self.user_repo().list_by_role(role).await
    }

    pub async fn delete_user_cascade(&self, id: i32) -> Result<bool> {
        self.user_repo().delete_cascade(id).await
    }

    // Workouts

    pub async fn add_workout(
        &self,
        owner_id: i32,
        input: &WorkoutInput,
    ) -> Result<workouts::Model> {
        self.workout_repo().create(owner_id, input).await
    }

    pub async fn get_workout(&self, id: i32) -> Result<Option<workouts::Model>> {
        self.workout_repo().get(id).await
    }

    pub async fn update_workout(
        &self,
        id: i32,
        input: &WorkoutInput,
    ) -> Result<Option<workouts::Model>> {
        self.workout_repo().update(id, input).await
    }

    pub async fn delete_workout(&self, id: i32) -> Result<bool> {
        self.workout_repo().delete(id).await
    }

    pub async fn workouts_for_owner(&self, owner_id: i32) -> Result<Vec<workouts::Model>> {
        self.workout_repo().list_by_owner(owner_id).await
    }

    pub async fn workouts_for_owner_by_date(&self, owner_id: i32) -> Result<Vec<workouts::Model>> {
        self.workout_repo().list_by_owner_by_date(owner_id).await
    }

    // Comments

    pub async fn add_comment(
        &self,
        workout_id: i32,
        coach_id: i32,
        content: &str,
        date: &str,
    ) -> Result<comments::Model> {
        self.comment_repo()
            .add(workout_id, coach_id, content, date)
            .await
    }

    pub async fn comments_for_workout(&self, workout_id: i32) -> Result<Vec<comments::Model>> {
        self.comment_repo().list_by_workout(workout_id).await
    }
}
