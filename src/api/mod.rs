use axum::{
    Json, Router,
    extract::State,
    http::HeaderValue,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CoachService, SeaOrmAuthService, SeaOrmCoachService, SeaOrmWorkoutService,
    WorkoutService,
};

mod admin;
mod auth;
mod coach;
mod error;
mod types;
mod validation;
mod workouts;

pub use error::ApiError;
pub use types::ApiResponse;

pub struct AppState {
    store: Store,

    config: Config,

    auth_service: Arc<dyn AuthService>,

    workout_service: Arc<dyn WorkoutService>,

    coach_service: Arc<dyn CoachService>,

    start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.auth_service
    }

    #[must_use]
    pub fn workout_service(&self) -> &Arc<dyn WorkoutService> {
        &self.workout_service
    }

    #[must_use]
    pub fn coach_service(&self) -> &Arc<dyn CoachService> {
        &self.coach_service
    }
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(Arc::new(AppState {
        auth_service: Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )),
        workout_service: Arc::new(SeaOrmWorkoutService::new(store.clone())),
        coach_service: Arc::new(SeaOrmCoachService::new(store.clone())),
        store,
        config,
        start_time: std::time::Instant::now(),
    }))
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
}

/// GET /health
async fn health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<HealthResponse>>, ApiError> {
    state
        .store()
        .ping()
        .await
        .map_err(|e| ApiError::internal(format!("Database unreachable: {e}")))?;

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })))
}

pub fn router(state: Arc<AppState>) -> Router {
    let (cors_origins, secure_cookies, session_ttl_minutes) = {
        let server = &state.config().server;
        (
            server.cors_allowed_origins.clone(),
            server.secure_cookies,
            server.session_ttl_minutes,
        )
    };

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            session_ttl_minutes,
        )));

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(auth::index))
        .route("/health", get(health))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(workouts::dashboard))
        .route("/add", post(workouts::add_workout))
        .route("/edit/{id}", post(workouts::edit_workout))
        .route("/delete/{id}", get(workouts::delete_workout))
        .route("/progress", get(workouts::progress))
        .route("/statistics", get(workouts::statistics))
        .route("/coach", get(coach::coach_dashboard))
        .route("/coach/comment/{workout_id}", post(coach::add_comment))
        .route("/admin", get(admin::admin_dashboard))
        .route("/admin/delete/{user_id}", get(admin::delete_user))
        .layer(session_layer)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
