pub mod aggregate;

pub mod auth_service;
pub use auth_service::{AccountInfo, AuthError, AuthService, post_login_redirect};

pub mod auth_service_impl;
pub use auth_service_impl::SeaOrmAuthService;

pub mod workout_service;
pub use workout_service::{
    DashboardView, ProgressView, StatisticsView, WorkoutError, WorkoutService,
    WorkoutWithComments,
};

pub mod workout_service_impl;
pub use workout_service_impl::SeaOrmWorkoutService;

pub mod coach_service;
pub use coach_service::{CoachError, CoachService, RosterEntry};

pub mod coach_service_impl;
pub use coach_service_impl::SeaOrmCoachService;
