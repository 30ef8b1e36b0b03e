pub mod prelude;

pub mod comments;
pub mod users;
pub mod workouts;
