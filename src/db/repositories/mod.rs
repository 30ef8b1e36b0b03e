pub mod comment;
pub mod user;
pub mod workout;
