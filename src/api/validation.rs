use chrono::NaiveDate;

use super::ApiError;
use crate::db::WorkoutInput;

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Username is required"));
    }

    if trimmed.len() > 50 {
        return Err(ApiError::validation(
            "Username must be 50 characters or less",
        ));
    }

    if !trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        return Err(ApiError::validation(
            "Username can only contain letters, numbers, hyphens, underscores, and dots",
        ));
    }

    Ok(trimmed)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }
    Ok(password)
}

/// Checks the fields of a workout create/edit request and returns the
/// repository input on success.
pub fn validate_workout(
    date: &str,
    exercise: &str,
    sets: i32,
    reps: i32,
    weight: f64,
) -> Result<WorkoutInput, ApiError> {
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
        return Err(ApiError::validation(format!(
            "Invalid date: '{date}'. Expected YYYY-MM-DD"
        )));
    }

    let exercise = exercise.trim();
    if exercise.is_empty() {
        return Err(ApiError::validation("Exercise name cannot be empty"));
    }

    if sets <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid sets: {sets}. Sets must be a positive integer"
        )));
    }

    if reps <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid reps: {reps}. Reps must be a positive integer"
        )));
    }

    if !weight.is_finite() || weight < 0.0 {
        return Err(ApiError::validation(format!(
            "Invalid weight: {weight}. Weight must be zero or greater"
        )));
    }

    Ok(WorkoutInput {
        date: date.to_string(),
        exercise: exercise.to_string(),
        sets,
        reps,
        weight,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("coach_1").is_ok());
        assert_eq!(validate_username("  alice  ").unwrap(), "alice");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
        assert!(validate_username("bad user").is_err());
    }

    #[test]
    fn test_validate_workout_accepts_valid_entry() {
        let input = validate_workout("2025-01-10", "Squat", 3, 10, 50.0).unwrap();
        assert_eq!(input.exercise, "Squat");
        assert_eq!(input.sets, 3);
    }

    #[test]
    fn test_validate_workout_rejects_bad_fields() {
        assert!(validate_workout("10.01.2025", "Squat", 3, 10, 50.0).is_err());
        assert!(validate_workout("2025-01-10", "  ", 3, 10, 50.0).is_err());
        assert!(validate_workout("2025-01-10", "Squat", 0, 10, 50.0).is_err());
        assert!(validate_workout("2025-01-10", "Squat", 3, -1, 50.0).is_err());
        assert!(validate_workout("2025-01-10", "Squat", 3, 10, -0.5).is_err());
        assert!(validate_workout("2025-01-10", "Squat", 3, 10, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_workout_allows_bodyweight() {
        // weight 0 is a valid bodyweight entry
        assert!(validate_workout("2025-01-10", "Pull-up", 3, 10, 0.0).is_ok());
    }
}
