//! Pure reductions over workout rows: dashboard totals, per-exercise
//! progress series, and month-bucketed yearly volume.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::entities::workouts;

/// Dashboard summary: workout count plus total lifted volume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeTotals {
    pub total_workouts: usize,
    pub total_weight: f64,
}

/// One plotted point of an exercise trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: String,
    pub weight: f64,
}

/// Date-ascending trend line for a single exercise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSeries {
    pub exercise: String,
    pub points: Vec<ProgressPoint>,
}

fn volume_of(w: &workouts::Model) -> f64 {
    w.weight * f64::from(w.reps) * f64::from(w.sets)
}

#[must_use]
pub fn volume_totals(workouts: &[workouts::Model]) -> VolumeTotals {
    VolumeTotals {
        total_workouts: workouts.len(),
        total_weight: workouts.iter().map(volume_of).sum(),
    }
}

/// Group workouts by exercise name, preserving first-seen exercise order.
///
/// Each series keeps the relative order of its input rows, so passing rows
/// already sorted by date yields date-ascending trend lines. The linear scan
/// per row is fine at the per-user workout counts this serves.
#[must_use]
pub fn exercise_progress(workouts_by_date: &[workouts::Model]) -> Vec<ExerciseSeries> {
    let mut series: Vec<ExerciseSeries> = Vec::new();

    for w in workouts_by_date {
        let point = ProgressPoint {
            date: w.date.clone(),
            weight: w.weight,
        };

        match series.iter_mut().find(|s| s.exercise == w.exercise) {
            Some(existing) => existing.points.push(point),
            None => series.push(ExerciseSeries {
                exercise: w.exercise.clone(),
                points: vec![point],
            }),
        }
    }

    series
}

/// Bucket total volume into the 12 months of `year`.
///
/// Entries from other years contribute to no bucket; rows whose date does not
/// parse as `YYYY-MM-DD` are skipped the same way.
#[must_use]
pub fn monthly_volume(workouts: &[workouts::Model], year: i32) -> [f64; 12] {
    let mut buckets = [0.0; 12];

    for w in workouts {
        let Ok(date) = NaiveDate::parse_from_str(&w.date, "%Y-%m-%d") else {
            continue;
        };
        if date.year() != year {
            continue;
        }

        let month = date.month0() as usize;
        buckets[month] += volume_of(w);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout(id: i32, date: &str, exercise: &str, sets: i32, reps: i32, weight: f64) -> workouts::Model {
        workouts::Model {
            id,
            user_id: 1,
            date: date.to_string(),
            exercise: exercise.to_string(),
            sets,
            reps,
            weight,
        }
    }

    #[test]
    fn test_volume_totals() {
        let rows = vec![
            workout(1, "2025-01-10", "Squat", 3, 10, 50.0),
            workout(2, "2025-01-12", "Bench Press", 5, 5, 80.0),
        ];

        let totals = volume_totals(&rows);
        assert_eq!(totals.total_workouts, 2);
        let expected = 50.0 * 10.0 * 3.0 + 80.0 * 5.0 * 5.0;
        assert!((totals.total_weight - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn test_volume_totals_empty() {
        let totals = volume_totals(&[]);
        assert_eq!(totals.total_workouts, 0);
        assert!(totals.total_weight.abs() < f64::EPSILON);
    }

    #[test]
    fn test_volume_totals_is_idempotent() {
        let rows = vec![workout(1, "2025-01-10", "Squat", 3, 10, 50.0)];
        assert_eq!(volume_totals(&rows), volume_totals(&rows));
    }

    #[test]
    fn test_exercise_progress_groups_in_first_seen_order() {
        let rows = vec![
            workout(1, "2025-01-01", "Squat", 3, 10, 50.0),
            workout(2, "2025-01-05", "Bench Press", 3, 8, 60.0),
            workout(3, "2025-01-10", "Squat", 3, 10, 55.0),
        ];

        let series = exercise_progress(&rows);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].exercise, "Squat");
        assert_eq!(series[1].exercise, "Bench Press");

        assert_eq!(
            series[0].points,
            vec![
                ProgressPoint { date: "2025-01-01".to_string(), weight: 50.0 },
                ProgressPoint { date: "2025-01-10".to_string(), weight: 55.0 },
            ]
        );
    }

    #[test]
    fn test_monthly_volume_buckets_by_month() {
        let rows = vec![workout(1, "2025-06-15", "Squat", 3, 10, 50.0)];

        let buckets = monthly_volume(&rows, 2025);
        for (i, bucket) in buckets.iter().enumerate() {
            if i == 5 {
                assert!((bucket - 1500.0).abs() < f64::EPSILON);
            } else {
                assert!(bucket.abs() < f64::EPSILON);
            }
        }
    }

    #[test]
    fn test_monthly_volume_excludes_other_years() {
        let rows = vec![
            workout(1, "2024-06-15", "Squat", 3, 10, 50.0),
            workout(2, "2025-03-01", "Deadlift", 1, 5, 100.0),
        ];

        let buckets = monthly_volume(&rows, 2025);
        assert!((buckets[2] - 500.0).abs() < f64::EPSILON);
        assert!((buckets.iter().sum::<f64>() - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monthly_volume_skips_unparseable_dates() {
        let rows = vec![workout(1, "not-a-date", "Squat", 3, 10, 50.0)];
        let buckets = monthly_volume(&rows, 2025);
        assert!(buckets.iter().all(|b| b.abs() < f64::EPSILON));
    }
}
