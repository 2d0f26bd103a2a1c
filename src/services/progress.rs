// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly bucketing and aggregate statistics over completed workouts.
//!
//! Pure functions over in-memory workout lists; the route handlers fetch
//! the qualifying documents and delegate here.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::models::{ProgressStats, WeeklyProgress, Workout};

/// Number of weeks shown by the weekly progress endpoint, and the length
/// of the trailing query window.
pub const WEEKS_SHOWN: usize = 7;

/// Bucket completed workouts into ISO weeks (Monday boundary) and project
/// the trailing [`WEEKS_SHOWN`] weeks, oldest first.
///
/// Labels are positional ("Sem 1" .. "Sem 7") and re-assigned after
/// truncation, never calendar week numbers. When fewer than
/// [`WEEKS_SHOWN`] real buckets exist, synthetic cold-start entries are
/// appended (see [`cold_start_week`]).
pub fn weekly_progress(workouts: &[Workout]) -> Vec<WeeklyProgress> {
    #[derive(Default)]
    struct WeekBucket {
        volume: f64,
        weight_sum: f64,
        exercise_count: u32,
        workouts: u32,
    }

    // BTreeMap keyed by (iso_year, iso_week) keeps buckets chronological.
    let mut buckets: BTreeMap<(i32, u32), WeekBucket> = BTreeMap::new();

    for workout in workouts {
        let iso = workout.date.iso_week();
        let bucket = buckets.entry((iso.year(), iso.week())).or_default();

        for exercise in workout.exercises.iter().filter(|e| e.completed) {
            bucket.volume += exercise.sets as f64 * exercise.reps as f64 * exercise.weight;
            bucket.weight_sum += exercise.weight;
            bucket.exercise_count += 1;
        }
        bucket.workouts += 1;
    }

    let mut weeks: Vec<WeeklyProgress> = buckets
        .values()
        .map(|bucket| WeeklyProgress {
            week: String::new(), // labeled below
            volume: bucket.volume,
            weight: if bucket.exercise_count > 0 {
                bucket.weight_sum / bucket.exercise_count as f64
            } else {
                0.0
            },
            workouts: bucket.workouts,
        })
        .collect();

    while weeks.len() < WEEKS_SHOWN {
        weeks.push(cold_start_week(weeks.len() + 1));
    }

    // A 7-week trailing window can touch 8 calendar weeks; keep the newest.
    if weeks.len() > WEEKS_SHOWN {
        weeks.drain(..weeks.len() - WEEKS_SHOWN);
    }

    for (i, week) in weeks.iter_mut().enumerate() {
        week.week = format!("Sem {}", i + 1);
    }

    weeks
}

/// Synthetic placeholder week for users with insufficient history.
///
/// Clients chart these exact values during cold start, so the constants
/// are part of the API: `volume = 2500 + 300w + 50w`, `weight = 320 + 15w`,
/// `workouts = 3 + (w mod 2)` for 1-indexed `w`.
pub fn cold_start_week(w: usize) -> WeeklyProgress {
    WeeklyProgress {
        week: format!("Sem {}", w),
        volume: (2500 + w * 300 + w * 50) as f64,
        weight: (320 + w * 15) as f64,
        workouts: (3 + w % 2) as u32,
    }
}

/// All-time aggregate statistics over a user's completed workouts.
///
/// `current_streak` comes from the user document; it is maintained
/// incrementally by the completion state machine, not recomputed here.
pub fn aggregate_stats(completed: &[Workout], current_streak: u32) -> ProgressStats {
    let mut total_volume = 0.0;
    let mut weight_sum = 0.0;
    let mut exercise_count = 0u32;

    for workout in completed {
        for exercise in workout.exercises.iter().filter(|e| e.completed) {
            total_volume += exercise.sets as f64 * exercise.reps as f64 * exercise.weight;
            weight_sum += exercise.weight;
            exercise_count += 1;
        }
    }

    ProgressStats {
        total_volume,
        avg_weight: if exercise_count > 0 {
            weight_sum / exercise_count as f64
        } else {
            0.0
        },
        completed_workouts: completed.len() as u32,
        current_streak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exercise, WorkoutStatus};
    use chrono::{DateTime, Utc};

    fn parse_date(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn completed_exercise(sets: u32, reps: u32, weight: f64) -> Exercise {
        Exercise {
            id: "ex_0".to_string(),
            name: "Test".to_string(),
            sets,
            reps,
            weight,
            rest_time: 60,
            completed: true,
            completed_sets: sets,
            image: None,
        }
    }

    fn completed_workout(date: &str, exercises: Vec<Exercise>) -> Workout {
        Workout {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: "u1".to_string(),
            name: "Test Workout".to_string(),
            date: parse_date(date),
            status: WorkoutStatus::Completed,
            progress: 100.0,
            exercises,
            created_at: parse_date(date),
        }
    }

    #[test]
    fn test_empty_history_is_all_cold_start() {
        let weeks = weekly_progress(&[]);

        assert_eq!(weeks.len(), 7);
        for (i, week) in weeks.iter().enumerate() {
            let w = i + 1;
            assert_eq!(week.week, format!("Sem {}", w));
            assert_eq!(week.volume, (2500 + w * 350) as f64);
            assert_eq!(week.weight, (320 + w * 15) as f64);
            assert_eq!(week.workouts, (3 + w % 2) as u32);
        }
    }

    #[test]
    fn test_single_week_bucket_values() {
        // sets*reps*weight = 4*10*80 = 3200 and 3*12*25 = 900
        let workouts = vec![completed_workout(
            "2025-06-02T10:00:00Z",
            vec![
                completed_exercise(4, 10, 80.0),
                completed_exercise(3, 12, 25.0),
            ],
        )];

        let weeks = weekly_progress(&workouts);

        assert_eq!(weeks.len(), 7);
        assert_eq!(weeks[0].week, "Sem 1");
        assert_eq!(weeks[0].volume, 4100.0);
        assert_eq!(weeks[0].weight, (80.0 + 25.0) / 2.0);
        assert_eq!(weeks[0].workouts, 1);

        // Remaining weeks are synthetic, continuing the position index
        assert_eq!(weeks[1].volume, (2500 + 2 * 350) as f64);
        assert_eq!(weeks[6].week, "Sem 7");
    }

    #[test]
    fn test_same_iso_week_workouts_merge() {
        // Monday and Sunday of the same ISO week
        let workouts = vec![
            completed_workout("2025-06-02T08:00:00Z", vec![completed_exercise(1, 1, 10.0)]),
            completed_workout("2025-06-08T20:00:00Z", vec![completed_exercise(1, 1, 30.0)]),
        ];

        let weeks = weekly_progress(&workouts);

        assert_eq!(weeks[0].workouts, 2);
        assert_eq!(weeks[0].volume, 40.0);
        assert_eq!(weeks[0].weight, 20.0);
    }

    #[test]
    fn test_monday_starts_a_new_week() {
        // Sunday 2025-06-08 and Monday 2025-06-09 fall in different ISO weeks
        let workouts = vec![
            completed_workout("2025-06-08T10:00:00Z", vec![completed_exercise(1, 1, 10.0)]),
            completed_workout("2025-06-09T10:00:00Z", vec![completed_exercise(1, 1, 10.0)]),
        ];

        let weeks = weekly_progress(&workouts);

        assert_eq!(weeks[0].workouts, 1);
        assert_eq!(weeks[1].workouts, 1);
    }

    #[test]
    fn test_buckets_ordered_across_year_boundary() {
        let workouts = vec![
            completed_workout("2025-01-07T10:00:00Z", vec![completed_exercise(1, 1, 20.0)]),
            completed_workout("2024-12-23T10:00:00Z", vec![completed_exercise(1, 1, 10.0)]),
        ];

        let weeks = weekly_progress(&workouts);

        // December bucket first, January second
        assert_eq!(weeks[0].weight, 10.0);
        assert_eq!(weeks[1].weight, 20.0);
        assert_eq!(weeks[0].week, "Sem 1");
        assert_eq!(weeks[1].week, "Sem 2");
    }

    #[test]
    fn test_incomplete_exercises_do_not_count() {
        let mut exercise = completed_exercise(5, 10, 100.0);
        exercise.completed = false;
        exercise.completed_sets = 2;

        let workouts = vec![completed_workout("2025-06-02T10:00:00Z", vec![exercise])];
        let weeks = weekly_progress(&workouts);

        assert_eq!(weeks[0].volume, 0.0);
        assert_eq!(weeks[0].weight, 0.0);
        // The workout itself still counts toward the bucket
        assert_eq!(weeks[0].workouts, 1);
    }

    #[test]
    fn test_more_than_seven_weeks_keeps_newest() {
        // 8 consecutive ISO weeks, identifiable by weight = week index * 10
        let mondays = [
            "2025-04-07", "2025-04-14", "2025-04-21", "2025-04-28", "2025-05-05", "2025-05-12",
            "2025-05-19", "2025-05-26",
        ];
        let workouts: Vec<Workout> = mondays
            .iter()
            .enumerate()
            .map(|(i, day)| {
                completed_workout(
                    &format!("{}T10:00:00Z", day),
                    vec![completed_exercise(1, 1, (i as f64 + 1.0) * 10.0)],
                )
            })
            .collect();

        let weeks = weekly_progress(&workouts);

        assert_eq!(weeks.len(), 7);
        // Oldest bucket (weight 10.0) dropped, labels re-assigned from 1
        assert_eq!(weeks[0].weight, 20.0);
        assert_eq!(weeks[0].week, "Sem 1");
        assert_eq!(weeks[6].weight, 80.0);
        assert_eq!(weeks[6].week, "Sem 7");
    }

    #[test]
    fn test_aggregate_stats_totals() {
        let workouts = vec![
            completed_workout(
                "2025-06-02T10:00:00Z",
                vec![completed_exercise(4, 10, 80.0)], // volume 3200
            ),
            completed_workout(
                "2025-03-10T10:00:00Z",
                vec![completed_exercise(2, 10, 40.0)], // volume 800
            ),
        ];

        let stats = aggregate_stats(&workouts, 5);

        assert_eq!(stats.total_volume, 4000.0);
        assert_eq!(stats.avg_weight, 60.0);
        assert_eq!(stats.completed_workouts, 2);
        assert_eq!(stats.current_streak, 5);
    }

    #[test]
    fn test_aggregate_stats_empty() {
        let stats = aggregate_stats(&[], 0);

        assert_eq!(stats.total_volume, 0.0);
        assert_eq!(stats.avg_weight, 0.0);
        assert_eq!(stats.completed_workouts, 0);
        assert_eq!(stats.current_streak, 0);
    }
}
