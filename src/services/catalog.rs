// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Starter workout catalog and first-access seeding.
//!
//! New users get one workout per template: the first scheduled today and
//! active, the rest on the following days and pending. Seeding is
//! idempotent; a user with any existing workout documents is left alone.

use chrono::{DateTime, Duration, Utc};

use crate::db::FirestoreDb;
use crate::error::AppError;
use crate::models::{Exercise, Workout, WorkoutStatus};

/// One exercise prescription inside a template.
struct ExerciseTemplate {
    name: &'static str,
    sets: u32,
    reps: u32,
    weight: f64,
    rest_time: u32,
    image: &'static str,
}

/// A named workout template.
struct WorkoutTemplate {
    name: &'static str,
    exercises: &'static [ExerciseTemplate],
}

const EXERCISE_IMAGE: &str =
    "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=80&h=80&fit=crop";

/// The fixed starter catalog, in schedule order.
const STARTER_TEMPLATES: &[WorkoutTemplate] = &[
    WorkoutTemplate {
        name: "Peito e Tríceps",
        exercises: &[
            ExerciseTemplate {
                name: "Supino Reto",
                sets: 4,
                reps: 10,
                weight: 80.0,
                rest_time: 90,
                image: EXERCISE_IMAGE,
            },
            ExerciseTemplate {
                name: "Supino Inclinado",
                sets: 4,
                reps: 8,
                weight: 70.0,
                rest_time: 90,
                image: EXERCISE_IMAGE,
            },
            ExerciseTemplate {
                name: "Crucifixo",
                sets: 3,
                reps: 12,
                weight: 25.0,
                rest_time: 60,
                image: EXERCISE_IMAGE,
            },
            ExerciseTemplate {
                name: "Tríceps Testa",
                sets: 4,
                reps: 12,
                weight: 30.0,
                rest_time: 60,
                image: EXERCISE_IMAGE,
            },
        ],
    },
    WorkoutTemplate {
        name: "Costas e Bíceps",
        exercises: &[
            ExerciseTemplate {
                name: "Puxada Frontal",
                sets: 4,
                reps: 10,
                weight: 65.0,
                rest_time: 90,
                image: EXERCISE_IMAGE,
            },
            ExerciseTemplate {
                name: "Remada Baixa",
                sets: 4,
                reps: 10,
                weight: 60.0,
                rest_time: 90,
                image: EXERCISE_IMAGE,
            },
            ExerciseTemplate {
                name: "Rosca Direta",
                sets: 3,
                reps: 12,
                weight: 20.0,
                rest_time: 60,
                image: EXERCISE_IMAGE,
            },
        ],
    },
];

/// Expand the starter catalog into fresh workout documents for a user.
///
/// Template `i` is scheduled at `now + i` days; the first is active, the
/// rest pending. All completion state starts zeroed.
pub fn starter_workouts(user_id: &str, now: DateTime<Utc>) -> Vec<Workout> {
    STARTER_TEMPLATES
        .iter()
        .enumerate()
        .map(|(i, template)| Workout {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: template.name.to_string(),
            date: now + Duration::days(i as i64),
            status: if i == 0 {
                WorkoutStatus::Active
            } else {
                WorkoutStatus::Pending
            },
            progress: 0.0,
            exercises: template
                .exercises
                .iter()
                .enumerate()
                .map(|(j, ex)| Exercise {
                    id: format!("ex_{}", j),
                    name: ex.name.to_string(),
                    sets: ex.sets,
                    reps: ex.reps,
                    weight: ex.weight,
                    rest_time: ex.rest_time,
                    completed: false,
                    completed_sets: 0,
                    image: Some(ex.image.to_string()),
                })
                .collect(),
            created_at: now,
        })
        .collect()
}

/// Seed the starter catalog for a user who has no workouts yet.
///
/// No-op if the user already has at least one workout document.
pub async fn ensure_seeded(db: &FirestoreDb, user_id: &str) -> Result<(), AppError> {
    if db.has_workouts(user_id).await? {
        return Ok(());
    }

    let workouts = starter_workouts(user_id, Utc::now());
    db.batch_set_workouts(&workouts).await?;

    tracing::info!(
        user_id,
        count = workouts.len(),
        "Seeded starter workouts for new user"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_expansion_schedules_and_states() {
        let now = Utc::now();
        let workouts = starter_workouts("user-1", now);

        assert_eq!(workouts.len(), STARTER_TEMPLATES.len());
        assert_eq!(workouts[0].status, WorkoutStatus::Active);
        for (i, workout) in workouts.iter().enumerate() {
            if i > 0 {
                assert_eq!(workout.status, WorkoutStatus::Pending);
            }
            assert_eq!(workout.date, now + Duration::days(i as i64));
            assert_eq!(workout.user_id, "user-1");
            assert_eq!(workout.progress, 0.0);
        }
    }

    #[test]
    fn test_starter_exercises_begin_uncompleted() {
        let workouts = starter_workouts("user-1", Utc::now());

        for workout in &workouts {
            assert!(!workout.exercises.is_empty());
            for (j, exercise) in workout.exercises.iter().enumerate() {
                assert_eq!(exercise.id, format!("ex_{}", j));
                assert!(!exercise.completed);
                assert_eq!(exercise.completed_sets, 0);
                assert!(exercise.sets > 0);
            }
        }
    }

    #[test]
    fn test_starter_ids_are_unique() {
        let a = starter_workouts("user-1", Utc::now());
        let b = starter_workouts("user-1", Utc::now());

        assert_ne!(a[0].id, b[0].id);
        assert_ne!(a[0].id, a[1].id);
    }
}
