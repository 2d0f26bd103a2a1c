// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout and exercise models, including the completion state machine.
//!
//! A workout moves `pending → active → completed`. `progress` is always
//! derived from the exercise completion ratio and never set directly;
//! the `completed` transition fires exactly once, when progress reaches 100.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workout lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutStatus {
    Pending,
    Active,
    Completed,
}

/// A single exercise embedded in a workout document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Position-derived ID within the workout ("ex_0", "ex_1", ...)
    pub id: String,
    pub name: String,
    /// Prescribed number of sets
    pub sets: u32,
    /// Prescribed repetitions per set
    pub reps: u32,
    /// Working weight in kg
    pub weight: f64,
    /// Rest between sets, in seconds
    pub rest_time: u32,
    /// True once `completed_sets == sets`
    #[serde(default)]
    pub completed: bool,
    /// Sets done so far; never decreases, never exceeds `sets`
    #[serde(default)]
    pub completed_sets: u32,
    /// Illustration image URL
    pub image: Option<String>,
}

/// Workout document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    /// Generated UUID (also used as document ID)
    pub id: String,
    /// Owning user's ID
    pub user_id: String,
    pub name: String,
    /// Scheduled date
    pub date: DateTime<Utc>,
    pub status: WorkoutStatus,
    /// Completion percentage in [0, 100], derived from the exercises
    #[serde(default)]
    pub progress: f64,
    pub exercises: Vec<Exercise>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a single complete-set call.
#[derive(Debug, Clone, Copy)]
pub struct SetCompletion {
    pub completed_sets: u32,
    pub total_sets: u32,
    /// True only on the call where the whole workout transitioned to completed
    pub workout_completed: bool,
}

impl Workout {
    /// Record one completed set for the given exercise.
    ///
    /// Increments `completed_sets` clamped to `sets`, flags the exercise
    /// complete when it reaches its set count, and recomputes `progress`.
    /// When progress reaches 100 the workout flips to `completed`;
    /// `workout_completed` reports that transition so the caller can bump
    /// the user counters exactly once.
    ///
    /// Returns `None` if no exercise with `exercise_id` exists.
    pub fn complete_set(&mut self, exercise_id: &str) -> Option<SetCompletion> {
        let exercise = self.exercises.iter_mut().find(|e| e.id == exercise_id)?;

        exercise.completed_sets = (exercise.completed_sets + 1).min(exercise.sets);
        if exercise.completed_sets >= exercise.sets {
            exercise.completed = true;
        }

        let completed_sets = exercise.completed_sets;
        let total_sets = exercise.sets;

        self.progress = self.completion_percent();

        let workout_completed =
            self.progress >= 100.0 && self.status != WorkoutStatus::Completed;
        if workout_completed {
            self.status = WorkoutStatus::Completed;
        }

        Some(SetCompletion {
            completed_sets,
            total_sets,
            workout_completed,
        })
    }

    /// Completion percentage: `100 * completed exercises / total exercises`.
    fn completion_percent(&self) -> f64 {
        if self.exercises.is_empty() {
            return 0.0;
        }
        let completed = self.exercises.iter().filter(|e| e.completed).count();
        (completed as f64 / self.exercises.len() as f64) * 100.0
    }
}
