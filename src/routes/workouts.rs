// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout routes: listing, today's workout, and set completion.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Exercise, Workout, WorkoutStatus};
use crate::services::catalog;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts))
        .route("/api/workouts/", get(list_workouts))
        .route("/api/workouts/today", get(today_workout))
        .route(
            "/api/workouts/{workout_id}/exercises/{exercise_id}/complete-set",
            post(complete_set),
        )
}

// ─── Workout Listing ─────────────────────────────────────────

/// Workout projection returned by the API.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutResponse {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub status: WorkoutStatus,
    pub progress: f64,
    pub exercises: Vec<Exercise>,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        Self {
            id: workout.id,
            name: workout.name,
            date: workout.date,
            status: workout.status,
            progress: workout.progress,
            exercises: workout.exercises,
        }
    }
}

/// Get all workouts for the current user, seeding the starter catalog on
/// first access.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WorkoutResponse>>> {
    catalog::ensure_seeded(&state.db, &user.user_id).await?;

    let workouts = state.db.get_workouts_for_user(&user.user_id).await?;

    Ok(Json(workouts.into_iter().map(WorkoutResponse::from).collect()))
}

// ─── Today's Workout ─────────────────────────────────────────

/// Get today's workout: the active one, or the earliest pending workout
/// promoted to active.
async fn today_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WorkoutResponse>> {
    catalog::ensure_seeded(&state.db, &user.user_id).await?;

    if let Some(workout) = state.db.find_workout_by_status(&user.user_id, "active").await? {
        return Ok(Json(WorkoutResponse::from(workout)));
    }

    // No active workout: promote the earliest pending one
    let Some(mut workout) = state.db.find_workout_by_status(&user.user_id, "pending").await?
    else {
        return Err(AppError::NotFound("No workout available today".to_string()));
    };

    workout.status = WorkoutStatus::Active;
    state.db.upsert_workout(&workout).await?;

    tracing::debug!(
        user_id = %user.user_id,
        workout_id = %workout.id,
        "Promoted pending workout to active"
    );

    Ok(Json(WorkoutResponse::from(workout)))
}

// ─── Set Completion ──────────────────────────────────────────

/// Request body for completing one set.
///
/// The call itself is the trigger; the reported values are client
/// telemetry and are only logged.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteSetRequest {
    pub set_number: u32,
    pub weight: f64,
    pub reps: u32,
}

/// Exercise completion state after the call.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedExercise {
    pub id: String,
    pub completed_sets: u32,
    pub total_sets: u32,
}

/// Response for a complete-set call.
#[derive(Serialize)]
pub struct CompleteSetResponse {
    pub success: bool,
    pub exercise: CompletedExercise,
}

/// Record one completed set for an exercise in a workout.
async fn complete_set(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path((workout_id, exercise_id)): Path<(String, String)>,
    Json(payload): Json<CompleteSetRequest>,
) -> Result<Json<CompleteSetResponse>> {
    tracing::debug!(
        user_id = %user.user_id,
        workout_id = %workout_id,
        exercise_id = %exercise_id,
        set_number = payload.set_number,
        weight = payload.weight,
        reps = payload.reps,
        "Recording completed set"
    );

    let completion = state
        .db
        .complete_set_atomic(&user.user_id, &workout_id, &exercise_id)
        .await?;

    Ok(Json(CompleteSetResponse {
        success: true,
        exercise: CompletedExercise {
            id: exercise_id,
            completed_sets: completion.completed_sets,
            total_sets: completion.total_sets,
        },
    }))
}
