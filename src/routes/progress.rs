// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress routes: weekly aggregation and all-time stats.

use axum::{extract::State, routing::get, Extension, Json, Router};
use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ProgressStats, WeeklyProgress};
use crate::services::progress::{aggregate_stats, weekly_progress, WEEKS_SHOWN};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress/weekly", get(get_weekly_progress))
        .route("/api/progress/stats", get(get_progress_stats))
}

/// Weekly progress over the trailing 7-week window.
async fn get_weekly_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<WeeklyProgress>>> {
    let window_start = Utc::now() - Duration::weeks(WEEKS_SHOWN as i64);

    let completed = state.db.get_completed_workouts(&user.user_id).await?;
    let in_window: Vec<_> = completed
        .into_iter()
        .filter(|w| w.date >= window_start)
        .collect();

    tracing::debug!(
        user_id = %user.user_id,
        workouts = in_window.len(),
        "Computing weekly progress"
    );

    Ok(Json(weekly_progress(&in_window)))
}

/// All-time aggregate statistics.
async fn get_progress_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressStats>> {
    let profile = state
        .db
        .get_user(&user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    let completed = state.db.get_completed_workouts(&user.user_id).await?;

    Ok(Json(aggregate_stats(&completed, profile.streak)))
}
