//! Progress projections returned by the stats endpoints.

use serde::{Deserialize, Serialize};

/// One week of aggregated training data.
///
/// `week` is a positional label ("Sem 1" .. "Sem 7"), not a calendar
/// week number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    pub week: String,
    /// Total training volume (sets x reps x weight over completed exercises)
    pub volume: f64,
    /// Average exercise weight across the week's completed exercises
    pub weight: f64,
    /// Number of workouts completed in the week
    pub workouts: u32,
}

/// All-time aggregate statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    pub total_volume: f64,
    pub avg_weight: f64,
    pub completed_workouts: u32,
    pub current_streak: u32,
}
