//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User profile stored in Firestore.
///
/// Field names are serialized in camelCase to match the document shape
/// the mobile clients already read (`totalWorkouts`, `passwordHash`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Generated UUID (also used as document ID)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Avatar image URL
    pub avatar: Option<String>,
    /// Workouts completed, incremented on each workout completion
    #[serde(default)]
    pub total_workouts: u32,
    /// Completion streak counter, incremented alongside `total_workouts`
    #[serde(default)]
    pub streak: u32,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with zeroed counters and a generated avatar.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let avatar = format!(
            "https://ui-avatars.com/api/?name={}&background=ef4444&color=fff",
            name.replace(' ', "+")
        );

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            avatar: Some(avatar),
            total_workouts: 0,
            streak: 0,
            created_at: Utc::now(),
        }
    }
}
