// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::User;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

/// Registration request body.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// Login request body.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of a user (no password hash).
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub total_workouts: u32,
    pub streak: u32,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            total_workouts: user.total_workouts,
            streak: user.streak,
        }
    }
}

/// Response for successful register/login.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub user: UserResponse,
    pub token: String,
}

/// Register a new user.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    tracing::info!(email = %payload.email, "User registration attempt");

    // Email must be unique
    if state.db.find_user_by_email(&payload.email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?;

    let user = User::new(payload.name, payload.email, password_hash);
    state.db.upsert_user(&user).await?;

    let token = create_jwt(
        &user.id,
        &state.config.jwt_signing_key,
        state.config.token_expiry_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(AuthResponse {
        success: true,
        user: UserResponse::from(&user),
        token,
    }))
}

/// Log in an existing user.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    tracing::info!(email = %payload.email, "User login attempt");

    let user = state
        .db
        .find_user_by_email(&payload.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // bcrypt verification is CPU-bound; keep it off the async executor
    let password = payload.password;
    let password_hash = user.password_hash.clone();
    let is_valid = tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password verification error: {}", e)))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(
        &user.id,
        &state.config.jwt_signing_key,
        state.config.token_expiry_hours,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        success: true,
        user: UserResponse::from(&user),
        token,
    }))
}
