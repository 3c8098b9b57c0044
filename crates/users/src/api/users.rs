//! User API endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use parley_database::{User, UserPatch, UserRole};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::ApiError;
use crate::services::UserService;
use crate::types::CreateUserCommand;

#[derive(Clone)]
pub struct UserApiState {
    pub service: Arc<UserService>,
}

pub fn build_router(state: UserApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/users", post(create_user))
        .route(
            "/v1/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default)]
    pub role: Option<UserRole>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn create_user(
    State(state): State<UserApiState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let command = CreateUserCommand {
        name: payload.name,
        email: payload.email,
        password: payload.password,
        password_confirm: payload.password_confirm,
        role: payload.role.unwrap_or(UserRole::User),
    };

    let id = state.service.create(command).await?;
    info!(id, "inserted user");

    Ok(Json(CreateUserResponse { id }))
}

async fn get_user(
    State(state): State<UserApiState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.service.get(id).await?;
    Ok(Json(user.into()))
}

async fn update_user(
    State(state): State<UserApiState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let patch = UserPatch {
        name: payload.name,
        email: payload.email,
    };

    state.service.update(id, patch).await?;
    info!(id, "updated user");

    Ok(Json(serde_json::json!({})))
}

async fn delete_user(
    State(state): State<UserApiState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.service.delete(id).await?;
    info!(id, "deleted user");

    Ok(Json(serde_json::json!({})))
}
