use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::auth::Actor;
use crate::error::AppError;
use crate::services::registrations as service;
use crate::AppState;

/// Fetch an ideathon registration (owner or admin)
#[utoipa::path(
    get,
    path = "/api/ideathon-registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Registration record"),
        (status = 403, description = "Caller is neither owner nor admin"),
        (status = 404, description = "Registration not found"),
    )
)]
pub async fn get_registration(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let registration = service::get(&state.db, &actor, id).await?;
    Ok(Json(json!({ "success": true, "data": registration })))
}

/// Record the final project submission (once only)
#[utoipa::path(
    put,
    path = "/api/ideathon-registrations/{id}/final-submission",
    params(("id" = Uuid, Path, description = "Registration id")),
    responses(
        (status = 200, description = "Submission recorded; progress set to 100"),
        (status = 403, description = "Caller is neither owner nor admin"),
        (status = 404, description = "Registration not found"),
        (status = 409, description = "Final submission already recorded"),
    )
)]
pub async fn submit_final_project(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<serde_json::Value>,
) -> Result<impl IntoResponse, AppError> {
    let registration = service::final_submit(&state.db, &actor, id, payload).await?;
    Ok(Json(json!({ "success": true, "data": registration })))
}
