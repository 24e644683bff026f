//! Ideathon registration final submission. The registration records themselves
//! are created by the out-of-scope ideathon management screens; this service
//! only reads them and applies the once-only final-submission transition.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use serde_json::json;
use uuid::Uuid;

use crate::auth::Actor;
use crate::entities::ideathon_registration;
use crate::entities::IdeathonRegistration;
use crate::error::AppError;

async fn load_registration(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<ideathon_registration::Model, AppError> {
    IdeathonRegistration::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("ideathon registration {} not found", id)))
}

pub async fn get(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
) -> Result<ideathon_registration::Model, AppError> {
    let registration = load_registration(db, id).await?;
    if !actor.may_modify(registration.owner_id) {
        return Err(AppError::Authorization(
            "only the owner or an admin may view this registration".to_string(),
        ));
    }
    Ok(registration)
}

/// Records the final project submission exactly once. Re-invocation on an
/// already-submitted registration fails with a state error rather than
/// silently overwriting the stored payload.
#[tracing::instrument(skip(db, payload), fields(actor_id = %actor.id, registration_id = %id))]
pub async fn final_submit(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
    payload: serde_json::Value,
) -> Result<ideathon_registration::Model, AppError> {
    let registration = load_registration(db, id).await?;
    if !actor.may_modify(registration.owner_id) {
        return Err(AppError::Authorization(
            "only the owner or an admin may submit the final project".to_string(),
        ));
    }
    if registration.final_submission.is_some() {
        return Err(AppError::InvalidState(
            "final submission has already been recorded".to_string(),
        ));
    }

    let now = Utc::now();
    let mut active = registration.into_active_model();
    active.final_submission = Set(Some(json!({
        "status": "submitted",
        "payload": payload,
    })));
    active.progress_status = Set("Ready for Submission".to_string());
    active.current_progress = Set(100);
    active.submitted_at = Set(Some(now));
    active.updated_at = Set(now);

    let registration = active.update(db).await?;
    tracing::info!(registration_id = %registration.id, "final project submitted");
    Ok(registration)
}
