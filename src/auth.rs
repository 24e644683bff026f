use axum::{extract::FromRequestParts, http::request::Parts};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Role of the authenticated caller, as asserted by the upstream auth
/// collaborator. Stored verbatim on negotiation entries so the log records
/// which side authored each message.
#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "entrepreneur")]
    Entrepreneur,
    #[sea_orm(string_value = "investor")]
    Investor,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// The authenticated caller, threaded explicitly into every service call
/// rather than read from ambient request state. Identity arrives in the
/// `x-user-id` / `x-user-role` headers set by the auth middleware in front of
/// this service.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Owner-or-admin rule applied uniformly to every mutating operation.
    pub fn may_modify(&self, owner_id: Uuid) -> bool {
        self.id == owner_id || self.is_admin()
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or_else(|| {
                AppError::Authorization("missing or malformed x-user-id header".to_string())
            })?;

        let role = match parts.headers.get("x-user-role").and_then(|v| v.to_str().ok()) {
            Some("entrepreneur") => Role::Entrepreneur,
            Some("investor") => Role::Investor,
            Some("admin") => Role::Admin,
            _ => {
                return Err(AppError::Authorization(
                    "missing or malformed x-user-role header".to_string(),
                ))
            }
        };

        Ok(Actor { id, role })
    }
}
