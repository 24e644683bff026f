use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

use crate::auth::Role;

/// One message/counter-proposal on a funding request. Entries are append-only:
/// no update or delete operation exists anywhere in the service.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "negotiation_entries")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub request_id: Uuid,
    pub author_id: Uuid,
    pub author_role: Role,
    pub message: Option<String>,
    pub proposed_amount: Option<f64>,
    pub proposed_equity: Option<f64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::funding_request::Entity",
        from = "Column::RequestId",
        to = "super::funding_request::Column::Id",
        on_delete = "Cascade"
    )]
    FundingRequest,
}

impl Related<super::funding_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FundingRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
