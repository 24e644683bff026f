use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

/// Which investors have viewed a funding request. `(request_id, investor_id)`
/// is unique; inserts go through `ON CONFLICT DO NOTHING`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "request_views")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = true)]
    pub id: i64,
    #[sea_orm(indexed)]
    pub request_id: Uuid,
    pub investor_id: Uuid,
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
