use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "funding_requests")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(indexed)]
    pub idea_id: Uuid,
    #[sea_orm(indexed)]
    pub owner_id: Uuid,
    pub amount: f64,
    /// Percentage offered, 0 < equity <= 100.
    pub equity: f64,
    pub funding_stage: FundingStage,
    pub investment_type: InvestmentType,
    #[sea_orm(column_type = "Text", nullable)]
    pub business_plan: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub target_market: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub use_of_funds: Option<String>,
    pub contact_email: Option<String>,
    pub status: RequestStatus,
    /// Bumped on every successful mutation; callers may use it for
    /// optimistic concurrency via the `expectedVersion` patch field.
    pub version: i32,
    pub response_deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::idea::Entity",
        from = "Column::IdeaId",
        to = "super::idea::Column::Id"
    )]
    Idea,
    #[sea_orm(has_many = "super::negotiation_entry::Entity")]
    NegotiationEntry,
    #[sea_orm(has_many = "super::request_view::Entity")]
    RequestView,
}

impl Related<super::idea::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Idea.def()
    }
}

impl Related<super::negotiation_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NegotiationEntry.def()
    }
}

impl Related<super::request_view::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RequestView.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "negotiated")]
    Negotiated,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "declined")]
    Declined,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "kebab-case")]
pub enum FundingStage {
    #[sea_orm(string_value = "pre-seed")]
    PreSeed,
    #[sea_orm(string_value = "seed")]
    Seed,
    #[sea_orm(string_value = "series-a")]
    SeriesA,
    #[sea_orm(string_value = "series-b")]
    SeriesB,
    #[sea_orm(string_value = "series-c")]
    SeriesC,
    #[sea_orm(string_value = "growth")]
    Growth,
}

#[derive(
    Copy, Clone, Debug, EnumIter, DeriveActiveEnum, Eq, PartialEq, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(24))")]
#[serde(rename_all = "kebab-case")]
pub enum InvestmentType {
    #[sea_orm(string_value = "equity")]
    Equity,
    #[sea_orm(string_value = "debt")]
    Debt,
    #[sea_orm(string_value = "convertible-note")]
    ConvertibleNote,
    #[sea_orm(string_value = "revenue-share")]
    RevenueShare,
}
