//! Single entry point mediating all reads/writes to funding requests and their
//! negotiation log. Every mutating operation runs the owner-or-admin check
//! here, at the service boundary, so no handler re-implements authorization.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionError,
    TransactionTrait,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::{Actor, Role};
use crate::entities::funding_request::{self, FundingStage, InvestmentType, RequestStatus};
use crate::entities::{negotiation_entry, request_view};
use crate::entities::{FundingRequest, Idea, NegotiationEntry, RequestView};
use crate::error::AppError;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFundingRequest {
    pub idea_id: Uuid,
    pub amount: f64,
    pub equity: f64,
    pub funding_stage: FundingStage,
    pub investment_type: InvestmentType,
    pub business_plan: Option<String>,
    pub target_market: Option<String>,
    pub use_of_funds: Option<String>,
    pub contact_email: Option<String>,
    pub response_deadline: Option<DateTime<Utc>>,
}

/// Whitelisted patch schema for `PUT /api/funding-requests/{id}`. Unknown
/// fields are rejected at deserialization rather than spread into the record.
///
/// Patching is overwrite-only: an absent or `null` field leaves the stored
/// value untouched, so optional fields cannot be cleared back to null through
/// this endpoint.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFundingRequest {
    pub amount: Option<f64>,
    pub equity: Option<f64>,
    pub funding_stage: Option<FundingStage>,
    pub investment_type: Option<InvestmentType>,
    pub business_plan: Option<String>,
    pub target_market: Option<String>,
    pub use_of_funds: Option<String>,
    pub contact_email: Option<String>,
    pub response_deadline: Option<DateTime<Utc>>,
    /// Optional optimistic-concurrency check against the record's current
    /// version; a mismatch fails with 409 instead of last-writer-wins.
    pub expected_version: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NegotiationPayload {
    pub message: Option<String>,
    pub proposed_amount: Option<f64>,
    pub proposed_equity: Option<f64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DecisionPayload {
    /// Target status; only `accepted` and `declined` are legal here.
    pub status: RequestStatus,
}

fn validate_amount(amount: f64) -> Result<(), AppError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::Validation(
            "amount must be a positive number".to_string(),
        ));
    }
    Ok(())
}

fn validate_equity(equity: f64) -> Result<(), AppError> {
    if !equity.is_finite() || equity <= 0.0 || equity > 100.0 {
        return Err(AppError::Validation(
            "equity must be greater than 0 and at most 100".to_string(),
        ));
    }
    Ok(())
}

/// A negotiation entry must carry a non-empty message or at least one proposed
/// value. Runs before any database access.
pub fn validate_negotiation_payload(payload: &NegotiationPayload) -> Result<(), AppError> {
    let has_message = payload
        .message
        .as_deref()
        .map(|m| !m.trim().is_empty())
        .unwrap_or(false);
    if !has_message && payload.proposed_amount.is_none() && payload.proposed_equity.is_none() {
        return Err(AppError::Validation(
            "negotiation entry requires a message or a proposed amount/equity".to_string(),
        ));
    }
    if let Some(amount) = payload.proposed_amount {
        validate_amount(amount)?;
    }
    if let Some(equity) = payload.proposed_equity {
        validate_equity(equity)?;
    }
    Ok(())
}

async fn load_request(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<funding_request::Model, AppError> {
    FundingRequest::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("funding request {} not found", id)))
}

async fn load_history(
    db: &DatabaseConnection,
    request_id: Uuid,
) -> Result<Vec<negotiation_entry::Model>, AppError> {
    Ok(NegotiationEntry::find()
        .filter(negotiation_entry::Column::RequestId.eq(request_id))
        .order_by_asc(negotiation_entry::Column::Id)
        .all(db)
        .await?)
}

#[tracing::instrument(skip(db, payload), fields(actor_id = %actor.id, idea_id = %payload.idea_id))]
pub async fn create(
    db: &DatabaseConnection,
    actor: &Actor,
    payload: CreateFundingRequest,
) -> Result<funding_request::Model, AppError> {
    validate_amount(payload.amount)?;
    validate_equity(payload.equity)?;

    let idea = Idea::find_by_id(payload.idea_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("idea {} not found", payload.idea_id)))?;
    if idea.owner_id != actor.id {
        return Err(AppError::Validation(
            "idea does not belong to the requesting entrepreneur".to_string(),
        ));
    }

    let now = Utc::now();
    let request = funding_request::ActiveModel {
        id: Set(Uuid::new_v4()),
        idea_id: Set(payload.idea_id),
        owner_id: Set(actor.id),
        amount: Set(payload.amount),
        equity: Set(payload.equity),
        funding_stage: Set(payload.funding_stage),
        investment_type: Set(payload.investment_type),
        business_plan: Set(payload.business_plan),
        target_market: Set(payload.target_market),
        use_of_funds: Set(payload.use_of_funds),
        contact_email: Set(payload.contact_email),
        status: Set(RequestStatus::Pending),
        version: Set(1),
        response_deadline: Set(payload.response_deadline),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    tracing::info!(request_id = %request.id, "funding request created");
    Ok(request)
}

pub async fn get(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<(funding_request::Model, Vec<negotiation_entry::Model>), AppError> {
    let request = load_request(db, id).await?;
    let history = load_history(db, id).await?;
    Ok((request, history))
}

pub async fn list(
    db: &DatabaseConnection,
    status: Option<RequestStatus>,
) -> Result<Vec<funding_request::Model>, AppError> {
    let mut query = FundingRequest::find();
    if let Some(status) = status {
        query = query.filter(funding_request::Column::Status.eq(status));
    }
    Ok(query
        .order_by_desc(funding_request::Column::CreatedAt)
        .all(db)
        .await?)
}

#[tracing::instrument(skip(db, patch), fields(actor_id = %actor.id, request_id = %id))]
pub async fn update(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
    patch: UpdateFundingRequest,
) -> Result<funding_request::Model, AppError> {
    let request = load_request(db, id).await?;
    if !actor.may_modify(request.owner_id) {
        return Err(AppError::Authorization(
            "only the owner or an admin may update a funding request".to_string(),
        ));
    }
    if !request.status.is_open() {
        return Err(AppError::InvalidState(format!(
            "cannot update a request with status '{}'",
            request.status.to_value()
        )));
    }
    if let Some(expected) = patch.expected_version {
        if expected != request.version {
            return Err(AppError::InvalidState(format!(
                "version mismatch: expected {}, found {}",
                expected, request.version
            )));
        }
    }
    if let Some(amount) = patch.amount {
        validate_amount(amount)?;
    }
    if let Some(equity) = patch.equity {
        validate_equity(equity)?;
    }

    let version = request.version;
    let mut active = request.into_active_model();
    if let Some(amount) = patch.amount {
        active.amount = Set(amount);
    }
    if let Some(equity) = patch.equity {
        active.equity = Set(equity);
    }
    if let Some(stage) = patch.funding_stage {
        active.funding_stage = Set(stage);
    }
    if let Some(investment_type) = patch.investment_type {
        active.investment_type = Set(investment_type);
    }
    if let Some(business_plan) = patch.business_plan {
        active.business_plan = Set(Some(business_plan));
    }
    if let Some(target_market) = patch.target_market {
        active.target_market = Set(Some(target_market));
    }
    if let Some(use_of_funds) = patch.use_of_funds {
        active.use_of_funds = Set(Some(use_of_funds));
    }
    if let Some(contact_email) = patch.contact_email {
        active.contact_email = Set(Some(contact_email));
    }
    if let Some(deadline) = patch.response_deadline {
        active.response_deadline = Set(Some(deadline));
    }
    active.version = Set(version + 1);
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}

#[tracing::instrument(skip(db), fields(actor_id = %actor.id, request_id = %id))]
pub async fn withdraw(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
) -> Result<funding_request::Model, AppError> {
    let request = load_request(db, id).await?;
    if !actor.may_modify(request.owner_id) {
        return Err(AppError::Authorization(
            "only the owner or an admin may withdraw a funding request".to_string(),
        ));
    }
    // Double withdrawal (or withdrawing an accepted/declined request) is a
    // state error, not a silent overwrite.
    if !request.status.can_transition(RequestStatus::Withdrawn) {
        return Err(AppError::InvalidState(format!(
            "cannot withdraw a request with status '{}'",
            request.status.to_value()
        )));
    }

    let version = request.version;
    let mut active = request.into_active_model();
    active.status = Set(RequestStatus::Withdrawn);
    active.version = Set(version + 1);
    active.updated_at = Set(Utc::now());

    let request = active.update(db).await?;
    tracing::info!(request_id = %request.id, "funding request withdrawn");
    Ok(request)
}

/// Accept/decline decision, called by the investor-dashboard collaborator.
#[tracing::instrument(skip(db), fields(actor_id = %actor.id, request_id = %id))]
pub async fn decide(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
    decision: RequestStatus,
) -> Result<funding_request::Model, AppError> {
    if !matches!(decision, RequestStatus::Accepted | RequestStatus::Declined) {
        return Err(AppError::Validation(
            "decision must be 'accepted' or 'declined'".to_string(),
        ));
    }
    if !matches!(actor.role, Role::Investor | Role::Admin) {
        return Err(AppError::Authorization(
            "only an investor or an admin may decide on a funding request".to_string(),
        ));
    }

    let request = load_request(db, id).await?;
    if !request.status.can_transition(decision) {
        return Err(AppError::InvalidState(format!(
            "cannot move a request from '{}' to '{}'",
            request.status.to_value(),
            decision.to_value()
        )));
    }

    let version = request.version;
    let mut active = request.into_active_model();
    active.status = Set(decision);
    active.version = Set(version + 1);
    active.updated_at = Set(Utc::now());

    Ok(active.update(db).await?)
}

#[tracing::instrument(skip(db, payload), fields(actor_id = %actor.id, request_id = %id))]
pub async fn append_negotiation_entry(
    db: &DatabaseConnection,
    actor: &Actor,
    id: Uuid,
    payload: NegotiationPayload,
) -> Result<(funding_request::Model, Vec<negotiation_entry::Model>), AppError> {
    validate_negotiation_payload(&payload)?;

    let request = load_request(db, id).await?;
    if !request.status.is_open() {
        return Err(AppError::InvalidState(format!(
            "cannot negotiate on a request with status '{}'",
            request.status.to_value()
        )));
    }
    // Entrepreneurs may only reply on their own requests; any investor or
    // admin may post on an open request.
    if actor.role == Role::Entrepreneur && actor.id != request.owner_id {
        return Err(AppError::Authorization(
            "entrepreneurs may only negotiate on their own requests".to_string(),
        ));
    }

    let message = payload
        .message
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());
    let actor = *actor;
    let proposed_amount = payload.proposed_amount;
    let proposed_equity = payload.proposed_equity;

    // The log append and the status/version bump must land together; a
    // half-applied pair would leave an entry against a stale record.
    let request = db
        .transaction::<_, funding_request::Model, AppError>(move |txn| {
            Box::pin(async move {
                negotiation_entry::ActiveModel {
                    id: NotSet,
                    request_id: Set(request.id),
                    author_id: Set(actor.id),
                    author_role: Set(actor.role),
                    message: Set(message),
                    proposed_amount: Set(proposed_amount),
                    proposed_equity: Set(proposed_equity),
                    created_at: Set(Utc::now()),
                }
                .insert(txn)
                .await?;

                // First investor response opens negotiation; appending while
                // already negotiated leaves the status alone.
                let next_status =
                    if actor.role == Role::Investor && request.status == RequestStatus::Pending {
                        RequestStatus::Negotiated
                    } else {
                        request.status
                    };

                let version = request.version;
                let mut active = request.into_active_model();
                active.status = Set(next_status);
                active.version = Set(version + 1);
                active.updated_at = Set(Utc::now());
                Ok(active.update(txn).await?)
            })
        })
        .await
        .map_err(|err| match err {
            TransactionError::Connection(e) => AppError::from(e),
            TransactionError::Transaction(e) => e,
        })?;

    let history = load_history(db, request.id).await?;
    Ok((request, history))
}

/// Idempotent view tracking; duplicate views from the same investor are
/// dropped by the unique `(request_id, investor_id)` index.
#[tracing::instrument(skip(db), fields(actor_id = %actor.id, request_id = %id))]
pub async fn record_view(db: &DatabaseConnection, actor: &Actor, id: Uuid) -> Result<(), AppError> {
    if actor.role != Role::Investor {
        return Err(AppError::Authorization(
            "only investors record funding request views".to_string(),
        ));
    }

    let request = load_request(db, id).await?;
    RequestView::insert(request_view::ActiveModel {
        id: NotSet,
        request_id: Set(request.id),
        investor_id: Set(actor.id),
        created_at: Set(Utc::now()),
    })
    .on_conflict(
        OnConflict::columns([
            request_view::Column::RequestId,
            request_view::Column::InvestorId,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    Ok(())
}
