use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::Actor;
use crate::entities::funding_request::{self, RequestStatus};
use crate::entities::negotiation_entry;
use crate::error::AppError;
use crate::services::funding_requests as service;
use crate::services::funding_requests::{
    CreateFundingRequest, DecisionPayload, NegotiationPayload, UpdateFundingRequest,
};
use crate::AppState;

/// Full record shape returned by detail-style endpoints: the funding request
/// with its negotiation log in creation order.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FundingRequestDetail {
    #[serde(flatten)]
    pub request: funding_request::Model,
    pub negotiation_history: Vec<negotiation_entry::Model>,
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRequestsQuery {
    /// Optional status filter (`pending`, `negotiated`, `accepted`, `declined`, `withdrawn`)
    pub status: Option<RequestStatus>,
}

/// Create a funding request against one of the caller's own ideas
#[utoipa::path(
    post,
    path = "/api/funding-requests",
    request_body = CreateFundingRequest,
    responses(
        (status = 201, description = "Funding request created with status 'pending'"),
        (status = 400, description = "Amount/equity out of range or idea not owned by the caller"),
        (status = 403, description = "Missing or malformed actor identity"),
        (status = 404, description = "Referenced idea does not exist"),
    )
)]
pub async fn create_funding_request(
    State(state): State<AppState>,
    actor: Actor,
    Json(payload): Json<CreateFundingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = service::create(&state.db, &actor, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": request })),
    ))
}

/// List funding requests for browsing, newest first
#[utoipa::path(
    get,
    path = "/api/funding-requests",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Funding requests, optionally filtered by status"),
        (status = 403, description = "Missing or malformed actor identity"),
    )
)]
pub async fn list_funding_requests(
    State(state): State<AppState>,
    _actor: Actor,
    Query(query): Query<ListRequestsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let requests = service::list(&state.db, query.status).await?;
    Ok(Json(json!({ "success": true, "data": requests })))
}

/// Fetch one funding request including its negotiation history
#[utoipa::path(
    get,
    path = "/api/funding-requests/{id}",
    params(("id" = Uuid, Path, description = "Funding request id")),
    responses(
        (status = 200, description = "Full record with negotiationHistory", body = FundingRequestDetail),
        (status = 404, description = "Funding request not found"),
    )
)]
pub async fn get_funding_request(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (request, negotiation_history) = service::get(&state.db, id).await?;
    let detail = FundingRequestDetail {
        request,
        negotiation_history,
    };
    Ok(Json(json!({ "success": true, "data": detail })))
}

/// Patch terms/narrative on an open funding request (owner or admin)
#[utoipa::path(
    put,
    path = "/api/funding-requests/{id}",
    params(("id" = Uuid, Path, description = "Funding request id")),
    request_body = UpdateFundingRequest,
    responses(
        (status = 200, description = "Updated record"),
        (status = 400, description = "Patch values out of range"),
        (status = 403, description = "Caller is neither owner nor admin"),
        (status = 404, description = "Funding request not found"),
        (status = 409, description = "Request is in a terminal state or version mismatch"),
    )
)]
pub async fn update_funding_request(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(patch): Json<UpdateFundingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let request = service::update(&state.db, &actor, id, patch).await?;
    Ok(Json(json!({ "success": true, "data": request })))
}

/// Withdraw a funding request (owner or admin; terminal, once only)
#[utoipa::path(
    delete,
    path = "/api/funding-requests/{id}",
    params(("id" = Uuid, Path, description = "Funding request id")),
    responses(
        (status = 200, description = "Request withdrawn"),
        (status = 403, description = "Caller is neither owner nor admin"),
        (status = 404, description = "Funding request not found"),
        (status = 409, description = "Request already in a terminal state"),
    )
)]
pub async fn withdraw_funding_request(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let request = service::withdraw(&state.db, &actor, id).await?;
    Ok(Json(json!({ "success": true, "data": request })))
}

/// Append a negotiation message/counter-proposal to an open request
#[utoipa::path(
    post,
    path = "/api/funding-requests/{id}/negotiate",
    params(("id" = Uuid, Path, description = "Funding request id")),
    request_body = NegotiationPayload,
    responses(
        (status = 200, description = "Updated record with the appended log entry", body = FundingRequestDetail),
        (status = 400, description = "Neither a message nor a proposed value was supplied"),
        (status = 403, description = "Caller may not negotiate on this request"),
        (status = 404, description = "Funding request not found"),
        (status = 409, description = "Request is in a terminal state"),
    )
)]
pub async fn negotiate_funding_request(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<NegotiationPayload>,
) -> Result<impl IntoResponse, AppError> {
    let (request, negotiation_history) =
        service::append_negotiation_entry(&state.db, &actor, id, payload).await?;
    let detail = FundingRequestDetail {
        request,
        negotiation_history,
    };
    Ok(Json(json!({ "success": true, "data": detail })))
}

/// Accept or decline a funding request (investor or admin)
#[utoipa::path(
    post,
    path = "/api/funding-requests/{id}/decision",
    params(("id" = Uuid, Path, description = "Funding request id")),
    request_body = DecisionPayload,
    responses(
        (status = 200, description = "Request moved to the decided status"),
        (status = 400, description = "Decision was not 'accepted' or 'declined'"),
        (status = 403, description = "Caller is neither investor nor admin"),
        (status = 404, description = "Funding request not found"),
        (status = 409, description = "Request already in a terminal state"),
    )
)]
pub async fn decide_funding_request(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
    Json(payload): Json<DecisionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let request = service::decide(&state.db, &actor, id, payload.status).await?;
    Ok(Json(json!({ "success": true, "data": request })))
}

/// Record that the calling investor viewed a request (idempotent)
#[utoipa::path(
    post,
    path = "/api/funding-requests/{id}/view",
    params(("id" = Uuid, Path, description = "Funding request id")),
    responses(
        (status = 200, description = "View recorded (or already present)"),
        (status = 403, description = "Caller is not an investor"),
        (status = 404, description = "Funding request not found"),
    )
)]
pub async fn record_funding_request_view(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    service::record_view(&state.db, &actor, id).await?;
    Ok(Json(json!({ "success": true })))
}
