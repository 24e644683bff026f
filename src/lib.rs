use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Router,
};
// Conditionally import SwaggerUi only when needed (not test)
#[cfg(not(test))]
use utoipa_swagger_ui::SwaggerUi;
use sea_orm::DatabaseConnection;
use utoipa::OpenApi;
// Conditionally import CORS only when needed (not test)
#[cfg(not(test))]
use tower_http::cors::{Any, CorsLayer};
// Conditionally import Governor only when needed (not test)
#[cfg(not(test))]
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
#[cfg(not(test))]
use std::num::NonZeroU32;
use std::sync::Arc;

pub mod auth;
pub mod entities;
pub mod error;
pub mod routes;
pub mod services;
pub mod status;

// `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is
// enabled (it is, via dev-dependencies), so the shared state holds an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    )
)]
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Service is healthy")
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Fundlink API",
        version = "0.1.0",
        description = "Startup-funding marketplace: funding requests, negotiation, and ideathon submissions"
    ),
    paths(
        routes::funding_requests::create_funding_request,
        routes::funding_requests::list_funding_requests,
        routes::funding_requests::get_funding_request,
        routes::funding_requests::update_funding_request,
        routes::funding_requests::withdraw_funding_request,
        routes::funding_requests::negotiate_funding_request,
        routes::funding_requests::decide_funding_request,
        routes::funding_requests::record_funding_request_view,
        routes::registrations::get_registration,
        routes::registrations::submit_final_project,
        health_check
    ),
    components(schemas(
        auth::Role,
        entities::funding_request::Model,
        entities::funding_request::RequestStatus,
        entities::funding_request::FundingStage,
        entities::funding_request::InvestmentType,
        entities::negotiation_entry::Model,
        entities::idea::Model,
        entities::ideathon_registration::Model,
        routes::funding_requests::FundingRequestDetail,
        services::funding_requests::CreateFundingRequest,
        services::funding_requests::UpdateFundingRequest,
        services::funding_requests::NegotiationPayload,
        services::funding_requests::DecisionPayload
    ))
)]
struct ApiDoc;

/// Create the application with all routes and middleware
pub fn create_app(db: DatabaseConnection) -> Router {
    // Build our API documentation (needed regardless for ApiDoc::openapi())
    let api_doc = ApiDoc::openapi();

    let state = AppState { db: Arc::new(db) };

    // --- Define API routes separately ---
    let api_routes = Router::new()
        .route(
            "/api/funding-requests",
            post(routes::funding_requests::create_funding_request)
                .get(routes::funding_requests::list_funding_requests),
        )
        .route(
            "/api/funding-requests/{id}",
            get(routes::funding_requests::get_funding_request)
                .put(routes::funding_requests::update_funding_request)
                .delete(routes::funding_requests::withdraw_funding_request),
        )
        .route(
            "/api/funding-requests/{id}/negotiate",
            post(routes::funding_requests::negotiate_funding_request),
        )
        .route(
            "/api/funding-requests/{id}/decision",
            post(routes::funding_requests::decide_funding_request),
        )
        .route(
            "/api/funding-requests/{id}/view",
            post(routes::funding_requests::record_funding_request_view),
        )
        .route(
            "/api/ideathon-registrations/{id}",
            get(routes::registrations::get_registration),
        )
        .route(
            "/api/ideathon-registrations/{id}/final-submission",
            put(routes::registrations::submit_final_project),
        )
        .route("/health", get(health_check))
        .with_state(state);

    // --- Conditionally apply layers and Swagger UI only when NOT running tests ---
    #[cfg(not(test))]
    let (docs_router, rate_limited_api_routes) = {
        // Create Swagger UI router
        let docs_router = SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc);

        // Configure Rate Limiting
        let governor_conf = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .period(std::time::Duration::from_secs(60))
                .burst_size(NonZeroU32::new(60).unwrap().into())
                .finish()
                .unwrap(),
        );
        // Apply Governor layer ONLY to the api_routes defined above
        let rate_limited_api_routes = api_routes.layer(GovernorLayer {
            config: governor_conf,
        });

        (docs_router, rate_limited_api_routes)
    };

    // For test builds, use the original api_routes and an empty router for docs
    #[cfg(test)]
    let (docs_router, rate_limited_api_routes) = {
        let _ = api_doc;
        (Router::new(), api_routes)
    };

    // --- Build the final application router ---
    let mut app = Router::new()
        .merge(rate_limited_api_routes) // Add rate-limited API routes
        .merge(docs_router); // Add documentation routes (not rate-limited)

    // --- Apply CORS to the whole app (both API and docs) if needed ---
    #[cfg(not(test))]
    {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    // Return the final router
    app
}
