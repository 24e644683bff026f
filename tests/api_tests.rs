use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use chrono::Utc;
use fundlink::entities::funding_request::{self, FundingStage, InvestmentType, RequestStatus};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

// The rate limiter keys on the client IP, so every test request carries a
// forwarded address.
fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "127.0.0.1");
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).unwrap()
}

fn with_actor(mut req: Request<Body>, id: Uuid, role: &str) -> Request<Body> {
    let headers = req.headers_mut();
    headers.insert("x-user-id", id.to_string().parse().unwrap());
    headers.insert("x-user-role", role.parse().unwrap());
    req
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = fundlink::create_app(empty_db());
    let response = app.oneshot(request("GET", "/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_create_without_actor_headers_is_forbidden() {
    let app = fundlink::create_app(empty_db());
    let payload = json!({
        "ideaId": Uuid::new_v4(),
        "amount": 250000,
        "equity": 15,
        "fundingStage": "seed",
        "investmentType": "equity",
    });
    let response = app
        .oneshot(request("POST", "/api/funding-requests", Some(payload)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_create_with_invalid_amount_is_bad_request() {
    let app = fundlink::create_app(empty_db());
    let payload = json!({
        "ideaId": Uuid::new_v4(),
        "amount": -5,
        "equity": 15,
        "fundingStage": "seed",
        "investmentType": "equity",
    });
    let response = app
        .oneshot(with_actor(
            request("POST", "/api/funding-requests", Some(payload)),
            Uuid::new_v4(),
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_get_missing_request_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<funding_request::Model>::new()])
        .into_connection();
    let app = fundlink::create_app(db);

    let response = app
        .oneshot(with_actor(
            request(
                "GET",
                &format!("/api/funding-requests/{}", Uuid::new_v4()),
                None,
            ),
            Uuid::new_v4(),
            "investor",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_negotiate_with_empty_payload_is_bad_request() {
    let app = fundlink::create_app(empty_db());
    let response = app
        .oneshot(with_actor(
            request(
                "POST",
                &format!("/api/funding-requests/{}/negotiate", Uuid::new_v4()),
                Some(json!({})),
            ),
            Uuid::new_v4(),
            "investor",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

fn pending_request(id: Uuid, owner_id: Uuid) -> funding_request::Model {
    funding_request::Model {
        id,
        idea_id: Uuid::new_v4(),
        owner_id,
        amount: 250_000.0,
        equity: 15.0,
        funding_stage: FundingStage::Seed,
        investment_type: InvestmentType::Equity,
        business_plan: None,
        target_market: None,
        use_of_funds: None,
        contact_email: None,
        status: RequestStatus::Pending,
        version: 1,
        response_deadline: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[tokio::test]
async fn test_create_returns_201_with_pending_status() {
    let owner = Uuid::new_v4();
    let idea_id = Uuid::new_v4();
    let mut created = pending_request(Uuid::new_v4(), owner);
    created.idea_id = idea_id;

    let idea = fundlink::entities::idea::Model {
        id: idea_id,
        owner_id: owner,
        title: "Solar micro-grids".to_string(),
        description: "Community-owned energy".to_string(),
        category: None,
        created_at: Utc::now(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![idea]])
        .append_query_results([vec![created]])
        .into_connection();
    let app = fundlink::create_app(db);

    let payload = json!({
        "ideaId": idea_id,
        "amount": 250000,
        "equity": 15,
        "fundingStage": "seed",
        "investmentType": "equity",
    });
    let response = app
        .oneshot(with_actor(
            request("POST", "/api/funding-requests", Some(payload)),
            owner,
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "pending");
}

#[tokio::test]
async fn test_update_by_non_owner_is_forbidden() {
    let request_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![pending_request(request_id, Uuid::new_v4())]])
        .into_connection();
    let app = fundlink::create_app(db);

    let response = app
        .oneshot(with_actor(
            request(
                "PUT",
                &format!("/api/funding-requests/{}", request_id),
                Some(json!({"amount": 300000})),
            ),
            Uuid::new_v4(),
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_withdraw_already_withdrawn_is_conflict() {
    let request_id = Uuid::new_v4();
    let owner = Uuid::new_v4();
    let mut withdrawn = pending_request(request_id, owner);
    withdrawn.status = RequestStatus::Withdrawn;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![withdrawn]])
        .into_connection();
    let app = fundlink::create_app(db);

    let response = app
        .oneshot(with_actor(
            request("DELETE", &format!("/api/funding-requests/{}", request_id), None),
            owner,
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_decision_rejects_non_terminal_target() {
    let app = fundlink::create_app(empty_db());
    let response = app
        .oneshot(with_actor(
            request(
                "POST",
                &format!("/api/funding-requests/{}/decision", Uuid::new_v4()),
                Some(json!({"status": "pending"})),
            ),
            Uuid::new_v4(),
            "investor",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_with_unknown_field_is_rejected() {
    // Whitelisted patch schema: unknown fields never reach the record.
    let app = fundlink::create_app(empty_db());
    let response = app
        .oneshot(with_actor(
            request(
                "PUT",
                &format!("/api/funding-requests/{}", Uuid::new_v4()),
                Some(json!({"amount": 1000, "ownerId": Uuid::new_v4()})),
            ),
            Uuid::new_v4(),
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_record_view_requires_investor_role() {
    let app = fundlink::create_app(empty_db());
    let response = app
        .oneshot(with_actor(
            request(
                "POST",
                &format!("/api/funding-requests/{}/view", Uuid::new_v4()),
                None,
            ),
            Uuid::new_v4(),
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_final_submission_missing_registration_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<fundlink::entities::ideathon_registration::Model>::new()])
        .into_connection();
    let app = fundlink::create_app(db);

    let response = app
        .oneshot(with_actor(
            request(
                "PUT",
                &format!(
                    "/api/ideathon-registrations/{}/final-submission",
                    Uuid::new_v4()
                ),
                Some(json!({"repo": "https://example.com/project"})),
            ),
            Uuid::new_v4(),
            "entrepreneur",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
