//! API Integration Tests
//!
//! Drives the full router against an in-memory SQLite database with a fixed
//! clock on 2024-01-15. These tests verify the full request/response cycle.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::{json, Value};
use spendwise_api::{create_router, ApiConfig, AppState};
use spendwise_auth::{AuthConfig, AuthService};
use spendwise_core::FixedClock;
use spendwise_db::Database;
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh database, "today" pinned to 2024-01-15
async fn create_test_router() -> Router {
    let db = Arc::new(Database::in_memory().await.unwrap());
    let auth = Arc::new(AuthService::new(AuthConfig::for_testing()).unwrap());
    let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
    let state = Arc::new(AppState::with_clock(db, auth, clock));

    create_router(state, ApiConfig::default())
}

/// Test helper to make a request and get JSON response
async fn json_request(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");

    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    let body = match body {
        Some(json_body) => Body::from(serde_json::to_vec(&json_body).unwrap()),
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));

    (status, json)
}

/// Register a user and return its access token
async fn register(router: &Router, email: &str) -> String {
    let (status, body) = json_request(
        router,
        "POST",
        "/api/v1/auth/register",
        None,
        Some(json!({ "email": email, "password": "correct-horse", "name": "Tester" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["accessToken"].as_str().unwrap().to_string()
}

async fn add_transaction(
    router: &Router,
    token: &str,
    kind: &str,
    amount: f64,
    category: &str,
    date: &str,
) -> Value {
    let (status, body) = json_request(
        router,
        "POST",
        "/api/v1/transactions",
        Some(token),
        Some(json!({
            "type": kind,
            "description": format!("{} {}", category, date),
            "amount": amount,
            "category": category,
            "date": date,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body
}

/// The January scenario: one salary and two Food expenses
async fn seed_january(router: &Router, token: &str) {
    add_transaction(router, token, "income", 1000.0, "Salary", "2024-01-05").await;
    add_transaction(router, token, "expense", 120.0, "Food", "2024-01-10").await;
    add_transaction(router, token, "expense", 80.0, "Food", "2024-01-12").await;
}

// =============================================================================
// Public Endpoint Tests
// =============================================================================

mod public_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_health_check() {
        let router = create_test_router().await;
        let (status, json) = json_request(&router, "GET", "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_check() {
        let router = create_test_router().await;
        let (status, json) = json_request(&router, "GET", "/ready", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");
        assert_eq!(json["database"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let router = create_test_router().await;
        let (status, json) = json_request(&router, "GET", "/api-docs/openapi.json", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["info"]["title"], "Spendwise API");
    }

    #[tokio::test]
    async fn test_request_id_is_returned() {
        let router = create_test_router().await;
        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.headers().contains_key("x-request-id"));
    }
}

// =============================================================================
// Authentication Tests
// =============================================================================

mod auth_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_register_login_me() {
        let router = create_test_router().await;
        let (status, registered) = json_request(
            &router,
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "ann@example.com", "password": "correct-horse", "name": "Ann" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(registered["tokenType"], "Bearer");
        assert_eq!(registered["user"]["email"], "ann@example.com");
        assert!(registered["expiresIn"].as_i64().unwrap() > 0);

        let (status, login) = json_request(
            &router,
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ann@example.com", "password": "correct-horse" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let token = login["accessToken"].as_str().unwrap();
        let (status, me) = json_request(&router, "GET", "/api/v1/auth/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["name"], "Ann");
        assert_eq!(me["id"], registered["user"]["id"]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let router = create_test_router().await;
        register(&router, "ann@example.com").await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "ann@example.com", "password": "another-pass", "name": "Other" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], -3001);
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let router = create_test_router().await;
        register(&router, "ann@example.com").await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "ann@example.com", "password": "wrong-horse" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], -1011);
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let router = create_test_router().await;
        let (status, _) = json_request(
            &router,
            "POST",
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "ann@example.com", "password": "short", "name": "Ann" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let router = create_test_router().await;
        let (status, json) = json_request(&router, "GET", "/api/v1/transactions", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], -1010);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let router = create_test_router().await;
        let (status, _) =
            json_request(&router, "GET", "/api/v1/budgets", Some("not-a-jwt"), None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

// =============================================================================
// Transaction Tests
// =============================================================================

mod transaction_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_transaction_crud() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let created = add_transaction(&router, &token, "expense", 12.5, "Food", "2024-01-10").await;
        assert_eq!(created["type"], "expense");
        assert_eq!(created["amount"].as_f64(), Some(12.5));
        let id = created["id"].as_i64().unwrap();
        let uri = format!("/api/v1/transactions/{}", id);

        let (status, fetched) = json_request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["category"], "Food");
        assert_eq!(fetched["date"], "2024-01-10");

        let (status, updated) = json_request(
            &router,
            "PATCH",
            &uri,
            Some(&token),
            Some(json!({ "amount": 20, "category": "Groceries" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["amount"].as_f64(), Some(20.0));
        assert_eq!(updated["category"], "Groceries");
        assert_eq!(updated["type"], "expense");

        let (status, _) = json_request(&router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = json_request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], -2001);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_filters() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;
        seed_january(&router, &token).await;
        add_transaction(&router, &token, "expense", 50.0, "Food", "2024-02-03").await;

        let (status, all) = json_request(&router, "GET", "/api/v1/transactions", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-02-03", "2024-01-12", "2024-01-10", "2024-01-05"]);

        let (_, january_food) = json_request(
            &router,
            "GET",
            "/api/v1/transactions?type=expense&category=Food&month=2024-01",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(january_food.as_array().unwrap().len(), 2);

        let (status, _) = json_request(
            &router,
            "GET",
            "/api/v1/transactions?month=2024-13",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_transactions_rejected() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let cases = [
            json!({ "type": "expense", "amount": -5, "category": "Food", "date": "2024-01-10" }),
            json!({ "type": "transfer", "amount": 5, "category": "Food", "date": "2024-01-10" }),
            json!({ "type": "expense", "amount": 5, "category": "   ", "date": "2024-01-10" }),
            json!({ "type": "expense", "amount": 5, "category": "Food", "date": "10/01/2024" }),
            json!({ "type": "expense", "amount": -0.001, "category": "Food", "date": "2024-01-10" }),
            json!({ "type": "income", "amount": 100000000, "category": "Salary", "date": "2024-01-10" }),
            json!({ "type": "income", "amount": 6e28, "category": "Salary", "date": "2024-01-10" }),
        ];

        for body in cases {
            let (status, json) =
                json_request(&router, "POST", "/api/v1/transactions", Some(&token), Some(body.clone()))
                    .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{} -> {}", body, json);
        }
    }

    #[tokio::test]
    async fn test_largest_amount_accepted() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let created =
            add_transaction(&router, &token, "income", 99999999.99, "Salary", "2024-01-05").await;
        assert_eq!(created["amount"].as_f64(), Some(99999999.99));

        let (status, totals) =
            json_request(&router, "GET", "/api/v1/transactions/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(totals["balance"].as_f64(), Some(99999999.99));
    }

    #[tokio::test]
    async fn test_non_numeric_id_rejected_as_json() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        for uri in ["/api/v1/transactions/abc", "/api/v1/budgets/abc"] {
            let (status, json) = json_request(&router, "GET", uri, Some(&token), None).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["code"], -1101);
        }
    }

    #[tokio::test]
    async fn test_foreign_transaction_is_not_found() {
        let router = create_test_router().await;
        let ann = register(&router, "ann@example.com").await;
        let bob = register(&router, "bob@example.com").await;

        let created = add_transaction(&router, &ann, "expense", 30.0, "Food", "2024-01-10").await;
        let uri = format!("/api/v1/transactions/{}", created["id"]);

        let (status, _) = json_request(&router, "DELETE", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = json_request(&router, "GET", &uri, Some(&bob), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, still_there) = json_request(&router, "GET", &uri, Some(&ann), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(still_there["amount"].as_f64(), Some(30.0));
    }
}

// =============================================================================
// Budget Tests
// =============================================================================

mod budget_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_budget_crud() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let (status, created) = json_request(
            &router,
            "POST",
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "category": "Food", "limit": 150 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["limit"].as_f64(), Some(150.0));
        let uri = format!("/api/v1/budgets/{}", created["id"]);

        let (status, updated) =
            json_request(&router, "PATCH", &uri, Some(&token), Some(json!({ "limit": 200 }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["limit"].as_f64(), Some(200.0));
        assert_eq!(updated["category"], "Food");

        let (_, list) = json_request(&router, "GET", "/api/v1/budgets", Some(&token), None).await;
        assert_eq!(list.as_array().unwrap().len(), 1);

        let (status, _) = json_request(&router, "DELETE", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = json_request(&router, "GET", &uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], -2002);
    }

    #[tokio::test]
    async fn test_duplicate_budget_conflicts() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;
        let body = json!({ "category": "Food", "limit": 150 });

        let (status, _) =
            json_request(&router, "POST", "/api/v1/budgets", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, json) =
            json_request(&router, "POST", "/api/v1/budgets", Some(&token), Some(body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], -3002);
    }

    #[tokio::test]
    async fn test_oversized_limit_rejected() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let (status, json) = json_request(
            &router,
            "POST",
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "category": "Food", "limit": 1e27 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], -1102);
    }

    #[tokio::test]
    async fn test_same_category_for_different_users() {
        let router = create_test_router().await;
        let ann = register(&router, "ann@example.com").await;
        let bob = register(&router, "bob@example.com").await;
        let body = json!({ "category": "Food", "limit": 150 });

        let (status, _) =
            json_request(&router, "POST", "/api/v1/budgets", Some(&ann), Some(body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) =
            json_request(&router, "POST", "/api/v1/budgets", Some(&bob), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED);
    }
}

// =============================================================================
// Statistics Tests
// =============================================================================

mod stats_endpoints {
    use super::*;

    #[tokio::test]
    async fn test_totals() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;
        seed_january(&router, &token).await;

        let (status, totals) =
            json_request(&router, "GET", "/api/v1/transactions/stats", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(totals["totalIncome"].as_f64(), Some(1000.0));
        assert_eq!(totals["totalExpense"].as_f64(), Some(200.0));
        assert_eq!(totals["balance"].as_f64(), Some(800.0));
    }

    #[tokio::test]
    async fn test_totals_empty() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;

        let (_, totals) =
            json_request(&router, "GET", "/api/v1/transactions/stats", Some(&token), None).await;
        assert_eq!(totals["totalIncome"].as_f64(), Some(0.0));
        assert_eq!(totals["balance"].as_f64(), Some(0.0));
    }

    #[tokio::test]
    async fn test_budgets_with_spending() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;
        seed_january(&router, &token).await;
        // Outside the current month
        add_transaction(&router, &token, "expense", 50.0, "Food", "2024-02-03").await;

        for body in [
            json!({ "category": "Food", "limit": 150 }),
            json!({ "category": "food", "limit": 100 }),
        ] {
            let (status, _) =
                json_request(&router, "POST", "/api/v1/budgets", Some(&token), Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, json) =
            json_request(&router, "GET", "/api/v1/budgets/with-spending", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let entries = json.as_array().unwrap();
        assert_eq!(entries.len(), 2);

        let food = &entries[0];
        assert_eq!(food["category"], "Food");
        assert_eq!(food["spent"].as_f64(), Some(200.0));
        assert_eq!(food["remaining"].as_f64(), Some(0.0));
        assert_eq!(food["percentage"].as_f64(), Some(133.33));
        assert_eq!(food["status"], "exceeded");

        let lower = &entries[1];
        assert_eq!(lower["category"], "food");
        assert_eq!(lower["spent"].as_f64(), Some(0.0));
        assert_eq!(lower["status"], "on_track");
    }

    #[tokio::test]
    async fn test_category_breakdown() {
        let router = create_test_router().await;
        let token = register(&router, "ann@example.com").await;
        seed_january(&router, &token).await;
        add_transaction(&router, &token, "expense", 45.5, "Transport", "2024-01-14").await;
        add_transaction(&router, &token, "expense", 0.0, "Gifts", "2024-01-14").await;
        add_transaction(&router, &token, "expense", 99.0, "Travel", "2023-12-30").await;

        let (status, json) =
            json_request(&router, "GET", "/api/v1/transactions/breakdown", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);

        let categories: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["category"].as_str().unwrap())
            .collect();
        assert_eq!(categories.len(), 2);
        assert!(categories.contains(&"Food"));
        assert!(categories.contains(&"Transport"));

        let food = json
            .as_array()
            .unwrap()
            .iter()
            .find(|e| e["category"] == "Food")
            .unwrap();
        assert_eq!(food["amount"].as_f64(), Some(200.0));
    }

    #[tokio::test]
    async fn test_stats_are_per_user() {
        let router = create_test_router().await;
        let ann = register(&router, "ann@example.com").await;
        let bob = register(&router, "bob@example.com").await;
        seed_january(&router, &ann).await;

        let (_, totals) =
            json_request(&router, "GET", "/api/v1/transactions/stats", Some(&bob), None).await;
        assert_eq!(totals["totalExpense"].as_f64(), Some(0.0));

        let (_, breakdown) =
            json_request(&router, "GET", "/api/v1/transactions/breakdown", Some(&bob), None).await;
        assert_eq!(breakdown, json!([]));
    }
}
