//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};
use std::time::{SystemTime, UNIX_EPOCH};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

/// Log in and return the access token
async fn login(client: &Client, email: &str, password: &str) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to send login request");

    assert!(response.status().is_success(), "login failed for {}", email);
    let body: Value = response.json().await.expect("Failed to parse login response");
    body["access_token"]
        .as_str()
        .expect("No access token in response")
        .to_string()
}

async fn admin_token(client: &Client) -> String {
    login(client, "admin@example.com", "admin123").await
}

async fn librarian_token(client: &Client) -> String {
    login(client, "librarian@example.com", "librarian123").await
}

/// Register a fresh member and return its access token
async fn fresh_member(client: &Client) -> String {
    let email = format!("{}@example.com", unique("member"));
    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "full_name": "Test Member",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send register request");
    assert_eq!(response.status(), 201);

    login(client, &email, "password123").await
}

/// Create a book as admin and return its id
async fn create_book(client: &Client, token: &str, total_copies: i64) -> i64 {
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "title": unique("Test Book"),
            "author": "Test Author",
            "year": 1999,
            "total_copies": total_copies
        }))
        .send()
        .await
        .expect("Failed to send create book request");
    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn get_book(client: &Client, book_id: i64) -> Value {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse response")
}

/// Borrow a book, returning the raw response
async fn borrow(client: &Client, token: &str, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/member/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "book_id": book_id }))
        .send()
        .await
        .expect("Failed to send borrow request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_register_login_me() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("user"));

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "full_name": "New User",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let token = login(&client, &email, "password123").await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["email"], email.as_str());
    assert_eq!(body["role"], "member");
}

#[tokio::test]
#[ignore]
async fn test_duplicate_registration_conflicts() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("dup"));
    let payload = json!({
        "full_name": "Dup User",
        "email": email,
        "password": "password123"
    });

    let first = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_last_copy_goes_to_one_borrower() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;

    let first = fresh_member(&client).await;
    let second = fresh_member(&client).await;

    let response = borrow(&client, &first, book_id).await;
    assert_eq!(response.status(), 201);
    assert_eq!(get_book(&client, book_id).await["available_copies"], 0);

    let response = borrow(&client, &second, book_id).await;
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "NoCopiesAvailable");
}

#[tokio::test]
#[ignore]
async fn test_due_date_and_renewal_cap() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;
    let member = fresh_member(&client).await;

    let response = borrow(&client, &member, book_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");
    assert_eq!(loan["renewals"], 0);

    // Default period: due date = start date + 14 days
    let start = chrono::NaiveDate::parse_from_str(loan["start_date"].as_str().unwrap(), "%Y-%m-%d")
        .expect("Bad start date");
    let due = chrono::NaiveDate::parse_from_str(loan["due_date"].as_str().unwrap(), "%Y-%m-%d")
        .expect("Bad due date");
    assert_eq!(due - start, chrono::Duration::days(14));

    // First renewal pushes the due date another period out
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let renewed: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(renewed["renewals"], 1);
    let due_after = chrono::NaiveDate::parse_from_str(
        renewed["due_date"].as_str().unwrap(),
        "%Y-%m-%d",
    )
    .expect("Bad due date");
    assert_eq!(due_after - start, chrono::Duration::days(28));

    // Second renewal hits the cap
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Third is rejected, due date untouched
    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "MaxRenewalsReached");

    let response = client
        .get(format!("{}/member/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    let loans: Value = response.json().await.expect("Failed to parse response");
    let stored = loans
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["id"].as_i64() == Some(loan_id))
        .expect("Loan missing from list");
    assert_eq!(stored["renewals"], 2);
    let due_final = chrono::NaiveDate::parse_from_str(
        stored["due_date"].as_str().unwrap(),
        "%Y-%m-%d",
    )
    .expect("Bad due date");
    assert_eq!(due_final - start, chrono::Duration::days(42));
}

#[tokio::test]
#[ignore]
async fn test_return_restores_availability_and_is_not_idempotent() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;
    let member = fresh_member(&client).await;

    let response = borrow(&client, &member, book_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().expect("No loan ID");
    assert_eq!(get_book(&client, book_id).await["available_copies"], 0);

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "returned");
    assert_eq!(body["available_copies"], 1);
    assert_eq!(get_book(&client, book_id).await["available_copies"], 1);

    // The loan is gone from the member's list
    let response = client
        .get(format!("{}/member/loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    let loans: Value = response.json().await.expect("Failed to parse response");
    assert!(loans
        .as_array()
        .unwrap()
        .iter()
        .all(|l| l["id"].as_i64() != Some(loan_id)));

    // Returning it again is an error, not a silent success
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "LoanNotFound");
}

#[tokio::test]
#[ignore]
async fn test_copy_conservation_under_borrows_and_returns() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 3).await;
    let member = fresh_member(&client).await;

    let first = borrow(&client, &member, book_id).await;
    assert_eq!(first.status(), 201);
    let second = borrow(&client, &member, book_id).await;
    assert_eq!(second.status(), 201);

    // 3 total = 1 available + 2 on loan
    assert_eq!(get_book(&client, book_id).await["available_copies"], 1);

    let loan: Value = first.json().await.expect("Failed to parse response");
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan["id"].as_i64().unwrap()))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    assert_eq!(get_book(&client, book_id).await["available_copies"], 2);
}

#[tokio::test]
#[ignore]
async fn test_deletion_blocked_while_loans_exist() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;
    let member = fresh_member(&client).await;

    let response = borrow(&client, &member, book_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");

    let response = client
        .delete(format!("{}/admin/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BookHasActiveLoans");

    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan["id"].as_i64().unwrap()))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/admin/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["deleted"].as_i64(), Some(book_id));
}

#[tokio::test]
#[ignore]
async fn test_reservation_queue_is_fifo() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let librarian = librarian_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;

    let first = fresh_member(&client).await;
    let second = fresh_member(&client).await;

    let mut reservation_ids = Vec::new();
    // Duplicate reservations by the same user are allowed
    for token in [&first, &second, &first] {
        let response = client
            .post(format!("{}/reservations", BASE_URL))
            .header("Authorization", format!("Bearer {}", token))
            .json(&json!({ "book_id": book_id }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 201);
        let body: Value = response.json().await.expect("Failed to parse response");
        reservation_ids.push(body["id"].as_i64().expect("No reservation ID"));
    }

    // Peek shows all three in creation order without consuming them
    let response = client
        .get(format!("{}/librarian/reservations/queue/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", librarian))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let queue: Value = response.json().await.expect("Failed to parse response");
    let queued_ids: Vec<i64> = queue
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(queued_ids, reservation_ids);

    // Pops come out in the same order
    for expected in &reservation_ids {
        let response = client
            .post(format!("{}/librarian/reservations/next/{}", BASE_URL, book_id))
            .header("Authorization", format!("Bearer {}", librarian))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["id"].as_i64(), Some(*expected));
    }

    // Empty queue pops null
    let response = client
        .post(format!("{}/librarian/reservations/next/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", librarian))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_null());
}

#[tokio::test]
#[ignore]
async fn test_fines_empty_for_fresh_member() {
    let client = Client::new();
    let member = fresh_member(&client).await;

    let response = client
        .get(format!("{}/member/fines", BASE_URL))
        .header("Authorization", format!("Bearer {}", member))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let total: f64 = body["total"].as_str().unwrap().parse().unwrap();
    assert_eq!(total, 0.0);
    assert!(body["details"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore]
async fn test_admin_edit_cannot_break_copy_bounds() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 2).await;

    let response = client
        .put(format!("{}/admin/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "available_copies": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "InvalidBounds");

    // Totals can grow together
    let response = client
        .put(format!("{}/admin/books/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "total_copies": 5, "available_copies": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["available_copies"], 5);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_reserve_missing_book() {
    let client = Client::new();
    let member = fresh_member(&client).await;

    let response = borrow(&client, &member, 999_999).await;
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "BookNotFound");

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", member))
        .json(&json!({ "book_id": 999_999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_members_cannot_touch_other_loans_or_admin_routes() {
    let client = Client::new();
    let admin = admin_token(&client).await;
    let book_id = create_book(&client, &admin, 1).await;

    let owner = fresh_member(&client).await;
    let other = fresh_member(&client).await;

    let response = borrow(&client, &owner, book_id).await;
    assert_eq!(response.status(), 201);
    let loan: Value = response.json().await.expect("Failed to parse response");
    let loan_id = loan["id"].as_i64().unwrap();

    // Another member cannot return or renew someone else's loan
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .post(format!("{}/loans/{}/renew", BASE_URL, loan_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // Members are rejected from librarian and admin surfaces
    let response = client
        .get(format!("{}/librarian/reservations/queue/{}", BASE_URL, book_id))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    let response = client
        .get(format!("{}/admin/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", other))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 403);

    // No token at all is a 401
    let response = client
        .get(format!("{}/member/loans", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_notification_log() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let response = client
        .post(format!("{}/admin/notifications/return-reminder", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "loan_id": 42 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(created["kind"], "return_reminder");
    assert_eq!(created["message"], "Reminder: loan 42 is due back");
    assert_eq!(created["read"], false);

    let response = client
        .post(format!("{}/admin/notifications/overdue", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({ "loan_id": 42, "days_late": 3 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/admin/notifications", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let log: Value = response.json().await.expect("Failed to parse response");
    let entries = log.as_array().unwrap();
    assert!(entries.len() >= 2);
    assert!(entries
        .iter()
        .any(|n| n["kind"] == "overdue" && n["message"] == "Overdue: loan 42 (3 days)"));
}

#[tokio::test]
#[ignore]
async fn test_refresh_token_flow() {
    let client = Client::new();
    let email = format!("{}@example.com", unique("refresh"));

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "full_name": "Refresh User",
            "email": email,
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "password123" }))
        .send()
        .await
        .expect("Failed to send request");
    let tokens: Value = response.json().await.expect("Failed to parse response");
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    // A refresh token is not accepted as an access token
    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", refresh_token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);

    // But it buys a fresh pair
    let response = client
        .post(format!("{}/auth/refresh", BASE_URL))
        .json(&json!({ "refresh_token": refresh_token }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    let new_access = body["access_token"].as_str().unwrap();

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", new_access))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_catalog_search() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    let needle = unique("Needlework");
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": needle,
            "author": "Search Author",
            "year": 2001,
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .get(format!("{}/catalog/search", BASE_URL))
        .query(&[("q", needle.to_lowercase())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let results: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(results.as_array().unwrap().len(), 1);
    assert_eq!(results[0]["title"], needle.as_str());
}

#[tokio::test]
#[ignore]
async fn test_book_creation_validation() {
    let client = Client::new();
    let admin = admin_token(&client).await;

    // Year below the lower bound
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": unique("Ancient"),
            "author": "Scribe",
            "year": 1300,
            "total_copies": 1
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    // available_copies above total_copies
    let response = client
        .post(format!("{}/admin/books", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin))
        .json(&json!({
            "title": unique("Overfull"),
            "author": "Scribe",
            "year": 2000,
            "total_copies": 2,
            "available_copies": 3
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}
