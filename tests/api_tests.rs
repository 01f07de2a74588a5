//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.
//! Each test creates its own equipment and holders, so they can run in any
//! order against the same database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

async fn create_holder(client: &Client, name: &str, department: &str) -> i64 {
    let response = client
        .post(format!("{}/holders", BASE_URL))
        .json(&json!({ "name": name, "department": department }))
        .send()
        .await
        .expect("Failed to create holder");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse holder");
    body["id"].as_i64().expect("No holder id")
}

async fn create_equipment(client: &Client, name: &str, total: i64) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .json(&json!({
            "name": name,
            "serial_number": format!("SN-{}", name),
            "total_quantity": total
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse equipment");
    assert_eq!(body["available_quantity"], json!(total));
    assert_eq!(body["status"], "available");
    body["id"].as_i64().expect("No equipment id")
}

async fn get_equipment(client: &Client, id: i64) -> Value {
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get equipment");
    assert!(response.status().is_success());
    response.json().await.expect("Failed to parse equipment")
}

async fn checkout(client: &Client, equipment_id: i64, holder_id: i64, quantity: i64) -> (u16, Value) {
    let response = client
        .post(format!("{}/equipment/{}/checkout", BASE_URL, equipment_id))
        .json(&json!({ "holder_id": holder_id, "quantity": quantity }))
        .send()
        .await
        .expect("Failed to send checkout");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("Failed to parse checkout response");
    (status, body)
}

async fn checkin(client: &Client, loan_id: i64, quantity: i64, condition: &str) -> (u16, Value) {
    let response = client
        .post(format!("{}/loans/{}/checkin", BASE_URL, loan_id))
        .json(&json!({ "quantity": quantity, "condition": condition }))
        .send()
        .await
        .expect("Failed to send checkin");
    let status = response.status().as_u16();
    let body: Value = response.json().await.expect("Failed to parse checkin response");
    (status, body)
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
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_two_holder_walkthrough() {
    let client = Client::new();
    let holder_a = create_holder(&client, "Ada Walkthrough", "Electronics").await;
    let holder_b = create_holder(&client, "Ben Walkthrough", "Mechanics").await;
    let equipment_id = create_equipment(&client, "walkthrough-scope", 3).await;

    // A takes 2: partially in use, sole holder shown
    let (status, body) = checkout(&client, equipment_id, holder_a, 2).await;
    assert_eq!(status, 201);
    let loan_a = body["loan"]["id"].as_i64().unwrap();
    assert_eq!(body["equipment"]["available_quantity"], json!(1));
    assert_eq!(body["equipment"]["status"], "in_use");
    assert_eq!(body["equipment"]["assigned_to"], "Ada Walkthrough");

    // B takes the last unit: two holders now
    let (status, body) = checkout(&client, equipment_id, holder_b, 1).await;
    assert_eq!(status, 201);
    let loan_b = body["loan"]["id"].as_i64().unwrap();
    assert_eq!(body["equipment"]["available_quantity"], json!(0));
    assert_eq!(body["equipment"]["status"], "in_use");
    assert_eq!(body["equipment"]["assigned_to"], "Multiple");

    // A returns everything: B is the sole remaining holder
    let (status, body) = checkin(&client, loan_a, 2, "good").await;
    assert_eq!(status, 200);
    assert_eq!(body["loan_closed"], json!(true));
    assert_eq!(body["equipment"]["available_quantity"], json!(2));
    assert_eq!(body["equipment"]["status"], "in_use");
    assert_eq!(body["equipment"]["assigned_to"], "Ben Walkthrough");

    // B returns: fully available again
    let (status, body) = checkin(&client, loan_b, 1, "fair").await;
    assert_eq!(status, 200);
    assert_eq!(body["equipment"]["available_quantity"], json!(3));
    assert_eq!(body["equipment"]["status"], "available");
    assert_eq!(body["equipment"]["assigned_to"], Value::Null);
    assert_eq!(body["equipment"]["condition"], "fair");
}

#[tokio::test]
#[ignore]
async fn test_partial_checkin_keeps_loan_open() {
    let client = Client::new();
    let holder = create_holder(&client, "Pat Partial", "Logistics").await;
    let equipment_id = create_equipment(&client, "partial-crimper", 5).await;

    let (status, body) = checkout(&client, equipment_id, holder, 5).await;
    assert_eq!(status, 201);
    let loan_id = body["loan"]["id"].as_i64().unwrap();

    let (status, body) = checkin(&client, loan_id, 2, "good").await;
    assert_eq!(status, 200);
    assert_eq!(body["loan_closed"], json!(false));
    assert_eq!(body["remaining_quantity"], json!(3));
    assert_eq!(body["equipment"]["available_quantity"], json!(2));
    assert_eq!(body["equipment"]["assigned_to"], "Pat Partial");

    // Over-returning the remainder is a conflict with its own error code
    let (status, body) = checkin(&client, loan_id, 4, "good").await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "LoanBalanceExceeded");

    let (status, body) = checkin(&client, loan_id, 3, "excellent").await;
    assert_eq!(status, 200);
    assert_eq!(body["loan_closed"], json!(true));
    assert_eq!(body["equipment"]["available_quantity"], json!(5));
    assert_eq!(body["equipment"]["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_checkout_then_full_checkin_restores_state() {
    let client = Client::new();
    let holder = create_holder(&client, "Ray Roundtrip", "Field Ops").await;
    let equipment_id = create_equipment(&client, "roundtrip-meter", 4).await;
    let before = get_equipment(&client, equipment_id).await;

    let (status, body) = checkout(&client, equipment_id, holder, 3).await;
    assert_eq!(status, 201);
    let loan_id = body["loan"]["id"].as_i64().unwrap();

    let (status, _) = checkin(&client, loan_id, 3, "good").await;
    assert_eq!(status, 200);

    let after = get_equipment(&client, equipment_id).await;
    assert_eq!(after["available_quantity"], before["available_quantity"]);
    assert_eq!(after["status"], before["status"]);
    assert_eq!(after["assigned_to"], before["assigned_to"]);

    // The loan is gone
    let response = client
        .get(format!("{}/loans?equipment_id={}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to list loans");
    let loans: Value = response.json().await.expect("Failed to parse loans");
    assert_eq!(loans.as_array().expect("not an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_rejected_checkout_mutates_nothing() {
    let client = Client::new();
    let holder = create_holder(&client, "Max Greedy", "Warehouse").await;
    let equipment_id = create_equipment(&client, "reject-hoist", 2).await;
    let before = get_equipment(&client, equipment_id).await;

    let (status, body) = checkout(&client, equipment_id, holder, 3).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "InsufficientAvailability");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Insufficient availability"));

    let after = get_equipment(&client, equipment_id).await;
    assert_eq!(after, before);

    let response = client
        .get(format!("{}/history?equipment_id={}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to list history");
    let history: Value = response.json().await.expect("Failed to parse history");
    assert_eq!(history.as_array().expect("not an array").len(), 0);
}

#[tokio::test]
#[ignore]
async fn test_checkout_validation_and_not_found() {
    let client = Client::new();
    let holder = create_holder(&client, "Val Idator", "QA").await;
    let equipment_id = create_equipment(&client, "validate-probe", 1).await;

    // quantity < 1
    let (status, _) = checkout(&client, equipment_id, holder, 0).await;
    assert_eq!(status, 400);

    // unknown holder
    let (status, _) = checkout(&client, equipment_id, 999_999_999, 1).await;
    assert_eq!(status, 404);

    // unknown equipment
    let (status, _) = checkout(&client, 999_999_999, holder, 1).await;
    assert_eq!(status, 404);

    // unknown condition is a validation error, rejected before reaching
    // the engine
    let response = client
        .post(format!("{}/loans/1/checkin", BASE_URL))
        .json(&json!({ "quantity": 1, "condition": "pristine" }))
        .send()
        .await
        .expect("Failed to send checkin");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "BadValue");
}

#[tokio::test]
#[ignore]
async fn test_maintenance_blocks_checkout() {
    let client = Client::new();
    let holder = create_holder(&client, "May Tenance", "Repairs").await;
    let equipment_id = create_equipment(&client, "maintenance-drill", 2).await;

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .json(&json!({ "status": "maintenance" }))
        .send()
        .await
        .expect("Failed to update equipment");
    assert!(response.status().is_success());

    let (status, body) = checkout(&client, equipment_id, holder, 1).await;
    assert_eq!(status, 409);
    assert_eq!(body["error"], "NotCheckoutable");
    assert!(body["message"].as_str().unwrap().contains("maintenance"));

    // Back in service, checkout succeeds
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .json(&json!({ "status": "available" }))
        .send()
        .await
        .expect("Failed to update equipment");
    assert!(response.status().is_success());

    let (status, _) = checkout(&client, equipment_id, holder, 1).await;
    assert_eq!(status, 201);
}

#[tokio::test]
#[ignore]
async fn test_shrinking_total_below_loaned_is_rejected() {
    let client = Client::new();
    let holder = create_holder(&client, "Shay Shrink", "Stores").await;
    let equipment_id = create_equipment(&client, "shrink-ladder", 4).await;

    let (status, _) = checkout(&client, equipment_id, holder, 3).await;
    assert_eq!(status, 201);

    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .json(&json!({ "total_quantity": 2 }))
        .send()
        .await
        .expect("Failed to update equipment");
    assert_eq!(response.status(), 400);

    // Shrinking down to exactly the loaned quantity is allowed
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .json(&json!({ "total_quantity": 3 }))
        .send()
        .await
        .expect("Failed to update equipment");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse equipment");
    assert_eq!(body["available_quantity"], json!(0));
    assert_eq!(body["status"], "in_use");
}

#[tokio::test]
#[ignore]
async fn test_concurrent_checkouts_never_oversell() {
    let client = Client::new();
    let available: i64 = 3;
    let attempts: usize = 8;
    let equipment_id = create_equipment(&client, "race-multimeter", available).await;

    let mut holders = Vec::new();
    for i in 0..attempts {
        holders.push(create_holder(&client, &format!("Racer {}", i), "Lab").await);
    }

    let mut handles = Vec::new();
    for holder_id in holders {
        let task_client = client.clone();
        handles.push(tokio::spawn(async move {
            let (status, _) = checkout(&task_client, equipment_id, holder_id, 1).await;
            status
        }));
    }

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("checkout task panicked") {
            201 => successes += 1,
            409 => conflicts += 1,
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(successes, available as usize);
    assert_eq!(conflicts, attempts - available as usize);

    let item = get_equipment(&client, equipment_id).await;
    assert_eq!(item["available_quantity"], json!(0));
    assert_eq!(item["status"], "in_use");
    assert_eq!(item["assigned_to"], "Multiple");
}

#[tokio::test]
#[ignore]
async fn test_history_is_ordered_and_denormalized() {
    let client = Client::new();
    let holder = create_holder(&client, "Hist Orian", "Archive").await;
    let equipment_id = create_equipment(&client, "history-welder", 2).await;

    let (_, body) = checkout(&client, equipment_id, holder, 2).await;
    let loan_id = body["loan"]["id"].as_i64().unwrap();
    let (_, _) = checkin(&client, loan_id, 2, "poor").await;

    let response = client
        .get(format!("{}/history?equipment_id={}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to list history");
    let records: Value = response.json().await.expect("Failed to parse history");
    let records = records.as_array().expect("not an array");

    // Newest first: the check-in precedes the checkout
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["action"], "check_in");
    assert_eq!(records[0]["condition_on_return"], "poor");
    assert_eq!(records[1]["action"], "check_out");
    assert_eq!(records[1]["condition_on_return"], Value::Null);
    for record in records {
        assert_eq!(record["equipment_name"], "history-welder");
        assert_eq!(record["holder_name"], "Hist Orian");
        assert_eq!(record["quantity"], json!(2));
    }
}

#[tokio::test]
#[ignore]
async fn test_delete_blocked_by_active_loans_history_survives() {
    let client = Client::new();
    let holder = create_holder(&client, "Del Eter", "Teardown").await;
    let equipment_id = create_equipment(&client, "delete-genset", 1).await;

    let (_, body) = checkout(&client, equipment_id, holder, 1).await;
    let loan_id = body["loan"]["id"].as_i64().unwrap();

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to delete equipment");
    assert_eq!(response.status(), 409);
    let body: Value = response.json().await.expect("Failed to parse error body");
    assert_eq!(body["error"], "HasActiveLoans");

    checkin(&client, loan_id, 1, "good").await;

    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to delete equipment");
    assert_eq!(response.status(), 204);

    // Denormalized history outlives the item
    let response = client
        .get(format!("{}/history?equipment_id={}", BASE_URL, equipment_id))
        .send()
        .await
        .expect("Failed to list history");
    let records: Value = response.json().await.expect("Failed to parse history");
    assert_eq!(records.as_array().expect("not an array").len(), 2);
}
