//! End-to-end tests of the HTTP API over a throwaway store.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use shift_roster_control::RosterService;
use shift_roster_gateway::{create_router, GatewayConfig, GatewayState};
use shift_roster_store::RocksStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(RocksStore::open(dir.path()).unwrap());
    let roster = Arc::new(RosterService::with_defaults(store));
    let app = create_router(GatewayState::new(roster, GatewayConfig::default()));
    (TestServer::new(app).unwrap(), dir)
}

async fn create_user(server: &TestServer, name: &str, phone: &str, role: &str) -> Value {
    let response = server
        .post("/users")
        .json(&json!({"name": name, "phone": phone, "role": role}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json()
}

fn every_cell() -> Vec<Value> {
    (0..7)
        .flat_map(|day| (0..4).map(move |slot| json!({"day": day, "timeSlot": slot})))
        .collect()
}

// ---------------------------------------------------------------------------
// Health and directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_ok() {
    let (server, _dir) = setup();

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "OK");
    assert_eq!(body["message"], "Server is running");
}

#[tokio::test]
async fn create_and_list_users() {
    let (server, _dir) = setup();

    let dana = create_user(&server, "Dana", "0501111111", "soldier").await;
    assert_eq!(dana["role"], "soldier");
    assert!(dana["id"].as_str().is_some_and(|id| !id.is_empty()));

    let response = server
        .post("/users")
        .json(&json!({"name": "Avi", "phone": "0502222222"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let avi: Value = response.json();
    assert_eq!(avi["role"], "soldier");

    let users: Value = server.get("/users").await.json();
    assert_eq!(users.as_array().map(Vec::len), Some(2));
    assert_eq!(users[0]["name"], "Dana");
}

#[tokio::test]
async fn create_user_requires_phone() {
    let (server, _dir) = setup();

    let response = server.post("/users").json(&json!({"name": "Dana"})).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn login_by_phone() {
    let (server, _dir) = setup();
    let manager = create_user(&server, "Avi", "0500000000", "manager").await;

    let response = server
        .post("/auth/login")
        .json(&json!({"phone": "0500000000"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["user"]["id"], manager["id"]);
    assert_eq!(body["user"]["role"], "manager");

    let missing = server.post("/auth/login").json(&json!({})).await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let unknown = server
        .post("/auth/login")
        .json(&json!({"phone": "0509999999"}))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
    let body: Value = unknown.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (server, _dir) = setup();

    let response = server.post("/users").text("name=Dana").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn save_all_then_read_week() {
    let (server, _dir) = setup();

    let response = server
        .post("/shifts/save-all")
        .json(&json!({"week": "2024-01-01", "shiftAssignments": {"sg_0_0": "Dana"}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["shiftsCount"], 1);
    assert!(body["message"].is_string());

    let shifts: Value = server.get("/shifts/2024-01-01").await.json();
    let shifts = shifts.as_array().unwrap();
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0]["slotId"], "sg_0_0");
    assert_eq!(shifts[0]["soldierName"], "Dana");
    assert_eq!(shifts[0]["week"], "2024-01-01");
}

#[tokio::test]
async fn save_all_requires_assignments() {
    let (server, _dir) = setup();

    let response = server
        .post("/shifts/save-all")
        .json(&json!({"week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn put_shift_sets_and_clears() {
    let (server, _dir) = setup();

    let response = server
        .put("/shifts/patrol_3_2")
        .json(&json!({"week": "2024-01-03", "soldierName": "Dana"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["shift"]["slotId"], "patrol_3_2");
    assert_eq!(body["shift"]["week"], "2024-01-01");

    let response = server
        .put("/shifts/patrol_3_2")
        .json(&json!({"week": "2024-01-01", "soldierName": ""}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["shift"].is_null());

    let shifts: Value = server.get("/shifts/2024-01-01").await.json();
    assert_eq!(shifts, json!([]));
}

#[tokio::test]
async fn put_shift_without_name_clears() {
    let (server, _dir) = setup();

    server
        .put("/shifts/sg_1_1")
        .json(&json!({"week": "2024-01-01", "soldierName": "Dana"}))
        .await;

    let response = server
        .put("/shifts/sg_1_1")
        .json(&json!({"week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Shift cleared");
    assert!(body["shift"].is_null());

    let shifts: Value = server.get("/shifts/2024-01-01").await.json();
    assert_eq!(shifts, json!([]));
}

#[tokio::test]
async fn put_shift_rejects_unknown_slot() {
    let (server, _dir) = setup();

    let response = server
        .put("/shifts/kitchen_0_0")
        .json(&json!({"week": "2024-01-01", "soldierName": "Dana"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bad_week_is_a_bad_request() {
    let (server, _dir) = setup();

    let response = server.get("/shifts/next-week").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn auto_assign_fills_week() {
    let (server, _dir) = setup();
    create_user(&server, "Dana", "051", "soldier").await;
    create_user(&server, "Bar", "052", "soldier").await;
    create_user(&server, "Avi", "050", "manager").await;

    let response = server
        .post("/shifts/auto-assign")
        .json(&json!({"week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["assignedShifts"], 84);
    assert_eq!(body["assignments"]["sg_0_0"], "Dana");
    assert_eq!(body["assignments"]["patrol_0_0"], "Bar");

    let shifts: Value = server.get("/shifts/2024-01-01").await.json();
    assert_eq!(shifts.as_array().map(Vec::len), Some(84));
    assert!(shifts[0]["soldierId"].is_string());
}

#[tokio::test]
async fn auto_assign_with_unavailable_soldier() {
    let (server, _dir) = setup();
    let dana = create_user(&server, "Dana", "051", "soldier").await;

    let response = server
        .post("/availability")
        .json(&json!({
            "userId": dana["id"],
            "week": "2024-01-01",
            "preferences": {"unavailable": every_cell(), "preferred": [], "neutral": []}
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post("/shifts/auto-assign")
        .json(&json!({"week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["assignedShifts"], 0);
    assert_eq!(body["assignments"], json!({}));
}

#[tokio::test]
async fn auto_assign_without_soldiers() {
    let (server, _dir) = setup();

    let response = server
        .post("/shifts/auto-assign")
        .json(&json!({"week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resubmitting_availability_keeps_one_record() {
    let (server, _dir) = setup();
    let dana = create_user(&server, "Dana", "051", "soldier").await;

    for unavailable in [json!([]), json!([{"day": 2, "timeSlot": 1}])] {
        let response = server
            .post("/availability")
            .json(&json!({
                "userId": dana["id"],
                "week": "2024-01-01",
                "preferences": {"unavailable": unavailable}
            }))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["availability"]["userName"], "Dana");
    }

    let records: Value = server.get("/availability/2024-01-01").await.json();
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0]["preferences"]["unavailable"],
        json!([{"day": 2, "timeSlot": 1}])
    );
}

#[tokio::test]
async fn availability_for_unknown_user() {
    let (server, _dir) = setup();

    let response = server
        .post("/availability")
        .json(&json!({"userId": "1", "week": "2024-01-01", "preferences": {}}))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn availability_requires_preferences() {
    let (server, _dir) = setup();
    let dana = create_user(&server, "Dana", "051", "soldier").await;

    let response = server
        .post("/availability")
        .json(&json!({"userId": dana["id"], "week": "2024-01-01"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn single_record_and_status() {
    let (server, _dir) = setup();
    let dana = create_user(&server, "Dana", "051", "soldier").await;
    create_user(&server, "Bar", "052", "soldier").await;
    let dana_id = dana["id"].as_str().unwrap().to_string();

    let missing = server.get(&format!("/availability/{dana_id}/2024-01-01")).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

    server
        .post("/availability")
        .json(&json!({"userId": dana_id, "week": "2024-01-02", "preferences": {}}))
        .await;

    let record = server.get(&format!("/availability/{dana_id}/2024-01-01")).await;
    assert_eq!(record.status_code(), StatusCode::OK);
    let record: Value = record.json();
    assert_eq!(record["week"], "2024-01-01");

    let status: Value = server.get("/availability/status/2024-01-01").await.json();
    assert_eq!(status["summary"], json!({"submitted": 1, "pending": 1, "total": 2, "percentage": 50}));
    assert_eq!(status["soldiers"][0]["submitted"], true);
    assert_eq!(status["soldiers"][1]["submitted"], false);
    assert_eq!(status["soldiers"][1]["phone"], "052");
}
