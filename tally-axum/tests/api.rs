use axum_test::TestServer;
use serde_json::{Value, json};
use tally_axum::router;
use tally_core::{identity, models::ScoringConfig, ports::Application};
use tally_sqlite::{
    Db,
    config::SqliteConfig,
    types::{DateTime, ReceiptId},
};

#[derive(Clone)]
struct TestApp {
    db: Db,
    scoring: ScoringConfig,
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Db {
        &self.db
    }

    fn now(&self) -> DateTime {
        time::OffsetDateTime::now_utc().into()
    }

    fn generate_receipt_id(&self, payload: &str) -> ReceiptId {
        identity::derive_receipt_id(payload).into()
    }

    fn scoring(&self) -> ScoringConfig {
        self.scoring
    }
}

// A named in-memory database per test; the default shared name would make
// concurrent tests race on migration setup.
async fn server_with(name: &str, scoring: ScoringConfig) -> TestServer {
    let config = SqliteConfig {
        database_path: Some(format!("file:{name}?mode=memory&cache=shared").into()),
        create_if_missing: true,
    };
    let db = Db::open(&config).await.unwrap();
    let (router, _) = router(TestApp { db, scoring });
    TestServer::new(router).unwrap()
}

async fn server(name: &str) -> TestServer {
    server_with(name, ScoringConfig::default()).await
}

// 6 retailer chars + 5 for the pair + 1 for "Dasani" (length 6, ceil of
// 1.40 * 0.2); day 2 is even and 13:01 is outside the afternoon window.
fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:01",
        "items": [
            {"shortDescription": "Pepsi - 12-oz", "price": "1.25"},
            {"shortDescription": "Dasani", "price": "1.40"}
        ],
        "total": "35.35"
    })
}

#[test_log::test(tokio::test)]
async fn test_health() {
    let server = server("health").await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({"status": "ok"}));
}

#[test_log::test(tokio::test)]
async fn test_process_then_read_points() {
    let server = server("process_points").await;

    let response = server.post("/receipts/process").json(&target_receipt()).await;
    response.assert_status_ok();
    let id = response.json::<Value>()["id"]
        .as_str()
        .expect("id should be a string")
        .to_owned();

    let response = server.get(&format!("/receipts/{id}/points")).await;
    response.assert_status_ok();
    response.assert_json(&json!({"points": 12}));
}

#[test_log::test(tokio::test)]
async fn test_resubmission_returns_the_same_id() {
    let server = server("resubmission").await;

    let first = server.post("/receipts/process").json(&target_receipt()).await;
    first.assert_status_ok();
    let second = server.post("/receipts/process").json(&target_receipt()).await;
    second.assert_status_ok();

    assert_eq!(first.json::<Value>()["id"], second.json::<Value>()["id"]);
}

#[test_log::test(tokio::test)]
async fn test_audit_read_returns_the_submitted_receipt() {
    let server = server("audit_read").await;

    let response = server.post("/receipts/process").json(&target_receipt()).await;
    response.assert_status_ok();
    let id = response.json::<Value>()["id"].as_str().unwrap().to_owned();

    let response = server.get(&format!("/receipts/{id}")).await;
    response.assert_status_ok();
    let record = response.json::<Value>();
    assert_eq!(record["points"], 12);
    assert_eq!(record["receipt"]["retailer"], "Target");
    assert_eq!(record["receipt"]["items"][1]["shortDescription"], "Dasani");
}

#[test_log::test(tokio::test)]
async fn test_unknown_id_is_not_found() {
    let server = server("unknown_id").await;

    let id = identity::derive_receipt_id("no such receipt");
    let response = server.get(&format!("/receipts/{id}/points")).await;
    response.assert_status_not_found();

    let response = server.get(&format!("/receipts/{id}")).await;
    response.assert_status_not_found();
}

#[test_log::test(tokio::test)]
async fn test_malformed_payload_is_rejected() {
    let server = server("malformed").await;

    // not JSON at all
    let response = server.post("/receipts/process").text("not a receipt").await;
    response.assert_status_bad_request();

    // structurally JSON, but not a valid receipt
    let response = server
        .post("/receipts/process")
        .json(&json!({"retailer": "Target"}))
        .await;
    response.assert_status_bad_request();

    // no items
    let mut payload = target_receipt();
    payload["items"] = json!([]);
    let response = server.post("/receipts/process").json(&payload).await;
    response.assert_status_bad_request();

    // seconds in the purchase time
    let mut payload = target_receipt();
    payload["purchaseTime"] = "13:01:00".into();
    let response = server.post("/receipts/process").json(&payload).await;
    response.assert_status_bad_request();
}

#[test_log::test(tokio::test)]
async fn test_large_total_bonus_flag() {
    let server = server_with("bonus", ScoringConfig {
        large_total_bonus: true,
    })
    .await;

    // 9 retailer chars + 75 for the whole-dollar total + 5 bonus for
    // clearing 10.00
    let payload = json!({
        "retailer": "Spendmart",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "13:01",
        "items": [{"shortDescription": "Cola", "price": "20.00"}],
        "total": "20.00"
    });
    let response = server.post("/receipts/process").json(&payload).await;
    response.assert_status_ok();
    let id = response.json::<Value>()["id"].as_str().unwrap().to_owned();

    let response = server.get(&format!("/receipts/{id}/points")).await;
    response.assert_json(&json!({"points": 89}));
}
