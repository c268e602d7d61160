use tally_core::{
    identity,
    models::{Receipt, ScoringConfig},
    ports::ReceiptRepository as _,
    scoring,
};
use tally_sqlite::{Db, config::SqliteConfig, types::ReceiptId};

// A named in-memory database per test; the default shared name would make
// concurrent tests race on migration setup.
fn memdb(name: &str) -> SqliteConfig {
    SqliteConfig {
        database_path: Some(format!("file:{name}?mode=memory&cache=shared").into()),
        create_if_missing: true,
    }
}

fn scored(payload: &str) -> (ReceiptId, u64, Receipt) {
    let receipt: Receipt = serde_json::from_str(payload).unwrap();
    let points = scoring::calculate_points(&receipt, &ScoringConfig::default());
    let id = ReceiptId::from(identity::derive_receipt_id(payload));
    (id, points, receipt)
}

#[tokio::test]
async fn test_store_and_fetch_round_trip() -> anyhow::Result<()> {
    let db = Db::open(&memdb("round_trip")).await?;

    let payload = r#"{
        "retailer": "Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [{"shortDescription": "Gatorade", "price": "2.25"}],
        "total": "2.25"
    }"#;
    let (id, points, receipt) = scored(payload);
    let now = time::OffsetDateTime::now_utc();

    let record = db.create_receipt(id, points, receipt.clone(), now.into()).await?;
    assert_eq!(record.id, id);
    assert_eq!(record.points, points);

    assert_eq!(db.get_points(id).await?, Some(points));

    let fetched = db.get_receipt(id).await?.expect("record should exist");
    assert_eq!(fetched.receipt, receipt);
    assert_eq!(fetched.points, points);

    Ok(())
}

#[tokio::test]
async fn test_unknown_id_is_none() -> anyhow::Result<()> {
    let db = Db::open(&memdb("unknown_id")).await?;

    let id = ReceiptId::from(identity::derive_receipt_id("never submitted"));
    assert_eq!(db.get_points(id).await?, None);
    assert!(db.get_receipt(id).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_resubmission_is_idempotent() -> anyhow::Result<()> {
    let db = Db::open(&memdb("resubmission")).await?;

    let payload = r#"{
        "retailer": "Walgreens",
        "purchaseDate": "2022-01-02",
        "purchaseTime": "08:13",
        "items": [
            {"shortDescription": "Pepsi - 12-oz", "price": "1.25"},
            {"shortDescription": "Dasani", "price": "1.40"}
        ],
        "total": "2.65"
    }"#;
    let (id, points, receipt) = scored(payload);
    let now = time::OffsetDateTime::now_utc();

    let first = db.create_receipt(id, points, receipt.clone(), now.into()).await?;
    // the second put must succeed, not surface a key conflict
    let second = db
        .create_receipt(id, points, receipt, time::OffsetDateTime::now_utc().into())
        .await?;

    assert_eq!(first.id, second.id);
    assert_eq!(first.points, second.points);
    assert_eq!(db.get_points(id).await?, Some(points));

    Ok(())
}
