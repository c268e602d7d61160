//! Type definitions for the SQLite implementation.
//!
//! The public types are the strongly-typed receipt identifier and the
//! timestamp representation; the private row structs map query results back
//! into core models.

use tally_core::models::{Receipt, ScoreRecord};

mod datetime;
pub use datetime::DateTime;

mod ids;
pub use ids::ReceiptId;

#[derive(sqlx::FromRow)]
pub(crate) struct ReceiptRow {
    pub id: ReceiptId,
    pub points: i64,
    pub receipt: sqlx::types::Json<Receipt>,
}

impl From<ReceiptRow> for ScoreRecord<ReceiptId> {
    fn from(row: ReceiptRow) -> Self {
        ScoreRecord {
            id: row.id,
            // points are written from a u64 and never negative
            points: row.points as u64,
            receipt: row.receipt.0,
        }
    }
}
