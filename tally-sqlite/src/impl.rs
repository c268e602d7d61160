use crate::{
    Db,
    types::{DateTime, ReceiptId, ReceiptRow},
};
use tally_core::{
    models::{Receipt, ScoreRecord},
    ports::{ReceiptRepository, Repository},
};

impl Repository for Db {
    type Error = sqlx::Error;
    type DateTime = DateTime;
    type ReceiptId = ReceiptId;
}

impl ReceiptRepository for Db {
    async fn create_receipt(
        &self,
        receipt_id: Self::ReceiptId,
        points: u64,
        receipt: Receipt,
        as_of: Self::DateTime,
    ) -> Result<ScoreRecord<Self::ReceiptId>, Self::Error> {
        let receipt = sqlx::types::Json(receipt);
        // The id is a pure function of the payload, so a conflicting insert
        // carries the same content and the same points. The no-op update
        // makes resubmission idempotent while `as_of` keeps recording the
        // first submission.
        let row: ReceiptRow = sqlx::query_as(
            r#"
            insert into
                receipt (id, as_of, points, receipt)
            values
                ($1, $2, $3, jsonb($4))
            on conflict (id) do update
                set points = excluded.points
            returning
                id, points, json(receipt) as receipt
            "#,
        )
        .bind(receipt_id)
        .bind(as_of)
        .bind(points as i64)
        .bind(receipt)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn get_receipt(
        &self,
        receipt_id: Self::ReceiptId,
    ) -> Result<Option<ScoreRecord<Self::ReceiptId>>, Self::Error> {
        let row: Option<ReceiptRow> = sqlx::query_as(
            r#"
            select
                id, points, json(receipt) as receipt
            from
                receipt
            where
                id = $1
            "#,
        )
        .bind(receipt_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn get_points(
        &self,
        receipt_id: Self::ReceiptId,
    ) -> Result<Option<u64>, Self::Error> {
        let points: Option<i64> = sqlx::query_scalar(
            r#"
            select
                points
            from
                receipt
            where
                id = $1
            "#,
        )
        .bind(receipt_id)
        .fetch_optional(&self.reader)
        .await?;

        Ok(points.map(|p| p as u64))
    }
}
