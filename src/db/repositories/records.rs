use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, types::Type, Row};
use uuid::Uuid;

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64, to_u64},
    models::{BatchReceipt, PersistedRecord, ScoredRecord},
};

const ENABLE_LOGS: bool = true;

use crate::log_elapsed;

const SELECT_RECORDS: &str = "SELECT
        id,
        text,
        sentiment_score,
        created_at,
        batch_id,
        position
    FROM sentiment_data";

fn conversion_error(column: usize, err: anyhow::Error) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, err.into())
}

fn row_to_record(row: &Row) -> Result<PersistedRecord, rusqlite::Error> {
    let created_at_str: String = row.get("created_at")?;
    let position = row
        .get::<_, Option<i64>>("position")?
        .map(|value| to_u64(value, "position"))
        .transpose()
        .map_err(|e| conversion_error(5, e))?;

    Ok(PersistedRecord {
        id: row.get("id")?,
        text: row.get("text")?,
        sentiment_score: row.get("sentiment_score")?,
        created_at: parse_datetime(&created_at_str, "created_at")
            .map_err(|e| conversion_error(3, e))?,
        batch_id: row.get("batch_id")?,
        position,
    })
}

impl Database {
    /// Inserts `records` as one batch inside a single transaction.
    ///
    /// Every row shares a fresh batch id and a `created_at` captured when the
    /// worker picks the batch up. Any failure drops the transaction, which
    /// rolls back the rows already inserted.
    pub async fn insert_records(&self, records: &[ScoredRecord]) -> Result<BatchReceipt> {
        let records = records.to_vec();
        self.execute(move |conn| {
            let started = Instant::now();
            let batch_id = Uuid::new_v4().to_string();
            let created_at = Utc::now();
            let created_at_str = created_at.to_rfc3339();

            let tx = conn
                .transaction()
                .context("failed to open record batch transaction")?;
            {
                let mut stmt = tx.prepare_cached(
                    "INSERT INTO sentiment_data (
                        text,
                        sentiment_score,
                        created_at,
                        batch_id,
                        position
                    ) VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;

                for (position, record) in records.iter().enumerate() {
                    stmt.execute(params![
                        record.text,
                        record.sentiment_score,
                        created_at_str,
                        batch_id,
                        to_i64(position as u64)?,
                    ])
                    .with_context(|| {
                        format!("failed to insert record {position} of batch {batch_id}")
                    })?;
                }
            }
            tx.commit().context("failed to commit record batch")?;

            log_elapsed!("Data saving", started);

            Ok(BatchReceipt {
                batch_id,
                count: records.len(),
                created_at,
            })
        })
        .await
    }

    /// All records, ordered by id.
    pub async fn list_records(&self) -> Result<Vec<PersistedRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_RECORDS} ORDER BY id ASC"))?;

            let records_iter = stmt.query_map([], |row| row_to_record(row))?;

            let mut records = Vec::new();
            for record_result in records_iter {
                records.push(record_result?);
            }

            Ok(records)
        })
        .await
    }

    /// Records written by one `insert_records` call, in batch order.
    pub async fn list_batch(&self, batch_id: &str) -> Result<Vec<PersistedRecord>> {
        let batch_id = batch_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_RECORDS} WHERE batch_id = ?1 ORDER BY position ASC, id ASC"
            ))?;

            let records_iter = stmt.query_map(params![batch_id], |row| row_to_record(row))?;

            let mut records = Vec::new();
            for record_result in records_iter {
                records.push(record_result?);
            }

            Ok(records)
        })
        .await
    }

    pub async fn count_records(&self) -> Result<u64> {
        self.execute(|conn| {
            let count: i64 = conn
                .query_row("SELECT COUNT(*) FROM sentiment_data", [], |row| row.get(0))
                .context("failed to count records")?;
            to_u64(count, "record count")
        })
        .await
    }
}
