use std::collections::HashMap;
use std::str::FromStr;

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use sqlx::{ConnectOptions, Pool, Row, Sqlite, SqlitePool};

use crate::error::Error;
use crate::models::ReviewRecord;

/// Durable key-value store for review records: one row per item id,
/// overwrite semantics. The app loads the whole map once at startup and
/// writes through after every rating.
#[derive(Clone)]
pub struct Db {
    pool: Pool<Sqlite>,
}

impl Db {
    pub async fn new(url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(url)?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .log_statements(log::LevelFilter::Trace);

        let pool = SqlitePool::connect_with(options).await?;

        let db = Db { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS review_records (
                item_id TEXT PRIMARY KEY,
                repetitions INTEGER NOT NULL DEFAULT 0,
                ease_factor REAL NOT NULL DEFAULT 2.5,
                interval_days INTEGER NOT NULL DEFAULT 0,
                due_date TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// The whole record map. Called once at session start.
    pub async fn load_all(&self) -> Result<HashMap<String, ReviewRecord>, Error> {
        let rows = sqlx::query("SELECT * FROM review_records")
            .fetch_all(&self.pool)
            .await?;

        let mut records = HashMap::with_capacity(rows.len());
        for row in rows {
            let item_id: String = row.try_get("item_id")?;
            let repetitions: i64 = row.try_get("repetitions")?;
            let interval_days: i64 = row.try_get("interval_days")?;
            let due_date: NaiveDate = row.try_get("due_date")?;
            records.insert(
                item_id,
                ReviewRecord {
                    repetitions: repetitions as u32,
                    ease_factor: row.try_get("ease_factor")?,
                    interval_days: interval_days as u32,
                    due_date,
                },
            );
        }
        Ok(records)
    }

    /// Upsert one record. Last write wins; there is nothing to merge.
    pub async fn put(&self, item_id: &str, record: &ReviewRecord) -> Result<(), Error> {
        sqlx::query(
            r#"
            INSERT INTO review_records (item_id, repetitions, ease_factor, interval_days, due_date)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(item_id) DO UPDATE SET
                repetitions = excluded.repetitions,
                ease_factor = excluded.ease_factor,
                interval_days = excluded.interval_days,
                due_date = excluded.due_date
            "#,
        )
        .bind(item_id)
        .bind(record.repetitions as i64)
        .bind(record.ease_factor)
        .bind(record.interval_days as i64)
        .bind(record.due_date)
        .execute(&self.pool)
        .await?;

        log::debug!(
            "saved {item_id}: reps={} ef={:.2} interval={}d due={}",
            record.repetitions,
            record.ease_factor,
            record.interval_days,
            record.due_date
        );
        Ok(())
    }
}
