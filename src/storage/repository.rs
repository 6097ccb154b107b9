use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use tracing::debug;

use crate::domain::{
    Bill, BillDraft, BillId, BillStatus, DateRange, Recurrence, format_iso_date, parse_iso_date,
};

use super::MIGRATIONS;

const BILL_COLUMNS: &str = "id, name, amount_cents, due_date, recurrence, status";

/// Repository for persisting and querying bills.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    /// The pool holds a single connection, so writes are serialized.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Apply every migration newer than the recorded schema version.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create schema_version table")?;

        let current = self.schema_version().await?;

        for &(version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
            debug!(version, "Applying migration");
            let mut tx = self.pool.begin().await.context("Failed to begin migration")?;

            sqlx::raw_sql(sql)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to run migration {:03}", version))?;

            sqlx::query("INSERT INTO schema_version (version, applied_at) VALUES (?, ?)")
                .bind(version)
                .bind(Utc::now().to_rfc3339())
                .execute(&mut *tx)
                .await
                .context("Failed to record schema version")?;

            tx.commit()
                .await
                .with_context(|| format!("Failed to commit migration {:03}", version))?;
        }

        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Highest applied migration, 0 for an empty database.
    pub async fn schema_version(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COALESCE(MAX(version), 0) as version FROM schema_version")
            .fetch_one(&self.pool)
            .await
            .context("Failed to read schema version")?;
        Ok(row.get("version"))
    }

    /// Close the pool, waiting for the connection to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ========================
    // Bill operations
    // ========================

    /// Insert one row per due date, all in a single transaction.
    /// Either every row is committed or none is.
    pub async fn insert_bills(
        &self,
        draft: &BillDraft,
        due_dates: &[NaiveDate],
    ) -> Result<Vec<Bill>> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;
        let mut bills = Vec::with_capacity(due_dates.len());

        for due_date in due_dates {
            let result = sqlx::query(
                r#"
                INSERT INTO bills (name, amount_cents, due_date, recurrence, status)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&draft.name)
            .bind(draft.amount_cents)
            .bind(format_iso_date(*due_date))
            .bind(draft.recurrence.as_str())
            .bind(BillStatus::Pending.as_str())
            .execute(&mut *tx)
            .await
            .context("Failed to save bill")?;

            bills.push(Bill {
                id: result.last_insert_rowid(),
                name: draft.name.clone(),
                amount_cents: draft.amount_cents,
                due_date: *due_date,
                recurrence: draft.recurrence,
                status: BillStatus::Pending,
            });
        }

        tx.commit().await.context("Failed to commit bills")?;
        Ok(bills)
    }

    /// Get a bill by ID.
    pub async fn get_bill(&self, id: BillId) -> Result<Option<Bill>> {
        let row = sqlx::query(&format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch bill")?;

        row.as_ref().map(Self::row_to_bill).transpose()
    }

    /// List bills in insertion order, optionally restricted to a closed range of due dates.
    pub async fn list_bills(&self, range: Option<DateRange>) -> Result<Vec<Bill>> {
        let rows = match range {
            Some(range) => {
                sqlx::query(&format!(
                    "SELECT {BILL_COLUMNS} FROM bills WHERE due_date BETWEEN ? AND ? ORDER BY id"
                ))
                .bind(format_iso_date(range.start))
                .bind(format_iso_date(range.end))
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(&format!("SELECT {BILL_COLUMNS} FROM bills ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .context("Failed to list bills")?;

        rows.iter().map(Self::row_to_bill).collect()
    }

    /// Overwrite name, amount, due date and recurrence of one bill.
    /// Returns false when no bill has this ID.
    pub async fn update_bill(&self, id: BillId, draft: &BillDraft) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bills
            SET name = ?, amount_cents = ?, due_date = ?, recurrence = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(draft.amount_cents)
        .bind(format_iso_date(draft.due_date))
        .bind(draft.recurrence.as_str())
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update bill")?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a bill. Returns false when no bill has this ID.
    pub async fn delete_bill(&self, id: BillId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bills WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete bill")?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the status of one bill. Returns false when no bill has this ID.
    pub async fn set_status(&self, id: BillId, status: BillStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE bills SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update bill status")?;

        Ok(result.rows_affected() > 0)
    }

    /// Flip pending/paid in one statement and return the new status.
    pub async fn toggle_status(&self, id: BillId) -> Result<Option<BillStatus>> {
        let row = sqlx::query(
            r#"
            UPDATE bills
            SET status = CASE status WHEN 'paid' THEN 'pending' ELSE 'paid' END
            WHERE id = ?
            RETURNING status
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to toggle bill status")?;

        row.map(|row| {
            let status: String = row.get("status");
            status
                .parse::<BillStatus>()
                .with_context(|| format!("Invalid status in database: {}", status))
        })
        .transpose()
    }

    /// Count all stored bills.
    pub async fn count_bills(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM bills")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count bills")?;
        Ok(row.get("count"))
    }

    fn row_to_bill(row: &SqliteRow) -> Result<Bill> {
        let due_date_str: String = row.get("due_date");
        let recurrence_str: String = row.get("recurrence");
        let status_str: String = row.get("status");

        Ok(Bill {
            id: row.get("id"),
            name: row.get("name"),
            amount_cents: row.get("amount_cents"),
            due_date: parse_iso_date(&due_date_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid due_date: {}", due_date_str))?,
            recurrence: recurrence_str
                .parse::<Recurrence>()
                .with_context(|| format!("Invalid recurrence: {}", recurrence_str))?,
            status: status_str
                .parse::<BillStatus>()
                .with_context(|| format!("Invalid status: {}", status_str))?,
        })
    }
}
