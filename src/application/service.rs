use tracing::{debug, info, warn};

use crate::domain::{Bill, BillDraft, BillId, BillStatus, DateRange};
use crate::storage::Repository;

use super::AppError;

/// Application service providing high-level operations over the bill store.
/// This is the primary interface for any client (CLI, tests, a future GUI).
/// It owns its store handle; call [`BillService::close`] when done.
pub struct BillService {
    repo: Repository,
}

impl BillService {
    /// Create a new bill service with the given repository.
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Open or create a database at the given path and bring its schema up to date.
    /// Safe to call on an already initialized database.
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        info!(database = database_path, "Database ready");
        Ok(Self::new(repo))
    }

    /// Connect to an existing database and apply any pending migrations.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        repo.migrate().await?;
        debug!(database = database_path, "Connected to database");
        Ok(Self::new(repo))
    }

    /// Release the store handle.
    pub async fn close(self) {
        self.repo.close().await;
    }

    pub async fn schema_version(&self) -> Result<i64, AppError> {
        Ok(self.repo.schema_version().await?)
    }

    /// Add a bill, expanding its recurrence into one row per due date.
    /// All rows are written atomically; returns them with their new IDs.
    pub async fn add_bill(&self, draft: &BillDraft) -> Result<Vec<Bill>, AppError> {
        draft.validate()?;
        let due_dates = draft.due_dates()?;

        let bills = self.repo.insert_bills(draft, &due_dates).await?;
        info!(
            name = %draft.name,
            recurrence = %draft.recurrence,
            rows = bills.len(),
            "Added bill"
        );
        Ok(bills)
    }

    /// Get a bill by ID.
    pub async fn get_bill(&self, id: BillId) -> Result<Bill, AppError> {
        self.repo
            .get_bill(id)
            .await?
            .ok_or(AppError::BillNotFound(id))
    }

    /// List all bills, or only those due within the given range (bounds included).
    pub async fn list_bills(&self, range: Option<DateRange>) -> Result<Vec<Bill>, AppError> {
        let bills = self.repo.list_bills(range).await?;
        debug!(count = bills.len(), ?range, "Listed bills");
        Ok(bills)
    }

    /// Overwrite name, amount, due date and recurrence of one bill.
    /// Status is left as is; other bills from the same add request are untouched.
    pub async fn edit_bill(&self, id: BillId, draft: &BillDraft) -> Result<Bill, AppError> {
        draft.validate()?;

        if !self.repo.update_bill(id, draft).await? {
            warn!(id, "Edit of unknown bill");
            return Err(AppError::BillNotFound(id));
        }

        info!(id, "Edited bill");
        self.get_bill(id).await
    }

    /// Delete a bill. Deleting an unknown ID is a no-op and returns false.
    pub async fn delete_bill(&self, id: BillId) -> Result<bool, AppError> {
        let deleted = self.repo.delete_bill(id).await?;
        if deleted {
            info!(id, "Deleted bill");
        } else {
            debug!(id, "Delete of unknown bill ignored");
        }
        Ok(deleted)
    }

    /// Set the status of one bill.
    pub async fn set_status(&self, id: BillId, status: BillStatus) -> Result<Bill, AppError> {
        if !self.repo.set_status(id, status).await? {
            warn!(id, "Status change of unknown bill");
            return Err(AppError::BillNotFound(id));
        }

        info!(id, %status, "Updated bill status");
        self.get_bill(id).await
    }

    /// Flip a bill between pending and paid, returning the new status.
    pub async fn toggle_status(&self, id: BillId) -> Result<BillStatus, AppError> {
        let status = self
            .repo
            .toggle_status(id)
            .await?
            .ok_or(AppError::BillNotFound(id))?;

        info!(id, %status, "Toggled bill status");
        Ok(status)
    }
}
