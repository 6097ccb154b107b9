// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use payables::application::BillService;
use payables::domain::{Bill, BillDraft, Recurrence};
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(BillService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let service = BillService::init(db_path.to_str().unwrap()).await?;
    Ok((service, temp_dir))
}

/// Helper to parse an ISO date string into a NaiveDate
pub fn date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Add a bill from user-style text input
pub async fn add(
    service: &BillService,
    name: &str,
    amount: &str,
    due: &str,
    recurrence: &str,
) -> Result<Vec<Bill>> {
    let draft = BillDraft::parse(name, amount, due, recurrence)?;
    Ok(service.add_bill(&draft).await?)
}

/// Test fixture: a handful of single bills spread over early 2025
pub struct StandardBills;

impl StandardBills {
    pub async fn create(service: &BillService) -> Result<Vec<Bill>> {
        let mut bills = Vec::new();
        for (name, amount, due) in [
            ("Electricity", 15990, "2025-01-10"),
            ("Water", 6050, "2025-01-31"),
            ("Internet", 9990, "2025-02-01"),
            ("Insurance", 120000, "2025-03-15"),
        ] {
            let draft = BillDraft::new(name, amount, date(due), Recurrence::Single)?;
            bills.extend(service.add_bill(&draft).await?);
        }
        Ok(bills)
    }
}
