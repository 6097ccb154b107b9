use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use crate::domain::{Bill, format_cents, format_iso_date};

/// Output formats understood by [`Exporter::to_path`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Guess the format from a file extension, defaulting to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            _ => anyhow::bail!("Unknown export format '{}'. Use csv or json", s),
        }
    }
}

/// Bill list wrapped with export metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub bills: Vec<Bill>,
}

/// Writes an already loaded (possibly filtered) bill list to a tabular file.
pub struct Exporter<'a> {
    bills: &'a [Bill],
}

impl<'a> Exporter<'a> {
    pub fn new(bills: &'a [Bill]) -> Self {
        Self { bills }
    }

    /// Export bills as CSV with columns name, amount, due_date, status.
    pub fn to_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["name", "amount", "due_date", "status"])?;

        for bill in self.bills {
            let amount = format_cents(bill.amount_cents);
            let due_date = format_iso_date(bill.due_date);
            csv_writer.write_record([
                bill.name.as_str(),
                amount.as_str(),
                due_date.as_str(),
                bill.status.as_str(),
            ])?;
        }

        csv_writer.flush()?;
        Ok(self.bills.len())
    }

    /// Export bills as a JSON snapshot including every field.
    pub fn to_json<W: Write>(&self, mut writer: W) -> Result<BillSnapshot> {
        let snapshot = BillSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            bills: self.bills.to_vec(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(snapshot)
    }

    /// Write the export to a file chosen by the caller, replacing it if present.
    pub fn to_path(&self, path: &Path, format: ExportFormat) -> Result<usize> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        let writer = BufWriter::new(file);

        let count = match format {
            ExportFormat::Csv => self.to_csv(writer)?,
            ExportFormat::Json => self.to_json(writer)?.bills.len(),
        };

        info!(path = %path.display(), count, ?format, "Exported bills");
        Ok(count)
    }
}
