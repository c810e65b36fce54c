//! Aggregation and persistence of assembled records.

use crate::error::{Result, ScrapeError};
use crate::record::Record;
use std::path::Path;

/// Collects records in processing order and owns their presentation
#[derive(Debug, Default)]
pub struct ResultCollector {
    records: Vec<Record>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one assembled record
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Append a whole batch, preserving order
    pub fn extend(&mut self, records: impl IntoIterator<Item = Record>) {
        self.records.extend(records);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose traversal did not fail outright
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| !r.has_error()).count()
    }

    /// Write all records as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| ScrapeError::PersistFailed(e.to_string()))?;
        std::fs::write(path.as_ref(), json).map_err(|e| {
            ScrapeError::PersistFailed(format!("{}: {}", path.as_ref().display(), e))
        })?;
        log::info!("Results saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Print the per-record console report
    pub fn print_report(&self) {
        println!("\n{}", "=".repeat(60));
        println!("SCRAPING RESULTS");
        println!("{}", "=".repeat(60));

        if self.records.is_empty() {
            println!("No records were successfully processed.");
            return;
        }

        for record in &self.records {
            println!("\n--- Project {} ---", record.project_no);
            for (name, value) in record.field_rows() {
                println!("{}: {}", name, value);
            }
            println!("{}", "-".repeat(40));
        }
        println!("\n{} of {} records extracted without errors", self.succeeded(), self.len());
    }
}
