//! Export flow: pick rows, confirm, encode and hand off to the file sink.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use roster_core::{ExportError, SelectionSet, UserId, UserRecord};
use roster_query::{encode_csv, CSV_MIME};

use crate::ports::{FileSink, Notifier};

/// Which rows an export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportScope {
    /// Every row matching the current query, across all pages.
    AllFiltered,
    /// Filtered rows that are also selected.
    SelectedOnly,
    /// One user, looked up in the full snapshot.
    Single(UserId),
}

/// How an export ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { filename: String, rows: usize },
    /// No rows in scope; no file was produced.
    Empty,
    /// The user declined the confirmation.
    Cancelled,
}

/// `users_export_<YYYY-MM-DD>.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("users_export_{}.csv", date.format("%Y-%m-%d"))
}

/// Resolve `scope` to the ordered rows it covers.
///
/// `filtered` is the pipeline output in display order, `all` the full
/// snapshot. Selected ids that are not in `filtered` are ignored.
pub fn rows_in_scope<'a>(
    scope: ExportScope,
    filtered: &[&'a UserRecord],
    all: &'a [UserRecord],
    selection: &SelectionSet,
) -> Vec<&'a UserRecord> {
    match scope {
        ExportScope::AllFiltered => filtered.to_vec(),
        ExportScope::SelectedOnly => filtered
            .iter()
            .copied()
            .filter(|user| selection.contains(user.id))
            .collect(),
        ExportScope::Single(id) => all.iter().filter(|user| user.id == id).take(1).collect(),
    }
}

/// Drives one export end to end.
pub struct Exporter {
    sink: Arc<dyn FileSink>,
    notifier: Arc<dyn Notifier>,
    delay: Duration,
}

impl Exporter {
    /// `delay` is the pause after the "Generating" toast, before encoding.
    pub fn new(sink: Arc<dyn FileSink>, notifier: Arc<dyn Notifier>, delay: Duration) -> Self {
        Self {
            sink,
            notifier,
            delay,
        }
    }

    /// Export `rows` under today's date.
    pub async fn export(&self, rows: &[&UserRecord]) -> Result<ExportOutcome, ExportError> {
        self.export_dated(rows, Local::now().date_naive()).await
    }

    /// Export `rows` with the file name stamped for `date`.
    pub async fn export_dated(
        &self,
        rows: &[&UserRecord],
        date: NaiveDate,
    ) -> Result<ExportOutcome, ExportError> {
        if rows.is_empty() {
            tracing::debug!("Export skipped: no rows");
            self.notifier.toast("No rows to export");
            return Ok(ExportOutcome::Empty);
        }

        if !self
            .notifier
            .confirm(&format!("Export {} row(s) to CSV?", rows.len()))
        {
            tracing::debug!("Export of {} rows declined", rows.len());
            return Ok(ExportOutcome::Cancelled);
        }

        self.notifier.toast("Generating CSV...");
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let filename = export_filename(date);
        let text = encode_csv(rows.iter().copied())?;
        if let Err(e) = self.sink.save(&filename, CSV_MIME, text.as_bytes()) {
            tracing::error!("Export failed: {}", e);
            self.notifier.toast(&format!("Export failed: {}", e));
            return Err(e);
        }

        tracing::info!("Exported {} rows to {}", rows.len(), filename);
        self.notifier
            .toast(&format!("Exported {} row(s) to {}", rows.len(), filename));
        Ok(ExportOutcome::Saved {
            filename,
            rows: rows.len(),
        })
    }
}
