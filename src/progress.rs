//! # Progress and Run Summary Module
//!
//! Questo modulo gestisce il feedback su console e le statistiche del run.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Spinner `indicatif` mostrato mentre gira un tool esterno
//! - `RunSummary`: Accumulatore esplicito dei risultati, restituito da `run_batch`
//!
//! ## Statistiche tracciate:
//! - **candidates**: File idonei trovati nella directory
//! - **files_compressed**: File con transcode e copia metadata riusciti
//! - **transcode_failures** / **metadata_failures**: Errori per singolo file
//! - **originals_deleted**: Originali eliminati con `--delete`
//! - **total_bytes_saved**: Byte risparmiati (può essere negativo)
//!
//! Il risparmio viene contato per ogni file il cui transcode è riuscito,
//! anche se la copia dei metadata fallisce dopo: il file compresso resta su disco.

use crate::file_manager::FileManager;
use crate::optimizer::task::{FileReport, FileStatus};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Console feedback while an external tool is running
pub struct ProgressManager;

impl ProgressManager {
    /// Create a spinner for an indeterminate external process.
    /// Returns a hidden bar when `visible` is false (e.g. JSON mode).
    pub fn spinner(message: &str, visible: bool) -> ProgressBar {
        if !visible {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();

        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed}] {msg}") {
            spinner.set_style(style);
        }

        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        spinner
    }
}

/// Accumulated results of one batch run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub candidates: usize,
    pub files_compressed: usize,
    pub transcode_failures: usize,
    pub metadata_failures: usize,
    pub originals_deleted: usize,
    pub total_bytes_saved: i64,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn new(candidates: usize) -> Self {
        Self {
            candidates,
            ..Default::default()
        }
    }

    /// Fold one file's report into the totals
    pub fn record(&mut self, report: &FileReport) {
        match report.status {
            FileStatus::Compressed => self.files_compressed += 1,
            FileStatus::TranscodeFailed => self.transcode_failures += 1,
            FileStatus::MetadataFailed => self.metadata_failures += 1,
        }

        if let Some(saved) = report.saved_bytes() {
            self.total_bytes_saved += saved;
        }

        if report.original_deleted {
            self.originals_deleted += 1;
        }
    }

    pub fn files_processed(&self) -> usize {
        self.files_compressed + self.transcode_failures + self.metadata_failures
    }

    pub fn errors(&self) -> usize {
        self.transcode_failures + self.metadata_failures
    }

    pub fn total_saved_mb(&self) -> f64 {
        FileManager::bytes_to_mb(self.total_bytes_saved)
    }

    /// Final line printed at the end of every run
    pub fn total_line(&self) -> String {
        format!("Compressed total size: {:.2} MB", self.total_saved_mb())
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Processed: {}/{} files | Compressed: {} | Transcode errors: {} | Metadata errors: {} | Originals deleted: {}",
            self.files_processed(),
            self.candidates,
            self.files_compressed,
            self.transcode_failures,
            self.metadata_failures,
            self.originals_deleted,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const MB: u64 = 1024 * 1024;

    fn report(status: FileStatus, original: u64, compressed: Option<u64>) -> FileReport {
        FileReport {
            path: PathBuf::from("a.mp4"),
            output_path: compressed.map(|_| PathBuf::from("a-hbed.mp4")),
            original_size: original,
            compressed_size: compressed,
            status,
            error: None,
            artifact_removed: false,
            original_deleted: false,
        }
    }

    #[test]
    fn test_summary_accumulates_savings() {
        let mut summary = RunSummary::new(3);
        summary.record(&report(FileStatus::Compressed, 50 * MB, Some(20 * MB)));
        summary.record(&report(FileStatus::TranscodeFailed, 40 * MB, None));
        summary.record(&report(FileStatus::MetadataFailed, 10 * MB, Some(12 * MB)));

        assert_eq!(summary.files_processed(), 3);
        assert_eq!(summary.errors(), 2);
        assert_eq!(summary.total_bytes_saved, (28 * MB) as i64);
        assert_eq!(summary.total_line(), "Compressed total size: 28.00 MB");
    }

    #[test]
    fn test_summary_negative_savings() {
        let mut summary = RunSummary::new(1);
        summary.record(&report(FileStatus::Compressed, 10 * MB, Some(15 * MB)));
        assert_eq!(summary.total_line(), "Compressed total size: -5.00 MB");
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::default();
        assert_eq!(summary.total_line(), "Compressed total size: 0.00 MB");
        assert!(summary.format_summary().contains("Processed: 0/0"));
    }

    #[test]
    fn test_hidden_spinner() {
        let spinner = ProgressManager::spinner("Compressing a.mp4", false);
        assert!(spinner.is_hidden());
        spinner.finish_and_clear();
    }
}
