//! # Task Module
//!
//! Pipeline per un singolo file: transcode → copia metadata → rimozione
//! backup → eliminazione opzionale dell'originale.
//!
//! Ogni errore viene catturato qui e trasformato in un `FileReport`:
//! nessun errore di un singolo file interrompe il batch.

use crate::command::CommandRunner;
use crate::file_manager::FileManager;
use crate::video_processor::VideoProcessor;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Final state of one file's pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Transcode and tag copy both succeeded
    Compressed,
    /// HandBrake failed; nothing else ran
    TranscodeFailed,
    /// Output exists but tags were not copied; original kept
    MetadataFailed,
}

/// Uniform per-file result, whatever branch the pipeline took
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub original_size: u64,
    pub compressed_size: Option<u64>,
    pub status: FileStatus,
    pub error: Option<String>,
    pub artifact_removed: bool,
    pub original_deleted: bool,
}

impl FileReport {
    fn new(path: &Path, original_size: u64) -> Self {
        Self {
            path: path.to_path_buf(),
            output_path: None,
            original_size,
            compressed_size: None,
            status: FileStatus::TranscodeFailed,
            error: None,
            artifact_removed: false,
            original_deleted: false,
        }
    }

    /// Bytes saved, present whenever a transcoded output exists
    pub fn saved_bytes(&self) -> Option<i64> {
        self.compressed_size
            .map(|compressed| self.original_size as i64 - compressed as i64)
    }
}

/// Runs the per-file pipeline against a `VideoProcessor`
pub struct TaskCompressor<'a, R> {
    processor: &'a VideoProcessor<R>,
}

impl<'a, R: CommandRunner> TaskCompressor<'a, R> {
    pub fn new(processor: &'a VideoProcessor<R>) -> Self {
        Self { processor }
    }

    /// Process a single candidate. The original is removed only when
    /// transcode and tag copy both succeeded and `delete_originals` is set.
    pub async fn process_one(&self, file: &Path, delete_originals: bool) -> FileReport {
        let original_size = FileManager::file_size(file).await.unwrap_or_default();
        let mut report = FileReport::new(file, original_size);

        let outcome = match self.processor.transcode(file).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Skipping {}: {}", file.display(), e);
                report.error = Some(e.to_string());
                return report;
            }
        };

        report.original_size = outcome.original_size;
        report.compressed_size = Some(outcome.compressed_size);
        report.output_path = Some(outcome.output_path.clone());

        if let Err(e) = self
            .processor
            .copy_metadata(file, &outcome.output_path)
            .await
        {
            warn!(
                "Skipping deletion of {} due to tag application failure.",
                file.display()
            );
            report.status = FileStatus::MetadataFailed;
            report.error = Some(e.to_string());
            return report;
        }

        report.status = FileStatus::Compressed;

        match self
            .processor
            .remove_backup_artifact(&outcome.output_path)
            .await
        {
            Ok(artifact) => {
                info!("{} deleted.", artifact.display());
                report.artifact_removed = true;
            }
            Err(e) => warn!("{}", e),
        }

        if delete_originals {
            match tokio::fs::remove_file(file).await {
                Ok(()) => {
                    info!("Original file {} deleted.", file.display());
                    report.original_deleted = true;
                }
                Err(e) => {
                    error!("Failed to delete original {}: {}", file.display(), e);
                    report.error = Some(format!("failed to delete original: {}", e));
                }
            }
        }

        report
    }
}
