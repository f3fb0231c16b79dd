//! # JSON Output Module
//!
//! Questo modulo gestisce l'output strutturato in JSON (`--json`) per chi
//! invoca il tool da script.
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del batch
//! - `file_start`: Inizio elaborazione di un file
//! - `file_complete`: Fine elaborazione di un file (con esito)
//! - `complete`: Fine del batch con il riepilogo
//! - `error`: Errore fatale
//!
//! Ogni messaggio è un oggetto JSON su una singola riga di stdout.

use crate::optimizer::task::{FileReport, FileStatus};
use crate::progress::RunSummary;
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage {
    Start {
        input_dir: PathBuf,
        total_files: usize,
        delete_originals: bool,
        preset: String,
    },

    FileStart {
        path: PathBuf,
        size: u64,
        index: usize,
        total: usize,
    },

    FileComplete {
        path: PathBuf,
        output_path: Option<PathBuf>,
        status: FileStatus,
        original_size: u64,
        compressed_size: Option<u64>,
        saved_bytes: Option<i64>,
        artifact_removed: bool,
        original_deleted: bool,
        error: Option<String>,
    },

    Complete {
        #[serde(flatten)]
        summary: RunSummary,
        total_saved_mb: f64,
        duration_seconds: f64,
    },

    Error {
        message: String,
        details: Option<String>,
    },
}

impl JsonMessage {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }

    pub fn start(input_dir: PathBuf, total_files: usize, delete_originals: bool, preset: &str) -> Self {
        Self::Start {
            input_dir,
            total_files,
            delete_originals,
            preset: preset.to_string(),
        }
    }

    pub fn file_start(path: PathBuf, size: u64, index: usize, total: usize) -> Self {
        Self::FileStart {
            path,
            size,
            index,
            total,
        }
    }

    pub fn file_complete(report: &FileReport) -> Self {
        Self::FileComplete {
            path: report.path.clone(),
            output_path: report.output_path.clone(),
            status: report.status,
            original_size: report.original_size,
            compressed_size: report.compressed_size,
            saved_bytes: report.saved_bytes(),
            artifact_removed: report.artifact_removed,
            original_deleted: report.original_deleted,
            error: report.error.clone(),
        }
    }

    pub fn complete(summary: &RunSummary, duration_seconds: f64) -> Self {
        Self::Complete {
            summary: summary.clone(),
            total_saved_mb: summary.total_saved_mb(),
            duration_seconds,
        }
    }

    pub fn error(message: String, details: Option<String>) -> Self {
        Self::Error { message, details }
    }
}
