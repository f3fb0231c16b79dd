//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Responsabilità:
//! - Definisce `CompressError` enum per categorizzare tutti gli errori possibili
//! - Integra con `thiserror` per automatic error conversion
//!
//! ## Categorie di errori:
//! - `Filesystem`: Directory target mancante o non leggibile (fatale)
//! - `TranscodeFailure`: HandBrakeCLI uscito con codice diverso da zero (file saltato)
//! - `MetadataCopyFailure`: exiftool uscito con codice diverso da zero (originale preservato)
//! - `ArtifactCleanup`: File `_original` mancante o non eliminabile (solo log)
//! - `MissingDependency`: Tool esterno mancante (fatale)
//! - `CommandSpawn`: Impossibile avviare il processo esterno
//! - `Validation`: Configurazione non valida (fatale)
//!
//! ## Esempio:
//! ```rust,ignore
//! if !runner.is_available("HandBrakeCLI").await {
//!     return Err(CompressError::MissingDependency("HandBrakeCLI".to_string()));
//! }
//! ```

use std::path::PathBuf;

/// Custom error types for batch compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("Cannot read directory {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HandBrake returned code {} for {}: {diagnostics}", format_code(.code), .path.display())]
    TranscodeFailure {
        path: PathBuf,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("Error applying tags to {} (exit code {}): {diagnostics}", .path.display(), format_code(.code))]
    MetadataCopyFailure {
        path: PathBuf,
        code: Option<i32>,
        diagnostics: String,
    },

    #[error("Could not remove backup artifact {}: {source}", .path.display())]
    ArtifactCleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency missing: {0}")]
    MissingDependency(String),

    #[error("Failed to execute {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Validation(String),
}

/// A killed process has no exit code
fn format_code(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none (terminated by signal)".to_string())
}

pub type Result<T> = std::result::Result<T, CompressError>;
