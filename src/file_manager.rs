//! # File Management Module
//!
//! Questo modulo gestisce le operazioni sui file e la discovery dei video.
//!
//! ## Responsabilità:
//! - Enumerazione non ricorsiva dei file candidati in una directory
//! - Filtro per estensione e per marker "già processato"
//! - Lettura dimensioni e conversioni in MB
//! - Formattazione human-readable delle dimensioni
//!
//! ## Selezione candidati:
//! Un file è candidato se il nome, in minuscolo, termina con l'estensione
//! configurata e non contiene il tag di file processato (`-hbed`).
//! L'ordine è quello restituito dal filesystem, non viene ordinato.
//!
//! ## Esempio:
//! ```rust,ignore
//! let files = FileManager::enumerate_candidates(Path::new("/videos"), &config)?;
//! for file in files {
//!     // transcode
//! }
//! ```

use crate::config::Config;
use crate::error::{CompressError, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Manages file operations and discovery
pub struct FileManager;

impl FileManager {
    /// List the direct children of `directory` that are eligible for compression
    pub fn enumerate_candidates(directory: &Path, config: &Config) -> Result<Vec<PathBuf>> {
        let filesystem_error = |source: io::Error| CompressError::Filesystem {
            path: directory.to_path_buf(),
            source,
        };

        let metadata = std::fs::metadata(directory).map_err(filesystem_error)?;
        if !metadata.is_dir() {
            return Err(filesystem_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a directory",
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(directory)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(filesystem_error(e.into())),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", directory.display(), e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if Self::is_candidate(&name, config) {
                files.push(entry.into_path());
            } else {
                debug!("Not a candidate: {}", name);
            }
        }

        Ok(files)
    }

    /// Check a file name against the extension and processed marker
    pub fn is_candidate(file_name: &str, config: &Config) -> bool {
        file_name.to_lowercase().ends_with(&config.extension)
            && !file_name.contains(&config.processed_tag())
    }

    /// Size of a file in bytes
    pub async fn file_size(path: &Path) -> Result<u64> {
        Ok(tokio::fs::metadata(path).await?.len())
    }

    /// Convert a byte count (possibly negative) to megabytes
    pub fn bytes_to_mb(bytes: i64) -> f64 {
        bytes as f64 / BYTES_PER_MB
    }

    /// Human-readable size for the per-file progress line
    pub fn format_size(bytes: u64) -> String {
        const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
        if bytes < 1024 {
            return format!("{} B", bytes);
        }

        let mut value = bytes as f64 / 1024.0;
        let mut unit = 0;
        while value >= 1024.0 && unit + 1 < UNITS.len() {
            value /= 1024.0;
            unit += 1;
        }
        format!("{:.2} {}", value, UNITS[unit])
    }
}
