//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione di un singolo run.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con i parametri del run
//! - Fornisce valori di default per tool esterni, marker e parametri HandBrake
//! - Valida i parametri prima di avviare il batch
//!
//! Non esiste un file di configurazione: `Config` viene costruita da `main.rs`
//! a partire dagli argomenti CLI; `--delete` viene passato direttamente a
//! `run_batch`. I parametri di encoding (risoluzione e preset)
//! sono fissi e non esposti come opzioni.
//!
//! ## Parametri di configurazione:
//! - `json_output`: Output JSON line su stdout (default: false)
//! - `extension`: Estensione video riconosciuta (default: ".mp4")
//! - `marker`: Marker dei file già processati (default: "hbed" → "-hbed.mp4")
//! - `transcoder_command` / `metadata_command`: Nomi dei tool esterni
//!
//! ## Esempio:
//! ```rust,ignore
//! let config = Config {
//!     json_output: true,
//!     ..Default::default()
//! };
//! config.validate()?;
//! ```

use crate::error::{CompressError, Result};
use crate::platform::PlatformCommands;

/// Target height passed to HandBrakeCLI (`-Y`)
pub const TARGET_HEIGHT: u32 = 2160;
/// Target width passed to HandBrakeCLI (`-X`)
pub const TARGET_WIDTH: u32 = 3840;
/// HandBrake preset used for every file
pub const HANDBRAKE_PRESET: &str = "Fast 1080p30";

/// Configuration for a batch compression run
#[derive(Debug, Clone)]
pub struct Config {
    /// Output progress and status as JSON for programmatic use
    pub json_output: bool,
    /// Recognized video extension, including the leading dot
    pub extension: String,
    /// Marker inserted before the extension of compressed outputs
    pub marker: String,
    /// Transcoder executable
    pub transcoder_command: String,
    /// Metadata tool executable
    pub metadata_command: String,
    pub target_height: u32,
    pub target_width: u32,
    pub preset: String,
}

impl Default for Config {
    fn default() -> Self {
        let platform = PlatformCommands::instance();
        Self {
            json_output: false,
            extension: ".mp4".to_string(),
            marker: "hbed".to_string(),
            transcoder_command: platform.get_command("HandBrakeCLI").to_string(),
            metadata_command: platform.get_command("exiftool").to_string(),
            target_height: TARGET_HEIGHT,
            target_width: TARGET_WIDTH,
            preset: HANDBRAKE_PRESET.to_string(),
        }
    }
}

impl Config {
    /// Substring that marks a file as already compressed (e.g. `-hbed`)
    pub fn processed_tag(&self) -> String {
        format!("-{}", self.marker)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.extension.starts_with('.') || self.extension.len() < 2 {
            return Err(CompressError::Validation(format!(
                "Extension must start with a dot: {:?}",
                self.extension
            )));
        }

        if self.extension[1..].contains('.') {
            return Err(CompressError::Validation(format!(
                "Extension must contain a single dot: {:?}",
                self.extension
            )));
        }

        if self.extension != self.extension.to_lowercase() {
            return Err(CompressError::Validation(format!(
                "Extension must be lowercase: {:?}",
                self.extension
            )));
        }

        if self.marker.is_empty() || self.marker.contains(std::path::is_separator) {
            return Err(CompressError::Validation(format!(
                "Invalid processed marker: {:?}",
                self.marker
            )));
        }

        if self.target_height == 0 || self.target_width == 0 {
            return Err(CompressError::Validation(
                "Target resolution must be greater than 0".to_string(),
            ));
        }

        if self.transcoder_command.is_empty() || self.metadata_command.is_empty() {
            return Err(CompressError::Validation(
                "External tool commands must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
