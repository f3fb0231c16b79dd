//! # hbed Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione del run e validazione
//! - `error`: Tipi di errore custom (`CompressError`)
//! - `platform`: Nomi dei comandi esterni per piattaforma
//! - `command`: Astrazione per l'esecuzione di processi esterni
//! - `file_manager`: Discovery dei video candidati e dimensioni
//! - `video_processor`: Invocazioni di HandBrakeCLI ed exiftool
//! - `optimizer`: Orchestratore del batch e pipeline per file
//! - `progress`: Spinner e riepilogo del run
//! - `json_output`: Eventi JSON line per uso da script
//!
//! ## Utilizzo:
//! ```rust,ignore
//! use hbed::{BatchCompressor, Config, SystemRunner};
//!
//! let compressor = BatchCompressor::new(Config::default(), SystemRunner)?;
//! let summary = compressor.run_batch(&path, false).await?;
//! println!("{}", summary.total_line());
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod json_output;
pub mod optimizer;
pub mod platform;
pub mod progress;
pub mod utils;
pub mod video_processor;

pub use command::{CommandOutput, CommandRunner, SystemRunner};
pub use config::Config;
pub use error::CompressError;
pub use optimizer::{BatchCompressor, FileReport, FileStatus};
pub use progress::RunSummary;
