//! # Batch Compressor
//!
//! Orchestratore principale: enumera i candidati, verifica le dipendenze
//! e processa i file uno alla volta, accumulando il riepilogo del run.
//!
//! ## Flusso:
//! 1. `FileManager::enumerate_candidates` (errore fatale se la directory non è leggibile)
//! 2. Verifica HandBrakeCLI ed exiftool (solo se ci sono candidati)
//! 3. Per ogni file, `TaskCompressor::process_one` in sequenza
//! 4. Restituisce `RunSummary` con il totale risparmiato
//!
//! Il flag di interruzione viene controllato prima di ogni file: un Ctrl-C
//! non interrompe il file in corso ma impedisce di iniziare il successivo.

use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::Result;
use crate::file_manager::FileManager;
use crate::json_output::JsonMessage;
use crate::optimizer::task::TaskCompressor;
use crate::progress::RunSummary;
use crate::video_processor::VideoProcessor;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Sequential batch compressor
pub struct BatchCompressor<R> {
    processor: VideoProcessor<R>,
    interrupted: Arc<AtomicBool>,
}

impl<R: CommandRunner> BatchCompressor<R> {
    pub fn new(config: Config, runner: R) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            processor: VideoProcessor::new(config, runner),
            interrupted: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Flag checked between files; set it to stop the batch early
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn config(&self) -> &Config {
        self.processor.config()
    }

    /// Compress every candidate in `directory` and return the run totals
    pub async fn run_batch(&self, directory: &Path, delete_originals: bool) -> Result<RunSummary> {
        let start_time = Instant::now();
        let config = self.config();

        let files = FileManager::enumerate_candidates(directory, config)?;
        let mut summary = RunSummary::new(files.len());

        if config.json_output {
            JsonMessage::start(
                directory.to_path_buf(),
                files.len(),
                delete_originals,
                &config.preset,
            )
            .emit();
        } else {
            info!("Starting batch compression in: {}", directory.display());
            info!("Found {} video files to process", files.len());
            if delete_originals {
                info!("Originals will be deleted after a successful compression and tag copy");
            }
        }

        if files.is_empty() {
            info!("No video files found to process");
            self.finish(&summary, start_time);
            return Ok(summary);
        }

        self.processor.check_dependencies().await?;

        let task = TaskCompressor::new(&self.processor);
        let total = files.len();

        for (index, file) in files.iter().enumerate() {
            if self.interrupted.load(Ordering::SeqCst) {
                warn!(
                    "Interrupted: stopping before {} ({} of {} files left)",
                    file.display(),
                    total - index,
                    total
                );
                summary.interrupted = true;
                break;
            }

            let size = FileManager::file_size(file).await.unwrap_or_default();
            if config.json_output {
                JsonMessage::file_start(file.clone(), size, index, total).emit();
            }
            info!(
                "[{}/{}] {} ({})",
                index + 1,
                total,
                file.display(),
                FileManager::format_size(size)
            );

            let report = task.process_one(file, delete_originals).await;
            debug!("{:?}", report);
            summary.record(&report);

            if config.json_output {
                JsonMessage::file_complete(&report).emit();
            }
        }

        self.finish(&summary, start_time);
        Ok(summary)
    }

    fn finish(&self, summary: &RunSummary, start_time: Instant) {
        let duration = start_time.elapsed().as_secs_f64();
        if self.config().json_output {
            JsonMessage::complete(summary, duration).emit();
        } else {
            info!("=== Batch Complete ({:.1}s) ===", duration);
            info!("{}", summary.format_summary());
        }
    }
}
