//! # hbed - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Intercettazione di Ctrl-C per fermare il batch tra un file e l'altro
//! - Creazione del `BatchCompressor` e stampa del totale risparmiato
//!
//! ## Esempio di utilizzo:
//! ```bash
//! hbed /path/to/videos --delete --verbose
//! ```
//!
//! L'exit code è 0 quando il loop termina, anche se alcuni file sono falliti.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use hbed::json_output::JsonMessage;
use hbed::platform::PlatformCommands;
use hbed::{BatchCompressor, Config, SystemRunner};

#[derive(Parser)]
#[command(name = "hbed")]
#[command(about = "Compress video files using HandBrake and copy metadata with ExifTool")]
struct Args {
    /// Path to the folder containing video files
    folder_path: PathBuf,

    /// Delete original files after successful compression and tag copy
    #[arg(long)]
    delete: bool,

    /// Output progress and results as JSON lines
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    debug!("Running on {}", PlatformCommands::system_info());

    let config = Config {
        json_output: args.json,
        ..Default::default()
    };

    let result = run(&args, config).await;

    if let Err(ref e) = result {
        if args.json {
            JsonMessage::error(e.to_string(), e.chain().nth(1).map(|cause| cause.to_string())).emit();
        }
    }

    result
}

async fn run(args: &Args, config: Config) -> Result<()> {
    let json_output = config.json_output;
    let compressor = BatchCompressor::new(config, SystemRunner)?;

    let interrupted = compressor.interrupt_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if interrupted.swap(true, Ordering::SeqCst) {
                // Second Ctrl-C: give up on the current file as well
                std::process::exit(130);
            }
            warn!("Ctrl-C received, stopping after the current file (press again to abort)");
        }
    });

    let summary = compressor.run_batch(&args.folder_path, args.delete).await?;

    if !json_output {
        println!("{}", summary.total_line());
    }

    Ok(())
}
