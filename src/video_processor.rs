//! # Video Processing Module
//!
//! Questo modulo incapsula le due invocazioni esterne della pipeline.
//!
//! ## Responsabilità:
//! - Compressione video con HandBrakeCLI (risoluzione e preset fissi)
//! - Copia dei tag dall'originale al file compresso con exiftool
//! - Rimozione del backup `_original` lasciato da exiftool
//! - Verifica dipendenze esterne (HandBrakeCLI, exiftool)
//!
//! ## Pipeline di compressione:
//! 1. Misura la dimensione dell'originale
//! 2. `HandBrakeCLI -i <in> -o <out> -Y 2160 -X 3840 --preset "Fast 1080p30"`
//! 3. Misura la dimensione dell'output e calcola il risparmio (anche negativo)
//! 4. `exiftool -TagsFromFile <in> <out>` riscrive `<out>` sul posto
//! 5. exiftool lascia `<out>_original`, che viene rimosso
//!
//! Un exit code diverso da zero è sempre un fallimento del singolo file;
//! la diagnostica catturata da stderr/stdout viene riportata nell'errore.
//!
//! ## Esempio:
//! ```rust,ignore
//! let processor = VideoProcessor::new(config, SystemRunner);
//! let outcome = processor.transcode(&video_path).await?;
//! processor.copy_metadata(&video_path, &outcome.output_path).await?;
//! ```

use crate::args;
use crate::command::CommandRunner;
use crate::config::Config;
use crate::error::{CompressError, Result};
use crate::file_manager::FileManager;
use crate::optimizer::path_resolver::PathResolver;
use crate::progress::ProgressManager;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info};

/// Result of a successful transcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutcome {
    pub output_path: PathBuf,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl TranscodeOutcome {
    /// Original minus compressed size; negative when the output grew
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.compressed_size as i64
    }
}

/// Drives HandBrakeCLI and exiftool for single files
pub struct VideoProcessor<R> {
    config: Config,
    runner: R,
}

impl<R: CommandRunner> VideoProcessor<R> {
    pub fn new(config: Config, runner: R) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compress `input_path` into its `-hbed` sibling
    pub async fn transcode(&self, input_path: &Path) -> Result<TranscodeOutcome> {
        let original_size = FileManager::file_size(input_path).await?;
        info!(
            "Original file size: {:.2} MB",
            FileManager::bytes_to_mb(original_size as i64)
        );

        let output_path = PathResolver::output_path(input_path, &self.config).ok_or_else(|| {
            CompressError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "{} does not end with {}",
                    input_path.display(),
                    self.config.extension
                ),
            ))
        })?;

        let args = args![
            "-i",
            input_path,
            "-o",
            output_path,
            "-Y",
            self.config.target_height.to_string(),
            "-X",
            self.config.target_width.to_string(),
            "--preset",
            self.config.preset,
        ];

        info!(
            "Compressing {} to {}...",
            input_path.display(),
            output_path.display()
        );

        let spinner = ProgressManager::spinner(
            &format!("HandBrake: {}", file_label(input_path)),
            !self.config.json_output,
        );
        let start_time = Instant::now();
        let result = self.runner.run(&self.config.transcoder_command, &args).await;
        spinner.finish_and_clear();
        let output = result?;

        if !output.success() {
            let err = CompressError::TranscodeFailure {
                path: input_path.to_path_buf(),
                code: output.code,
                diagnostics: output.diagnostics(),
            };
            error!(
                "ERROR: {} ({:.1}s)",
                err,
                start_time.elapsed().as_secs_f64()
            );
            return Err(err);
        }

        let compressed_size = FileManager::file_size(&output_path).await.map_err(|e| {
            CompressError::TranscodeFailure {
                path: input_path.to_path_buf(),
                code: output.code,
                diagnostics: format!(
                    "no output produced at {}: {}",
                    output_path.display(),
                    e
                ),
            }
        })?;

        let outcome = TranscodeOutcome {
            output_path,
            original_size,
            compressed_size,
        };

        info!(
            "original: {:.2} MB, compressed: {:.2} MB, saved: {:.2} MB ({:.1}s)",
            FileManager::bytes_to_mb(original_size as i64),
            FileManager::bytes_to_mb(compressed_size as i64),
            FileManager::bytes_to_mb(outcome.saved_bytes()),
            start_time.elapsed().as_secs_f64()
        );

        Ok(outcome)
    }

    /// Copy all tags from `original` onto `transcoded`, rewriting it in place
    pub async fn copy_metadata(&self, original: &Path, transcoded: &Path) -> Result<()> {
        let args = args!["-TagsFromFile", original, transcoded];

        let spinner = ProgressManager::spinner(
            &format!("exiftool: {}", file_label(transcoded)),
            !self.config.json_output,
        );
        let result = self.runner.run(&self.config.metadata_command, &args).await;
        spinner.finish_and_clear();
        let output = result?;

        if !output.success() {
            let diagnostics = output.diagnostics();
            error!("Error applying tags: {}", diagnostics);
            return Err(CompressError::MetadataCopyFailure {
                path: transcoded.to_path_buf(),
                code: output.code,
                diagnostics,
            });
        }

        info!(
            "Tags applied from {} to {}",
            original.display(),
            transcoded.display()
        );
        Ok(())
    }

    /// Delete the `_original` backup exiftool leaves next to `transcoded`
    pub async fn remove_backup_artifact(&self, transcoded: &Path) -> Result<PathBuf> {
        let artifact = PathResolver::backup_artifact_path(transcoded);
        tokio::fs::remove_file(&artifact)
            .await
            .map_err(|source| CompressError::ArtifactCleanup {
                path: artifact.clone(),
                source,
            })?;
        debug!("Removed backup artifact {}", artifact.display());
        Ok(artifact)
    }

    /// Check if required tools are available
    pub async fn check_dependencies(&self) -> Result<()> {
        for tool in [&self.config.transcoder_command, &self.config.metadata_command] {
            if !self.runner.is_available(tool).await {
                return Err(CompressError::MissingDependency(format!(
                    "{} is required for batch compression",
                    tool
                )));
            }
        }
        Ok(())
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandOutput;
    use std::cell::RefCell;
    use std::ffi::OsString;
    use tempfile::TempDir;

    /// Records calls and answers every one with the same exit code
    #[derive(Default)]
    struct RecordingRunner {
        exit_code: i32,
        calls: RefCell<Vec<(String, Vec<OsString>)>>,
    }

    impl CommandRunner for RecordingRunner {
        async fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput> {
            self.calls
                .borrow_mut()
                .push((program.to_string(), args.to_vec()));
            Ok(CommandOutput {
                code: Some(self.exit_code),
                stdout: String::new(),
                stderr: "boom".to_string(),
            })
        }

        async fn is_available(&self, program: &str) -> bool {
            program != "missing-tool"
        }
    }

    #[tokio::test]
    async fn test_transcode_arguments() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("a.mp4");
        std::fs::write(&input, vec![0u8; 2048]).unwrap();
        // Stand-in for what HandBrake would have written
        std::fs::write(dir.path().join("a-hbed.mp4"), vec![0u8; 512]).unwrap();

        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        let outcome = processor.transcode(&input).await.unwrap();

        assert_eq!(outcome.output_path, dir.path().join("a-hbed.mp4"));
        assert_eq!(outcome.saved_bytes(), 1536);

        let calls = processor.runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args) = &calls[0];
        assert_eq!(program, &Config::default().transcoder_command);
        assert_eq!(
            args,
            &args![
                "-i",
                input,
                "-o",
                dir.path().join("a-hbed.mp4"),
                "-Y",
                "2160",
                "-X",
                "3840",
                "--preset",
                "Fast 1080p30",
            ]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_transcode_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let input = dir.path().join(OsStr::from_bytes(b"clip\xff.mp4"));
        let output = dir.path().join(OsStr::from_bytes(b"clip\xff-hbed.mp4"));
        std::fs::write(&input, vec![0u8; 1024]).unwrap();
        std::fs::write(&output, vec![0u8; 256]).unwrap();

        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        let outcome = processor.transcode(&input).await.unwrap();
        assert_eq!(outcome.output_path, output);

        let calls = processor.runner.calls.borrow();
        let args = &calls[0].1;
        assert_eq!(args[1], input.clone().into_os_string());
        assert_eq!(args[3], output.into_os_string());
    }

    #[tokio::test]
    async fn test_transcode_non_zero_exit() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("b.mp4");
        std::fs::write(&input, b"video").unwrap();

        let runner = RecordingRunner {
            exit_code: 1,
            ..Default::default()
        };
        let processor = VideoProcessor::new(Config::default(), runner);
        let err = processor.transcode(&input).await.unwrap_err();

        match err {
            CompressError::TranscodeFailure {
                code, diagnostics, ..
            } => {
                assert_eq!(code, Some(1));
                assert_eq!(diagnostics, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_transcode_success_without_output_is_failure() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("c.mp4");
        std::fs::write(&input, b"video").unwrap();

        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        let err = processor.transcode(&input).await.unwrap_err();
        assert!(matches!(err, CompressError::TranscodeFailure { code: Some(0), .. }));
    }

    #[tokio::test]
    async fn test_copy_metadata_arguments_and_failure() {
        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        processor
            .copy_metadata(Path::new("a.mp4"), Path::new("a-hbed.mp4"))
            .await
            .unwrap();
        assert_eq!(
            processor.runner.calls.borrow()[0].1,
            vec!["-TagsFromFile", "a.mp4", "a-hbed.mp4"]
        );

        let failing = VideoProcessor::new(
            Config::default(),
            RecordingRunner {
                exit_code: 2,
                ..Default::default()
            },
        );
        let err = failing
            .copy_metadata(Path::new("a.mp4"), Path::new("a-hbed.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::MetadataCopyFailure { code: Some(2), .. }));
    }

    #[tokio::test]
    async fn test_remove_missing_artifact() {
        let dir = TempDir::new().unwrap();
        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        let err = processor
            .remove_backup_artifact(&dir.path().join("a-hbed.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, CompressError::ArtifactCleanup { .. }));
    }

    #[tokio::test]
    async fn test_check_dependencies() {
        let processor = VideoProcessor::new(Config::default(), RecordingRunner::default());
        assert!(processor.check_dependencies().await.is_ok());

        let config = Config {
            metadata_command: "missing-tool".to_string(),
            ..Default::default()
        };
        let processor = VideoProcessor::new(config, RecordingRunner::default());
        assert!(matches!(
            processor.check_dependencies().await,
            Err(CompressError::MissingDependency(_))
        ));
    }
}
