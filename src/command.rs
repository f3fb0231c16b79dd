//! # External Command Execution
//!
//! Astrazione per l'invocazione dei processi esterni (HandBrakeCLI, exiftool).
//!
//! Ogni invocazione è sincrona dal punto di vista del batch: il chiamante
//! attende la terminazione del processo prima di proseguire, e riceve un
//! `CommandOutput` strutturato con exit code e stream catturati.
//! Il trait `CommandRunner` permette di sostituire i tool reali nei test.

use crate::error::{CompressError, Result};
use crate::platform::PlatformCommands;
use std::ffi::OsString;
use std::process::Stdio;
use tracing::debug;

/// Lines of tool output kept in an error report. HandBrakeCLI logs the
/// whole scan and encode to stderr; the failure reason is at the end.
pub const DIAGNOSTIC_TAIL_LINES: usize = 20;

/// Captured result of one external process run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Diagnostic text for error reports: the tail of stderr, falling back
    /// to stdout
    pub fn diagnostics(&self) -> String {
        let text = match self.stderr.trim() {
            "" => self.stdout.trim(),
            stderr => stderr,
        };

        let lines: Vec<&str> = text.lines().collect();
        let omitted = lines.len().saturating_sub(DIAGNOSTIC_TAIL_LINES);
        if omitted == 0 {
            return text.to_string();
        }
        format!(
            "[{} earlier lines omitted]\n{}",
            omitted,
            lines[omitted..].join("\n")
        )
    }
}

/// Runs external programs to completion
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run `program` with `args`, wait for it and capture its output.
    /// A non-zero exit is not an error at this level; only a failure to
    /// start the process is.
    async fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput>;

    /// Check whether `program` can be found
    async fn is_available(&self, program: &str) -> bool;
}

/// Runs real processes through `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[OsString]) -> Result<CommandOutput> {
        let line: Vec<_> = args.iter().map(|arg| arg.to_string_lossy()).collect();
        debug!("Running: {} {}", program, line.join(" "));

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| CompressError::CommandSpawn {
                program: program.to_string(),
                source,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn is_available(&self, program: &str) -> bool {
        PlatformCommands::instance().is_command_available(program).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;

    #[test]
    fn test_diagnostics_prefers_stderr() {
        let output = CommandOutput {
            code: Some(1),
            stdout: "scanning title 1".to_string(),
            stderr: "  No title found.\n".to_string(),
        };
        assert!(!output.success());
        assert_eq!(output.diagnostics(), "No title found.");
    }

    #[test]
    fn test_diagnostics_falls_back_to_stdout() {
        let output = CommandOutput {
            code: Some(2),
            stdout: "Error: File not found\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(output.diagnostics(), "Error: File not found");
    }

    #[test]
    fn test_diagnostics_keeps_only_the_tail_of_a_long_log() {
        let log: Vec<String> = (0..500)
            .map(|i| format!("[00:00:{:02}] line {}", i % 60, i))
            .collect();
        let output = CommandOutput {
            code: Some(3),
            stdout: String::new(),
            stderr: format!("{}\nEncode failed (error 3)\n", log.join("\n")),
        };

        let diagnostics = output.diagnostics();
        let lines: Vec<&str> = diagnostics.lines().collect();
        assert_eq!(lines.len(), DIAGNOSTIC_TAIL_LINES + 1);
        assert_eq!(lines[0], "[481 earlier lines omitted]");
        assert_eq!(lines[DIAGNOSTIC_TAIL_LINES], "Encode failed (error 3)");
        assert!(!diagnostics.contains("line 0\n"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_exit_code() {
        let runner = SystemRunner;
        let args = args!["-c", "echo out; echo err >&2; exit 3"];
        let output = runner.run("sh", &args).await.unwrap();

        assert_eq!(output.code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_system_runner_spawn_failure() {
        let runner = SystemRunner;
        let result = runner.run("definitely-not-a-real-tool-7f3a9c", &[]).await;
        assert!(matches!(result, Err(CompressError::CommandSpawn { .. })));
    }
}
