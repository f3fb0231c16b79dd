//! # Path Resolution Module
//!
//! Centralizza il calcolo dei path derivati da un file di input:
//! il path del video compresso e quello del backup lasciato da exiftool.

use crate::config::Config;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Suffix exiftool appends to the pre-edit copy of a file it rewrites
pub const BACKUP_SUFFIX: &str = "_original";

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Output path for a candidate: `clip.mp4` -> `clip-hbed.mp4`.
    ///
    /// Only the file name is rewritten; the suffix keeps its original case
    /// and names that are not valid UTF-8 are carried through untouched.
    /// Returns `None` when the name does not end with the configured extension.
    pub fn output_path(input_path: &Path, config: &Config) -> Option<PathBuf> {
        let wanted = config.extension.strip_prefix('.')?;
        let extension = input_path.extension()?;
        if !extension
            .as_encoded_bytes()
            .eq_ignore_ascii_case(wanted.as_bytes())
        {
            return None;
        }

        let mut name = input_path.file_stem()?.to_os_string();
        name.push(config.processed_tag());
        name.push(".");
        name.push(extension);
        Some(input_path.with_file_name(name))
    }

    /// Backup artifact left next to `transcoded` after an in-place tag copy
    pub fn backup_artifact_path(transcoded: &Path) -> PathBuf {
        let mut name = OsString::from(transcoded.as_os_str());
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }
}
