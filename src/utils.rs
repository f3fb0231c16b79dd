//! # Utility Functions Module
//!
//! Helpers for building argument vectors for HandBrakeCLI and exiftool.

/// Builds a `Vec<OsString>` of command arguments from strings and paths.
///
/// Paths are passed through as-is, so file names that are not valid
/// UTF-8 reach the external tool unchanged.
///
/// # Example
/// ```rust
/// use hbed::args;
/// use std::path::Path;
///
/// let input = Path::new("clip.mp4");
/// let args = args!["-i", input, "-X", 3840.to_string()];
/// assert_eq!(args, ["-i", "clip.mp4", "-X", "3840"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::ffi::OsString::from(
            ::std::convert::AsRef::<::std::ffi::OsStr>::as_ref(&$item)
        )),*]
    };
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    #[test]
    fn test_args_macro_with_paths() {
        let input = PathBuf::from("/videos/a.mp4");
        let result = args!["-i", input, "-Y", 2160.to_string()];
        assert_eq!(result, ["-i", "/videos/a.mp4", "-Y", "2160"]);
        // Borrowed, not moved
        assert!(input.ends_with("a.mp4"));
    }

    #[test]
    fn test_args_macro_trailing_comma() {
        let result = args!["-TagsFromFile", "a.mp4", "a-hbed.mp4",];
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_args_macro_empty() {
        let result: Vec<OsString> = args![];
        assert!(result.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_args_macro_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let input = PathBuf::from(OsStr::from_bytes(b"clip\xff.mp4"));
        let result = args!["-i", input];
        assert_eq!(result[1].as_bytes(), b"clip\xff.mp4");
    }
}
