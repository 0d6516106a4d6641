//! Path canonicalization and rejection of unsafe paths (spec.md §4.1, C1).
//!
//! The checks here are syntactic: they run before the file is ever
//! opened, so a nonexistent file is not itself a rejection reason (C2
//! is where a missing file turns into an I/O error). What IS rejected,
//! on every platform, is a path that spells a device, pipe, or reserved
//! DOS device name — the engine compares file contents, not device
//! streams, and silently succeeding against one would mislead a caller.

use std::path::{Path, PathBuf};

use path_absolutize::Absolutize;

use crate::error::{CompareError, CompareResult};

/// Reserved DOS device basenames (case-insensitive, extension ignored).
///
/// Module-scoped, immutable: the same table is consulted on every
/// invocation (spec.md §9, "Global state").
const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Canonicalize a user-supplied path, rejecting device/pipe/reserved
/// paths along the way.
///
/// Returns the resolved absolute path on success, or
/// `CompareError::InvalidParam` for any rejection.
pub fn canonicalize(path: &Path) -> CompareResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(CompareError::invalid_param("empty path"));
    }

    reject_device_namespace(path)?;

    let absolute = path
        .absolutize()
        .map_err(|e| {
            CompareError::invalid_param(format!(
                "cannot resolve path '{}': {e}",
                path.display()
            ))
        })?
        .into_owned();

    reject_device_namespace(&absolute)?;
    reject_reserved_name(&absolute)?;

    Ok(absolute)
}

/// Reject `\\.\` (local device) and `\\?\` (root-local device) escapes,
/// and the NT `\Device\` / `\??\PIPE\` prefixes they resolve to.
///
/// These are Windows-specific string forms, but the rejection itself is
/// platform-independent: a path spelled this way on any OS is refused.
fn reject_device_namespace(path: &Path) -> CompareResult<()> {
    let text = path.to_string_lossy();
    let starts_with_ci = |prefix: &str| {
        text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
    };

    if starts_with_ci(r"\\.\")
        || starts_with_ci(r"\\?\")
        || starts_with_ci(r"\Device\")
        || starts_with_ci(r"\??\PIPE\")
    {
        return Err(CompareError::invalid_param(format!(
            "refusing device/pipe namespace path '{text}'"
        )));
    }
    Ok(())
}

/// Reject a basename matching a reserved DOS device name, ignoring case
/// and extension.
fn reject_reserved_name(path: &Path) -> CompareResult<()> {
    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
        return Ok(());
    };
    let upper = stem.to_ascii_uppercase();
    if RESERVED_DEVICE_NAMES.contains(&upper.as_str()) {
        return Err(CompareError::invalid_param(format!(
            "'{stem}' is a reserved device name"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_local_device_namespace() {
        assert!(canonicalize(Path::new(r"\\.\PhysicalDrive0")).is_err());
    }

    #[test]
    fn rejects_root_local_device_namespace() {
        assert!(canonicalize(Path::new(r"\\?\C:\some\path")).is_err());
    }

    #[test]
    fn rejects_reserved_device_names_case_insensitively() {
        assert!(canonicalize(Path::new("con")).is_err());
        assert!(canonicalize(Path::new("CON.txt")).is_err());
        assert!(canonicalize(Path::new("Lpt3")).is_err());
    }

    #[test]
    fn rejects_empty_path() {
        assert!(canonicalize(Path::new("")).is_err());
    }

    #[test]
    fn accepts_ordinary_relative_path() {
        let resolved = canonicalize(Path::new("some/ordinary/file.txt")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/ordinary/file.txt"));
    }

    #[test]
    fn does_not_require_the_file_to_exist() {
        // Canonicalization is syntactic; existence is checked when the
        // file is opened (C2), not here.
        assert!(canonicalize(Path::new("/definitely/does/not/exist.xyz")).is_ok());
    }
}
