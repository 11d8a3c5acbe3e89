// this_file: crates/platen-batch/src/security.rs

//! Guards on values that come from data rows.
//!
//! Row values name image files and carry free text; neither is trusted.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Maximum accepted text value, in bytes
pub const MAX_TEXT_LENGTH: usize = 10_000;

/// A row value that was refused.
#[derive(Debug, thiserror::Error)]
pub enum SecurityError {
    /// Path is malformed or uses `..` or `~`
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path does not exist
    #[error("Path not found: {0}")]
    PathNotFound(String),

    /// Path resolves outside the allowed directory
    #[error("Path outside base directory: {0}")]
    PathOutsideBase(String),

    /// Text is longer than [`MAX_TEXT_LENGTH`]
    #[error("Text too long: {len} bytes (max: {max})")]
    TextTooLong {
        /// Length of the rejected text
        len: usize,
        /// Limit
        max: usize,
    },
}

/// Resolves a row-supplied path inside `base_dir`.
///
/// Surrounding whitespace is ignored. Returns the canonical path of an
/// existing file or directory that lies within `base_dir`.
pub fn sanitize_path(path: &str, base_dir: &Utf8Path) -> Result<Utf8PathBuf, SecurityError> {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return Err(SecurityError::InvalidPath("empty path".to_string()));
    }

    let candidate = Utf8Path::new(trimmed);
    let escapes = trimmed.starts_with('~')
        || candidate
            .components()
            .any(|c| matches!(c, Utf8Component::ParentDir));
    if escapes {
        return Err(SecurityError::InvalidPath(format!(
            "{trimmed} contains invalid components (.. or ~)"
        )));
    }

    let abs = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        base_dir.join(candidate)
    };

    let canonical = canonicalize(&abs).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SecurityError::PathNotFound(abs.to_string())
        } else {
            SecurityError::InvalidPath(format!("Cannot resolve path {}: {}", abs, e))
        }
    })?;

    let base = canonicalize(base_dir).map_err(|e| {
        SecurityError::InvalidPath(format!("Cannot resolve base path {}: {}", base_dir, e))
    })?;

    if !canonical.starts_with(&base) {
        return Err(SecurityError::PathOutsideBase(canonical.to_string()));
    }

    Ok(canonical)
}

fn canonicalize(path: &Utf8Path) -> std::io::Result<Utf8PathBuf> {
    let canonical = std::fs::canonicalize(path.as_std_path())?;
    Utf8PathBuf::from_path_buf(canonical).map_err(|p| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8", p.display()),
        )
    })
}

/// Validate text input length.
pub fn validate_text_input(text: &str) -> Result<(), SecurityError> {
    if text.len() > MAX_TEXT_LENGTH {
        return Err(SecurityError::TextTooLong {
            len: text.len(),
            max: MAX_TEXT_LENGTH,
        });
    }
    Ok(())
}
