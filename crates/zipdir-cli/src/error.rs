//! Error conversion utilities for CLI.
//!
//! Wraps zipdir-core's typed errors (thiserror) in user-facing anyhow
//! context with actionable guidance. The original error stays in the chain,
//! so callers can still downcast to `ArchiveError`.

use std::path::Path;
use zipdir_core::ArchiveError;

/// Process exit code for ordinary failures.
pub const EXIT_FAILURE: u8 = 1;

/// Process exit code when a partial archive could not be removed.
pub const EXIT_FATAL: u8 = 2;

/// Converts `ArchiveError` to a user-friendly anyhow error for `input`.
pub fn convert_archive_error(err: ArchiveError, input: &Path) -> anyhow::Error {
    let message = match &err {
        ArchiveError::InvalidPath { .. } => format!(
            "Invalid path '{}': it does not name a file or directory\n\
             HINT: '.' and '..' cannot be archived; pass the directory by name instead.",
            input.display()
        ),
        ArchiveError::Discovery { path, .. } => format!(
            "Cannot scan '{}' (failed at '{}')\n\
             HINT: Check that the path exists and that every directory in it is readable.",
            input.display(),
            path.display()
        ),
        ArchiveError::Create { path, .. } => format!(
            "Cannot create archive '{}' for '{}'\n\
             HINT: Check write permission and free space in the output directory.",
            path.display(),
            input.display()
        ),
        ArchiveError::Read { path, .. } | ArchiveError::Copy { path, .. } => format!(
            "Error zipping '{}': failed on '{}'; no archive was written",
            input.display(),
            path.display()
        ),
        ArchiveError::EntryCreate { name, .. } => format!(
            "Error zipping '{}': cannot store entry '{name}'; no archive was written",
            input.display()
        ),
        ArchiveError::Finalize { path, .. } => format!(
            "Error zipping '{}': cannot finish '{}'; no archive was written\n\
             HINT: The output disk may be full.",
            input.display(),
            path.display()
        ),
        ArchiveError::Cleanup { path, .. } => format!(
            "FATAL: partial archive '{}' could not be removed and is likely corrupt\n\
             HINT: Delete it manually before retrying.",
            path.display()
        ),
    };

    anyhow::Error::new(err).context(message)
}

/// Adds input context to a core result.
pub fn add_input_context<T>(
    result: Result<T, ArchiveError>,
    input: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, input))
}

/// Renders the error chain on one line.
///
/// A cause is skipped when the message above it already ends with its text,
/// as wrapped I/O errors usually do.
pub fn describe(err: &anyhow::Error) -> String {
    let mut parts: Vec<String> = Vec::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if parts.last().is_some_and(|prev| prev.ends_with(&text)) {
            continue;
        }
        parts.push(text);
    }
    parts.join(": ")
}

/// Returns the exit code for an error produced by this CLI.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    if err
        .downcast_ref::<ArchiveError>()
        .is_some_and(ArchiveError::is_fatal)
    {
        EXIT_FATAL
    } else {
        EXIT_FAILURE
    }
}
