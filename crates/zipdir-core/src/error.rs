//! Error types for archive creation.

use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Step of a compression run at which an error was raised.
///
/// Runs move through the stages in declaration order. Anything that fails
/// at or after [`Stage::Creating`] has touched the destination archive and
/// goes through rollback before the error is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Normalizing the input and deriving the archive name.
    Validating,
    /// Walking the input tree.
    Discovering,
    /// Creating the destination file.
    Creating,
    /// Adding entries to the archive.
    Writing,
    /// Writing the central directory and flushing.
    Finalizing,
    /// Removing a partially written archive.
    RollingBack,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Validating => "validating",
            Self::Discovering => "discovering",
            Self::Creating => "creating",
            Self::Writing => "writing",
            Self::Finalizing => "finalizing",
            Self::RollingBack => "rolling back",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while compressing a path into an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Input normalizes to an empty path, `.` or `..`, or has no base name.
    #[error("invalid path: {path:?}")]
    InvalidPath {
        /// The path as given by the caller.
        path: PathBuf,
    },

    /// The input tree could not be walked.
    #[error("cannot read {}", path.display())]
    Discovery {
        /// Path at which the walk failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The destination archive could not be created.
    #[error("cannot create archive {}", path.display())]
    Create {
        /// Destination archive path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A discovered source file could not be opened.
    #[error("cannot open {}", path.display())]
    Read {
        /// Source file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The archive writer refused a new entry.
    #[error("cannot add entry {name:?}")]
    EntryCreate {
        /// Entry name inside the archive.
        name: String,
        /// Underlying writer error.
        #[source]
        source: ZipError,
    },

    /// Copying a file's contents into the archive failed.
    #[error("cannot copy {} into archive", path.display())]
    Copy {
        /// Source file path.
        path: PathBuf,
        /// Underlying I/O error, from either the source or the archive.
        #[source]
        source: io::Error,
    },

    /// The archive could not be sealed.
    #[error("cannot finish archive {}", path.display())]
    Finalize {
        /// Destination archive path.
        path: PathBuf,
        /// Underlying writer error.
        #[source]
        source: ZipError,
    },

    /// A partially written archive could not be removed after a failure.
    ///
    /// The archive at `path` may be left on disk in an unreadable state.
    #[error("cannot remove partial archive {} after error ({cause})", path.display())]
    Cleanup {
        /// Destination archive path.
        path: PathBuf,
        /// The failure that triggered the rollback.
        cause: Box<ArchiveError>,
        /// Error returned by the removal.
        #[source]
        source: io::Error,
    },
}

impl ArchiveError {
    /// Returns the stage of the run that produced this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::PathBuf;
    /// use zipdir_core::ArchiveError;
    /// use zipdir_core::Stage;
    ///
    /// let err = ArchiveError::InvalidPath {
    ///     path: PathBuf::from(".."),
    /// };
    /// assert_eq!(err.stage(), Stage::Validating);
    /// ```
    #[must_use]
    pub const fn stage(&self) -> Stage {
        match self {
            Self::InvalidPath { .. } => Stage::Validating,
            Self::Discovery { .. } => Stage::Discovering,
            Self::Create { .. } => Stage::Creating,
            Self::Read { .. } | Self::EntryCreate { .. } | Self::Copy { .. } => Stage::Writing,
            Self::Finalize { .. } => Stage::Finalizing,
            Self::Cleanup { .. } => Stage::RollingBack,
        }
    }

    /// Returns the filesystem path this error refers to, if any.
    ///
    /// Entry errors only know the archive entry name and return `None`.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::InvalidPath { path }
            | Self::Discovery { path, .. }
            | Self::Create { path, .. }
            | Self::Read { path, .. }
            | Self::Copy { path, .. }
            | Self::Finalize { path, .. }
            | Self::Cleanup { path, .. } => Some(path),
            Self::EntryCreate { .. } => None,
        }
    }

    /// Returns `true` if the error leaves the filesystem in an unknown state.
    ///
    /// Only a failed rollback qualifies: every other error is reported after
    /// the destination archive has been removed, or before it was created.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Cleanup { .. })
    }

    /// Returns the error that triggered a failed rollback.
    #[must_use]
    pub fn cause(&self) -> Option<&Self> {
        match self {
            Self::Cleanup { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
