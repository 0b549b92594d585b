//! All-or-nothing ownership of the destination archive file.
//!
//! [`PendingArchive`] owns the archive's file handle from creation until the
//! run resolves. Resolution is explicit: [`PendingArchive::commit`] closes
//! the handle and keeps the file, [`PendingArchive::rollback`] closes the
//! handle and deletes the file. A guard dropped without either (the run
//! panicked) removes the file as well.

use crate::ArchiveError;
use crate::Result;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::error;
use tracing::warn;

/// A destination archive that is not yet known to be complete.
#[derive(Debug)]
pub struct PendingArchive {
    path: PathBuf,
    file: Option<File>,
    resolved: bool,
}

impl PendingArchive {
    /// Creates (or truncates) the archive file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Create`] if the file cannot be created.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = File::create(&path).map_err(|source| ArchiveError::Create {
            path: path.clone(),
            source,
        })?;

        Ok(Self {
            path,
            file: Some(file),
            resolved: false,
        })
    }

    /// Returns the open archive file.
    ///
    /// `&mut File` is `Write + Seek`, which is what the ZIP writer needs.
    pub fn file_mut(&mut self) -> &mut File {
        match self.file.as_mut() {
            Some(file) => file,
            None => unreachable!("archive handle is only released on resolution"),
        }
    }

    /// Closes the handle and keeps the archive, returning its path.
    pub fn commit(mut self) -> PathBuf {
        self.file.take();
        self.resolved = true;
        std::mem::take(&mut self.path)
    }

    /// Closes the handle and deletes the archive after `cause` failed the run.
    ///
    /// Returns `cause` when the file is gone, or [`ArchiveError::Cleanup`]
    /// wrapping it when the removal itself failed. A file that has already
    /// vanished counts as removed.
    pub fn rollback(mut self, cause: ArchiveError) -> ArchiveError {
        self.resolved = true;
        match self.discard() {
            Ok(()) => {
                warn!(archive = %self.path.display(), error = %cause, "removed partial archive");
                cause
            }
            Err(source) => {
                error!(
                    archive = %self.path.display(),
                    error = %source,
                    "failed to remove partial archive"
                );
                ArchiveError::Cleanup {
                    path: self.path.clone(),
                    cause: Box::new(cause),
                    source,
                }
            }
        }
    }

    fn discard(&mut self) -> io::Result<()> {
        self.file.take();
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

impl Drop for PendingArchive {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }
        if let Err(e) = self.discard() {
            error!(
                archive = %self.path.display(),
                error = %e,
                "failed to remove abandoned archive"
            );
        }
    }
}
