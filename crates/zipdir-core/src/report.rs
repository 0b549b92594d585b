//! Compression run reporting and progress callbacks.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

/// Report of a successful compression run.
///
/// # Examples
///
/// ```
/// use zipdir_core::ArchiveReport;
///
/// let mut report = ArchiveReport::new("logs.zip");
/// report.bytes_read = 1000;
/// report.bytes_compressed = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// assert_eq!(report.compression_percentage(), 75.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchiveReport {
    /// Path of the created archive.
    pub archive_path: PathBuf,

    /// Number of files stored in the archive.
    pub files_added: usize,

    /// Total bytes read from source files.
    pub bytes_read: u64,

    /// Size of the finished archive file.
    pub bytes_compressed: u64,

    /// Wall-clock duration of the run.
    pub duration: Duration,
}

impl ArchiveReport {
    /// Creates an empty report for the given archive path.
    #[must_use]
    pub fn new(archive_path: impl Into<PathBuf>) -> Self {
        Self {
            archive_path: archive_path.into(),
            ..Self::default()
        }
    }

    /// Returns the compression ratio (source bytes / archive bytes).
    ///
    /// Returns 0.0 when either side is zero.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_read == 0 {
            return 0.0;
        }
        self.bytes_read as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved relative to the source size, in percent.
    ///
    /// Negative when the archive is larger than its contents, which is the
    /// normal case for tiny or already-compressed files. Returns 0.0 when
    /// nothing was read.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_read == 0 {
            return 0.0;
        }
        (1.0 - self.bytes_compressed as f64 / self.bytes_read as f64) * 100.0
    }
}

/// Callback trait for progress reporting during compression.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipdir_core::ProgressCallback;
///
/// struct SimpleProgress;
///
/// impl ProgressCallback for SimpleProgress {
///     fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
///         println!("[{current}/{total}] {}", path.display());
///     }
///
///     fn on_bytes_written(&mut self, _bytes: u64) {}
///
///     fn on_entry_complete(&mut self, _path: &Path) {}
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback: Send {
    /// Called before a file is added.
    ///
    /// # Arguments
    ///
    /// * `path` - Source path of the file
    /// * `total` - Number of files discovered
    /// * `current` - Position of this file (1-indexed)
    fn on_entry_start(&mut self, path: &Path, total: usize, current: usize);

    /// Called for every chunk copied into the archive.
    fn on_bytes_written(&mut self, bytes: u64);

    /// Called after a file has been fully copied.
    fn on_entry_complete(&mut self, path: &Path);

    /// Called once after the archive has been sealed.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_entry_start(&mut self, _path: &Path, _total: usize, _current: usize) {}

    fn on_bytes_written(&mut self, _bytes: u64) {}

    fn on_entry_complete(&mut self, _path: &Path) {}

    fn on_complete(&mut self) {}
}
