//! Configuration for compression runs.

use std::path::Path;
use std::path::PathBuf;

/// Capacity of the buffered writer placed over the archive file (32 KB).
pub const WRITE_BUFFER_SIZE: usize = 32 * 1024;

/// Configuration for a compression run.
///
/// The defaults reproduce the plain behaviour: archive written to the working
/// directory, symlinked files stored by content, symlinked directories not
/// descended into, permission bits dropped.
///
/// # Examples
///
/// ```
/// use zipdir_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_output_dir("/tmp/archives")
///     .with_preserve_permissions(true);
/// assert!(config.preserve_permissions);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Directory the archive is written to.
    ///
    /// `None` writes into the process's current working directory and makes
    /// the returned archive path the bare `<basename>.zip` name.
    ///
    /// Default: `None`.
    pub output_dir: Option<PathBuf>,

    /// Descend into symlinked directories during discovery.
    ///
    /// A link to a regular file is always archived under the link's name,
    /// and a dangling link always fails discovery. When `false`, links to
    /// directories are skipped. When `true`, they are walked like ordinary
    /// directories and a link cycle fails discovery.
    ///
    /// Default: `false`.
    pub follow_symlinks: bool,

    /// Store Unix permission bits with each entry.
    ///
    /// Default: `false`.
    pub preserve_permissions: bool,
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory the archive is written to.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets whether to descend into symlinked directories.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to store permission bits.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Resolves where an archive with the given file name is written.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use zipdir_core::ArchiveConfig;
    ///
    /// let config = ArchiveConfig::default();
    /// assert_eq!(config.destination(Path::new("a.zip")), Path::new("a.zip"));
    ///
    /// let config = config.with_output_dir("out");
    /// assert_eq!(config.destination(Path::new("a.zip")), Path::new("out/a.zip"));
    /// ```
    #[must_use]
    pub fn destination(&self, archive_name: &Path) -> PathBuf {
        self.output_dir
            .as_ref()
            .map_or_else(|| archive_name.to_path_buf(), |dir| dir.join(archive_name))
    }
}
