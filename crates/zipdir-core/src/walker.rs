//! Regular-file discovery.
//!
//! The walk is depth-first with siblings visited in file-name order, so the
//! same tree always produces the same entry order. Directories are descended
//! into but never reported.

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::Result;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// A regular file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Filesystem path, starting with the input root.
    pub path: PathBuf,

    /// Size in bytes at discovery time.
    pub size: u64,
}

/// Walks an input root and yields its regular files.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipdir_core::ArchiveConfig;
/// use zipdir_core::walker::FileWalker;
///
/// let config = ArchiveConfig::default();
/// for file in FileWalker::new(Path::new("./project"), &config).walk() {
///     println!("{}", file?.path.display());
/// }
/// # Ok::<(), zipdir_core::ArchiveError>(())
/// ```
pub struct FileWalker<'a> {
    root: &'a Path,
    config: &'a ArchiveConfig,
}

impl<'a> FileWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path, config: &'a ArchiveConfig) -> Self {
        Self { root, config }
    }

    /// Returns an iterator over the regular files under the root.
    ///
    /// If the root is itself a regular file it is the only item. A symlink to
    /// a regular file is reported under the link's path. Symlinked
    /// directories are descended into only when `follow_symlinks` is set.
    ///
    /// # Errors
    ///
    /// Items are [`ArchiveError::Discovery`] when the root does not exist, a
    /// directory cannot be read, metadata is unavailable, a link is dangling,
    /// or (when following links) a link forms a cycle.
    pub fn walk(&self) -> impl Iterator<Item = Result<SourceFile>> + '_ {
        WalkDir::new(self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.source_file(&entry).transpose(),
                Err(e) => Some(Err(self.discovery_error(e))),
            })
    }

    fn source_file(&self, entry: &DirEntry) -> Result<Option<SourceFile>> {
        let file_type = entry.file_type();
        if file_type.is_dir() {
            return Ok(None);
        }
        if file_type.is_symlink() {
            return Self::linked_file(entry);
        }
        if !file_type.is_file() {
            debug!(path = %entry.path().display(), "skipping non-regular file");
            return Ok(None);
        }

        let metadata = entry.metadata().map_err(|e| self.discovery_error(e))?;
        Ok(Some(SourceFile {
            path: entry.path().to_path_buf(),
            size: metadata.len(),
        }))
    }

    /// Resolves an unfollowed symlink.
    ///
    /// A link to a regular file is archived under the link's own name. Links
    /// to directories are not descended into.
    fn linked_file(entry: &DirEntry) -> Result<Option<SourceFile>> {
        let path = entry.path();
        let metadata = fs::metadata(path).map_err(|source| ArchiveError::Discovery {
            path: path.to_path_buf(),
            source,
        })?;

        if !metadata.is_file() {
            debug!(path = %path.display(), "skipping symlink to non-regular file");
            return Ok(None);
        }
        Ok(Some(SourceFile {
            path: path.to_path_buf(),
            size: metadata.len(),
        }))
    }

    fn discovery_error(&self, err: walkdir::Error) -> ArchiveError {
        let path = err.path().unwrap_or(self.root).to_path_buf();
        ArchiveError::Discovery {
            path,
            source: io::Error::from(err),
        }
    }
}

/// Collects every regular file under `root`, or fails as a whole.
///
/// No partial list is ever returned: the first traversal error aborts the
/// walk.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipdir_core::ArchiveConfig;
/// use zipdir_core::walker::list_regular_files;
///
/// let files = list_regular_files(Path::new("./src"), &ArchiveConfig::default())?;
/// println!("{} files", files.len());
/// # Ok::<(), zipdir_core::ArchiveError>(())
/// ```
pub fn list_regular_files(root: &Path, config: &ArchiveConfig) -> Result<Vec<SourceFile>> {
    FileWalker::new(root, config).walk().collect()
}
