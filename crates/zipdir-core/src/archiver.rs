//! Compression of one path into one ZIP archive.
//!
//! A run moves through the [`Stage`](crate::Stage)s in order. Validation and
//! discovery happen before the destination exists, so their failures leave
//! nothing behind. From creation onward the archive is held by a
//! [`PendingArchive`] and any failure rolls it back before the error is
//! returned.

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::ArchiveReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::config::WRITE_BUFFER_SIZE;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::naming;
use crate::pending::PendingArchive;
use crate::walker::SourceFile;
use crate::walker::list_regular_files;
use std::fs;
use std::fs::File;
use std::io::BufWriter;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::info_span;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::result::ZipError;
use zip::write::SimpleFileOptions;

/// Entries at or above this size need ZIP64 extensions.
const ZIP64_THRESHOLD: u64 = 0xFFFF_FFFF;

/// Compresses files and directory trees into `<basename>.zip` archives.
///
/// An `Archiver` holds no state besides its configuration; concurrent runs
/// on different inputs are independent. Two runs that resolve to the same
/// destination race, and the last one to finish wins.
///
/// # Examples
///
/// ```no_run
/// use zipdir_core::ArchiveConfig;
/// use zipdir_core::Archiver;
///
/// let archiver = Archiver::new(ArchiveConfig::default().with_output_dir("/tmp"));
/// let report = archiver.compress("project/assets")?;
/// println!(
///     "{}: {} files",
///     report.archive_path.display(),
///     report.files_added
/// );
/// # Ok::<(), zipdir_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    config: ArchiveConfig,
}

impl Archiver {
    /// Creates an archiver with the given configuration.
    #[must_use]
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// Compresses `input` into an archive.
    ///
    /// # Errors
    ///
    /// See [`Archiver::compress_with_progress`].
    pub fn compress(&self, input: impl AsRef<Path>) -> Result<ArchiveReport> {
        self.compress_with_progress(input, &mut NoopProgress)
    }

    /// Compresses `input` into an archive, reporting progress per file.
    ///
    /// The archive is named after the input's base name and placed in the
    /// configured output directory (the working directory by default). Entry
    /// names are the files' paths relative to `input`.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::InvalidPath`] if `input` normalizes to `.`/`..` or
    ///   has no base name; nothing is touched.
    /// - [`ArchiveError::Discovery`] if the tree cannot be walked; no archive
    ///   is created.
    /// - [`ArchiveError::Create`], [`ArchiveError::Read`],
    ///   [`ArchiveError::EntryCreate`], [`ArchiveError::Copy`] or
    ///   [`ArchiveError::Finalize`] for failures while writing; the partial
    ///   archive has been removed.
    /// - [`ArchiveError::Cleanup`] if that removal failed. The archive may
    ///   remain on disk and callers should treat this as fatal.
    pub fn compress_with_progress(
        &self,
        input: impl AsRef<Path>,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ArchiveReport> {
        let input = input.as_ref();
        let span = info_span!("compress", input = %input.display());
        let _enter = span.enter();
        let start = Instant::now();

        let root = naming::validate_input(input)?;
        let destination = self.config.destination(&naming::archive_name(&root)?);

        let mut files = list_regular_files(&root, &self.config)?;
        exclude_destination(&mut files, &destination);
        debug!(files = files.len(), root = %root.display(), "discovery complete");

        let mut pending = PendingArchive::create(&destination)?;
        let written = match write_archive(
            pending.file_mut(),
            &destination,
            &root,
            &files,
            &self.config,
            progress,
        ) {
            Ok(written) => written,
            Err(err) => return Err(pending.rollback(err)),
        };
        let archive_path = pending.commit();

        progress.on_complete();

        let report = ArchiveReport {
            archive_path,
            files_added: files.len(),
            bytes_read: written.bytes_read,
            bytes_compressed: written.bytes_compressed,
            duration: start.elapsed(),
        };
        info!(
            archive = %report.archive_path.display(),
            files = report.files_added,
            bytes = report.bytes_read,
            "archive created"
        );
        Ok(report)
    }
}

/// Compresses `input` into `<basename>.zip` in the working directory.
///
/// Returns the archive path, which is the bare archive file name.
///
/// # Examples
///
/// ```no_run
/// let archive = zipdir_core::compress("notes/todo.txt")?;
/// assert_eq!(archive.to_str(), Some("todo.txt.zip"));
/// # Ok::<(), zipdir_core::ArchiveError>(())
/// ```
pub fn compress(input: impl AsRef<Path>) -> Result<PathBuf> {
    Archiver::default()
        .compress(input)
        .map(|report| report.archive_path)
}

#[derive(Debug, Default)]
struct WriteSummary {
    bytes_read: u64,
    bytes_compressed: u64,
}

/// Drops a stale copy of the destination archive from the file set.
///
/// Happens when the input tree contains the output directory and a previous
/// run left its archive there; reading it while truncating it would corrupt
/// the new archive.
fn exclude_destination(files: &mut Vec<SourceFile>, destination: &Path) {
    let Some(name) = destination.file_name() else {
        return;
    };
    let Ok(target) = fs::canonicalize(destination) else {
        return;
    };

    files.retain(|file| {
        let same = file.path.file_name() == Some(name)
            && fs::canonicalize(&file.path).is_ok_and(|p| p == target);
        if same {
            debug!(path = %file.path.display(), "skipping previous copy of destination archive");
        }
        !same
    });
}

/// Writes every file into a ZIP archive over `sink` and seals it.
fn write_archive<W: Write + Seek>(
    sink: W,
    destination: &Path,
    root: &Path,
    files: &[SourceFile],
    config: &ArchiveConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<WriteSummary> {
    let mut zip = ZipWriter::new(BufWriter::with_capacity(WRITE_BUFFER_SIZE, sink));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut buffer = CopyBuffer::new();
    let mut summary = WriteSummary::default();

    let total = files.len();
    for (idx, file) in files.iter().enumerate() {
        progress.on_entry_start(&file.path, total, idx + 1);
        summary.bytes_read +=
            add_file(&mut zip, file, root, config, options, &mut buffer, progress)?;
        progress.on_entry_complete(&file.path);
    }

    let finalize_err = |source: ZipError| ArchiveError::Finalize {
        path: destination.to_path_buf(),
        source,
    };
    let writer = zip.finish().map_err(finalize_err)?;
    let mut sink = writer
        .into_inner()
        .map_err(|e| finalize_err(ZipError::Io(e.into_error())))?;
    summary.bytes_compressed = sink
        .stream_position()
        .map_err(|e| finalize_err(ZipError::Io(e)))?;

    Ok(summary)
}

/// Adds one file as an entry and returns the number of bytes copied.
///
/// The source handle is closed when this returns, on success or failure.
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    file: &SourceFile,
    root: &Path,
    config: &ArchiveConfig,
    options: SimpleFileOptions,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let read_err = |source| ArchiveError::Read {
        path: file.path.clone(),
        source,
    };
    let mut input = File::open(&file.path).map_err(read_err)?;
    let name = naming::entry_name(&file.path, root)?;

    let mut options = options.large_file(file.size >= ZIP64_THRESHOLD);
    if config.preserve_permissions {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = input.metadata().map_err(read_err)?.permissions().mode();
            options = options.unix_permissions(mode);
        }
    }

    zip.start_file(name.as_str(), options)
        .map_err(|source| ArchiveError::EntryCreate {
            name: name.clone(),
            source,
        })?;

    let copied = copy_with_buffer(&mut input, zip, buffer, progress).map_err(|source| {
        ArchiveError::Copy {
            path: file.path.clone(),
            source,
        }
    })?;

    debug!(entry = %name, bytes = copied, "added entry");
    Ok(copied)
}
