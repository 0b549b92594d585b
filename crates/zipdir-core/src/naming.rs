//! Input path normalization and archive/entry naming.
//!
//! Everything here is lexical: no function in this module touches the
//! filesystem, so validation failures never have side effects.

use crate::ArchiveError;
use crate::Result;
use std::ffi::OsStr;
use std::ffi::OsString;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use zip::result::ZipError;

/// Extension appended to the input's base name.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Lexically normalizes a path.
///
/// Removes empty and `.` segments and folds `name/..` pairs. A `..` directly
/// under the root is dropped, leading `..` segments of a relative path are
/// kept. An empty result becomes `.`.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipdir_core::naming::clean_path;
///
/// assert_eq!(clean_path(Path::new("a//b/./c/..")), Path::new("a/b"));
/// assert_eq!(clean_path(Path::new("a/../..")), Path::new(".."));
/// assert_eq!(clean_path(Path::new("")), Path::new("."));
/// ```
#[must_use]
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Normalizes and validates an input path.
///
/// Returns the cleaned path, or [`ArchiveError::InvalidPath`] when it is the
/// current or parent directory marker.
pub fn validate_input(path: &Path) -> Result<PathBuf> {
    let cleaned = clean_path(path);
    if cleaned == Path::new(".") || cleaned == Path::new("..") {
        return Err(ArchiveError::InvalidPath {
            path: path.to_path_buf(),
        });
    }
    Ok(cleaned)
}

/// Derives the archive file name for a cleaned input path.
///
/// The name is the input's base name with `.zip` appended, so `data/logs`
/// gives `logs.zip` and `notes.txt` gives `notes.txt.zip`. Paths without a
/// base name (a filesystem root, a trailing `..`) are rejected.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use zipdir_core::naming::archive_name;
///
/// let name = archive_name(Path::new("data/logs"))?;
/// assert_eq!(name, Path::new("logs.zip"));
/// assert!(archive_name(Path::new("/")).is_err());
/// # Ok::<(), zipdir_core::ArchiveError>(())
/// ```
pub fn archive_name(cleaned: &Path) -> Result<PathBuf> {
    let base = cleaned
        .file_name()
        .filter(|name| {
            !name.is_empty() && *name != OsStr::new(".") && *name != OsStr::new("..")
        })
        .ok_or_else(|| ArchiveError::InvalidPath {
            path: cleaned.to_path_buf(),
        })?;

    let mut name = OsString::from(base);
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    Ok(PathBuf::from(name))
}

/// Computes the archive entry name for a discovered file.
///
/// The name is the file's path relative to `root`, joined with `/` on every
/// platform. When `root` is the file itself the name is its bare file name.
pub fn entry_name(file: &Path, root: &Path) -> Result<String> {
    let relative = match file.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => file
            .file_name()
            .map(Path::new)
            .ok_or_else(|| invalid_entry(file, "file has no name"))?,
        Ok(rel) => rel,
        Err(_) => return Err(invalid_entry(file, "file is outside the input root")),
    };

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part
                    .to_str()
                    .ok_or_else(|| invalid_entry(relative, "path is not valid UTF-8"))?;
                parts.push(part);
            }
            _ => return Err(invalid_entry(relative, "path is not relative")),
        }
    }

    if parts.is_empty() {
        return Err(invalid_entry(relative, "path is empty"));
    }
    Ok(parts.join("/"))
}

fn invalid_entry(path: &Path, reason: &'static str) -> ArchiveError {
    ArchiveError::EntryCreate {
        name: path.to_string_lossy().into_owned(),
        source: ZipError::Io(io::Error::new(io::ErrorKind::InvalidInput, reason)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_path_removes_redundancy() {
        assert_eq!(clean_path(Path::new("a/b/")), Path::new("a/b"));
        assert_eq!(clean_path(Path::new("a//b")), Path::new("a/b"));
        assert_eq!(clean_path(Path::new("./a/./b")), Path::new("a/b"));
        assert_eq!(clean_path(Path::new("a/b/../c")), Path::new("a/c"));
    }

    #[test]
    fn test_clean_path_markers() {
        assert_eq!(clean_path(Path::new(".")), Path::new("."));
        assert_eq!(clean_path(Path::new("./")), Path::new("."));
        assert_eq!(clean_path(Path::new("a/..")), Path::new("."));
        assert_eq!(clean_path(Path::new("..")), Path::new(".."));
        assert_eq!(clean_path(Path::new("../")), Path::new(".."));
        assert_eq!(clean_path(Path::new("../../a")), Path::new("../../a"));
    }

    #[cfg(unix)]
    #[test]
    fn test_clean_path_absolute() {
        assert_eq!(clean_path(Path::new("/")), Path::new("/"));
        assert_eq!(clean_path(Path::new("/..")), Path::new("/"));
        assert_eq!(clean_path(Path::new("/tmp/../var/")), Path::new("/var"));
    }

    #[test]
    fn test_validate_input_rejects_markers() {
        for input in ["", ".", "./", "..", "../", "a/..", "a/b/../.."] {
            let err = validate_input(Path::new(input)).unwrap_err();
            assert!(
                matches!(err, ArchiveError::InvalidPath { .. }),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_input_keeps_original_in_error() {
        let err = validate_input(Path::new("a/..")).unwrap_err();
        assert_eq!(err.path(), Some(Path::new("a/..")));
    }

    #[test]
    fn test_archive_name() {
        assert_eq!(
            archive_name(Path::new("myfile.txt")).unwrap(),
            Path::new("myfile.txt.zip")
        );
        assert_eq!(
            archive_name(Path::new("some/dir")).unwrap(),
            Path::new("dir.zip")
        );
        assert_eq!(
            archive_name(Path::new("../sibling")).unwrap(),
            Path::new("sibling.zip")
        );
    }

    #[test]
    fn test_archive_name_without_base() {
        assert!(archive_name(Path::new("..")).is_err());
        assert!(archive_name(Path::new("../..")).is_err());
        #[cfg(unix)]
        assert!(archive_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_entry_name_relative_to_root() {
        let root = Path::new("input");
        assert_eq!(
            entry_name(Path::new("input/file1.txt"), root).unwrap(),
            "file1.txt"
        );
        assert_eq!(
            entry_name(Path::new("input/subdir/nested.txt"), root).unwrap(),
            "subdir/nested.txt"
        );
    }

    #[test]
    fn test_entry_name_single_file_root() {
        let file = Path::new("docs/report.pdf");
        assert_eq!(entry_name(file, file).unwrap(), "report.pdf");
    }

    #[test]
    fn test_entry_name_outside_root() {
        let err = entry_name(Path::new("other/file.txt"), Path::new("input")).unwrap_err();
        assert!(matches!(err, ArchiveError::EntryCreate { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_entry_name_non_utf8() {
        use std::os::unix::ffi::OsStrExt;

        let root = Path::new("input");
        let file = root.join(OsStr::from_bytes(b"bad\xffname"));
        let err = entry_name(&file, root).unwrap_err();
        assert!(matches!(err, ArchiveError::EntryCreate { .. }));
    }
}
