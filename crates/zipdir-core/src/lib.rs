//! All-or-nothing ZIP archiving of a single file or a directory tree.
//!
//! `zipdir-core` turns one filesystem path into one `<basename>.zip` archive
//! holding every regular file under that path, named relative to it. Either
//! the archive is fully written and sealed, or nothing is left on disk.
//!
//! # Examples
//!
//! ```no_run
//! use zipdir_core::compress;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = compress("reports/2024")?;
//! assert_eq!(archive.to_str(), Some("2024.zip"));
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archiver;
pub mod config;
pub mod copy;
pub mod error;
pub mod naming;
pub mod pending;
pub mod report;
pub mod walker;

pub use archiver::Archiver;
pub use archiver::compress;
pub use config::ArchiveConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use error::Stage;
pub use report::ArchiveReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
