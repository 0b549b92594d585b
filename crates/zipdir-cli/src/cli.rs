//! CLI argument parsing using clap.

use clap::Parser;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "zipdir")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or directory to compress
    #[arg(
        value_name = "PATH",
        required_unless_present = "path_flag",
        conflicts_with = "path_flag"
    )]
    pub path: Option<PathBuf>,

    /// File or directory to compress (same as the positional PATH)
    #[arg(short = 'p', long = "path", id = "path_flag", value_name = "PATH")]
    pub path_flag: Option<PathBuf>,

    /// Directory to write the archive to (default: current directory)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Descend into symlinked directories while scanning
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Store Unix permission bits in the archive
    #[arg(long)]
    pub preserve_permissions: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Print only the archive path
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Returns the input path, from whichever form was given.
    pub fn input(&self) -> &Path {
        self.path
            .as_deref()
            .or(self.path_flag.as_deref())
            .unwrap_or_else(|| Path::new(""))
    }
}
