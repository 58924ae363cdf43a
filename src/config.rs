/*!
 * Configuration handling for clipdir
 */

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::ensure;
use crate::error::Result;

/// Command-line arguments for clipdir
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "clipdir",
    version = env!("CARGO_PKG_VERSION"),
    about = "Copy directory structure and file contents for sharing",
    long_about = "Renders a directory tree (optionally with file contents, within limits) \
                  as plain text for pasting elsewhere, and creates files or folders from \
                  pasted path lists. Exclusions follow .gitignore syntax."
)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Command,

    /// Workspace root anchoring ignore rules and relative-path creation
    /// (defaults to the current directory)
    #[clap(long, global = true)]
    pub root: Option<PathBuf>,

    /// Comma-separated list of extra ignore patterns (gitignore syntax)
    #[clap(long, value_delimiter = ',', global = true)]
    pub ignore_patterns: Vec<String>,

    /// Copy output to the system clipboard instead of stdout
    #[clap(long, global = true)]
    pub clip: bool,

    /// Emit log records to stderr
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

/// Operations exposed by the CLI
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the tree structure of a directory
    Structure {
        #[clap(default_value = ".")]
        dir: PathBuf,
    },

    /// Print the tree structure followed by file contents, within limits
    Content {
        #[clap(default_value = ".")]
        dir: PathBuf,

        /// Maximum number of files to include
        #[clap(long, default_value_t = Limits::DEFAULT_MAX_FILES)]
        max_files: usize,

        /// Ceiling on included content, in KB
        #[clap(long, default_value_t = Limits::DEFAULT_MAX_SIZE_KB)]
        max_size_kb: u64,
    },

    /// Print file contents with a path header per file
    Files {
        #[clap(required = true)]
        files: Vec<PathBuf>,

        /// Ceiling on copied content, in KB
        #[clap(long, default_value_t = Limits::DEFAULT_MAX_COPY_SIZE_KB)]
        max_copy_size_kb: u64,
    },

    /// Create files and folders from lines of text on stdin
    Create {
        /// Directory new entries are created in (bare names land here)
        #[clap(default_value = ".")]
        dir: PathBuf,
    },

    /// Print the workspace root path
    RootPath,

    /// Generate shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

/// Recognized tuning knobs for one operation.
///
/// Constructed once per operation from CLI flags (or defaults) and passed
/// explicitly; nothing reads configuration ambiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Caps the number of files a bounded aggregation includes
    pub max_files: usize,
    /// Caps aggregated content, in KB
    pub max_size_kb: u64,
    /// Separate ceiling for ad hoc multi-file copies, in KB
    pub max_copy_size_kb: u64,
}

impl Limits {
    pub const DEFAULT_MAX_FILES: usize = 10;
    pub const DEFAULT_MAX_SIZE_KB: u64 = 500;
    pub const DEFAULT_MAX_COPY_SIZE_KB: u64 = 500;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_files: Self::DEFAULT_MAX_FILES,
            max_size_kb: Self::DEFAULT_MAX_SIZE_KB,
            max_copy_size_kb: Self::DEFAULT_MAX_COPY_SIZE_KB,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Workspace root override, when given
    pub root: Option<PathBuf>,

    /// Extra ignore patterns applied on top of the exclusion file
    pub ignore_patterns: Vec<String>,

    /// Copy output to the system clipboard
    pub clip: bool,

    /// Emit log records
    pub verbose: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            root: args.root.clone(),
            ignore_patterns: args.ignore_patterns.clone(),
            clip: args.clip,
            verbose: args.verbose,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            ensure!(
                root.is_dir(),
                Config,
                "Workspace root not found: {}",
                root.display()
            );
        }
        Ok(())
    }
}
