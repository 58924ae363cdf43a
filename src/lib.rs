/*!
 * clipdir - Copy directory structure and file contents for sharing
 *
 * This library renders gitignore-filtered directory trees (optionally with
 * file contents, within size limits) as plain text, and safely materializes
 * files and folders from pasted path lists without letting any path escape
 * the workspace root.
 */

pub mod clipboard;
pub mod config;
pub mod create;
pub mod error;
pub mod filter;
pub mod format;
pub mod platform;
pub mod resolve;
pub mod scanner;


// Re-export main components for easier access
pub use config::{Args, Command, Config, Limits};
pub use create::{create_from_text, CreateSummary};
pub use error::{ClipdirError, Result};
pub use filter::IgnoreFilter;
pub use format::{format_entry, format_header};
pub use platform::{deliver, CliPlatform, Platform};
pub use resolve::{base_directory, resolve_target_path, ResolvedTarget, TargetKind};
pub use scanner::Scanner;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
