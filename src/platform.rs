/*!
 * Host capability surface
 *
 * The core never talks to an output medium, a message box or a logger
 * directly; it receives a [`Platform`] once and calls through it. One
 * implementation exists per deployment target — the CLI one lives here,
 * writing snapshots to stdout (or the system clipboard) and messages to
 * stderr.
 */

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::clipboard;
use crate::error::Result;

/// Capabilities the core needs from its host.
///
/// User-visible messages (`show_*`) and observability records (`log_*`) are
/// distinct channels: every failure surfaced to the user is also logged, but
/// routine log traffic never reaches the user.
pub trait Platform {
    /// Hand the assembled snapshot to the output sink. Failure here is the
    /// terminal failure of the whole operation.
    fn write_text(&self, text: &str) -> Result<()>;

    fn show_info(&self, message: &str);
    fn show_warning(&self, message: &str);
    fn show_error(&self, message: &str);

    fn log_info(&self, message: &str, module: &str, path: Option<&Path>);
    fn log_warn(&self, message: &str, module: &str, path: Option<&Path>);
    fn log_error(&self, message: &str, module: &str, path: Option<&Path>);

    /// Currently active workspace root, if the host knows one.
    fn workspace_root(&self) -> Option<PathBuf>;
}

/// Write `text` through the platform sink, reporting the outcome.
///
/// On success the user sees `success_message`; on failure the error is both
/// shown and logged before being returned to the caller.
pub fn deliver(platform: &dyn Platform, text: &str, success_message: &str) -> Result<()> {
    match platform.write_text(text) {
        Ok(()) => {
            platform.show_info(success_message);
            let preview: String = text.chars().take(50).collect();
            platform.log_info(
                &format!("Delivered output: {}...", preview),
                "platform",
                None,
            );
            Ok(())
        }
        Err(err) => {
            platform.show_error(&format!("Failed to write output: {}", err));
            platform.log_error(&format!("Output sink failed: {}", err), "platform", None);
            Err(err)
        }
    }
}

/// CLI implementation of [`Platform`].
///
/// Snapshots go to stdout so they can be piped to any clipboard tool, or to
/// the system clipboard directly when `clip` is set. Messages go to stderr;
/// log records too, but only when `verbose` is on, so piped output stays
/// clean.
pub struct CliPlatform {
    root: Option<PathBuf>,
    clip: bool,
    verbose: bool,
}

impl CliPlatform {
    pub fn new(root: Option<PathBuf>, clip: bool, verbose: bool) -> Self {
        Self {
            root,
            clip,
            verbose,
        }
    }

    fn log(&self, level: &str, message: &str, module: &str, path: Option<&Path>) {
        if !self.verbose {
            return;
        }
        let suffix = match path {
            Some(p) => format!(" [File: {}]", self.relative_display(p)),
            None => String::new(),
        };
        eprintln!("[{}] [{}] {}{}", level, module, message, suffix);
    }

    /// Log records show paths relative to the workspace root when they are
    /// under it, absolute otherwise.
    fn relative_display(&self, path: &Path) -> String {
        match self.workspace_root() {
            Some(root) => path
                .strip_prefix(&root)
                .unwrap_or(path)
                .display()
                .to_string(),
            None => path.display().to_string(),
        }
    }
}

impl Platform for CliPlatform {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.clip {
            clipboard::copy_to_clipboard(text)?;
            return Ok(());
        }
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }

    fn show_info(&self, message: &str) {
        eprintln!("[info]  {}", message);
    }

    fn show_warning(&self, message: &str) {
        eprintln!("[warn]  {}", message);
    }

    fn show_error(&self, message: &str) {
        eprintln!("[error] {}", message);
    }

    fn log_info(&self, message: &str, module: &str, path: Option<&Path>) {
        self.log("INFO", message, module, path);
    }

    fn log_warn(&self, message: &str, module: &str, path: Option<&Path>) {
        self.log("WARN", message, module, path);
    }

    fn log_error(&self, message: &str, module: &str, path: Option<&Path>) {
        self.log("ERROR", message, module, path);
    }

    fn workspace_root(&self) -> Option<PathBuf> {
        match &self.root {
            Some(root) => Some(std::path::absolute(root).unwrap_or_else(|_| root.clone())),
            None => env::current_dir().ok(),
        }
    }
}
