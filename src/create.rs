/*!
 * Batch creation of files and folders from pasted text
 *
 * Each non-empty line of the input names one entry to create. Lines are
 * independent: a failing line is counted and the batch moves on, and the
 * user gets a single summary at the end.
 */

use std::fs;
use std::path::Path;

use crate::platform::Platform;
use crate::resolve::{base_directory, is_valid_line, resolve_target_path, TargetKind};

const MODULE: &str = "create";

/// Outcome counts for one creation batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CreateSummary {
    pub files_created: usize,
    pub folders_created: usize,
    pub errors: usize,
}

impl CreateSummary {
    /// User-facing summary line for the batch.
    pub fn message(&self) -> String {
        let mut summary = format!(
            "Created {} file(s) and {} folder(s).",
            self.files_created, self.folders_created
        );
        if self.errors > 0 {
            summary.push_str(&format!(
                " {} item(s) could not be created due to errors.",
                self.errors
            ));
        }
        summary
    }
}

/// Create a file or folder for every non-empty line of `text`.
///
/// `target` is the directory the user indicated (a file's parent is used
/// when they indicated a file). A line ending in a path separator creates a
/// directory; any other line creates an empty file, with parent directories
/// created as needed. Nothing is created for a line that fails validation
/// or confinement.
pub fn create_from_text(text: &str, target: &Path, platform: &dyn Platform) -> CreateSummary {
    let mut summary = CreateSummary::default();

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        let message = "Input is empty or contains only whitespace.";
        platform.show_error(message);
        platform.log_error(message, MODULE, None);
        return summary;
    }

    let base_dir = match base_directory(target, platform) {
        Some(dir) => dir,
        None => {
            let message = "Unable to determine the base directory.";
            platform.show_error(message);
            platform.log_error(message, MODULE, Some(target));
            return summary;
        }
    };

    for line in lines {
        if !is_valid_line(line) {
            platform.show_error(&format!("Invalid path: '{}'", line));
            platform.log_error(&format!("Invalid path: {}", line), MODULE, None);
            summary.errors += 1;
            continue;
        }

        let resolved = match resolve_target_path(line, &base_dir, platform) {
            Some(resolved) => resolved,
            None => {
                // resolve_target_path already reported why
                summary.errors += 1;
                continue;
            }
        };

        let outcome = match resolved.kind {
            TargetKind::Directory => fs::create_dir_all(&resolved.path),
            TargetKind::File => {
                ensure_parent(&resolved.path).and_then(|_| fs::write(&resolved.path, ""))
            }
        };

        match outcome {
            Ok(()) => match resolved.kind {
                TargetKind::Directory => {
                    summary.folders_created += 1;
                    platform.log_info(
                        &format!("Created folder: {}", resolved.path.display()),
                        MODULE,
                        Some(&resolved.path),
                    );
                }
                TargetKind::File => {
                    summary.files_created += 1;
                    platform.log_info(
                        &format!("Created file: {}", resolved.path.display()),
                        MODULE,
                        Some(&resolved.path),
                    );
                }
            },
            Err(err) => {
                platform.show_error(&format!("Failed to create: {} - {}", line, err));
                platform.log_error(
                    &format!("Error creating path: {} - {}", resolved.path.display(), err),
                    MODULE,
                    Some(&resolved.path),
                );
                summary.errors += 1;
            }
        }
    }

    let message = summary.message();
    platform.show_info(&message);
    platform.log_info(&message, MODULE, None);
    summary
}

fn ensure_parent(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
