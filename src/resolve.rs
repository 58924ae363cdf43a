/*!
 * Path resolution and confinement
 *
 * Turns one line of pasted text into a concrete filesystem target and
 * guarantees the result cannot land outside the allowed root — not through
 * `..` segments, not through an absolute path, not through a symlinked
 * parent. A path that fails here is never handed to a mutating call.
 */

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::platform::Platform;

const MODULE: &str = "resolve";

#[cfg(windows)]
static INVALID_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1F]"#).unwrap());
#[cfg(not(windows))]
static INVALID_SEGMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[/\x00]").unwrap());

/// What a resolved line asks to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    File,
    Directory,
}

/// A creation target that has passed confinement validation.
///
/// Only values of this type may reach a mutating filesystem call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub path: PathBuf,
    pub kind: TargetKind,
}

/// Base directory for bare-name creation: the directory itself, or the
/// parent when the user indicated a file.
pub fn base_directory(path: &Path, platform: &dyn Platform) -> Option<PathBuf> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_file() => path.parent().map(Path::to_path_buf),
        Ok(_) => Some(path.to_path_buf()),
        Err(err) => {
            let message = format!("Failed to determine the type of the selected item: {}", err);
            platform.show_error(&message);
            platform.log_error(&message, MODULE, Some(path));
            None
        }
    }
}

/// Validity pre-check for one input line, applied before any resolution:
/// the final segment must be legal on the host filesystem and no segment
/// may be a literal `..`.
pub fn is_valid_line(line: &str) -> bool {
    let trimmed = line.trim_end_matches(['/', '\\']);
    let base_name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    if INVALID_SEGMENT.is_match(base_name) {
        return false;
    }
    !line.split(['/', '\\']).any(|segment| segment == "..")
}

/// Resolve one line to a creation target.
///
/// Rules, in order: an absolute line is taken as-is; a line containing a
/// separator resolves from the workspace root; a bare name resolves from
/// `base_dir`. Whichever rule fired, the result must stay inside the
/// allowed root — the workspace root when known, otherwise `base_dir`. A
/// trailing separator marks the line as a directory-creation request.
pub fn resolve_target_path(
    line: &str,
    base_dir: &Path,
    platform: &dyn Platform,
) -> Option<ResolvedTarget> {
    let input = Path::new(line);

    let candidate = if input.is_absolute() {
        normalize(input)
    } else if line.contains('/') || line.contains('\\') {
        match platform.workspace_root() {
            Some(root) => normalize(&root.join(input)),
            None => {
                let message = "No workspace found. Unable to determine relative path.";
                platform.show_error(message);
                platform.log_error(message, MODULE, None);
                return None;
            }
        }
    } else {
        normalize(&base_dir.join(input))
    };

    let allowed_root = platform
        .workspace_root()
        .unwrap_or_else(|| base_dir.to_path_buf());

    let kind = if line.ends_with('/') || line.ends_with('\\') {
        TargetKind::Directory
    } else {
        TargetKind::File
    };

    match confine(&candidate, &allowed_root) {
        Ok(path) => Some(ResolvedTarget { path, kind }),
        Err(err) => {
            let message = format!("Refusing '{}': {}", line, err);
            platform.show_error(&message);
            platform.log_error(&message, MODULE, Some(&candidate));
            None
        }
    }
}

/// Confinement check: the canonical form of `candidate` must equal the
/// canonical allowed root or live beneath it. Returns the canonical target.
fn confine(candidate: &Path, allowed_root: &Path) -> io::Result<PathBuf> {
    let root = fs::canonicalize(allowed_root)?;
    let real = canonicalize_nearest(candidate)?;

    if real == root || real.starts_with(&root) {
        Ok(real)
    } else {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "path resolves outside the allowed root",
        ))
    }
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the
/// components that do not exist yet.
///
/// Creation targets routinely name parents that are still to be created,
/// so plain canonicalization is not available; resolving the existing
/// prefix is what exposes a symlinked parent pointing elsewhere.
fn canonicalize_nearest(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut pending: Vec<OsString> = Vec::new();

    loop {
        match fs::canonicalize(&existing) {
            Ok(canonical) => {
                let mut real = canonical;
                for segment in pending.iter().rev() {
                    real.push(segment);
                }
                return Ok(real);
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => match existing.file_name() {
                Some(name) => {
                    pending.push(name.to_os_string());
                    existing = match existing.parent() {
                        Some(parent) => parent.to_path_buf(),
                        None => return Err(err),
                    };
                }
                None => return Err(err),
            },
            Err(err) => return Err(err),
        }
    }
}

/// Lexical normalization: collapses `.` segments and redundant separators
/// without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
