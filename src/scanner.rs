/*!
 * Directory traversal and content aggregation
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Limits;
use crate::filter::IgnoreFilter;
use crate::format::{child_indent, format_entry, format_header};
use crate::platform::Platform;

const MODULE: &str = "scanner";

/// Shared file-count/byte budget for one bounded aggregation call.
///
/// Threaded `&mut` through the whole recursion; `limit_reached` is a
/// one-shot latch so the truncation warning fires exactly once no matter
/// how deep the walk is when the budget runs out.
#[derive(Debug)]
struct ContentBudget {
    files: usize,
    bytes: u64,
    max_files: usize,
    max_bytes: u64,
    limit_reached: bool,
}

impl ContentBudget {
    fn new(max_files: usize, max_size_kb: u64) -> Self {
        Self {
            files: 0,
            bytes: 0,
            max_files,
            max_bytes: max_size_kb * 1024,
            limit_reached: false,
        }
    }

    /// Whether a file of `size` bytes still fits.
    fn admits(&self, size: u64) -> bool {
        self.files < self.max_files && self.bytes + size <= self.max_bytes
    }

    fn consume(&mut self, size: u64) {
        self.files += 1;
        self.bytes += size;
    }
}

/// One directory level, already filtered, partitioned and sorted.
struct Listing {
    dirs: Vec<String>,
    files: Vec<String>,
}

/// Walks directory subtrees and renders them as text.
pub struct Scanner<'a> {
    platform: &'a dyn Platform,
    extra_ignores: &'a [String],
}

impl<'a> Scanner<'a> {
    pub fn new(platform: &'a dyn Platform, extra_ignores: &'a [String]) -> Self {
        Self {
            platform,
            extra_ignores,
        }
    }

    /// Render the tree structure of `dir`.
    ///
    /// The ignore filter is built once here and passed down through every
    /// recursive call.
    pub fn folder_structure(&self, dir: &Path) -> String {
        let dir = absolute_path(dir);
        let root = self.filter_root(&dir);
        let filter = IgnoreFilter::build(&root, self.extra_ignores, self.platform);
        self.structure_with(&dir, &filter)
    }

    /// Render the tree structure of `dir` followed by the contents of every
    /// non-ignored file beneath it, within `limits`.
    pub fn folder_structure_and_content(&self, dir: &Path, limits: &Limits) -> String {
        let dir = absolute_path(dir);
        let root = self.filter_root(&dir);
        let filter = IgnoreFilter::build(&root, self.extra_ignores, self.platform);

        let mut content = self.structure_with(&dir, &filter);
        let mut budget = ContentBudget::new(limits.max_files, limits.max_size_kb);
        self.append_contents(&dir, &filter, &mut budget, limits, &mut content);
        content
    }

    /// Concatenate the given files as `header + content` blocks, within the
    /// ad hoc copy ceiling.
    pub fn files_with_header(&self, paths: &[PathBuf], limits: &Limits) -> String {
        let max_bytes = limits.max_copy_size_kb * 1024;
        let mut total: u64 = 0;
        let mut blocks: Vec<String> = Vec::new();

        for path in paths {
            let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            if total + size > max_bytes {
                let warning = format!(
                    "Reached limit: {} files or {} KB total",
                    blocks.len(),
                    limits.max_copy_size_kb
                );
                self.platform.show_warning(&warning);
                self.platform.log_warn(&warning, MODULE, Some(path));
                break;
            }

            let text = self.read_file_content(path);
            blocks.push(format!("File: {}\n{}", path.display(), text));
            total += size;
        }

        blocks.join("\n\n")
    }

    /// Root the ignore rules are anchored to: the workspace root when the
    /// host knows one, otherwise the scanned directory itself.
    fn filter_root(&self, dir: &Path) -> PathBuf {
        self.platform
            .workspace_root()
            .unwrap_or_else(|| dir.to_path_buf())
    }

    fn structure_with(&self, dir: &Path, filter: &IgnoreFilter) -> String {
        let mut structure = format_header(&file_name_string(filter.root()), dir);
        structure.push_str(&format!("{}/\n", file_name_string(dir)));
        structure.push_str(&self.traverse(dir, filter, ""));
        structure
    }

    /// Recursive tree walk. Directories render before files, each group
    /// sorted by name regardless of the order the filesystem lists them.
    fn traverse(&self, dir: &Path, filter: &IgnoreFilter, indent: &str) -> String {
        let mut structure = String::new();
        let listing = self.list_level(dir, filter);

        let dir_count = listing.dirs.len();
        for (index, name) in listing.dirs.iter().enumerate() {
            let is_last = index == dir_count - 1 && listing.files.is_empty();
            structure.push_str(&format_entry(name, indent, is_last));

            // A child with no visible entries contributes an empty string,
            // which renders the same as not recursing at all — no lookahead
            // listing is needed to decide.
            structure.push_str(&self.traverse(
                &dir.join(name),
                filter,
                &child_indent(indent, is_last),
            ));
        }

        let file_count = listing.files.len();
        for (index, name) in listing.files.iter().enumerate() {
            structure.push_str(&format_entry(name, indent, index == file_count - 1));
        }

        structure
    }

    /// Append file contents beneath `dir` in directories-then-files sorted
    /// order. Returns `false` once the walk must stop.
    fn append_contents(
        &self,
        dir: &Path,
        filter: &IgnoreFilter,
        budget: &mut ContentBudget,
        limits: &Limits,
        out: &mut String,
    ) -> bool {
        let listing = self.list_level(dir, filter);

        for name in &listing.dirs {
            if !self.append_contents(&dir.join(name), filter, budget, limits, out) {
                return false;
            }
        }

        for name in &listing.files {
            let path = dir.join(name);
            let size = match fs::metadata(&path) {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    self.platform.log_error(
                        &format!("Failed to stat: {}", err),
                        MODULE,
                        Some(&path),
                    );
                    continue;
                }
            };

            if !budget.admits(size) {
                if !budget.limit_reached {
                    budget.limit_reached = true;
                    let warning = format!(
                        "Reached limit: {} files or {} KB total",
                        budget.files, limits.max_size_kb
                    );
                    self.platform.show_warning(&warning);
                    self.platform.log_warn(&warning, MODULE, Some(dir));
                }
                return false;
            }

            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(err) => {
                    // Skipped files do not count against the budget
                    self.platform.log_error(
                        &format!("Failed to read file: {}", err),
                        MODULE,
                        Some(&path),
                    );
                    continue;
                }
            };

            out.push_str(&format!("\n\nFile: {}\n{}", path.display(), text));
            budget.consume(size);
        }

        true
    }

    /// List one directory level: filter, partition into directories and
    /// files, sort each group. Entries that cannot be listed or statted are
    /// skipped; the walk never aborts.
    fn list_level(&self, dir: &Path, filter: &IgnoreFilter) -> Listing {
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let message = format!("Failed to read directory: {}", err);
                    self.platform.show_error(&message);
                    self.platform.log_error(&message, MODULE, Some(dir));
                    continue;
                }
            };

            // Follow symlinks so a linked directory sorts as a directory
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(err) => {
                    self.platform.log_error(
                        &format!("Failed to stat: {}", err),
                        MODULE,
                        Some(entry.path()),
                    );
                    continue;
                }
            };

            if filter.is_ignored(entry.path(), metadata.is_dir()) {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if metadata.is_dir() {
                dirs.push(name);
            } else if metadata.is_file() {
                files.push(name);
            }
        }

        dirs.sort();
        files.sort();
        Listing { dirs, files }
    }

    /// Read a file for inclusion, reporting failures and yielding an empty
    /// block so the batch keeps going.
    fn read_file_content(&self, path: &Path) -> String {
        match fs::read_to_string(path) {
            Ok(text) => {
                self.platform.log_info(
                    &format!("Read file content: {}", path.display()),
                    MODULE,
                    Some(path),
                );
                text
            }
            Err(err) => {
                self.platform
                    .show_error(&format!("Failed to read file: {}", err));
                self.platform.log_error(
                    &format!("Failed to read file: {} - {}", path.display(), err),
                    MODULE,
                    Some(path),
                );
                String::new()
            }
        }
    }
}

fn file_name_string(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
