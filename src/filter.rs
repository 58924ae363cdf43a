/*!
 * Ignore-pattern filtering
 *
 * Compiles the root exclusion file plus caller-supplied patterns into one
 * reusable matcher. The matcher is built once per traversal root and shared
 * by reference through the whole recursion; rebuilding it per directory
 * re-reads the exclusion file on every level.
 */

use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::platform::Platform;

const MODULE: &str = "filter";

/// Name of the exclusion file read from the traversal root
pub const IGNORE_FILE: &str = ".gitignore";

/// Compiled ignore rules, anchored to a fixed root.
pub struct IgnoreFilter {
    root: PathBuf,
    matcher: Gitignore,
}

impl IgnoreFilter {
    /// Compile `<root>/.gitignore` (when present) together with
    /// `extra_patterns` into a matcher.
    ///
    /// A missing or unreadable exclusion file is not an error: the event is
    /// logged and filtering continues with the remaining patterns. Extra
    /// patterns are added before the file's rules, so rules from the file
    /// win conflicts.
    pub fn build(root: &Path, extra_patterns: &[String], platform: &dyn Platform) -> Self {
        let mut builder = GitignoreBuilder::new(root);

        for pattern in extra_patterns {
            if let Err(err) = builder.add_line(None, pattern) {
                platform.log_error(
                    &format!("Skipping invalid ignore pattern '{}': {}", pattern, err),
                    MODULE,
                    None,
                );
            }
        }

        let ignore_file = root.join(IGNORE_FILE);
        if ignore_file.exists() {
            if let Some(err) = builder.add(&ignore_file) {
                platform.log_error(
                    &format!("Failed to read {}: {}", IGNORE_FILE, err),
                    MODULE,
                    Some(&ignore_file),
                );
            }
        }

        let matcher = builder.build().unwrap_or_else(|err| {
            platform.log_error(
                &format!("Failed to compile ignore rules: {}", err),
                MODULE,
                Some(root),
            );
            Gitignore::empty()
        });

        Self {
            root: root.to_path_buf(),
            matcher,
        }
    }

    /// Whether the entry at `absolute` is excluded.
    ///
    /// The probe is matched relative to the build root. `is_dir` must be
    /// accurate: directory patterns (`build/`) only match when the flag is
    /// set, and passing a stale value silently breaks them.
    pub fn is_ignored(&self, absolute: &Path, is_dir: bool) -> bool {
        let relative = absolute.strip_prefix(&self.root).unwrap_or(absolute);
        self.matcher.matched(relative, is_dir).is_ignore()
    }

    /// Root the rules are anchored to.
    pub fn root(&self) -> &Path {
        &self.root
    }
}
