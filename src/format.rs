/*!
 * Pure text rendering for tree output
 *
 * No I/O happens here; the scanner decides what to render and in which
 * order, this module only turns names into lines.
 */

use std::path::Path;

/// Render a single tree entry.
///
/// `indent` is the accumulated prefix for this depth; `is_last` selects the
/// closing connector for the final sibling of a level.
pub fn format_entry(name: &str, indent: &str, is_last: bool) -> String {
    let connector = if is_last { "┗ " } else { "┣ " };
    format!("{}{}{}\n", indent, connector, name)
}

/// Render the two-line header that precedes every snapshot: the display name
/// of the root followed by the absolute path being rendered.
pub fn format_header(display_name: &str, absolute_path: &Path) -> String {
    format!("{}\nPath: {}\n", display_name, absolute_path.display())
}

/// Indent extension for the children of a directory entry: a vertical rail
/// while further siblings follow, blank space under the last sibling.
pub fn child_indent(indent: &str, is_last: bool) -> String {
    let extension = if is_last { "  " } else { "┃ " };
    format!("{}{}", indent, extension)
}
