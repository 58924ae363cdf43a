/*!
 * System clipboard support
 *
 * Used by the CLI platform when `--clip` is passed. The clipboard is driven
 * through whatever external command the system offers, picked by platform
 * detection; piping stdout to a clipboard tool remains the fallback when
 * none is found.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::OnceLock;

use thiserror::Error;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the clipboard command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Copy text to the system clipboard.
///
/// Tries the available mechanisms in order of preference for the detected
/// platform and pipes `text` into the first one that exists.
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let provider = available_providers()
        .into_iter()
        .next()
        .ok_or(ClipboardError::NoClipboardFound)?;
    provider.copy(text)
}

/// Check if a command exists on the system
pub fn command_exists(command: &str) -> bool {
    if let Ok(paths) = env::var("PATH") {
        for path in paths.split(':') {
            if Path::new(path).join(command).exists() {
                return true;
            }
        }
    }

    // Fall back to probing the command directly
    Command::new(command)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}

/// Clipboard mechanisms this module knows how to drive
#[derive(Debug, Clone, Copy)]
enum Provider {
    Tmux,
    Wayland,
    Xsel,
    Xclip,
    MacOs,
    Wsl,
    Termux,
}

impl Provider {
    fn command(&self) -> (&'static str, &'static [&'static str]) {
        match self {
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Wayland => ("wl-copy", &[]),
            Self::Xsel => ("xsel", &["-b", "-i"]),
            Self::Xclip => ("xclip", &["-selection", "clipboard", "-in"]),
            Self::MacOs => ("pbcopy", &[]),
            Self::Wsl => ("clip.exe", &[]),
            Self::Termux => ("termux-clipboard-set", &[]),
        }
    }

    fn copy(&self, text: &str) -> Result<()> {
        let (cmd, args) = self.command();

        let mut child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|_| ClipboardError::CommandFailed(format!("Failed to spawn {}", cmd)))?;

        let stdin = child.stdin.as_mut().ok_or_else(|| {
            ClipboardError::CommandFailed(format!("Failed to open stdin for {}", cmd))
        })?;
        stdin
            .write_all(text.as_bytes())
            .map_err(|_| ClipboardError::CommandFailed(format!("Failed to write to {}", cmd)))?;

        let status = child
            .wait()
            .map_err(|_| ClipboardError::CommandFailed(format!("Failed to wait for {}", cmd)))?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                cmd, status
            )))
        }
    }
}

static PLATFORM: OnceLock<&'static str> = OnceLock::new();

fn detect_platform() -> &'static str {
    PLATFORM.get_or_init(|| {
        if cfg!(target_os = "macos") {
            "macos"
        } else if cfg!(target_os = "windows") {
            "windows"
        } else if cfg!(target_os = "linux") {
            if env::var("WSL_DISTRO_NAME").is_ok() {
                "wsl"
            } else {
                "linux"
            }
        } else if cfg!(target_os = "android") {
            "android"
        } else {
            "unknown"
        }
    })
}

/// Providers worth trying on this machine, most preferred first.
fn available_providers() -> Vec<Provider> {
    let mut providers = Vec::with_capacity(3);

    // A running tmux session wins regardless of platform
    if command_exists("tmux") && is_tmux_running() {
        providers.push(Provider::Tmux);
    }

    match detect_platform() {
        "macos" => {
            if command_exists("pbcopy") {
                providers.push(Provider::MacOs);
            }
        }
        "windows" | "wsl" => {
            if command_exists("clip.exe") {
                providers.push(Provider::Wsl);
            }
        }
        "linux" => {
            if command_exists("wl-copy") {
                providers.push(Provider::Wayland);
            }
            if command_exists("xsel") {
                providers.push(Provider::Xsel);
            }
            if command_exists("xclip") {
                providers.push(Provider::Xclip);
            }
        }
        "android" => {
            if command_exists("termux-clipboard-set") {
                providers.push(Provider::Termux);
            }
        }
        _ => {}
    }

    providers
}

fn is_tmux_running() -> bool {
    if env::var("TMUX").is_ok() {
        return true;
    }

    Command::new("tmux")
        .args(["list-buffers"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("ls"));
        assert!(command_exists("echo"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_detect_platform() {
        let platform = detect_platform();
        assert!(
            platform == "macos"
                || platform == "windows"
                || platform == "wsl"
                || platform == "linux"
                || platform == "android"
                || platform == "unknown"
        );

        // Detection is cached; a second call must agree
        assert_eq!(platform, detect_platform());
    }

    #[test]
    #[ignore] // requires tmux to be installed and running
    fn test_tmux_clipboard() {
        if !command_exists("tmux") || env::var("TMUX").is_err() {
            return;
        }

        Provider::Tmux
            .copy("Test text for tmux clipboard")
            .expect("Failed to copy to tmux clipboard");

        let output = Command::new("tmux")
            .args(["show-buffer"])
            .output()
            .expect("Failed to execute tmux show-buffer");

        let clipboard_content = String::from_utf8_lossy(&output.stdout);
        assert_eq!(clipboard_content.trim(), "Test text for tmux clipboard");
    }
}
