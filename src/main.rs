/*!
 * Command-line interface for clipdir
 */

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use clipdir::config::{Args, Command, Config, Limits};
use clipdir::create::create_from_text;
use clipdir::ensure;
use clipdir::error::{Result, ResultExt};
use clipdir::platform::{deliver, CliPlatform, Platform};
use clipdir::scanner::Scanner;

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("[error] {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Command::Completions { shell } = &args.command {
        generate(*shell, &mut Args::command(), "clipdir", &mut io::stdout());
        return Ok(());
    }

    let config = Config::from_args(&args);
    config.validate()?;

    let platform = CliPlatform::new(config.root.clone(), config.clip, config.verbose);
    let scanner = Scanner::new(&platform, &config.ignore_patterns);

    match &args.command {
        Command::Structure { dir } => {
            let dir = existing_dir(dir)?;
            let result = scanner.folder_structure(&dir);
            deliver(&platform, &result, "Folder structure copied.")
        }

        Command::Content {
            dir,
            max_files,
            max_size_kb,
        } => {
            let dir = existing_dir(dir)?;
            let limits = Limits {
                max_files: *max_files,
                max_size_kb: *max_size_kb,
                ..Limits::default()
            };
            let result = scanner.folder_structure_and_content(&dir, &limits);
            deliver(&platform, &result, "Folder structure and content copied.")
        }

        Command::Files {
            files,
            max_copy_size_kb,
        } => {
            let files: Vec<PathBuf> = files
                .iter()
                .map(|file| std::path::absolute(file).unwrap_or_else(|_| file.clone()))
                .collect();
            let limits = Limits {
                max_copy_size_kb: *max_copy_size_kb,
                ..Limits::default()
            };
            let result = scanner.files_with_header(&files, &limits);
            deliver(
                &platform,
                &result,
                &format!("{} file(s) copied with paths.", files.len()),
            )
        }

        Command::Create { dir } => {
            let dir = existing_dir(dir)?;
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .with_context(|| "Failed to read input from stdin")?;
            create_from_text(&text, &dir, &platform);
            Ok(())
        }

        Command::RootPath => {
            let root = platform
                .workspace_root()
                .ok_or_else(|| clipdir::error!(Config, "No workspace root available"))?;
            deliver(
                &platform,
                &format!("Root Path: {}", root.display()),
                "Root path copied.",
            )
        }

        Command::Completions { .. } => unreachable!("handled before dispatch"),
    }
}

fn existing_dir(dir: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(dir)?;
    ensure!(
        absolute.is_dir(),
        Config,
        "Target directory not found: {}",
        dir.display()
    );
    Ok(absolute)
}
