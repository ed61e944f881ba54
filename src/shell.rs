//! Interactive prompt loop.

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use dialoguer::{Confirm, Input};
use tracing::debug;

use dirlens_analyze::ExtensionAnalyzer;
use dirlens_core::{CatalogError, DirectoryNode};

/// What the user typed at the main prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    /// Quit, after confirmation.
    Exit,
    /// Scan this directory.
    Directory(PathBuf),
    /// Load this saved catalog.
    Catalog(PathBuf),
    /// Neither a directory nor a `.json` file.
    Invalid,
}

/// Decide how to handle a line typed at the main prompt.
pub fn classify(input: &str) -> Request {
    let input = input.trim();
    if input.eq_ignore_ascii_case("exit") {
        return Request::Exit;
    }

    let path = Path::new(input);
    if path.is_dir() {
        Request::Directory(path.to_path_buf())
    } else if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
        Request::Catalog(path.to_path_buf())
    } else {
        Request::Invalid
    }
}

/// Run the shell until the user confirms `exit`.
pub fn run() -> Result<()> {
    loop {
        let input: String = Input::new()
            .with_prompt("Please provide a folder or a JSON with folder information")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;

        let root = match classify(&input) {
            Request::Exit => {
                let quit = Confirm::new()
                    .with_prompt("Are you sure you want to quit?")
                    .default(false)
                    .interact()
                    .context("Failed to read input")?;
                if quit {
                    break;
                }
                continue;
            }
            Request::Directory(path) => dirlens_scan::build(&path),
            Request::Catalog(path) => dirlens_store::load(&path),
            Request::Invalid => {
                println!("Invalid directory or JSON file path.");
                continue;
            }
        };

        let root = match root {
            Ok(root) => root,
            Err(err) => {
                report_error(&err);
                continue;
            }
        };

        for line in super::render_report(&ExtensionAnalyzer::new().analyze(&root)) {
            println!("{line}");
        }

        offer_save(&root)?;
    }

    Ok(())
}

fn offer_save(root: &DirectoryNode) -> Result<()> {
    let save = Confirm::new()
        .with_prompt("Save to JSON?")
        .default(false)
        .interact()
        .context("Failed to read input")?;
    if !save {
        return Ok(());
    }

    let destination: String = Input::new()
        .with_prompt("Please provide the JSON file location (with the file extension)")
        .interact_text()
        .context("Failed to read input")?;

    match dirlens_store::save(root, destination.trim()) {
        Ok(()) => println!("Directory information saved to {}", destination.trim()),
        Err(err) => report_error(&err),
    }
    Ok(())
}

fn report_error(err: &CatalogError) {
    debug!(?err, "operation failed");
    println!("Error: {err}");
}
