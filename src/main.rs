//! dirlens - catalog a directory tree and count its file extensions.
//!
//! Usage:
//!   dirlens                  Interactive shell
//!   dirlens scan [PATH]      Scan a directory and show extension counts
//!   dirlens stats FILE       Show extension counts for a saved catalog
//!   dirlens export [PATH]    Save a directory catalog as JSON
//!   dirlens --help           Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;

use dirlens_analyze::{ExtensionAnalyzer, ExtensionConfig, ExtensionReport};
use dirlens_core::{CatalogError, DirectoryNode, ErrorPolicy, ScanConfig};
use dirlens_scan::TreeBuilder;

mod shell;

#[derive(Parser, Debug)]
#[command(
    name = "dirlens",
    version,
    about = "Catalog a directory tree and count its file extensions",
    long_about = "dirlens walks a directory, reports which file extensions it contains \
                  and how often, and saves the directory layout as a JSON catalog that \
                  can be inspected again later.\n\n\
                  Run `dirlens` without a subcommand for the interactive shell."
)]
struct Cli {
    /// Diagnostic log level, written to stderr
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Off)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a directory and show extension counts
    Scan {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        #[command(flatten)]
        report: ReportArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Show extension counts for a saved catalog
    Stats {
        /// Catalog JSON file
        file: PathBuf,

        #[command(flatten)]
        report: ReportArgs,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Save a directory catalog as JSON
    Export {
        /// Directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        #[command(flatten)]
        scan: ScanArgs,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Options shared by commands that walk a directory.
#[derive(clap::Args, Debug)]
struct ScanArgs {
    /// Leave unreadable entries out instead of aborting
    #[arg(long)]
    skip_errors: bool,

    /// Descend into symbolic links
    #[arg(long)]
    follow_symlinks: bool,

    /// Leave out hidden entries
    #[arg(long)]
    no_hidden: bool,
}

/// Options shared by commands that print an extension report.
#[derive(clap::Args, Debug)]
struct ReportArgs {
    /// Treat extensions that differ only in case as one
    #[arg(short = 'i', long)]
    ignore_case: bool,

    /// Show only the N most common extensions
    #[arg(short = 'n', long, value_name = "N")]
    top: Option<usize>,
}

impl ReportArgs {
    fn analyze(&self, root: &DirectoryNode) -> ExtensionReport {
        let config = ExtensionConfig {
            fold_case: self.ignore_case,
            max_rows: self.top,
        };
        ExtensionAnalyzer::with_config(config).analyze(root)
    }
}

impl ScanArgs {
    fn to_config(&self, path: PathBuf) -> Result<ScanConfig> {
        let on_error = if self.skip_errors {
            ErrorPolicy::Skip
        } else {
            ErrorPolicy::FailFast
        };

        ScanConfig::builder()
            .root(path)
            .follow_symlinks(self.follow_symlinks)
            .include_hidden(!self.no_hidden)
            .on_error(on_error)
            .build()
            .map_err(CatalogError::from)
            .context("Invalid scan options")
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<tracing::Level> {
        match self {
            Self::Off => None,
            Self::Error => Some(tracing::Level::ERROR),
            Self::Warn => Some(tracing::Level::WARN),
            Self::Info => Some(tracing::Level::INFO),
            Self::Debug => Some(tracing::Level::DEBUG),
            Self::Trace => Some(tracing::Level::TRACE),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_tracing(cli.log_level);
    debug!("Parsed CLI arguments: {cli:?}");

    match cli.command {
        Some(Command::Scan {
            path,
            scan,
            report,
            format,
        }) => {
            let config = scan.to_config(path)?;
            run_scan(&config, &report, format)?;
        }
        Some(Command::Stats {
            file,
            report,
            format,
        }) => {
            run_stats(&file, &report, format)?;
        }
        Some(Command::Export { path, scan, output }) => {
            let config = scan.to_config(path)?;
            run_export(&config, output)?;
        }
        None => {
            shell::run()?;
        }
    }

    Ok(())
}

fn setup_tracing(level: LogLevel) {
    if let Some(level) = level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}

/// Scan a directory and print its extension report.
fn run_scan(config: &ScanConfig, args: &ReportArgs, format: OutputFormat) -> Result<()> {
    eprintln!("Scanning {}...", config.root.display());

    let tree = TreeBuilder::new().scan(config).context("Scan failed")?;

    for warning in &tree.warnings {
        eprintln!("Skipped {}: {}", warning.path.display(), warning.message);
    }

    let report = args.analyze(&tree.root);
    print_report(&report, format)?;

    if format_is_text(format) {
        println!();
        println!(
            " {} files, {} directories, scanned in {:.2}s",
            tree.stats.total_files,
            tree.stats.total_dirs,
            tree.scan_duration.as_secs_f64()
        );
        if tree.has_warnings() {
            println!(" {} entries skipped", tree.warnings.len());
        }
    }

    Ok(())
}

/// Load a saved catalog and print its extension report.
fn run_stats(file: &PathBuf, args: &ReportArgs, format: OutputFormat) -> Result<()> {
    let root = dirlens_store::load(file)
        .with_context(|| format!("Failed to load catalog {}", file.display()))?;

    let report = args.analyze(&root);
    print_report(&report, format)
}

/// Scan a directory and write its catalog.
fn run_export(config: &ScanConfig, output: Option<PathBuf>) -> Result<()> {
    eprintln!("Scanning {}...", config.root.display());

    let tree = TreeBuilder::new().scan(config).context("Scan failed")?;

    match output {
        Some(output_path) => {
            dirlens_store::save(&tree.root, &output_path)
                .with_context(|| format!("Failed to save catalog to {}", output_path.display()))?;
            eprintln!("Exported to {}", output_path.display());
        }
        None => {
            let json = dirlens_store::encode(&tree.root)?;
            println!("{}", String::from_utf8_lossy(&json));
        }
    }

    Ok(())
}

fn format_is_text(format: OutputFormat) -> bool {
    matches!(format, OutputFormat::Text)
}

fn print_report(report: &ExtensionReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in render_report(report) {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
    }
    Ok(())
}

/// Render the text form of a report, one line per entry.
fn render_report(report: &ExtensionReport) -> Vec<String> {
    let mut lines = Vec::with_capacity(report.extensions.len() + 2);
    lines.push(format!(
        "Number of unique extensions found: {}",
        report.unique_count
    ));
    lines.push("Extensions found in folder:".to_string());
    for row in &report.extensions {
        let extension = if row.extension.is_empty() {
            "(none)"
        } else {
            row.extension.as_str()
        };
        lines.push(format!("{extension}: {} file(s)", row.count));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        let root = DirectoryNode::new("root")
            .with_file("file1.txt")
            .with_file("file2.txt")
            .with_file("Makefile");

        let lines = render_report(&ExtensionAnalyzer::new().analyze(&root));

        assert_eq!(
            lines,
            [
                "Number of unique extensions found: 2",
                "Extensions found in folder:",
                ".txt: 2 file(s)",
                "(none): 1 file(s)",
            ]
        );
    }

    #[test]
    fn test_report_top_rows() {
        let root = DirectoryNode::new("root")
            .with_file("a.txt")
            .with_file("b.txt")
            .with_file("c.TXT")
            .with_file("d.rs");

        let cli = Cli::try_parse_from(["dirlens", "stats", "c.json", "-i", "--top", "1"]).unwrap();
        let Some(Command::Stats { report, .. }) = cli.command else {
            panic!("expected stats command");
        };
        assert_eq!(report.top, Some(1));

        let lines = render_report(&report.analyze(&root));

        assert_eq!(
            lines,
            [
                "Number of unique extensions found: 2",
                "Extensions found in folder:",
                ".txt: 3 file(s)",
            ]
        );
    }

    #[test]
    fn test_scan_args_config() {
        let args = ScanArgs {
            skip_errors: true,
            follow_symlinks: false,
            no_hidden: true,
        };

        let config = args.to_config(PathBuf::from("/data")).unwrap();

        assert_eq!(config.on_error, ErrorPolicy::Skip);
        assert!(!config.include_hidden);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["dirlens", "scan", "/tmp", "--skip-errors", "-f", "json"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Scan { .. })));

        let cli = Cli::try_parse_from(["dirlens", "--log-level", "debug"]).unwrap();
        assert!(cli.command.is_none());
    }
}
