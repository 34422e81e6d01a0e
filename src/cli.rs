//! Command-line interface for kdoc-prose.

use clap::{Args, Parser, Subcommand};
use std::collections::HashMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::ast;
use crate::config::{self, Config};
use crate::processor::{self, KDocProcessor, LintMessage, Processor, Severity};
use crate::report::{self, FileReport, Format};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Rule id attached to structural defects found by `--check`.
const CHECK_RULE: &str = "ast-check";

/// Extract KDoc comments from Kotlin sources as a prose document tree.
///
/// The output is the tree a prose linter consumes: one paragraph per KDoc
/// comment, with byte ranges and line/column locations into the source.
#[derive(Parser)]
#[command(name = "kdoc-prose")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract KDoc paragraphs from a file, a directory, or stdin ("-")
    Extract(ExtractArgs),
    /// List the file extensions that have a processor
    Extensions,
}

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// File or directory to scan, or "-" to read Kotlin from stdin
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Verify every document tree is structurally sound; exit 1 if not
    #[arg(long)]
    pub check: bool,
}

/// Load the config given on the command line, or discover one, or use defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => config::discover(Path::new(".")),
    };

    let config = match path {
        Some(p) => {
            debug!(path = %p.display(), "loading config");
            Config::parse_file(&p)?
        }
        None => Config::default(),
    };

    config::validate(&config)?;
    Ok(config)
}

/// Collect files under `root` with a registered extension.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let extensions = processor::supported_extensions();
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden directories and build output
            !(e.depth() > 0
                && e.file_type().is_dir()
                && (name.starts_with('.') || name == "build" || name == "node_modules"))
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let ext = extension_of(path);
        if !extensions.contains(&ext) {
            continue;
        }

        let rel = path.strip_prefix(root).unwrap_or(path);
        if config.is_path_excluded(rel) || config.is_path_excluded(path) {
            debug!(path = %path.display(), "excluded by config");
            continue;
        }

        files.push(path.to_path_buf());
    }

    files.sort();
    Ok(files)
}

/// File extension with a leading dot, or an empty string.
fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default()
}

/// Turn AST defects into host-style messages.
fn check_messages(doc: &ast::DocumentNode) -> Vec<LintMessage> {
    match ast::check(doc) {
        Ok(()) => Vec::new(),
        Err(e) => vec![LintMessage {
            rule_id: CHECK_RULE.to_string(),
            message: e.to_string(),
            index: doc.range.start,
            line: doc.loc.start.line,
            column: doc.loc.start.column,
            severity: Severity::Error,
        }],
    }
}

/// Pre-process one text, run the optional check, and post-process the result.
fn process_text(
    processor: &dyn Processor,
    text: &str,
    path: Option<&Path>,
    check: bool,
) -> anyhow::Result<FileReport> {
    let document = processor.pre_process(text, path)?;
    let messages = if check {
        check_messages(&document)
    } else {
        Vec::new()
    };

    let path_str = path.map(|p| p.to_string_lossy().to_string());
    let post = processor.post_process(messages, path_str.as_deref());
    Ok(FileReport::new(document, post))
}

/// Run the extract command.
pub fn run_extract(args: &ExtractArgs) -> anyhow::Result<i32> {
    processor::register_all();

    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let mut reports = Vec::new();

    if args.path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        let kdoc = KDocProcessor::new()?.default_file_path(config.default_file_path.clone());
        reports.push(process_text(&kdoc, &text, None, args.check)?);
    } else {
        let metadata = match std::fs::metadata(&args.path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", args.path, e);
                return Ok(EXIT_ERROR);
            }
        };

        let files = if metadata.is_dir() {
            collect_files(&args.path, &config)?
        } else {
            vec![args.path.clone()]
        };

        if files.is_empty() {
            warn!(path = %args.path.display(), "no Kotlin files to scan");
        }

        // One processor per extension, reused across files
        let mut processors: HashMap<String, Box<dyn Processor>> = HashMap::new();

        for file in &files {
            let ext = extension_of(file);
            if !processors.contains_key(&ext) {
                match processor::for_extension(&ext)? {
                    Some(created) => {
                        processors.insert(ext.clone(), created);
                    }
                    None => {
                        warn!(path = %file.display(), "no processor for extension");
                        continue;
                    }
                }
            }
            let Some(handler) = processors.get(&ext) else {
                continue;
            };

            let text = match std::fs::read_to_string(file) {
                Ok(t) => t,
                Err(e) => {
                    // Log but don't fail - binary or unreadable files are skipped
                    warn!(path = %file.display(), error = %e, "failed to read file");
                    continue;
                }
            };

            reports.push(process_text(handler.as_ref(), &text, Some(file.as_path()), args.check)?);
        }
    }

    if !config.include_empty {
        reports.retain(|r| !r.document.is_empty() || !r.messages.is_empty());
    }

    let mut out = io::stdout().lock();
    match args.format {
        Format::Json => report::write_json(&mut out, &reports)?,
        Format::Pretty => report::write_pretty(&mut out, &reports)?,
    }

    if reports.iter().any(FileReport::has_errors) {
        Ok(EXIT_FAILED)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

/// Run the extensions command.
pub fn run_extensions() -> anyhow::Result<i32> {
    processor::register_all();

    println!("Registered extensions:");
    println!();
    for ext in processor::supported_extensions() {
        if let Some(p) = processor::for_extension(&ext)? {
            println!("  {:<8} {}", ext, p.name());
        }
    }

    Ok(EXIT_SUCCESS)
}
