//! Profiler CLI - Command-line interface for the interest profiler
//!
//! Commands:
//! - run: Profile browsing history and filesystem roots into a JSON snapshot
//! - categories: Print the active category registry
//! - check-config: Validate a category registry file

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use interest_profiler::categories::{CategoryRegistry, CategorySet, MatchKind};
use interest_profiler::collect::{BrowserCollector, HistoryRow, JsonHistorySource};
use interest_profiler::collect::files::FileScanner;
use interest_profiler::config::ProfilerConfig;
use interest_profiler::pipeline::ProfileEngine;
use interest_profiler::{ProfileError, PROFILER_VERSION};

/// Profiler - Heuristic interest profiling from browsing and filesystem evidence
#[derive(Parser)]
#[command(name = "profiler")]
#[command(version = PROFILER_VERSION)]
#[command(about = "Build a user interest snapshot from local activity", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile browsing history and filesystem roots into a JSON snapshot
    Run {
        /// Browsing history file path (use - for stdin)
        #[arg(short = 'i', long)]
        history: Option<PathBuf>,

        /// History input format
        #[arg(long, default_value = "ndjson")]
        history_format: HistoryFormat,

        /// Filesystem roots to scan (repeatable)
        #[arg(short, long)]
        roots: Vec<PathBuf>,

        /// Category registry file (JSON); defaults to the built-in registry
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Maximum history rows to keep (most recent first)
        #[arg(long)]
        history_limit: Option<usize>,

        /// Maximum files to record across all roots
        #[arg(long)]
        file_limit: Option<usize>,

        /// Additional directory names to skip while scanning (repeatable)
        #[arg(long = "exclude")]
        excluded_dirs: Vec<String>,
    },

    /// Print the active category registry
    Categories {
        /// Category registry file (JSON); defaults to the built-in registry
        #[arg(short, long)]
        categories: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a category registry file
    CheckConfig {
        /// Category registry file (JSON)
        #[arg(short, long)]
        categories: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum HistoryFormat {
    /// Newline-delimited JSON (one row per line)
    Ndjson,
    /// JSON array of rows
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ProfilerCliError> {
    match cli.command {
        Commands::Run {
            history,
            history_format,
            roots,
            categories,
            output,
            history_limit,
            file_limit,
            excluded_dirs,
        } => cmd_run(
            history.as_deref(),
            history_format,
            &roots,
            categories.as_deref(),
            &output,
            history_limit,
            file_limit,
            excluded_dirs,
        ),

        Commands::Categories { categories, json } => cmd_categories(categories.as_deref(), json),

        Commands::CheckConfig { categories } => cmd_check_config(&categories),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    history: Option<&std::path::Path>,
    history_format: HistoryFormat,
    roots: &[PathBuf],
    categories: Option<&std::path::Path>,
    output: &PathBuf,
    history_limit: Option<usize>,
    file_limit: Option<usize>,
    excluded_dirs: Vec<String>,
) -> Result<(), ProfilerCliError> {
    if history.is_none() && roots.is_empty() {
        return Err(ProfilerCliError::NoSources);
    }

    let registry = load_registry(categories)?;

    let mut config = ProfilerConfig::default();
    if let Some(limit) = history_limit {
        config.history_limit = limit;
    }
    if let Some(limit) = file_limit {
        config.file_limit = limit;
    }
    config.excluded_dirs.extend(excluded_dirs);

    let engine = ProfileEngine::new(registry, config);

    // Browsing records from file, stdin, or nothing
    let records = match history {
        Some(path) if path.to_string_lossy() == "-" => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            let rows = match history_format {
                HistoryFormat::Ndjson => HistoryRow::parse_ndjson(&buffer),
                HistoryFormat::Json => HistoryRow::parse_array(&buffer)?,
            };
            BrowserCollector::from_rows(rows, engine.config().history_limit)
        }
        Some(path) => match history_format {
            HistoryFormat::Ndjson => {
                let source = JsonHistorySource::new(path);
                BrowserCollector::collect(&source, engine.config().history_limit)
            }
            HistoryFormat::Json => {
                let rows = HistoryRow::parse_array(&fs::read_to_string(path)?)?;
                BrowserCollector::from_rows(rows, engine.config().history_limit)
            }
        },
        None => Vec::new(),
    };

    let scanner = FileScanner::from_config(engine.config());
    let outcome = scanner.scan(roots);

    let report = engine.generate(&records, &outcome);

    if output.to_string_lossy() == "-" {
        println!("{}", report.to_json()?);
    } else {
        report.write_to(output)?;
    }

    Ok(())
}

fn cmd_categories(
    categories: Option<&std::path::Path>,
    json: bool,
) -> Result<(), ProfilerCliError> {
    let registry = load_registry(categories)?;

    if json {
        let doc = serde_json::json!({
            "browser": registry_section(&registry.browser),
            "files": registry_section(&registry.files),
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("Category Registry");
        println!("=================");
        print_set("Browser (keyword substring match)", &registry.browser);
        print_set("Files (extension match)", &registry.files);
    }

    Ok(())
}

fn cmd_check_config(categories: &std::path::Path) -> Result<(), ProfilerCliError> {
    let registry = CategoryRegistry::from_json_file(categories)?;
    println!(
        "OK: {} browser categories, {} file categories",
        registry.browser.categories().len(),
        registry.files.categories().len()
    );
    Ok(())
}

fn load_registry(path: Option<&std::path::Path>) -> Result<CategoryRegistry, ProfilerCliError> {
    match path {
        Some(p) => Ok(CategoryRegistry::from_json_file(p)?),
        None => Ok(CategoryRegistry::default()),
    }
}

fn registry_section(set: &CategorySet) -> serde_json::Value {
    let mut doc = serde_json::Map::new();
    for category in set.categories() {
        let keys: Vec<&str> = category.keys.iter().map(String::as_str).collect();
        doc.insert(category.name.clone(), serde_json::json!(keys));
    }
    serde_json::Value::Object(doc)
}

fn print_set(title: &str, set: &CategorySet) {
    println!("\n{title}:");
    for category in set.categories() {
        let kind = match category.kind {
            MatchKind::Substring => "keywords",
            MatchKind::ExtensionSet => "extensions",
        };
        let keys: Vec<&str> = category.keys.iter().map(String::as_str).collect();
        println!("  {} ({}): {}", category.name, kind, keys.join(", "));
    }
}

// Error types

#[derive(Debug)]
enum ProfilerCliError {
    Io(io::Error),
    Profile(ProfileError),
    Json(serde_json::Error),
    NoSources,
}

impl From<io::Error> for ProfilerCliError {
    fn from(e: io::Error) -> Self {
        ProfilerCliError::Io(e)
    }
}

impl From<ProfileError> for ProfilerCliError {
    fn from(e: ProfileError) -> Self {
        ProfilerCliError::Profile(e)
    }
}

impl From<serde_json::Error> for ProfilerCliError {
    fn from(e: serde_json::Error) -> Self {
        ProfilerCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ProfilerCliError> for CliError {
    fn from(e: ProfilerCliError) -> Self {
        match e {
            ProfilerCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            ProfilerCliError::Profile(e) => CliError {
                code: "PROFILE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check history and registry inputs".to_string()),
            },
            ProfilerCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            ProfilerCliError::NoSources => CliError {
                code: "NO_SOURCES".to_string(),
                message: "No history input and no filesystem roots given".to_string(),
                hint: Some("Pass --history and/or one or more --roots".to_string()),
            },
        }
    }
}
