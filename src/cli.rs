//! Command-line interface for readmint.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::analyzer::{Analyzer, ProgressSink};
use crate::cache::AnalysisCache;
use crate::config::Config;
use crate::llm::{prose, OllamaClient};
use crate::project::{self, ProjectRecord};
use crate::render;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Starter config written by the init command.
const CONFIG_TEMPLATE: &str = include_str!("templates/readmint.yaml");

/// README generator - builds project documentation from static analysis.
///
/// Readmint scans a source tree, extracts structural facts (imports,
/// exports, functions, classes, SQL snippets, routes, deployment
/// manifests) with regex heuristics, and feeds them as context into a
/// local text-generation model to produce a README document.
#[derive(Parser)]
#[command(name = "readmint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a project and generate its README
    #[command(visible_alias = "gen")]
    Generate(GenerateArgs),
    /// Analyze a project and print the aggregated record
    Analyze(AnalyzeArgs),
    /// Create a starter readmint.yaml config file
    Init(InitArgs),
}

/// Arguments for the generate command.
#[derive(Parser)]
pub struct GenerateArgs {
    /// Project root to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to a config YAML file (default: auto-discover in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output path override
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the text-generation model and emit placeholder prose
    #[arg(long)]
    pub offline: bool,

    /// Worker pool size override
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Disable the analysis cache for this run
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Project root to analyze
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to a config YAML file (default: auto-discover in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Disable the analysis cache for this run
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "readmint.yaml")]
    pub output: PathBuf,
}

/// Run the generate command.
pub fn run_generate(args: &GenerateArgs) -> anyhow::Result<i32> {
    let root = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let mut config = match load_config(args.config.as_deref(), &root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(workers) = args.workers {
        config.workers = workers.max(1);
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }

    let cache = build_cache(&config, args.no_cache);

    let runtime = tokio::runtime::Runtime::new()?;
    let (record, generated) = runtime.block_on(async {
        let analyzer = Analyzer::new(&root, cache, &config).with_progress(progress_sink());
        let record = project::aggregate(&root, &analyzer, &config).await?;

        let generated = if args.offline {
            prose::placeholder_prose(&record)
        } else {
            let client = OllamaClient::new(&config);
            prose::generate_prose(&client, &record).await
        };
        anyhow::Ok((record, generated))
    })?;

    let document = render::render_readme(&record, &generated)?;
    let out_path = root.join(&config.output);
    std::fs::write(&out_path, document)?;

    println!(
        "{} {} files analyzed, {} errors, {} routes",
        "Done:".green().bold(),
        record.file_count(),
        record.error_count(),
        record.routes.len()
    );
    println!("Wrote {}", out_path.display());

    Ok(EXIT_SUCCESS)
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let root = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let config = match load_config(args.config.as_deref(), &root) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let cache = build_cache(&config, args.no_cache);

    let runtime = tokio::runtime::Runtime::new()?;
    let record = runtime.block_on(async {
        let analyzer = Analyzer::new(&root, cache, &config).with_progress(progress_sink());
        project::aggregate(&root, &analyzer, &config).await
    })?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&record)?),
        _ => write_summary(&record),
    }

    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, CONFIG_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to customize scanning", args.output.display());
    println!("  2. Run: readmint generate .");

    Ok(EXIT_SUCCESS)
}

/// Load an explicit config file, or discover one under the root.
fn load_config(explicit: Option<&Path>, root: &Path) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::parse_file(path),
        None => Config::load(root),
    }
}

/// Build the analysis cache from the configuration.
fn build_cache(config: &Config, no_cache: bool) -> AnalysisCache {
    if no_cache {
        return AnalysisCache::disabled();
    }
    match config.resolved_cache_dir() {
        Some(dir) => AnalysisCache::new(dir),
        None => AnalysisCache::disabled(),
    }
}

/// Progress sink that drives a terminal progress bar.
///
/// The batch size is only known once the first report arrives, so the bar
/// length is set lazily.
fn progress_sink() -> ProgressSink {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} files ({eta})")
            .expect("progress template must parse")
            .progress_chars("=> "),
    );

    Arc::new(move |report| {
        if bar.length() != Some(report.total as u64) {
            bar.set_length(report.total as u64);
        }
        bar.set_position(report.processed as u64);
        if report.is_done() {
            bar.finish_and_clear();
        }
    })
}

/// Colored terminal summary of an aggregated record.
fn write_summary(record: &ProjectRecord) {
    let name = if record.manifest.name.is_empty() {
        "(unnamed project)"
    } else {
        record.manifest.name.as_str()
    };
    println!("{}", name.bold());
    if !record.manifest.description.is_empty() {
        println!("{}", record.manifest.description);
    }
    println!();

    println!(
        "{} {} ({} errors)",
        "Files analyzed:".bold(),
        record.file_count(),
        record.error_count()
    );
    for (folder, files) in &record.folders {
        println!("  {}  {} files", folder.cyan(), files.len());
    }

    if !record.routes.is_empty() {
        println!();
        println!("{}", "Routes:".bold());
        for route in &record.routes {
            println!(
                "  {} {} -> {}",
                route.method.green(),
                route.path,
                route.handlers.join(", ")
            );
        }
    }

    if let Some(deploy) = &record.deploy {
        println!();
        println!("{}", "Deployment:".bold());
        if let Some(resources) = &deploy.resources {
            if let Some(limits) = &resources.limits {
                if let Some(cpu) = &limits.cpu_text {
                    println!("  CPU limit: {}", cpu);
                }
                if let Some(memory) = &limits.memory_text {
                    println!("  Memory limit: {}", memory);
                }
            }
        }
        for host in &deploy.hosts.dev {
            println!("  dev host: {}", host);
        }
        for host in &deploy.hosts.pro {
            println!("  pro host: {}", host);
        }
    }
}
