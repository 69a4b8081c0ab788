//! regvoc CLI - Command-line interface
//!
//! Usage:
//!   regvoc extract <input> <output> [--strategy dependency|constituency] [--workers N]
//!                  [--geonames <file>] [--verbose]
//!   regvoc clean <input> [--agencies <file>] [--output <file>]
//!
//! `extract` reads a pre-parsed corpus file, or every `*.json` corpus in a
//! directory, and writes the vocabulary as N-Triples.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use regvoc_core::{AppConfig, LoggingConfig, Strategy};
use regvoc_extractor::{Coordinator, DocumentReport};
use regvoc_parser::cleanup::Cleaner;
use regvoc_parser::PreparsedSource;
use regvoc_rdf::{GeoNames, VocabularyGraph};

#[derive(Parser, Debug)]
#[command(name = "regvoc")]
#[command(about = "SKOS vocabulary extraction from regulatory text")]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract vocabulary triples into N-Triples
    Extract(ExtractArgs),
    /// Clean raw regulatory text before parsing
    Clean {
        /// Raw text file
        input: PathBuf,
        /// Agency names replaced by "Agency", one per line
        #[arg(long)]
        agencies: Option<PathBuf>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Corpus JSON file, or a directory of them
    input: PathBuf,

    /// Output `.nt` file, or a directory when the input is one
    output: PathBuf,

    /// Extraction strategy
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// Worker pool size (0 = available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// GeoNames `uri|name` file linking place terms to GeoNames features
    #[arg(long)]
    geonames: Option<PathBuf>,

    /// Print every triple and the document reports
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config.logging);

    let result = match cli.command {
        Commands::Extract(args) => extract(&args, config).map(|_| ()),
        Commands::Clean {
            input,
            agencies,
            output,
        } => clean(&input, agencies.as_deref()).and_then(|text| match output {
            Some(path) => std::fs::write(&path, text + "\n")
                .with_context(|| format!("writing {}", path.display())),
            None => {
                println!("{text}");
                Ok(())
            }
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?
            .with_env_override()?,
        None => AppConfig::from_env()?,
    };
    Ok(config)
}

fn extract(args: &ExtractArgs, mut config: AppConfig) -> anyhow::Result<Vec<DocumentReport>> {
    if let Some(strategy) = args.strategy {
        config.extraction.strategy = strategy;
    }
    if let Some(workers) = args.workers {
        config.extraction.workers = workers;
    }
    if let Some(geonames) = &args.geonames {
        config.output.geonames = Some(geonames.clone());
    }
    config.output.verbose |= args.verbose;

    let geonames = match &config.output.geonames {
        Some(path) => Some(Arc::new(
            GeoNames::from_path(path)
                .with_context(|| format!("loading GeoNames links {}", path.display()))?,
        )),
        None => None,
    };

    let coordinator =
        Coordinator::from_config(&config.extraction).context("starting extraction workers")?;
    info!(
        strategy = %config.extraction.strategy,
        workers = coordinator.workers(),
        "Extractor ready"
    );

    if !args.input.is_dir() {
        let report = extract_file(&coordinator, &config, geonames.as_ref(), &args.input, &args.output)?;
        return Ok(vec![report]);
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let mut reports = Vec::new();
    for path in corpus_files(&args.input)? {
        let Some(stem) = path.file_stem() else {
            continue;
        };
        let mut name = stem.to_os_string();
        name.push(".nt");
        let target = args.output.join(name);

        match extract_file(&coordinator, &config, geonames.as_ref(), &path, &target) {
            Ok(report) => reports.push(report),
            Err(e) => warn!(file = %path.display(), error = %format!("{e:#}"), "Skipping document"),
        }
    }

    info!(documents = reports.len(), "Directory processed");
    Ok(reports)
}

/// `*.json` files directly inside `dir`, sorted by name
fn corpus_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("reading directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn extract_file(
    coordinator: &Coordinator,
    config: &AppConfig,
    geonames: Option<&Arc<GeoNames>>,
    input: &Path,
    output: &Path,
) -> anyhow::Result<DocumentReport> {
    let source = PreparsedSource::from_path(input)
        .with_context(|| format!("loading corpus {}", input.display()))?;

    let (sink, report) =
        coordinator.process_document(&source.corpus().id, &source, &source.block_texts());
    let triples = sink.into_sorted();

    let mut graph = VocabularyGraph::new(config.output.namespace.as_str())?;
    if let Some(geonames) = geonames {
        graph = graph.with_geonames(Arc::clone(geonames));
    }
    graph.extend(&triples);
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    graph.write_file(output)?;

    if config.output.verbose {
        for triple in &triples {
            println!("{triple}");
        }
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    info!(
        document = %report.document,
        triples = triples.len(),
        statements = graph.len(),
        output = %output.display(),
        "Vocabulary written"
    );
    Ok(report)
}

fn clean(input: &Path, agencies: Option<&Path>) -> anyhow::Result<String> {
    let cleaner = match agencies {
        Some(path) => Cleaner::from_agency_file(path)
            .with_context(|| format!("loading agency list {}", path.display()))?,
        None => Cleaner::new(),
    };
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("reading {}", input.display()))?;
    Ok(cleaner.clean(&text))
}
