// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use indicatif::{ProgressBar, ProgressStyle};
use log::{LevelFilter, debug, error, info, warn};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

mod app_config;
mod document;
mod errors;
mod language_utils;
mod pipeline;
mod providers;
mod session;
mod translation;

use crate::app_config::{Config, LogLevel};
use crate::pipeline::{PipelineRunner, RunPhase, RunProgress, RunStatus};
use crate::providers::ollama::Ollama;
use crate::session::{FileSink, FileSource, Session};

/// Log levels for CLI
#[derive(ValueEnum, Clone, Debug)]
enum CliLogLevel {
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operational information
    Info,
    /// Detailed information for troubleshooting
    Debug,
    /// Very verbose development information
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// Subcommands for the application
#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a document and verify it by translating back (default when omitted)
    #[command(name = "run", alias = "translate")]
    Run(RunArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the run command
#[derive(Parser, Debug)]
struct RunArgs {
    /// Path to the document to translate
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the translated document (defaults to <lang>_translated.md beside the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Model to use for the back-translation comparison
    #[arg(long)]
    compare_model: Option<String>,

    /// Source language (name or ISO 639 code)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language (name or ISO 639 code)
    #[arg(short, long)]
    target_language: Option<String>,

    /// Approximate token budget per segment
    #[arg(short = 'b', long)]
    split_budget: Option<u32>,

    /// Base URL of the generation service
    #[arg(long, env = "ECHOMARK_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds for generation calls
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Command line interface for echomark
#[derive(Parser, Debug)]
#[command(
    name = "echomark",
    author = "echomark developers",
    version,
    about = "Round-trip translation verifier for Markdown documents",
    long_about = "echomark translates a document segment by segment, translates each result back \
into the source language, and asks a comparison model to flag the places where the round trip \
drifted. The annotated translation is written next to the input.

EXAMPLES:
    # Translate README.md with the settings from conf.json
    echomark README.md

    # Translate into Japanese with an explicit model
    echomark notes.md -t Japanese -m qwen2.5:14b

    # Write the result to a chosen path, replacing a previous run
    echomark notes.md -o out/notes_ja.md --force-overwrite

CONFIGURATION:
    Settings are read from conf.json (or the file given with --config-path) and a default
    file is created on first use. Command line options override the file. The generation
    service endpoint can also be set through the ECHOMARK_ENDPOINT environment variable."
)]
struct CommandLineOptions {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the document to translate
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Where to write the translated document (defaults to <lang>_translated.md beside the input)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Overwrite the output file if it already exists
    #[arg(short, long)]
    force_overwrite: bool,

    /// Model to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Model to use for the back-translation comparison
    #[arg(long)]
    compare_model: Option<String>,

    /// Source language (name or ISO 639 code)
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language (name or ISO 639 code)
    #[arg(short, long)]
    target_language: Option<String>,

    /// Approximate token budget per segment
    #[arg(short = 'b', long)]
    split_budget: Option<u32>,

    /// Base URL of the generation service
    #[arg(long, env = "ECHOMARK_ENDPOINT")]
    endpoint: Option<String>,

    /// Request timeout in seconds for generation calls
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Custom logger with emoji indicators and colored output
struct CustomLogger;

impl CustomLogger {
    fn new() -> Self {
        CustomLogger
    }

    fn init(level: LevelFilter) -> Result<(), log::SetLoggerError> {
        let logger = Box::new(CustomLogger::new());
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    fn get_emoji_for_level(level: log::Level) -> &'static str {
        match level {
            log::Level::Error => "❌",
            log::Level::Warn => "🚧",
            log::Level::Info => " ",
            log::Level::Debug => "🔍",
            log::Level::Trace => "📋",
        }
    }
}

impl log::Log for CustomLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let emoji = Self::get_emoji_for_level(record.level());
            let now = chrono::Local::now();
            let time_str = now.format("%H:%M:%S.%3f").to_string();

            let level_color = match record.level() {
                log::Level::Error => "\x1B[1;31m", // Bold red
                log::Level::Warn => "\x1B[1;33m",  // Bold yellow
                log::Level::Info => "\x1B[1;32m",  // Bold green
                log::Level::Debug => "\x1B[1;36m", // Bold cyan
                log::Level::Trace => "\x1B[1;35m", // Bold magenta
            };
            let reset = "\x1B[0m";

            eprintln!(
                "{} {}{}:{} [{}] {}",
                emoji,
                level_color,
                record.level(),
                reset,
                time_str,
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start with a default log configuration; the config file may adjust it later
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let options = CommandLineOptions::parse();

    match options.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Run(args)) => run_translation(args).await,
        None => {
            // Backwards compatible invocation without a subcommand
            let Some(input) = options.input else {
                CommandLineOptions::command().print_help()?;
                return Err(anyhow!("No input document provided"));
            };
            let args = RunArgs {
                input,
                output: options.output,
                force_overwrite: options.force_overwrite,
                model: options.model,
                compare_model: options.compare_model,
                source_language: options.source_language,
                target_language: options.target_language,
                split_budget: options.split_budget,
                endpoint: options.endpoint,
                timeout_secs: options.timeout_secs,
                config_path: options.config_path,
                log_level: options.log_level,
            };
            run_translation(args).await
        }
    }
}

/// Loads the configuration file, creating a default one when missing,
/// and applies command line overrides on top.
fn load_config(args: &RunArgs) -> Result<Config> {
    let config_path = &args.config_path;
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .with_context(|| format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!(
            "Config file not found at {}, creating one with default values",
            config_path
        );
        let default_config = Config::default();
        let config_json = serde_json::to_string_pretty(&default_config)
            .context("Failed to serialize default config")?;
        fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to {}", config_path))?;
        default_config
    };

    if let Some(model) = &args.model {
        config.generator.translation_model = model.clone();
    }
    if let Some(compare_model) = &args.compare_model {
        config.generator.comparison_model = compare_model.clone();
    }
    if let Some(source_language) = &args.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &args.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(split_budget) = args.split_budget {
        config.split_budget = split_budget;
    }
    if let Some(endpoint) = &args.endpoint {
        config.generator.endpoint = endpoint.clone();
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.generator.timeout_secs = timeout_secs;
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

/// Builds the progress bar style used while segments are translated
fn segment_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%) {msg} {eta}")
        .or_else(|_| {
            ProgressStyle::default_bar()
                .template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}")
        })
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░")
}

/// Runs the translation pipeline for the given arguments
async fn run_translation(args: RunArgs) -> Result<()> {
    // Apply the CLI log level early so config loading respects it
    if let Some(cli_level) = &args.log_level {
        let level: LogLevel = cli_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&args)?;

    // Without a CLI override the config file decides the log level
    if args.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let endpoint = config.generator.endpoint.clone();
    let timeout = Duration::from_secs(config.generator.timeout_secs);
    let provider = Ollama::with_timeout(&endpoint, timeout);

    // Connectivity check is informational only; the run itself reports per-segment failures
    match provider.version().await {
        Ok(version) => info!("Connected to Ollama version {} at {}", version, endpoint),
        Err(e) => warn!("Generation service not reachable at {}: {}", endpoint, e),
    }

    let runner = PipelineRunner::new(config, provider)?;
    info!(
        "🚀 echomark: {} -> {} | translate: {} | compare: {}",
        runner.config().source_language,
        runner.config().target_language,
        runner.config().generator.translation_model,
        runner.config().generator.comparison_model
    );

    let base_dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    let mut sink = FileSink::new(base_dir).with_force_overwrite(args.force_overwrite);
    if let Some(output) = args.output {
        sink = sink.with_output_path(output);
    }
    let mut session = Session::new(FileSource::new(args.input.clone()), sink);

    let progress_bar: Mutex<Option<ProgressBar>> = Mutex::new(None);
    let progress_callback: Box<dyn Fn(RunProgress) + Send + Sync> =
        Box::new(move |progress: RunProgress| {
            let Ok(mut guard) = progress_bar.lock() else {
                return;
            };
            match progress.phase {
                RunPhase::Translating if progress.segments_total > 0 => {
                    let bar = guard.get_or_insert_with(|| {
                        let bar = ProgressBar::new(progress.segments_total as u64);
                        bar.set_style(segment_progress_style());
                        bar
                    });
                    bar.set_position(progress.segments_processed as u64);
                }
                RunPhase::Flushing => {
                    if let Some(bar) = guard.as_ref() {
                        bar.set_message("saving");
                    }
                }
                RunPhase::Done => {
                    if let Some(bar) = guard.take() {
                        bar.finish_and_clear();
                    }
                }
                _ => {}
            }
        });

    let report = runner.run(&mut session, Some(progress_callback)).await;
    info!("{}", report.summary());
    debug!(
        "Run finished with status {:?} after {:.2}s",
        report.status,
        report.duration.as_secs_f64()
    );

    match report.status {
        RunStatus::SourceUnavailable => {
            error!("Could not read the input document: {}", args.input.display());
            Err(anyhow!(
                "Input document {} could not be read",
                args.input.display()
            ))
        }
        _ => Ok(()),
    }
}
