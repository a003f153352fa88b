//! Outbreak Trends Core - trend classification CLI
//!
//! The main entry point for ot-core, handling:
//! - Loading per-country daily series
//! - Period windowing, growth and status classification
//! - Global aggregation and status counts
//! - Report rendering (JSON, Markdown, one-line summary)

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ot_common::{Error, OutputFormat, Result, StructuredError, SCHEMA_VERSION};
use ot_config::{
    load_config, read_config, validate_engine_config, ConfigSnapshot, EmergingStatus,
    EngineConfig, ResolvedConfigPath,
};
use ot_core::country::{compare_by_growth, compare_by_name};
use ot_core::exit_codes::ExitCode;
use ot_core::input::{ensure_known, load_input};
use ot_core::logging::{event_names, init_logging, LogConfig, LogFormat, LogLevel};
use ot_core::pipeline::run_pipeline;
use ot_core::report::Report;
use tracing::info;

/// Outbreak Trends Core - are we winning?
#[derive(Parser)]
#[command(name = "ot-core")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Engine config file (.toml or .json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every country's recent periods and summarize globally
    Classify(ClassifyArgs),

    /// Inspect or validate the engine configuration
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Input file with per-country daily series (JSON)
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Last day of the most recent period (YYYY-MM-DD); defaults to the latest observation
    #[arg(long)]
    reference_date: Option<String>,

    /// Only report and aggregate these countries
    #[arg(long, value_delimiter = ',')]
    countries: Option<Vec<String>>,

    /// Country ordering
    #[arg(long, value_enum, default_value = "name")]
    sort: SortOrder,

    /// Period index used by --sort growth
    #[arg(long, default_value = "0")]
    sort_period: usize,

    /// Override days per period
    #[arg(long)]
    period_length: Option<usize>,

    /// Override number of periods
    #[arg(long)]
    period_count: Option<usize>,

    /// Override the Crushing/Winning floor
    #[arg(long)]
    winning_floor: Option<u64>,

    /// Override the status used for periods rising from zero
    #[arg(long, value_enum)]
    emerging_status: Option<EmergingArg>,

    /// Exit with code 1 when the world or any country is Starting or Losing
    #[arg(long)]
    fail_on_losing: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortOrder {
    Name,
    Growth,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EmergingArg {
    Starting,
    Losing,
}

impl From<EmergingArg> for EmergingStatus {
    fn from(arg: EmergingArg) -> Self {
        match arg {
            EmergingArg::Starting => EmergingStatus::Starting,
            EmergingArg::Losing => EmergingStatus::Losing,
        }
    }
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the effective configuration and where it came from
    Show,

    /// Validate a configuration file
    Validate {
        /// Path to validate (defaults to the resolved config)
        path: Option<PathBuf>,
    },
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = e.print();
            std::process::exit(code.as_i32());
        }
    };

    let log_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else if cli.global.verbose > 0 {
        Some(LogLevel::from_verbosity(cli.global.verbose))
    } else {
        None
    };
    init_logging(&LogConfig::from_env(log_level, cli.global.log_format));

    let exit_code = match &cli.command {
        Commands::Classify(args) => run_classify(&cli.global, args),
        Commands::Config(args) => run_config(&cli.global, args),
    };

    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_classify(global: &GlobalOpts, args: &ClassifyArgs) -> ExitCode {
    info!(event = event_names::RUN_STARTED, input = %args.input.display(), "classify");
    match classify(global, args) {
        Ok(code) => {
            info!(event = event_names::RUN_FINISHED, code = code.code_name(), "classify");
            code
        }
        Err(e) => output_error(global, &e),
    }
}

fn classify(global: &GlobalOpts, args: &ClassifyArgs) -> Result<ExitCode> {
    let (config, resolved) = effective_config(global.config.as_deref(), args)?;
    let snapshot = ConfigSnapshot::new(&config, &resolved)?;
    info!(
        event = event_names::CONFIG_LOADED,
        source = %resolved.source,
        hash = %snapshot.config_hash,
        "engine config"
    );

    let reference_date = args
        .reference_date
        .as_deref()
        .map(parse_reference_date)
        .transpose()?;

    let inputs = load_input(&args.input)?;
    info!(event = event_names::INPUT_LOADED, countries = inputs.len(), "input");
    if let Some(names) = &args.countries {
        ensure_known(&inputs, names)?;
    }

    let mut output = run_pipeline(&inputs, &config, reference_date, args.countries.as_deref());
    match args.sort {
        SortOrder::Name => output.countries.sort_by(compare_by_name),
        SortOrder::Growth => output
            .countries
            .sort_by(|a, b| compare_by_growth(a, b, args.sort_period)),
    }

    let report = Report::new(output, snapshot);
    println!("{}", report.render(global.format)?);

    if args.fail_on_losing && report.any_rising() {
        Ok(ExitCode::Rising)
    } else {
        Ok(ExitCode::Clean)
    }
}

/// Resolve the config file, apply CLI overrides, then validate the result.
fn effective_config(
    path: Option<&Path>,
    args: &ClassifyArgs,
) -> Result<(EngineConfig, ResolvedConfigPath)> {
    let (mut config, resolved) = read_config(path)?;
    if let Some(days) = args.period_length {
        config = config.with_period_length(days);
    }
    if let Some(count) = args.period_count {
        config = config.with_period_count(count);
    }
    if let Some(floor) = args.winning_floor {
        config = config.with_winning_floor(floor);
    }
    if let Some(status) = args.emerging_status {
        config = config.with_emerging_status(status.into());
    }
    validate_engine_config(&config)?;
    Ok((config, resolved))
}

fn parse_reference_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::InvalidReferenceDate(format!("{}: {}", raw, e)))
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> ExitCode {
    let result = match &args.command {
        ConfigCommands::Show => config_show(global),
        ConfigCommands::Validate { path } => {
            config_validate(global, path.as_deref().or(global.config.as_deref()))
        }
    };
    match result {
        Ok(()) => ExitCode::Clean,
        Err(e) => output_error(global, &e),
    }
}

fn config_show(global: &GlobalOpts) -> Result<()> {
    let (config, resolved) = load_config(global.config.as_deref())?;
    let snapshot = ConfigSnapshot::new(&config, &resolved)?;
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "config": snapshot,
            });
            println!("{}", to_pretty_json(&response)?);
        }
        OutputFormat::Md | OutputFormat::Summary => {
            println!(
                "source: {} | period_length: {} | period_count: {} | winning_floor: {} | emerging_status: {}",
                snapshot.config_source,
                config.period_length,
                config.period_count,
                config.winning_floor,
                config.emerging_status
            );
        }
    }
    Ok(())
}

fn config_validate(global: &GlobalOpts, path: Option<&Path>) -> Result<()> {
    let (_, resolved) = load_config(path)?;
    let path = resolved
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin defaults".to_string());
    match global.format {
        OutputFormat::Json => {
            let response = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "valid": true,
                "path": path,
                "source": resolved.source,
            });
            println!("{}", to_pretty_json(&response)?);
        }
        OutputFormat::Md | OutputFormat::Summary => println!("valid: {}", path),
    }
    Ok(())
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| Error::Internal(format!("output serialization failed: {}", e)))
}

/// Report an error on stderr and map it to an exit code.
fn output_error(global: &GlobalOpts, err: &Error) -> ExitCode {
    match global.format {
        OutputFormat::Json => eprintln!("{}", StructuredError::from(err).to_json()),
        OutputFormat::Md | OutputFormat::Summary => eprintln!("{}", err.to_human()),
    }
    ExitCode::from(err)
}
