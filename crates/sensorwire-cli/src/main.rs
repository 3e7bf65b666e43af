use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use sensorwire_core::{Config, DEFAULT_GENERATED_AT, NullSink, Protocol, Report};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

mod readings;

use readings::JsonLinesSink;

const EXAMPLES: &str = "Examples:\n  sensorwire capture decode climate.log --protocol line -o report.json\n  sensorwire capture decode frames.bin --protocol frame --stdout --pretty\n  sensorwire config show";

#[derive(Parser, Debug)]
#[command(name = "sensorwire")]
#[command(version, long_version = env!("SENSORWIRE_LONG_VERSION"))]
#[command(
    about = "Offline decoder for serial air-quality and climate sensor captures.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on raw serial captures.
    Capture {
        #[command(subcommand)]
        command: CaptureCommands,
    },
    /// Inspect decoder configuration.
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum CaptureCommands {
    /// Decode a capture and generate a versioned JSON report.
    #[command(alias = "analyse", alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration as TOML.
    Show {
        /// Configuration file to merge over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Path (or glob matching one file) of a raw byte capture
    input: PathBuf,

    /// Wire protocol of the capture
    #[arg(long, value_enum)]
    protocol: ProtocolArg,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reject frames with a bad checksum instead of warning
    #[arg(long)]
    strict_checksum: bool,

    /// Write every accepted value as JSON lines
    #[arg(long, value_name = "PATH")]
    readings: Option<PathBuf>,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any decode error was recorded
    #[arg(long)]
    strict: bool,

    /// List decode errors by kind after decoding
    #[arg(long)]
    list_errors: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ProtocolArg {
    /// ASCII humidity/temperature lines
    Line,
    /// Binary TVOC/CH2O/CO2 frames
    Frame,
}

impl From<ProtocolArg> for Protocol {
    fn from(value: ProtocolArg) -> Self {
        match value {
            ProtocolArg::Line => Protocol::Line,
            ProtocolArg::Frame => Protocol::Frame,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(quiet_requested(&cli));

    let result = match cli.command {
        Commands::Capture { command } => match command {
            CaptureCommands::Decode(args) => cmd_capture_decode(args),
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show { config } => cmd_config_show(config.as_deref()),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn quiet_requested(cli: &Cli) -> bool {
    matches!(
        &cli.command,
        Commands::Capture {
            command: CaptureCommands::Decode(DecodeArgs { quiet: true, .. })
        }
    )
}

/// Logs go to stderr so `--stdout` reports stay parseable.
fn init_tracing(quiet: bool) {
    let default = if quiet {
        "warn"
    } else {
        "sensorwire=info,sensorwire_core=info"
    };
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default.to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{err:#}"), None)
    }
}

fn cmd_capture_decode(args: DecodeArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = if args.stdout {
        None
    } else {
        let path = args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_from_input(&path, &input_abs)?;
        Some(path)
    };
    if let Some(readings_path) = args.readings.as_ref() {
        ensure_distinct_from_input(readings_path, &input_abs)?;
    }

    let config = load_config(args.config.as_deref(), args.strict_checksum)?;
    let protocol = Protocol::from(args.protocol);

    let mut rep = match args.readings.as_ref() {
        Some(path) => {
            create_parent_dir(path)?;
            let mut sink = JsonLinesSink::create(path)
                .with_context(|| format!("Failed to create readings file: {}", path.display()))?;
            let rep = sensorwire_core::analyze_capture_file(
                &resolved_input,
                protocol,
                &config,
                &mut sink,
            )
            .context("capture decoding failed")?;
            let written = sink
                .finish()
                .with_context(|| format!("Failed to write readings: {}", path.display()))?;
            tracing::info!(written, path = %path.display(), "readings written");
            rep
        }
        None => sensorwire_core::analyze_capture_file(
            &resolved_input,
            protocol,
            &config,
            &mut NullSink,
        )
        .context("capture decoding failed")?,
    };
    rep.generated_at = now_rfc3339();

    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report_path {
        None => print!("{}", json),
        Some(report) => {
            create_parent_dir(&report)?;
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.list_errors && !args.quiet {
        print_errors(&rep);
    }
    if args.strict && has_errors(&rep) {
        return Err(CliError::new(
            "decode errors detected",
            Some("use --list-errors to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(path, false)?;
    let text = toml::to_string_pretty(&config).context("TOML serialization failed")?;
    print!("{}", text);
    Ok(())
}

fn load_config(path: Option<&Path>, strict_checksum: bool) -> Result<Config, CliError> {
    let mut config = match path {
        Some(path) => Config::load(path).map_err(|err| {
            CliError::new(
                format!("failed to load config {}: {}", path.display(), err),
                Some("run `sensorwire config show` for a valid template".to_string()),
            )
        })?,
        None => Config::default(),
    };
    if strict_checksum {
        config.frame.strict_checksum = true;
    }
    Ok(config)
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| DEFAULT_GENERATED_AT.to_string())
}

fn ensure_distinct_from_input(output: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // Parent may not exist yet; it is created later, so it cannot hold the input.
    let Ok(dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn has_errors(rep: &Report) -> bool {
    rep.decode_summary
        .as_ref()
        .is_some_and(|summary| summary.errors > 0)
}

fn print_errors(rep: &Report) {
    let Some(summary) = rep.decode_summary.as_ref() else {
        return;
    };
    eprintln!("Decode errors:");
    for entry in &summary.errors_by_kind {
        eprintln!("  {} ({})", entry.kind, entry.count);
    }
    if summary.checksum_mismatches > 0 {
        eprintln!(
            "  checksum_mismatch accepted with warning ({})",
            summary.checksum_mismatches
        );
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a raw serial capture file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a raw serial capture file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!("multiple files match pattern '{pattern}' ({count} matches); matches: {listed}"),
                Some("pass a single capture file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
