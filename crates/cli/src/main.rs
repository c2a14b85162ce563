// orderrecon CLI - Order Log / Billing Export analysis and reconciliation

mod analyze;
mod exit_codes;
mod inspect;
mod recon;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser, Subcommand};
use orderrecon_config::{ConfigError, Settings};
use orderrecon_engine::Matrix;
use orderrecon_io::LoadError;
use tracing_subscriber::EnvFilter;

use exit_codes::{load_exit_code, EXIT_CONFIG, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "orecon")]
#[command(about = "Order Log and Billing Export analysis: header, target counts, statistics, reconciliation")]
#[command(version)]
struct Cli {
    /// Settings file (default: the per-user settings.toml when present)
    #[arg(long, global = true, env = "ORECON_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Worksheet name for workbook inputs (default: first sheet)
    #[arg(long, global = true, value_name = "NAME")]
    sheet: Option<String>,

    /// Print machine-readable JSON to stdout
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr: -v info, -vv debug, -vvv trace (ORECON_LOG overrides)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the header block (date, order number, location, customer, facility) of an Order Log
    #[command(after_help = "\
Examples:
  orecon header auftrag.xlsx
  orecon header auftrag.xlsx --sheet Auftrag --json")]
    Header {
        /// Order Log file (csv, tsv, xlsx, xls, ods)
        order_log: PathBuf,
    },

    /// Count case-insensitive occurrences of target identifiers in a Billing Export
    #[command(after_help = "\
Examples:
  orecon count abrechnung.csv --targets 'A-100, A-101 A-102'
  orecon count abrechnung.csv --targets-file targets.txt --top 10
  orecon count abrechnung.xlsx --order-log auftrag.xlsx --json")]
    #[command(group(
        ArgGroup::new("source")
            .required(true)
            .args(["targets", "targets_file", "order_log"])
    ))]
    Count {
        /// Billing Export file
        billing: PathBuf,

        /// Targets separated by commas, semicolons or whitespace
        #[arg(long, value_name = "LIST")]
        targets: Option<String>,

        /// Read targets from a text file (same separators as --targets)
        #[arg(long, value_name = "PATH")]
        targets_file: Option<PathBuf>,

        /// Derive targets from an Order Log's order column
        #[arg(long, value_name = "PATH")]
        order_log: Option<PathBuf>,

        /// Only list the N most frequent targets
        #[arg(long, value_name = "N")]
        top: Option<usize>,
    },

    /// Statistics, date range, trend and data health of a sheet
    #[command(after_help = "\
Examples:
  orecon stats abrechnung.csv
  orecon stats abrechnung.xlsx --json")]
    Stats {
        /// File to analyze
        file: PathBuf,
    },

    /// Reconcile two datasets by order key (exit 5 with --fail-on-discrepancy when not clean)
    #[command(after_help = "\
Amounts are compared in cents. Repeated order keys within one file are summed \
(or the first row kept, see [recon] duplicates in the settings file).

Examples:
  orecon recon auftrag.xlsx abrechnung.csv
  orecon recon auftrag.xlsx abrechnung.csv --output report.csv
  orecon recon a.csv b.csv --tolerance-cents 1 --fail-on-discrepancy
  orecon recon a.csv b.csv --output report.xlsx --json")]
    Recon {
        /// Dataset A (usually the Order Log)
        a: PathBuf,

        /// Dataset B (usually the Billing Export)
        b: PathBuf,

        /// Write the report (csv, json or xlsx by extension)
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,

        /// Override the settings file's tolerance (cents)
        #[arg(long, value_name = "CENTS")]
        tolerance_cents: Option<i64>,

        /// Exit 5 when any order is mismatched or missing
        #[arg(long)]
        fail_on_discrepancy: bool,
    },

    /// Run the full pipeline over an Order Log and a Billing Export, emitting one JSON report
    #[command(after_help = "\
Runs header extraction on the Order Log, counts the Order Log's order numbers \
in the Billing Export, computes statistics and health of the Billing Export and \
reconciles both files.

Examples:
  orecon analyze auftrag.xlsx abrechnung.csv
  orecon analyze auftrag.xlsx abrechnung.csv --output report.csv > analysis.json")]
    Analyze {
        /// Order Log file
        order_log: PathBuf,

        /// Billing Export file
        billing: PathBuf,

        /// Also write the reconciliation report (csv, json or xlsx)
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write a commented settings file with the built-in defaults
    InitConfig {
        /// Destination (default: the per-user settings.toml)
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { config, sheet, json, command, .. } = cli;
    let ctx = || Context::new(config.as_deref(), sheet.clone(), json);

    match command {
        Commands::Header { order_log } => inspect::cmd_header(&ctx()?, &order_log),
        Commands::Count {
            billing,
            targets,
            targets_file,
            order_log,
            top,
        } => inspect::cmd_count(&ctx()?, &billing, targets, targets_file, order_log, top),
        Commands::Stats { file } => inspect::cmd_stats(&ctx()?, &file),
        Commands::Recon {
            a,
            b,
            output,
            tolerance_cents,
            fail_on_discrepancy,
        } => recon::cmd_recon(&ctx()?, &a, &b, output, tolerance_cents, fail_on_discrepancy),
        Commands::Analyze {
            order_log,
            billing,
            output,
        } => analyze::cmd_analyze(&ctx()?, &order_log, &billing, output),
        Commands::InitConfig { path } => cmd_init_config(path),
    }
}

/// `-v` count maps to a level; `ORECON_LOG` takes full filter directives.
fn init_logging(verbose: u8) {
    let filter = match std::env::var("ORECON_LOG") {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::new(directives),
        _ => EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }),
    };

    // Also installs the log -> tracing bridge for the library crates.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ============================================================================
// Shared command context
// ============================================================================

pub struct Context {
    pub settings: Settings,
    pub sheet: Option<String>,
    pub json: bool,
}

impl Context {
    fn new(config: Option<&Path>, sheet: Option<String>, json: bool) -> Result<Self, CliError> {
        let (settings, source) = Settings::load(config).map_err(CliError::config)?;
        log::debug!("using settings from {source}");
        Ok(Self { settings, sheet, json })
    }

    pub fn load(&self, path: &Path) -> Result<Matrix, CliError> {
        orderrecon_io::load_matrix(path, self.sheet.as_deref()).map_err(CliError::load)
    }
}

/// Pretty JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::error(format!("JSON serialization error: {e}")))?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a load error with the matching exit code.
    pub fn load(err: LoadError) -> Self {
        let code = load_exit_code(&err);
        let hint = match &err {
            LoadError::UnsupportedFormat(_) => {
                Some("convert the file to csv or xlsx".to_string())
            }
            LoadError::UnsupportedReport(_) => {
                Some("name the report .csv, .json or .xlsx".to_string())
            }
            LoadError::TooLarge { .. } => Some("split the sheet or export it as csv".to_string()),
            LoadError::SheetNotFound { .. } => Some("pass one of the listed names to --sheet".to_string()),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    pub fn config(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::Parse(_) | ConfigError::Validation(_) => {
                Some("`orecon init-config <path>` writes a valid template".to_string())
            }
            ConfigError::Io { .. } => None,
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// init-config
// ============================================================================

fn cmd_init_config(path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(Settings::config_path);
    Settings::write_template(&path).map_err(CliError::config)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}
