/// Accounting command-line tool: inspect, validate and decode OpenBSD
/// process accounting files (`/var/account/acct` and its rotations).
///
/// # Command overview
///
/// ```text
/// acct <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print one summary line per record
///   validate   Check a file decodes without rejections or warnings
///   decode     Render every record as text, JSON or JSON lines
///   help       Print help information
///
/// Global options:
///   -v, --verbose          More log output on stderr (repeatable)
///   --big-endian           Read multi-byte fields as big-endian
///   --tick-rate <HZ>       comp_t ticks per second (default 64)
///   --strict-utf8          Reject command names that are not UTF-8
///   --ignore-filename      Skip the acct / acct.<suffix> name check
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                            |
/// |------|----------------------------------------------------|
/// | 0    | Success                                            |
/// | 1    | Error (I/O failure, rejected file, failed validate)|
///
/// Logs and errors go to stderr so stdout can be piped cleanly. A valid
/// `RUST_LOG` (e.g. `RUST_LOG=acct_decoder=trace`) replaces the level
/// chosen with `-v`.
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process;

use acct_decoder::{DEFAULT_TICK_RATE, DecoderConfig};
use acct_types::CommandEncoding;
use acct_wire::ByteOrder;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::FmtSubscriber;

mod cmd_decode;
mod cmd_inspect;
mod cmd_validate;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// OpenBSD process accounting reader.
#[derive(Parser)]
#[command(name = "acct", version, about = "OpenBSD process accounting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Read multi-byte fields as big-endian.
    #[arg(long, global = true)]
    big_endian: bool,

    /// Clock ticks per second used by comp_t fields.
    #[arg(long, global = true, default_value_t = DEFAULT_TICK_RATE)]
    tick_rate: NonZeroU32,

    /// Reject command names that are not valid UTF-8 instead of reading
    /// them as Latin-1.
    #[arg(long, global = true)]
    strict_utf8: bool,

    /// Decode files whose name is not `acct` or `acct.<suffix>`.
    #[arg(long, global = true)]
    ignore_filename: bool,
}

impl Cli {
    fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            byte_order: if self.big_endian {
                ByteOrder::Big
            } else {
                ByteOrder::Little
            },
            tick_rate: self.tick_rate,
            command_encoding: if self.strict_utf8 {
                CommandEncoding::Utf8
            } else {
                CommandEncoding::Latin1
            },
            check_filename: !self.ignore_filename,
        }
    }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Filter from `RUST_LOG` directives when they parse, else from `-v`.
    fn log_filter(&self, rust_log: Option<&str>) -> EnvFilter {
        rust_log
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| {
                EnvFilter::default().add_directive(LevelFilter::from_level(self.log_level()).into())
            })
    }
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print one summary line per record.
    Inspect(InspectArgs),
    /// Check a file decodes without rejections or warnings.
    Validate(ValidateArgs),
    /// Render every record as text, JSON or JSON lines.
    Decode(DecodeArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `acct inspect`.
///
/// ```text
/// ┌────────────┬──────────────────────────────────────────────────────┐
/// │ Flag       │ Effect                                               │
/// ├────────────┼──────────────────────────────────────────────────────┤
/// │ --show-hex │ Include a 16-byte-per-line hex dump of each record   │
/// │ --record N │ Show only the record at index N                      │
/// └────────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the accounting file.
    pub file: PathBuf,

    /// Show a raw hex dump of each 64-byte record.
    #[arg(long)]
    pub show_hex: bool,

    /// Inspect only the record at this zero-based index.
    #[arg(long)]
    pub record: Option<usize>,
}

/// Arguments for `acct validate`.
///
/// Decodes the whole file and prints `✓` / `✗` lines. Exits with code 1
/// if the file is rejected or any warning is raised.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the accounting file.
    pub file: PathBuf,
}

/// Output formats for `acct decode`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `key: value` block per record.
    #[default]
    Text,
    /// A single pretty-printed JSON array.
    Json,
    /// One compact JSON object per line.
    Jsonl,
}

/// Arguments for `acct decode`.
///
/// ```text
/// ┌───────────────┬──────────────────────────────────────────────────┐
/// │ Flag          │ Values / default                                 │
/// ├───────────────┼──────────────────────────────────────────────────┤
/// │ --format      │ text (default) | json | jsonl                    │
/// │ -o / --output │ write to file instead of stdout                  │
/// └───────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Path to the accounting file.
    pub file: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(cli.log_filter(rust_log.as_deref()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("error: cannot install logger: {e}");
    }

    let config = cli.decoder_config();
    let result = match &cli.command {
        Commands::Inspect(args) => cmd_inspect::run(args, &config),
        Commands::Validate(args) => cmd_validate::run(args, &config),
        Commands::Decode(args) => cmd_decode::run(args, &config),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
