// Countboard CLI - IRA and cycle-count completion dashboards from the terminal

mod analyze;
mod compare;
mod email;
mod exit_codes;
mod export;
mod snapshot;
mod targets;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};

use countboard_config::Settings;
use countboard_stats::Category;

use exit_codes::{EXIT_IO, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "countboard")]
#[command(about = "IRA and cycle-count completion dashboards")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Settings file (default: <config dir>/countboard/settings.toml)
    #[arg(long, global = true, env = "COUNTBOARD_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Snapshot database (overrides settings)
    #[arg(long, global = true, env = "COUNTBOARD_DB", value_name = "FILE")]
    db: Option<PathBuf>,

    /// Weekly target table (overrides settings)
    #[arg(long = "targets", global = true, env = "COUNTBOARD_TARGETS", value_name = "FILE")]
    targets_file: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG overrides
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Report files for commands that work on both categories.
#[derive(Args)]
pub(crate) struct UploadArgs {
    /// IRA report (csv, tsv, json, xlsx, xls, ods)
    #[arg(long, value_name = "FILE")]
    pub ira: Option<PathBuf>,

    /// Cycle-count report
    #[arg(long, value_name = "FILE")]
    pub cc: Option<PathBuf>,

    /// Worksheet to read from spreadsheet files (default: first)
    #[arg(long)]
    pub sheet: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and aggregate one report, then print its dashboard
    #[command(after_help = "\
Examples:
  countboard analyze ira_2026-10-16.xlsx
  countboard analyze cc.csv --category cc --date 2026-10-16
  countboard analyze cc.csv --json
  countboard analyze cc.csv --fail-below-target    # exit 6 when below target")]
    Analyze {
        /// Report file
        file: PathBuf,

        /// Report category (ira or cc); detected from the flag column when omitted
        #[arg(long, short = 'c')]
        category: Option<Category>,

        /// Worksheet to read from spreadsheet files (default: first)
        #[arg(long)]
        sheet: Option<String>,

        /// Reference date for the weekly target (default: now)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Output JSON to stdout instead of the dashboard
        #[arg(long)]
        json: bool,

        /// Exit with code 6 when the overall percentage is below target
        #[arg(long)]
        fail_below_target: bool,
    },

    /// Save, list, show and delete snapshots
    #[command(subcommand)]
    Snapshot(snapshot::SnapshotCommands),

    /// Growth between two saved snapshots
    #[command(after_help = "\
Examples:
  countboard compare 1760601600000 1759996800000
  countboard compare 1760601600000 1759996800000 --json")]
    Compare {
        /// Newer snapshot id
        current: String,

        /// Older snapshot id
        previous: String,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Write the dashboard to an Excel workbook or a branch CSV
    #[command(after_help = "\
Examples:
  countboard export --ira ira.xlsx --cc cc.xlsx --output dashboard.xlsx
  countboard export --ira ira.xlsx --cc cc.xlsx --output dashboard.xlsx --compare-to 1759996800000
  countboard export --cc cc.csv --output cc_branches.csv")]
    Export {
        #[command(flatten)]
        uploads: UploadArgs,

        /// Output file (.xlsx, or .csv for a single category)
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Add a comparison against this snapshot
        #[arg(long, value_name = "ID")]
        compare_to: Option<String>,

        /// Reference date for the weekly target (default: now)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,
    },

    /// Print the progress email draft
    #[command(after_help = "\
Examples:
  countboard email --ira ira.xlsx --cc cc.xlsx
  countboard email --ira ira.xlsx --cc cc.xlsx --compare-to 1759996800000 --mailto")]
    Email {
        #[command(flatten)]
        uploads: UploadArgs,

        /// Add growth versus this snapshot
        #[arg(long, value_name = "ID")]
        compare_to: Option<String>,

        /// Reference date for the weekly target (default: now)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Print a mailto: link instead of the plain draft
        #[arg(long, conflicts_with = "json")]
        mailto: bool,

        /// Output JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the weekly target table
    #[command(subcommand)]
    Targets(targets::TargetsCommands),
}

/// Resolved paths and settings shared by every command.
pub(crate) struct Context {
    pub settings: Settings,
    pub db: PathBuf,
    pub targets: PathBuf,
}

impl Context {
    fn from_cli(cli: &Cli) -> Self {
        let settings = match &cli.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load(),
        };
        let db = cli.db.clone().unwrap_or_else(|| settings.snapshot_db_path());
        let targets = cli.targets_file.clone().unwrap_or_else(|| settings.targets_path());
        Self { settings, db, targets }
    }
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\nstats:   countboard-stats ", env!("CARGO_PKG_VERSION"),
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let ctx = Context::from_cli(&cli);

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: countboard <command> [options]");
            eprintln!("       countboard --help for more information");
            Ok(())
        }
        Some(Commands::Analyze { file, category, sheet, date, json, fail_below_target }) => {
            analyze::cmd_analyze(&ctx, file, category, sheet, date, json, fail_below_target)
        }
        Some(Commands::Snapshot(cmd)) => snapshot::cmd_snapshot(&ctx, cmd),
        Some(Commands::Compare { current, previous, json }) => compare::cmd_compare(&ctx, current, previous, json),
        Some(Commands::Export { uploads, output, compare_to, date }) => {
            export::cmd_export(&ctx, uploads, output, compare_to, date)
        }
        Some(Commands::Email { uploads, compare_to, date, mailto, json }) => {
            email::cmd_email(&ctx, uploads, compare_to, date, mailto, json)
        }
        Some(Commands::Targets(cmd)) => targets::cmd_targets(&ctx, cmd),
    };

    match result {
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

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
