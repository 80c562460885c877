use clap::parser::ValueSource;
use clap::{Args, CommandFactory, FromArgMatches, Parser, Subcommand, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{Result, StatsError};

/// Environment variable holding the default stats directory.
pub const STAT_DIR_ENV: &str = "KOVAAK_STAT_DIR";

/// Environment variable holding the default chart output directory.
pub const IMG_DIR_ENV: &str = "KOVAAK_STAT_IMG_DIR";

/// Number of recent runs averaged by the Voltaic report unless overridden.
pub const DEFAULT_VOLTAIC_AVG: usize = 10;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Charts and spreadsheet summaries from KovaaK's stat files
#[derive(Parser, Debug, Clone)]
#[command(
    name = "kovaak-stats",
    about = "Charts and spreadsheet summaries from KovaaK's stat files",
    version
)]
pub struct Settings {
    /// Directory holding the stat files, usually
    /// .../steamapps/common/FPSAimTrainer/FPSAimTrainer/stats
    #[arg(long, global = true, env = STAT_DIR_ENV)]
    pub statsdir: Option<PathBuf>,

    /// Logging level
    #[arg(long, global = true, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,

    /// Where `statsdir` came from, filled in by [`Settings::load_from`].
    #[arg(skip)]
    pub statsdir_source: Option<ValueSource>,

    /// Where the chart `imgdir` came from, filled in by [`Settings::load_from`].
    #[arg(skip)]
    pub imgdir_source: Option<ValueSource>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Render one chart per scenario into the image directory
    Charts(ChartArgs),
    /// Print best and 5 most recent scores for the Sparky progression sheet
    Sparky(ReportArgs),
    /// Print best and recent average scores for the Voltaic benchmark sheet
    Voltaic(VoltaicArgs),
    /// List every scenario found in the stats directory
    Scenarios,
}

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Directory the chart images are written to
    #[arg(long, env = IMG_DIR_ENV)]
    pub imgdir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct VoltaicArgs {
    /// Number of most recent runs to average. Use 0 to include all runs
    #[arg(long, default_value_t = DEFAULT_VOLTAIC_AVG)]
    pub avg: usize,

    #[command(flatten)]
    pub report: ReportArgs,
}

/// How tabular reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines ready to paste into a spreadsheet
    Text,
    /// Pretty-printed JSON
    Json,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::load_from(std::env::args_os())
    }

    /// Parse an explicit argument list and record where the directory
    /// options came from. Exits with a usage message on invalid input.
    pub fn load_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Settings::command().get_matches_from(args);
        let mut settings =
            Settings::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

        settings.statsdir_source = matches.value_source("statsdir");
        settings.imgdir_source = matches
            .subcommand_matches("charts")
            .and_then(|sub| sub.value_source("imgdir"));

        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The stats directory, from `--statsdir` or [`STAT_DIR_ENV`].
    pub fn resolve_stats_dir(&self) -> Result<PathBuf> {
        self.statsdir
            .clone()
            .ok_or_else(|| missing_dir_error("statsdir", STAT_DIR_ENV))
    }
}

impl ChartArgs {
    /// The chart directory, from `--imgdir` or [`IMG_DIR_ENV`].
    pub fn resolve_img_dir(&self) -> Result<PathBuf> {
        self.imgdir
            .clone()
            .ok_or_else(|| missing_dir_error("imgdir", IMG_DIR_ENV))
    }
}

/// Human-readable name for a directory option's origin.
pub fn describe_source(source: Option<ValueSource>) -> &'static str {
    match source {
        Some(ValueSource::CommandLine) => "command line",
        Some(ValueSource::EnvVariable) => "environment",
        Some(ValueSource::DefaultValue) => "default",
        _ => "unset",
    }
}

fn missing_dir_error(flag: &str, env: &str) -> StatsError {
    StatsError::Usage(format!(
        "Please use the --{flag} option or set the {env} environment variable."
    ))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
