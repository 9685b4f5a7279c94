//! CLI argument definitions for the MDRO surveillance tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use mdro_model::{Period, PeriodKey, ResistanceScope};

#[derive(Parser)]
#[command(
    name = "mdro",
    version,
    about = "MDRO surveillance - flag, deduplicate and count culture isolates",
    long_about = "Turn microbiology culture reports into isolate tables with MDRO indicator flags.\n\n\
                  Counts first isolations per indicator and period, summarizes organisms and\n\
                  susceptibility panels, and checks forecast tables for outbreak alerts."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow patient identifiers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// TOML file with pipeline options (column names, specimen aliases, periods).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Parse report CSVs and write the isolate table.
    Preprocess(PreprocessArgs),

    /// Monthly first-isolation counts of the sentinel indicators.
    Sentinel(SentinelArgs),

    /// Annual counts and rates per 1000 isolates of the class-two indicators.
    ClassTwo(ClassTwoArgs),

    /// Most frequent organisms.
    Organisms(OrganismsArgs),

    /// Organism counts per year and specimen.
    Specimens(SpecimensArgs),

    /// S/I/R statistics for one organism.
    Susceptibility(SusceptibilityArgs),

    /// Flag forecast periods whose observed count exceeds the upper bound.
    Alerts(AlertsArgs),

    /// Combine hospital and community forecasts into an alert level.
    Level(LevelArgs),

    /// Forecast accuracy (MAE, RMSE, MAPE) per year.
    Accuracy(AccuracyArgs),

    /// Pearson correlation between numeric columns of a table.
    Correlate(CorrelateArgs),
}

#[derive(Parser)]
pub struct PreprocessArgs {
    /// Report CSV files or directories containing them.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Isolate table to write.
    #[arg(short = 'o', long = "output", default_value = "isolates.csv")]
    pub output: PathBuf,

    /// Write run statistics as JSON.
    #[arg(long = "stats", value_name = "PATH")]
    pub stats: Option<PathBuf>,

    /// Text searched for resistance markers (overrides the config file).
    #[arg(long = "resistance-scope", value_enum)]
    pub resistance_scope: Option<ScopeArg>,
}

#[derive(Parser)]
pub struct SentinelArgs {
    /// Isolate table written by `preprocess`.
    #[arg(value_name = "ISOLATES")]
    pub isolates: PathBuf,

    #[arg(short = 'o', long = "output", default_value = "sentinel_monthly.csv")]
    pub output: PathBuf,

    /// First-isolation bucket (overrides the config file).
    #[arg(long = "dedupe-period", value_enum)]
    pub dedupe_period: Option<PeriodArg>,
}

#[derive(Parser)]
pub struct ClassTwoArgs {
    /// Isolate table written by `preprocess`.
    #[arg(value_name = "ISOLATES")]
    pub isolates: PathBuf,

    /// Annual table with rates per 1000 isolates.
    #[arg(short = 'o', long = "output", default_value = "class_two_annual.csv")]
    pub output: PathBuf,

    #[arg(long = "monthly-output", default_value = "class_two_monthly.csv")]
    pub monthly_output: PathBuf,

    /// First-isolation bucket (overrides the config file).
    #[arg(long = "dedupe-period", value_enum)]
    pub dedupe_period: Option<PeriodArg>,
}

#[derive(Parser)]
pub struct OrganismsArgs {
    #[arg(value_name = "ISOLATES")]
    pub isolates: PathBuf,

    /// Number of organisms to keep.
    #[arg(long = "top", default_value_t = 20)]
    pub top: usize,

    #[arg(short = 'o', long = "output", default_value = "top_organisms.csv")]
    pub output: PathBuf,
}

#[derive(Parser)]
pub struct SpecimensArgs {
    #[arg(value_name = "ISOLATES")]
    pub isolates: PathBuf,

    /// Counts per year, specimen and organism.
    #[arg(
        short = 'o',
        long = "output",
        default_value = "specimen_organism_counts.csv"
    )]
    pub output: PathBuf,

    /// Counts per year and organism across specimens.
    #[arg(long = "totals-output", default_value = "yearly_organism_counts.csv")]
    pub totals_output: PathBuf,
}

#[derive(Parser)]
pub struct SusceptibilityArgs {
    #[arg(value_name = "ISOLATES")]
    pub isolates: PathBuf,

    /// Organism name exactly as it appears in the isolate table.
    #[arg(long = "organism")]
    pub organism: String,

    #[arg(short = 'o', long = "output", default_value = "susceptibility.csv")]
    pub output: PathBuf,

    /// Text the panel is read from (overrides the config file).
    #[arg(long = "resistance-scope", value_enum)]
    pub resistance_scope: Option<ScopeArg>,
}

#[derive(Parser)]
pub struct AlertsArgs {
    /// Forecast table (ds, y, yhat, yhat_lower, yhat_upper).
    #[arg(value_name = "FORECAST")]
    pub forecast: PathBuf,

    /// Write the forecast table with its alert column.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct LevelArgs {
    /// Hospital forecast table.
    #[arg(long = "hospital", value_name = "FILE")]
    pub hospital: PathBuf,

    /// Community forecast table.
    #[arg(long = "community", value_name = "FILE")]
    pub community: PathBuf,

    /// Month to evaluate (default: latest hospital month).
    #[arg(long = "month", value_name = "YYYY-MM")]
    pub month: Option<PeriodKey>,
}

#[derive(Parser)]
pub struct AccuracyArgs {
    #[arg(value_name = "FORECAST")]
    pub forecast: PathBuf,

    /// Years to evaluate (default: every year present).
    #[arg(long = "year", num_args = 1..)]
    pub years: Vec<i32>,

    /// Years averaged into the mean (default: every evaluated year).
    #[arg(long = "mean-year", num_args = 1..)]
    pub mean_years: Vec<i32>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct CorrelateArgs {
    /// CSV table holding the series.
    #[arg(value_name = "TABLE")]
    pub table: PathBuf,

    /// Numeric columns to correlate.
    #[arg(long = "column", value_name = "NAME", required = true, num_args = 1..)]
    pub columns: Vec<String>,

    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Organism,
    Report,
}

impl From<ScopeArg> for ResistanceScope {
    fn from(value: ScopeArg) -> Self {
        match value {
            ScopeArg::Organism => ResistanceScope::Organism,
            ScopeArg::Report => ResistanceScope::Report,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PeriodArg {
    Month,
    Year,
    Whole,
}

impl From<PeriodArg> for Period {
    fn from(value: PeriodArg) -> Self {
        match value {
            PeriodArg::Month => Period::Month,
            PeriodArg::Year => Period::Year,
            PeriodArg::Whole => Period::Whole,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
