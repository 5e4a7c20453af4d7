use clap::{Args, Parser, Subcommand};
use helpar::core::models::parameter::HelicalParameter;
use std::num::NonZeroUsize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "helpar - statistics for DNA helical-parameter time series: bimodality, circular-aware correlation and base-pair-step stiffness.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify every column of a table as uninormal, binormal or undecided, and test binormal columns for bimodality.
    Bimodality(BimodalityArgs),
    /// Build the 6x6 correlation matrix of every base-pair step.
    Correlation(CorrelationArgs),
    /// Estimate covariance, stiffness and force constants of every base-pair step.
    Stiffness(StiffnessArgs),
    /// Per-column mean and standard deviation, labelled by sequence.
    Averages(AveragesArgs),
    /// Per-column histogram tables.
    Histogram(HistogramArgs),
}

/// Column selection shared by every single-table input.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    /// 1-based data columns to keep (the snapshot index column is never counted).
    #[arg(long, value_name = "COLS", value_delimiter = ',')]
    pub usecols: Option<Vec<usize>>,

    /// Drop the first and last data column (terminal base pairs).
    #[arg(long)]
    pub trim_terminal: bool,
}

/// Configuration sources shared by the analysis subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S bimodality.confidence-level=1
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

#[derive(Args, Debug)]
pub struct BimodalityArgs {
    /// Input table (.ser or .csv); each column is classified independently.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV with one row per column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Helical parameter of the table; guessed from the file name when omitted.
    #[arg(short, long, value_name = "NAME")]
    pub parameter: Option<HelicalParameter>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Override the confidence level, in percent.
    #[arg(long, value_name = "PERCENT")]
    pub confidence_level: Option<f64>,

    /// Override the maximum number of EM iterations.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Override the EM convergence tolerance.
    #[arg(long, value_name = "FLOAT")]
    pub tolerance: Option<f64>,
}

/// The six base-pair-step tables, one per coordinate, sharing their columns.
#[derive(Args, Debug, Clone)]
pub struct StepInputArgs {
    #[arg(long, required = true, value_name = "PATH")]
    pub shift: PathBuf,
    #[arg(long, required = true, value_name = "PATH")]
    pub slide: PathBuf,
    #[arg(long, required = true, value_name = "PATH")]
    pub rise: PathBuf,
    #[arg(long, required = true, value_name = "PATH")]
    pub tilt: PathBuf,
    #[arg(long, required = true, value_name = "PATH")]
    pub roll: PathBuf,
    #[arg(long, required = true, value_name = "PATH")]
    pub twist: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,
}

impl StepInputArgs {
    /// Paths in shift, slide, rise, tilt, roll, twist order.
    pub fn paths(&self) -> [&PathBuf; 6] {
        [
            &self.shift,
            &self.slide,
            &self.rise,
            &self.tilt,
            &self.roll,
            &self.twist,
        ]
    }
}

#[derive(Args, Debug)]
pub struct CorrelationArgs {
    #[command(flatten)]
    pub inputs: StepInputArgs,

    /// Output CSV; with several steps, one `<stem>_<label>.<ext>` file per step.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Store NaN for undefined correlations (constant coordinates) instead of failing.
    #[arg(long)]
    pub allow_undefined: bool,
}

#[derive(Args, Debug)]
pub struct StiffnessArgs {
    #[command(flatten)]
    pub inputs: StepInputArgs,

    /// Directory receiving `<label>_covariance.csv`, `<label>_stiffness.csv`,
    /// `<label>_fctes.csv` and `<label>_averages.csv` for every step.
    #[arg(short = 'd', long, required = true, value_name = "DIR")]
    pub output_dir: PathBuf,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Override the thermal energy kT, in kcal/mol.
    #[arg(long, value_name = "FLOAT")]
    pub kt: Option<f64>,
}

#[derive(Args, Debug)]
pub struct AveragesArgs {
    /// Input table (.ser or .csv) holding every base pair, terminal ones included.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Helical parameter of the table.
    #[arg(short, long, required = true, value_name = "NAME")]
    pub parameter: HelicalParameter,

    /// First strand, 5' to 3'.
    #[arg(long, required = true, value_name = "SEQ")]
    pub strand1: String,

    /// Complementary strand, 5' to 3'.
    #[arg(long, required = true, value_name = "SEQ")]
    pub strand2: String,

    /// 1-based data columns to keep before the terminal columns are dropped.
    #[arg(long, value_name = "COLS", value_delimiter = ',')]
    pub usecols: Option<Vec<usize>>,

    /// Output CSV with one row per labelled column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct HistogramArgs {
    /// Input table (.ser or .csv).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Helical parameter of the table; guessed from the file name when omitted.
    #[arg(short, long, value_name = "NAME")]
    pub parameter: Option<HelicalParameter>,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Fixed number of bins; the automatic Sturges/Freedman-Diaconis rule when omitted.
    #[arg(short, long, value_name = "INT")]
    pub bins: Option<NonZeroUsize>,

    /// Output CSV; with several columns, one `<stem>_<label>.<ext>` file per column.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
