use crate::config::WeightingChoice;
use crate::utils::parser::{self, GridSpec};
use clap::{Args, Parser, Subcommand, ValueEnum};
use effcal::engine::config::ZoneConfig;
use effcal::workflows::resample::EnergyGrid;
use effcal::workflows::selection::RecordSelection;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "effcal - Fit, evaluate and convert detector efficiency calibrations stored in LSRM EFR/EFA files.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every record of a calibration file with the line it starts on.
    List(ListArgs),
    /// Print a summary of one record: header, points, nuclides and zones.
    Show(ShowArgs),
    /// Fit zone polynomials to measured points and write an EFA file.
    Fit(FitArgs),
    /// Evaluate a fitted calibration at given energies.
    Eval(EvalArgs),
    /// Build an EFR file by sampling a fitted calibration on an energy grid.
    Resample(ResampleArgs),
    /// Export the measured points of a record as a TSV table.
    Export(ExportArgs),
    /// Append header parameters to one record and write the whole file back out.
    SetParam(SetParamArgs),
    /// Convert one record between EFR and EFA naming, keeping the other records.
    Convert(ConvertArgs),
}

/// Picks one record out of a multi-record file. Defaults to the first record.
#[derive(Args, Debug, Clone, Default)]
#[group(required = false, multiple = false)]
pub struct RecordArgs {
    /// Full name token of the record, brackets included (e.g., '[GC3019;Point 25cm]').
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Zero-based position of the record in the file.
    #[arg(long, value_name = "INT")]
    pub index: Option<usize>,
}

impl RecordArgs {
    pub fn selection(&self) -> RecordSelection {
        match (&self.name, self.index) {
            (Some(name), _) => RecordSelection::Named(name.clone()),
            (None, Some(index)) => RecordSelection::Index(index),
            (None, None) => RecordSelection::First,
        }
    }
}

/// Energies to evaluate at: an explicit list or a generated grid.
#[derive(Args, Debug, Clone, Default)]
pub struct GridArgs {
    /// Energy in keV. Can be used multiple times.
    #[arg(short, long = "energy", value_name = "KEV", conflicts_with = "grid")]
    pub energies: Vec<f64>,

    /// Evenly spaced grid with both endpoints included.
    #[arg(long, value_name = "START:END:N", value_parser = parser::parse_grid)]
    pub grid: Option<GridSpec>,

    /// Space the --grid points geometrically instead of linearly.
    #[arg(long, requires = "grid")]
    pub log: bool,
}

impl GridArgs {
    pub fn energy_grid(&self) -> Option<EnergyGrid> {
        if let Some(GridSpec { start, end, points }) = self.grid {
            Some(if self.log {
                EnergyGrid::Log { start, end, points }
            } else {
                EnergyGrid::Linear { start, end, points }
            })
        } else if !self.energies.is_empty() {
            Some(EnergyGrid::Explicit(self.energies.clone()))
        } else {
            None
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Path to the calibration file.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Path to the calibration file.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,
}

#[derive(Args, Debug)]
pub struct FitArgs {
    /// Path to the input calibration file with measured points.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output EFA file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Path to a fit configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Fitting zone, replacing the zones of the config file. Can be used multiple times.
    /// Example: --zone 4:50:400 --zone 2:250:3000
    #[arg(long = "zone", value_name = "DEGREE:LEFT:RIGHT", value_parser = parser::parse_zone)]
    pub zones: Vec<ZoneConfig>,

    /// Override the point weighting scheme from the config file.
    #[arg(long, value_enum, value_name = "SCHEME")]
    pub weighting: Option<WeightingChoice>,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Fit every record of the input file.
    #[arg(long, conflicts_with_all = ["name", "index"])]
    pub all: bool,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    pub append: bool,
}

impl FitArgs {
    pub fn selection(&self) -> RecordSelection {
        if self.all {
            RecordSelection::All
        } else {
            self.record.selection()
        }
    }
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Path to the fitted calibration file.
    #[arg(value_name = "PATH")]
    pub file: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Write the table to a TSV file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ResampleArgs {
    /// Path to the fitted calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output EFR file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Energies to sample; defaults to the record's own point energies.
    #[command(flatten)]
    pub grid: GridArgs,

    /// Append to the output file instead of replacing it.
    #[arg(long)]
    pub append: bool,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Path to the calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the output TSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,
}

#[derive(Args, Debug)]
pub struct SetParamArgs {
    /// Path to the calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the rewritten calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Header parameter to append. Can be used multiple times.
    /// Example: -S Detector=GC3019
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", required = true, value_parser = parser::parse_key_value)]
    pub parameters: Vec<(String, String)>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFormatChoice {
    Efa,
    Efr,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the converted calibration file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    #[command(flatten)]
    pub record: RecordArgs,

    /// Target naming format.
    #[arg(long = "to", value_enum, value_name = "FORMAT")]
    pub format: NameFormatChoice,

    /// Nuclide token for EFR naming.
    #[arg(long, value_name = "NAME", default_value = "nuclide")]
    pub nuclide: String,
}
