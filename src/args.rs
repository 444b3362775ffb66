//! These structs provide the CLI interface for the mint CLI.

use crate::query::{MatchMode, Predicate};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::LevelFilter;

const DEFAULT_CSV: &str = "transactions.csv";
const DEFAULT_JSON: &str = "transactions.json";

/// mint: A command-line tool for working with Mint transaction exports.
///
/// Mint lets you download all of your transactions as a single CSV file. This program converts
/// that file to JSON and answers simple questions about it: which transactions match some
/// criteria, how much they add up to, and how they break down by category, by month or by size.
///
/// Named sets of criteria, called presets, are kept in a config file. Run `mint presets` to see
/// them and `mint init` to write the default config file so that you can edit it.
#[derive(Debug, Parser, Clone)]
#[command(name = "mint", version)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Write the default config file, which holds the built-in presets, so that you can edit it.
    Init(InitArgs),
    /// Convert a Mint CSV export into a JSON array of transactions.
    Convert(ConvertArgs),
    /// Select transactions and write them out as JSON.
    Filter(FilterArgs),
    /// Select transactions and print their total amount.
    Sum(SelectArgs),
    /// Select transactions and print the count and total for each value of a field.
    Group(GroupArgs),
    /// Select transactions and print the count and total for each calendar month.
    Months(SelectArgs),
    /// Select transactions and print the count and total for each amount range.
    Buckets(BucketsArgs),
    /// List the available presets.
    Presets,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The config file that holds the presets. Defaults to mint-tx/config.json in your platform's
    /// config directory, and the built-in presets are used if that file does not exist.
    #[arg(long, env = "MINT_CONFIG")]
    config: Option<DisplayPath>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self {
            log_level,
            config: config.map(DisplayPath::from),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_ref().map(DisplayPath::path)
    }
}

/// (Not shown): Args for the `mint init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Overwrite the config file if it already exists.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    pub fn new(force: bool) -> Self {
        Self { force }
    }

    pub fn force(&self) -> bool {
        self.force
    }
}

/// (Not shown): Args for the `mint convert` command.
#[derive(Debug, Parser, Clone)]
pub struct ConvertArgs {
    /// The Mint CSV export to read, or `-` for stdin.
    #[arg(short, long, default_value = DEFAULT_CSV)]
    input: DisplayPath,

    /// Where to write the JSON. `.json` is appended if the name does not already end with it.
    #[arg(short, long, default_value = DEFAULT_JSON)]
    output: DisplayPath,

    /// Write typed values: dates are checked and amounts become JSON numbers. Without this flag
    /// every value is written exactly as it appears in the CSV.
    #[arg(long)]
    normalize: bool,
}

impl ConvertArgs {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, normalize: bool) -> Self {
        Self {
            input: DisplayPath::new(input.into()),
            output: DisplayPath::new(output.into()),
            normalize,
        }
    }

    pub fn input(&self) -> &Path {
        self.input.path()
    }

    pub fn output(&self) -> &Path {
        self.output.path()
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }
}

/// Which transactions a command works on. Presets and `--where` predicates are combined with
/// `--mode`, then the date range is applied.
#[derive(Debug, Parser, Clone, Default)]
pub struct SelectArgs {
    /// The Mint CSV export to read, or `-` for stdin.
    #[arg(short, long, default_value = DEFAULT_CSV)]
    input: DisplayPath,

    /// Use the predicates of a named preset. May be given more than once.
    #[arg(long = "preset", value_name = "NAME")]
    presets: Vec<String>,

    /// Match transactions whose FIELD is exactly VALUE, e.g. --where "Category=Groceries". May be
    /// given more than once.
    #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_predicate)]
    predicates: Vec<Predicate>,

    /// Whether all predicates or any predicate must match. Defaults to the mode of the presets
    /// when they agree, and to `all` otherwise.
    #[arg(long, value_enum)]
    mode: Option<MatchMode>,

    /// Only keep transactions on or after this date, MM/DD/YYYY.
    #[arg(long, value_name = "MM/DD/YYYY")]
    start: Option<String>,

    /// Only keep transactions on or before this date, MM/DD/YYYY.
    #[arg(long, value_name = "MM/DD/YYYY")]
    end: Option<String>,
}

impl SelectArgs {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: DisplayPath::new(input.into()),
            ..Self::default()
        }
    }

    pub fn with_preset(mut self, name: impl Into<String>) -> Self {
        self.presets.push(name.into());
        self
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_range(mut self, start: Option<&str>, end: Option<&str>) -> Self {
        self.start = start.map(str::to_string);
        self.end = end.map(str::to_string);
        self
    }

    pub fn input(&self) -> &Path {
        self.input.path()
    }

    pub fn presets(&self) -> &[String] {
        &self.presets
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn mode(&self) -> Option<MatchMode> {
        self.mode
    }

    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn end(&self) -> Option<&str> {
        self.end.as_deref()
    }
}

/// (Not shown): Args for the `mint filter` command.
#[derive(Debug, Parser, Clone)]
pub struct FilterArgs {
    #[clap(flatten)]
    select: SelectArgs,

    /// Where to write the JSON. Printed to stdout when omitted. `.json` is appended if the name
    /// does not already end with it.
    #[arg(short, long)]
    output: Option<DisplayPath>,
}

impl FilterArgs {
    pub fn new(select: SelectArgs, output: Option<PathBuf>) -> Self {
        Self {
            select,
            output: output.map(DisplayPath::from),
        }
    }

    pub fn select(&self) -> &SelectArgs {
        &self.select
    }

    pub fn output(&self) -> Option<&Path> {
        self.output.as_ref().map(DisplayPath::path)
    }
}

/// (Not shown): Args for the `mint group` command.
#[derive(Debug, Parser, Clone)]
pub struct GroupArgs {
    #[clap(flatten)]
    select: SelectArgs,

    /// The field to group by, e.g. "Category" or "Account Name".
    #[arg(long, short)]
    key: String,
}

impl GroupArgs {
    pub fn new(select: SelectArgs, key: impl Into<String>) -> Self {
        Self {
            select,
            key: key.into(),
        }
    }

    pub fn select(&self) -> &SelectArgs {
        &self.select
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// (Not shown): Args for the `mint buckets` command.
#[derive(Debug, Parser, Clone)]
pub struct BucketsArgs {
    #[clap(flatten)]
    select: SelectArgs,

    /// A boundary between two amount ranges. May be given more than once, in any order. An
    /// amount equal to an edge falls in the range that starts at that edge.
    #[arg(long = "edge", value_name = "AMOUNT", allow_negative_numbers = true)]
    edges: Vec<f64>,
}

impl BucketsArgs {
    pub fn new(select: SelectArgs, edges: Vec<f64>) -> Self {
        Self { select, edges }
    }

    pub fn select(&self) -> &SelectArgs {
        &self.select
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }
}

/// Parses `FIELD=VALUE`. Only the first `=` separates, so the value may contain `=`.
fn parse_predicate(s: &str) -> Result<Predicate, String> {
    match s.split_once('=') {
        Some((field, value)) if !field.is_empty() => Ok(Predicate::new(field, value)),
        _ => Err(format!("expected FIELD=VALUE, got '{s}'")),
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
