//! These structs provide the CLI interface for the fintrack CLI.

use crate::export::ExportStyle;
use crate::model::{Amount, Kind, RecordFields};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fintrack: keep track of expenses, income, investments, assets and loans.
///
/// Every run starts from a ledger held in memory: the built-in sample data, an empty ledger
/// (--empty) or a JSON ledger file (--ledger). Changes are never written back. Use the session
/// subcommand to run several commands, including add, update and delete, against one ledger.
#[derive(Debug, Parser, Clone)]
#[command(name = "fintrack", version)]
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

/// One line of a `session` script. It has the same grammar as the subcommands of `fintrack`.
#[derive(Debug, Parser, Clone)]
#[command(name = "fintrack", no_binary_name = true)]
pub struct SessionLine {
    #[command(subcommand)]
    command: Command,
}

impl SessionLine {
    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory and write a default config.json into it.
    Init,
    /// Show the total of every kind and the net worth (assets minus loans).
    Summary,
    /// List the records of one kind, newest first.
    List(KindArgs),
    /// Show the most recent records across all kinds.
    Recent(RecentArgs),
    /// Show expenses summed per month, oldest month first.
    Trend,
    /// Show the records of one kind summed per category.
    Breakdown(BreakdownArgs),
    /// Compare total income with total expenses.
    Compare,
    /// Show a single record.
    Get(IdArgs),
    /// Add a record. The id is assigned automatically.
    Add(AddArgs),
    /// Replace every field of an existing record.
    Update(UpdateArgs),
    /// Delete a record.
    Delete(IdArgs),
    /// Write the records of one kind to <kind>-<today>.csv.
    Export(ExportArgs),
    /// Run commands read one per line from a file or stdin against a single in-memory ledger.
    ///
    /// Blank lines and lines starting with # are skipped. Words are split the way a shell splits
    /// them, so quote descriptions that contain spaces.
    Session(SessionArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the configuration and exports are held. Defaults to ~/fintrack
    #[arg(long, env = "FINTRACK_HOME", default_value_t = default_fintrack_home())]
    home: DisplayPath,

    /// Start from the ledger in this JSON file instead of the sample data.
    #[arg(long, conflicts_with = "empty")]
    ledger: Option<PathBuf>,

    /// Start from an empty ledger instead of the sample data.
    #[arg(long)]
    empty: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf) -> Self {
        Self {
            log_level,
            home: home.into(),
            ledger: None,
            empty: false,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn ledger(&self) -> Option<&Path> {
        self.ledger.as_deref()
    }

    pub fn empty(&self) -> bool {
        self.empty
    }
}

#[derive(Debug, Parser, Clone)]
pub struct KindArgs {
    kind: Kind,
}

impl KindArgs {
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

#[derive(Debug, Parser, Clone)]
pub struct IdArgs {
    kind: Kind,
    id: u64,
}

impl IdArgs {
    pub fn new(kind: Kind, id: u64) -> Self {
        Self { kind, id }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Parser, Clone)]
pub struct RecentArgs {
    /// How many entries to show. Defaults to recent_limit from config.json.
    #[arg(long)]
    limit: Option<usize>,
}

impl RecentArgs {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }
}

#[derive(Debug, Parser, Clone)]
pub struct BreakdownArgs {
    #[arg(default_value_t = Kind::Expenses)]
    kind: Kind,
}

impl BreakdownArgs {
    pub fn new(kind: Kind) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// The fields every record has besides its id.
#[derive(Debug, Parser, Clone)]
pub struct RecordArgs {
    /// The date in YYYY-MM-DD form.
    #[arg(long)]
    date: NaiveDate,

    #[arg(long)]
    description: String,

    #[arg(long)]
    category: String,

    /// The amount, e.g. 2500, 2,500.00 or ₹2,500.
    #[arg(long, allow_hyphen_values = true)]
    amount: Amount,
}

impl RecordArgs {
    pub fn new(fields: RecordFields) -> Self {
        Self {
            date: fields.date,
            description: fields.description,
            category: fields.category,
            amount: fields.amount,
        }
    }

    pub fn fields(&self) -> RecordFields {
        RecordFields::new(
            self.date,
            self.description.clone(),
            self.category.clone(),
            self.amount,
        )
    }
}

#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    kind: Kind,

    #[clap(flatten)]
    record: RecordArgs,
}

impl AddArgs {
    pub fn new(kind: Kind, fields: RecordFields) -> Self {
        Self {
            kind,
            record: RecordArgs::new(fields),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn fields(&self) -> RecordFields {
        self.record.fields()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    kind: Kind,
    id: u64,

    #[clap(flatten)]
    record: RecordArgs,
}

impl UpdateArgs {
    pub fn new(kind: Kind, id: u64, fields: RecordFields) -> Self {
        Self {
            kind,
            id,
            record: RecordArgs::new(fields),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn fields(&self) -> RecordFields {
        self.record.fields()
    }
}

#[derive(Debug, Parser, Clone)]
pub struct ExportArgs {
    kind: Kind,

    /// The directory to write to. Defaults to export_dir from config.json.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// How to quote fields. Defaults to export_style from config.json.
    #[arg(long)]
    style: Option<ExportStyle>,
}

impl ExportArgs {
    pub fn new(kind: Kind, dir: Option<PathBuf>, style: Option<ExportStyle>) -> Self {
        Self { kind, dir, style }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn style(&self) -> Option<ExportStyle> {
        self.style
    }
}

#[derive(Debug, Parser, Clone)]
pub struct SessionArgs {
    /// The script to run. If not supplied, commands are read from stdin.
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,
}

impl SessionArgs {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self { file }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

fn default_fintrack_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fintrack"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or FINTRACK_HOME instead of relying on the default \
                home directory.",
            );
            PathBuf::from("fintrack")
        }
    })
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
    pub fn path(&self) -> &Path {
        &self.0
    }
}
