use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::color::ColorChoice;
use crate::errors::SyError;

/// sy - find where a symbol is referenced, defined, and called from,
/// using a SCIP index
#[derive(Parser, Debug)]
#[command(name = "sy", version, about)]
pub struct Cli {
    /// When to use ANSI colors (overrides config and environment)
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show usages of a symbol, with call sites nested under callers
    #[command(after_help = "Examples:\n  sy find /tmp/index.scip Foo.bar\n  sy find ./index.scip MyClass.method")]
    Find(FindArgs),

    /// List all symbols in a SCIP index
    #[command(after_help = "Examples:\n  sy list /tmp/index.scip\n  sy list ./index.scip")]
    List(ListArgs),
}

#[derive(clap::Args, Debug)]
pub struct FindArgs {
    /// Path to the SCIP index file
    pub index: PathBuf,

    /// Symbol to look up (e.g. `Foo.bar`, or a raw SCIP symbol)
    pub query: String,

    /// Show verbose output with SCIP symbol names
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Path to the SCIP index file
    pub index: PathBuf,

    /// Show verbose output with SCIP symbol names
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse the process arguments.
///
/// `--help` and `--version` print and exit here. Any other clap failure
/// comes back as [`SyError::Usage`].
pub fn parse() -> Result<Cli, SyError> {
    parse_from(std::env::args_os())
}

pub fn parse_from<I, T>(args: I) -> Result<Cli, SyError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|err| {
        if !err.use_stderr() {
            err.exit();
        }
        SyError::from(err)
    })
}
