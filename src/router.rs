use std::io::Write;

use tracing::info;

use crate::cli::{Cli, Command, FindArgs, ListArgs};
use crate::color;
use crate::config::Config;
use crate::errors::SyError;
use crate::loader::load_index;
use crate::output::Formatter;
use crate::report::{build_report, list_symbols};

pub fn dispatch(cli: Cli, config: &Config) -> Result<(), SyError> {
    let use_color = color::resolve_color(cli.color, &config.output.color);
    let stdout = std::io::stdout().lock();
    match cli.command {
        Command::Find(args) => run_find(&args, config, stdout, use_color),
        Command::List(args) => run_list(&args, config, stdout, use_color),
    }
}

fn run_find<W: Write>(args: &FindArgs, config: &Config, out: W, use_color: bool) -> Result<(), SyError> {
    let index = load_index(&args.index)?;
    let report = build_report(&index, &args.query);
    info!(query = %args.query, lines = report.entries.len(), "find");

    let mut fmt = Formatter::new(out, args.verbose, use_color).with_name_width(config.output.name_width);
    fmt.set_highlight(&args.query);
    fmt.format_report(&report)?;
    fmt.flush()?;
    Ok(())
}

fn run_list<W: Write>(args: &ListArgs, config: &Config, out: W, use_color: bool) -> Result<(), SyError> {
    let index = load_index(&args.index)?;
    let listing = list_symbols(&index);
    info!(symbols = listing.len(), "list");

    let mut fmt = Formatter::new(out, args.verbose, use_color).with_name_width(config.output.name_width);
    for entry in &listing {
        fmt.format_listing(entry)?;
    }
    fmt.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::errors::LoadError;

    #[test]
    fn find_on_missing_index_is_a_load_error() {
        let args = FindArgs {
            index: PathBuf::from("/definitely/not/here.scip"),
            query: "Foo.bar".into(),
            verbose: false,
        };
        let mut out = Vec::new();
        let err = run_find(&args, &Config::default(), &mut out, false).unwrap_err();
        assert!(matches!(err, SyError::Load(LoadError::Read { .. })));
        assert!(out.is_empty());
    }

    #[test]
    fn list_on_empty_index_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.scip");
        std::fs::write(&path, b"").unwrap();
        let args = ListArgs {
            index: path,
            verbose: true,
        };
        let mut out = Vec::new();
        run_list(&args, &Config::default(), &mut out, false).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn verbose_find_with_no_match_prints_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.scip");
        std::fs::write(&path, b"").unwrap();
        let args = FindArgs {
            index: path,
            query: "Missing.symbol".into(),
            verbose: true,
        };
        let mut out = Vec::new();
        run_find(&args, &Config::default(), &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Searching for symbol: Missing.symbol\n(Will also match SCIP patterns containing this symbol)\n\n"
        );
    }
}
