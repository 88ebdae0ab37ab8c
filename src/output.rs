//! Output formatting for usage reports and symbol listings.
//!
//! All result data flows through a [`Formatter`] which writes to an
//! arbitrary [`std::io::Write`] destination (typically stdout).
//! Hints and errors always go to stderr via [`print_hint`] and [`print_error`].

use std::io::Write;

use regex::Regex;

use crate::color;
use crate::errors::SyError;
use crate::report::{NestedEntry, Report, ReportEntry, SymbolListing};

/// Indent of nested lines: lines up under the top-level name column.
const NESTED_INDENT: &str = "         ";

/// Renders reports and listings as plain text, with optional verbose
/// columns and ANSI color.
pub struct Formatter<W: Write> {
    writer: W,
    verbose: bool,
    color: bool,
    name_width: usize,
    highlight: Option<Regex>,
}

impl<W: Write> Formatter<W> {
    /// * `writer`  - The destination for output (e.g. `std::io::stdout()`).
    /// * `verbose` - When `true`, add the raw identifier column.
    /// * `color`   - When `true`, emit ANSI color codes.
    pub fn new(writer: W, verbose: bool, color: bool) -> Self {
        Self {
            writer,
            verbose,
            color,
            name_width: 50,
            highlight: None,
        }
    }

    /// Width of the formatted-name column in verbose mode.
    pub fn with_name_width(mut self, width: usize) -> Self {
        self.name_width = width;
        self
    }

    /// Highlight literal occurrences of `query` inside highlighted names.
    pub fn set_highlight(&mut self, query: &str) {
        if query.is_empty() {
            return;
        }
        if let Ok(re) = Regex::new(&regex::escape(query)) {
            self.highlight = Some(re);
        }
    }

    // -- Color helper methods -----------------------------------------------

    fn write_marker(&mut self, highlighted: bool) -> std::io::Result<()> {
        match (highlighted, self.color) {
            (true, true) => write!(self.writer, "{}*{}", color::MARKER, color::RESET),
            (true, false) => write!(self.writer, "*"),
            (false, _) => write!(self.writer, " "),
        }
    }

    /// Write a name, padded to the name column in verbose mode.
    fn write_name(&mut self, name: &str, highlighted: bool) -> std::io::Result<()> {
        match (&self.highlight, self.color && highlighted) {
            (Some(re), true) => write_highlighted(&mut self.writer, name, re)?,
            _ => write!(self.writer, "{name}")?,
        }
        if self.verbose {
            let pad = self.name_width.saturating_sub(name.chars().count());
            write!(self.writer, "{:pad$}", "")?;
        }
        Ok(())
    }

    fn write_raw(&mut self, symbol: &str) -> std::io::Result<()> {
        if self.color {
            write!(self.writer, "{}{}{}", color::RAW, symbol, color::RESET)
        } else {
            write!(self.writer, "{symbol}")
        }
    }

    // -- Reports ------------------------------------------------------------

    /// Format a whole usage report. Verbose mode prints a header naming the
    /// query, even when nothing matched.
    pub fn format_report(&mut self, report: &Report) -> std::io::Result<()> {
        if self.verbose {
            writeln!(self.writer, "Searching for symbol: {}", report.query)?;
            writeln!(self.writer, "(Will also match SCIP patterns containing this symbol)")?;
            writeln!(self.writer)?;
        }
        for entry in &report.entries {
            self.format_entry(entry)?;
        }
        Ok(())
    }

    /// `{marker}    {name}` followed by any nested lines.
    pub fn format_entry(&mut self, entry: &ReportEntry) -> std::io::Result<()> {
        self.write_marker(entry.highlighted)?;
        write!(self.writer, "    ")?;
        self.write_name(&entry.name, entry.highlighted)?;
        if self.verbose {
            write!(self.writer, " [")?;
            self.write_raw(&entry.symbol)?;
            write!(self.writer, "]")?;
        }
        writeln!(self.writer)?;
        for nested in &entry.nested {
            self.format_nested(nested)?;
        }
        Ok(())
    }

    fn format_nested(&mut self, nested: &NestedEntry) -> std::io::Result<()> {
        write!(self.writer, "{NESTED_INDENT}")?;
        self.write_name(&nested.name, false)?;
        if self.verbose {
            write!(self.writer, " [")?;
            self.write_raw(&nested.symbol)?;
            write!(self.writer, "]")?;
        }
        writeln!(self.writer)
    }

    // -- Listings -----------------------------------------------------------

    /// `name`, or `name => raw` in verbose mode.
    pub fn format_listing(&mut self, entry: &SymbolListing) -> std::io::Result<()> {
        self.write_name(&entry.name, false)?;
        if self.verbose {
            write!(self.writer, " => ")?;
            self.write_raw(&entry.symbol)?;
        }
        writeln!(self.writer)
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

/// Write content with regex matches wrapped in the match style.
fn write_highlighted<W: Write>(writer: &mut W, content: &str, re: &Regex) -> std::io::Result<()> {
    let mut last_end = 0;
    for mat in re.find_iter(content) {
        write!(writer, "{}", &content[last_end..mat.start()])?;
        write!(writer, "{}{}{}", color::MATCH, mat.as_str(), color::RESET)?;
        last_end = mat.end();
    }
    write!(writer, "{}", &content[last_end..])
}

// ---------------------------------------------------------------------------
// Stderr helpers
// ---------------------------------------------------------------------------

pub fn print_hint(msg: &str) {
    eprintln!("hint: {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}

/// Print an [`SyError`] as `error:` / `hint:` lines on stderr and return
/// the process exit code.
pub fn format_error(err: &SyError) -> i32 {
    print_error(&format!("{err}"));
    if let Some(hint) = err.hint() {
        print_hint(hint);
    }
    err.exit_code()
}
