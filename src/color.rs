//! Whether to emit ANSI escapes, and which ones.
//!
//! The first rule that gives an answer wins:
//!
//! | source                    | effect            |
//! |---------------------------|-------------------|
//! | `--color always/never`    | on / off          |
//! | `NO_COLOR` set            | off               |
//! | `CLICOLOR_FORCE=1`        | on                |
//! | config `output.color`     | `always`/`true` on, `never`/`false` off |
//! | `CLICOLOR=0`              | off               |
//! | stdout is a terminal      | on, else off      |

use std::io::IsTerminal;

use clap::ValueEnum;

pub const RESET: &str = "\x1b[0m";
/// Query text inside a name: bold, underlined red.
pub const MATCH: &str = "\x1b[1;4;31m";
/// The `*` marker.
pub const MARKER: &str = "\x1b[1;33m";
/// Raw identifiers in verbose output.
pub const RAW: &str = "\x1b[2m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// The color-related bits of the process environment.
#[derive(Debug, Clone, Default)]
struct ColorEnv {
    no_color: bool,
    clicolor_force: Option<String>,
    clicolor: Option<String>,
    stdout_is_tty: bool,
}

impl ColorEnv {
    fn capture() -> Self {
        ColorEnv {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            clicolor_force: std::env::var("CLICOLOR_FORCE").ok(),
            clicolor: std::env::var("CLICOLOR").ok(),
            stdout_is_tty: std::io::stdout().is_terminal(),
        }
    }

    fn decide(&self, flag: Option<ColorChoice>, config_color: &str) -> bool {
        if let Some(choice @ (ColorChoice::Always | ColorChoice::Never)) = flag {
            return choice == ColorChoice::Always;
        }
        if self.no_color {
            return false;
        }
        if self.clicolor_force.as_deref() == Some("1") {
            return true;
        }
        match config_color {
            "always" | "true" => true,
            "never" | "false" => false,
            _ => self.clicolor.as_deref() != Some("0") && self.stdout_is_tty,
        }
    }
}

/// Decide color for this process from the `--color` flag and the configured
/// mode.
pub fn resolve_color(flag: Option<ColorChoice>, config_color: &str) -> bool {
    ColorEnv::capture().decide(flag, config_color)
}
