//! `sy` settings read from TOML.
//!
//! Two optional files are layered over the built-in defaults, later files
//! winning key by key:
//!
//! - `~/.sy/config.toml`
//! - `<project>/.sy/config.toml`
//!
//! ```toml
//! [output]
//! color = "auto"      # auto | always | never
//! name_width = 50     # name column width in verbose output
//!
//! [logging]
//! level = "warn"      # tracing filter, RUST_LOG takes precedence
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const CONFIG_DIR: &str = ".sy";
const CONFIG_FILE: &str = "config.toml";

/// Resolved settings. Every field has a value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputConfig {
    /// `"auto"`, `"always"` or `"never"`; consulted after `--color` and the
    /// color environment variables.
    pub color: String,
    pub name_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: "auto".into(),
            name_width: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter directive such as `"warn"` or `"symbol_usage=debug"`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "warn".into() }
    }
}

/// One config file as written: absent keys stay `None` and leave the
/// value below them untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Layer {
    output: OutputLayer,
    logging: LoggingLayer,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputLayer {
    color: Option<String>,
    name_width: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoggingLayer {
    level: Option<String>,
}

impl Layer {
    fn merge_into(self, config: &mut Config) {
        let Layer { output, logging } = self;
        if let Some(color) = output.color {
            config.output.color = color;
        }
        if let Some(width) = output.name_width {
            config.output.name_width = width;
        }
        if let Some(level) = logging.level {
            config.logging.level = level;
        }
    }
}

/// Reads and parses one layer. A missing file is not an error.
fn read_layer(path: &Path) -> Result<Option<Layer>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("cannot read {}", path.display())),
    };
    let layer = toml::from_str(&text).with_context(|| format!("invalid config in {}", path.display()))?;
    Ok(Some(layer))
}

impl Config {
    /// Settings for a run started in `project_dir`.
    pub fn load(project_dir: Option<&Path>) -> Result<Config> {
        let global_dir = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_DIR));
        Self::load_with_global_dir(global_dir.as_deref(), project_dir)
    }

    fn load_with_global_dir(global_dir: Option<&Path>, project_dir: Option<&Path>) -> Result<Config> {
        let files = global_dir
            .map(|dir| dir.join(CONFIG_FILE))
            .into_iter()
            .chain(project_dir.map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)));

        let mut config = Config::default();
        for path in files {
            if let Some(layer) = read_layer(&path)? {
                layer.merge_into(&mut config);
            }
        }
        Ok(config)
    }
}
