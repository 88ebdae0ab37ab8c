//! Diagnostic logging to stderr.
//!
//! Stdout carries the report, so log lines always go to stderr. The level
//! comes from `[logging] level` in the config; `RUST_LOG` takes precedence:
//!
//! ```bash
//! RUST_LOG=symbol_usage=debug sy find index.scip Foo.bar
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter: `RUST_LOG` if set, otherwise the configured level.
fn build_filter(config: &LoggingConfig, rust_log: Option<&str>) -> EnvFilter {
    match rust_log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new(&config.level),
    }
}

/// Install the global subscriber. Only the first call takes effect.
pub fn init(config: &LoggingConfig) {
    INIT.call_once(|| {
        let rust_log = std::env::var("RUST_LOG").ok();
        let filter = build_filter(config, rust_log.as_deref());
        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_env_filter(filter)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn config_level_used_without_rust_log() {
        let config = LoggingConfig {
            level: "debug".into(),
        };
        let filter = build_filter(&config, None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_wins_over_config() {
        let config = LoggingConfig::default();
        let filter = build_filter(&config, Some("symbol_usage=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }

    #[test]
    fn init_is_idempotent() {
        init(&LoggingConfig::default());
        init(&LoggingConfig {
            level: "trace".into(),
        });
    }
}
