//! Logging setup for rpncalc
//!
//! Logs go to stderr so they never mix with calculator output on stdout.
//! Format: `HH:MM:SS.mmm LEVEL target: message fields`

use anyhow::{anyhow, Result};
use colored::*;
use tracing::Level;
use tracing_subscriber::{
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    EnvFilter,
};

/// Fixed-width level column, colored when the writer takes ANSI escapes
fn level_label(level: Level, ansi: bool) -> String {
    let label = format!("{:<5}", level.as_str());
    if !ansi {
        return label;
    }
    let colored = match level {
        Level::ERROR => label.red().bold(),
        Level::WARN => label.yellow(),
        Level::INFO => label.green(),
        Level::DEBUG => label.blue(),
        Level::TRACE => label.dimmed(),
    };
    colored.to_string()
}

/// Event formatter: local time, level column, target, then the event fields
struct CalcLogFormat;

impl<S, N> FormatEvent<S, N> for CalcLogFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();
        write!(
            writer,
            "{} {} {}: ",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            level_label(*meta.level(), ansi),
            meta.target()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Filter directive for the chosen verbosity
///
/// `--verbose` wins over the configured level.
pub fn filter_directive(verbose: bool, configured: &str) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.to_lowercase()
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the directive
pub fn init_logging(verbose: bool, configured: &str, ansi: bool) -> Result<()> {
    let directive = filter_directive(verbose, configured);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .map_err(|e| anyhow!("Invalid log filter '{}': {}", directive, e))?;

    // with_ansi is only available while the builder still holds the default Format
    tracing_subscriber::fmt()
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .event_format(CalcLogFormat)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(true, "warn"), "debug");
        assert_eq!(filter_directive(false, "INFO"), "info");
    }

    #[test]
    fn test_level_label_plain() {
        assert_eq!(level_label(Level::WARN, false), "WARN ");
        assert_eq!(level_label(Level::ERROR, false), "ERROR");
        assert_eq!(level_label(Level::INFO, false), "INFO ");
    }

    #[test]
    fn test_init_logging_installs_once() {
        init_logging(false, "warn", false).unwrap();
        tracing::warn!(target: "rpncalc", "logging installed");
        // the global subscriber can only be set once
        assert!(init_logging(true, "debug", false).is_err());
    }
}
