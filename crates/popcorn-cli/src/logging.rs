use anyhow::Result;
use std::io;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::ChronoUtc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Rotation prefix without extension ("popcorn" from "popcorn.log")
fn rotation_prefix(filename: &str) -> &str {
    filename.rsplitn(2, '.').nth(1).unwrap_or(filename)
}

pub fn init_logging_with_file(verbose_level: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    // Determine log level from verbose count
    // 0 = warn (keeps interactive screens clean), 1 = debug without hyper noise, 2+ = trace
    let filter = if quiet {
        // In quiet mode, only show errors
        EnvFilter::new("error")
    } else if verbose_level > 0 {
        // Use verbose level or RUST_LOG environment variable
        let filter_str = match verbose_level {
            // -v: debug level but suppress noisy hyper logs
            1 => "debug,hyper::proto::h1=warn,hyper::client::pool=warn",
            // -vv and above: everything, hyper included
            _ => "trace",
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Structured JSON when asked for, or when nobody is reading a terminal
    let json = std::env::var("RUST_LOG_JSON")
        .map(|v| v == "true")
        .unwrap_or_else(|_| !io::stdout().is_terminal());

    let registry = Registry::default().with(filter);

    // If log file is provided, write to file; otherwise write to stderr
    if let Some(log_path) = log_file {
        // A bare filename logs into the working directory
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&log_dir)?;

        let log_filename = log_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| anyhow::anyhow!("Invalid log filename"))?;

        let log_prefix = rotation_prefix(log_filename);

        // Files will be named popcorn.2026-10-19 and so on, one per day
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY, // Rotate daily at midnight
            log_dir,
            log_prefix,
        );

        if json {
            let json_layer = fmt::layer()
                .json()
                .with_timer(ChronoUtc::rfc_3339())
                .with_writer(file_appender);

            registry.with(json_layer).init();
        } else {
            let fmt_layer = fmt::layer()
                .with_timer(ChronoUtc::rfc_3339())
                .with_ansi(false) // No ANSI codes in files
                .with_writer(file_appender);

            registry.with(fmt_layer).init();
        }
    } else if json {
        let json_layer = fmt::layer()
            .json()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(json_layer).init();
    } else {
        let fmt_layer = fmt::layer()
            .with_timer(ChronoUtc::rfc_3339())
            .with_writer(io::stderr);

        registry.with(fmt_layer).init();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_prefix_drops_extension() {
        assert_eq!(rotation_prefix("popcorn.log"), "popcorn");
        assert_eq!(rotation_prefix("popcorn.session.log"), "popcorn.session");
        assert_eq!(rotation_prefix("popcorn"), "popcorn");
    }
}
