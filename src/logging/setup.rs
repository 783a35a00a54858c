use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn, Subscriber};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use super::formatter::BracketedFormatter;

const LOG_DIR: &str = "logs";

/// Our crate at trace level, noisy windowing and rendering crates at warn
fn default_filter() -> EnvFilter {
    let mut filter = EnvFilter::new("trace");
    for directive in ["winit=warn", "log=warn", "egui=warn", "eframe=warn", "wgpu=warn", "naga=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

fn create_log_file() -> io::Result<(PathBuf, File)> {
    let log_dir = std::env::current_dir()?.join(LOG_DIR);
    fs::create_dir_all(&log_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let log_path = log_dir.join(format!("annotator_{}.log", timestamp));
    let file = File::create(&log_path)?;
    Ok((log_path, file))
}

/// Stdout sink on top of `filter`
fn stdout_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stdout);

    tracing_subscriber::registry().with(filter).with(stdout_layer)
}

/// File sink plus stdout sink on top of `filter`
fn dual_subscriber(filter: EnvFilter, file: File) -> impl Subscriber + Send + Sync + 'static {
    let file_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(Mutex::new(file))
        .with_ansi(false);
    let stdout_layer = fmt::layer()
        .event_format(BracketedFormatter)
        .with_writer(io::stdout);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
///
/// Returns the log file path, or `None` when only stdout logging could be set up.
pub fn setup_logging() -> Option<PathBuf> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    match create_log_file() {
        Ok((log_path, file)) => {
            dual_subscriber(filter, file).init();

            info!("Log file created at: {:?}", log_path);
            Some(log_path)
        }
        Err(e) => {
            stdout_subscriber(filter).init();

            warn!("Could not create log file ({}), logging to stdout only", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_writes_bracketed_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("annotator.log");
        let file = File::create(&path).unwrap();

        tracing::subscriber::with_default(dual_subscriber(EnvFilter::new("info"), file), || {
            info!("store size {}", 3);
            tracing::debug!("filtered out");
        });

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("]: store size 3"));
        assert!(!contents.contains("filtered out"));
    }

    #[test]
    fn test_stdout_only_subscriber_accepts_events() {
        tracing::subscriber::with_default(stdout_subscriber(EnvFilter::new("warn")), || {
            warn!("stdout only");
        });
    }
}
