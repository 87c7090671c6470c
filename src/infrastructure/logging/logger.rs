use super::config::{LogConfig, LogFormat, RotationPolicy};
use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "taskrank.log";

/// Logger implementation using tracing
///
/// Console output goes to stderr so stdout stays clean for command results.
pub struct LoggerImpl {
    guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// The returned value owns the file writer's guard and must be kept alive
    /// for the lifetime of the process.
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a global subscriber is
    /// already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        // RUST_LOG still wins when set
        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let (file_layer, guard) = match config.log_dir {
            Some(ref log_dir) => {
                let file_appender = match config.rotation {
                    RotationPolicy::Daily => rolling::daily(log_dir, LOG_FILE_PREFIX),
                    RotationPolicy::Hourly => rolling::hourly(log_dir, LOG_FILE_PREFIX),
                    RotationPolicy::Never => rolling::never(log_dir, LOG_FILE_PREFIX),
                };
                let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

                // File output is always JSON
                let layer = tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_ansi(false)
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true);
                (Some(layer), Some(guard))
            }
            None => (None, None),
        };

        let console_json = (config.enable_stdout && config.format == LogFormat::Json).then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_span_list(true)
                .with_target(true)
        });

        let console_pretty =
            (config.enable_stdout && config.format == LogFormat::Pretty).then(|| {
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_span_events(FmtSpan::CLOSE)
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(console_json)
            .with(console_pretty)
            .try_init()
            .context("Failed to install global tracing subscriber")?;

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            file_output = config.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { guard })
    }

    /// Whether log lines are also written to a file
    pub fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
