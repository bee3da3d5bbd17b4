use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level for console output
    pub console_level: Level,
    /// Log level for file output
    pub file_level: Level,
    /// Directory where log files should be written
    pub log_dir: Option<PathBuf>,
    /// Whether to enable JSON formatted logs for structured output
    pub json_format: bool,
    /// Whether to mirror logs to stderr
    pub console: bool,
    /// Set by the "off" level; no subscriber is installed
    pub disabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            console_level: Level::INFO,
            file_level: Level::DEBUG,
            log_dir: Some(Self::default_log_dir()),
            json_format: false,
            console: false,
            disabled: false,
        }
    }
}

impl LoggingConfig {
    /// Get the OS-appropriate default log directory
    pub fn default_log_dir() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "page-poster") {
            // On Linux: ~/.cache/page-poster
            proj_dirs.cache_dir().to_path_buf()
        } else {
            PathBuf::from("page-poster-logs")
        }
    }

    /// Apply `PAGE_POSTER_*` overrides on top of this configuration
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(level) = lookup("PAGE_POSTER_LOG_LEVEL") {
            self = self.with_level(&level);
        }

        if let Some(log_dir) = lookup("PAGE_POSTER_LOG_DIR") {
            self.log_dir = Some(PathBuf::from(log_dir));
        }

        if lookup("PAGE_POSTER_NO_FILE_LOGS").is_some() {
            self.log_dir = None;
        }

        if lookup("PAGE_POSTER_JSON_LOGS").is_some() {
            self.json_format = true;
        }

        if lookup("PAGE_POSTER_CONSOLE_LOGS").is_some() {
            self.console = true;
        }

        self
    }

    /// Apply a level name such as "debug"; "Off" disables all logging
    pub fn with_level(mut self, level: &str) -> Self {
        if level.eq_ignore_ascii_case("off") {
            self.disabled = true;
        } else if let Ok(parsed_level) = level.parse::<Level>() {
            self.console_level = parsed_level;
            self.file_level = parsed_level;
            self.disabled = false;
        }
        self
    }
}

/// Initialize the logging system with the given configuration
pub fn init_logging(
    config: LoggingConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error>> {
    if config.disabled {
        return Ok(None);
    }

    let mut layers = vec![];
    let mut guard = None;

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "page-poster.log");
        let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        let file_layer = if config.json_format {
            fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        } else {
            fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(config.file_level.into())
                        .from_env_lossy(),
                )
                .boxed()
        };

        layers.push(file_layer);
    }

    // stdout carries the command output, so console logs go to stderr
    if config.console {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_filter(
                EnvFilter::builder()
                    .with_default_directive(config.console_level.into())
                    .from_env_lossy(),
            )
            .boxed();

        layers.push(console_layer);
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    Ok(guard)
}
