use std::io::Write;

use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;

use crate::{
    client::{ClientConfig, DryRunPoster, GraphApi, PagePoster},
    config::AppConfig,
    demo::{run_demo, DemoOptions, DemoSummary},
    logging::{init_logging, LoggingConfig},
    result::{AppError, Result},
};

/// Runs the demonstration against the backend selected by `dry_run`.
///
/// Credentials are checked before any poster is built, so a missing token
/// or page id never reaches the network.
pub async fn run_app<W: Write>(
    config: &AppConfig,
    dry_run: bool,
    options: &DemoOptions,
    out: &mut W,
) -> Result<DemoSummary> {
    let poster = create_poster(config, dry_run)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = poster.backend(),
        "Page poster starting up"
    );

    match run_demo(poster.as_ref(), out, options).await {
        Ok(summary) => {
            info!(
                page = %summary.page.name,
                post_id = %summary.post.id,
                recent_count = summary.recent.len(),
                "Demo completed"
            );
            Ok(summary)
        },
        Err(AppError::Client(e)) => {
            error!(
                error = %e,
                status = ?e.status(),
                network = e.is_network_error(),
                "Demo aborted"
            );
            Err(e.into())
        },
        Err(e) => Err(e),
    }
}

pub fn create_poster(config: &AppConfig, dry_run: bool) -> Result<Box<dyn PagePoster>> {
    let client_config = ClientConfig::try_from(config)?;

    if dry_run {
        return Ok(Box::new(DryRunPoster::new(client_config.page_id)));
    }

    Ok(Box::new(GraphApi::new(client_config)?))
}

pub fn initialize_logging(config: &AppConfig) -> Result<Option<WorkerGuard>> {
    let logging_config = logging_config(config, |key| std::env::var(key).ok());

    init_logging(logging_config).map_err(|e| {
        AppError::GeneralError(format!("Failed to initialize logging: {e}").into())
    })
}

/// The config file's level, then `PAGE_POSTER_*` environment overrides
fn logging_config(
    config: &AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> LoggingConfig {
    let mut logging_config = LoggingConfig::default();
    if let Some(log_level) = &config.log_level {
        logging_config = logging_config.with_level(log_level);
    }

    logging_config.with_env(lookup)
}

#[cfg(test)]
mod tests {
    use tracing::Level;

    use super::*;
    use crate::client::ClientError;

    fn app_config(token: &str, page_id: &str) -> AppConfig {
        AppConfig {
            access_token: token.into(),
            page_id: page_id.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_poster_selects_backend() {
        let poster = create_poster(&app_config("token", "42"), true).unwrap();
        assert_eq!(poster.backend(), "dry-run");

        let poster = create_poster(&app_config("token", "42"), false).unwrap();
        assert_eq!(poster.backend(), "graph-api");
    }

    #[test]
    fn test_create_poster_requires_credentials() {
        let result = create_poster(&app_config("", "42"), false);
        assert!(matches!(result, Err(AppError::Client(ClientError::Config(_)))));

        let result = create_poster(&app_config("token", ""), true);
        assert!(matches!(result, Err(AppError::Client(ClientError::Config(_)))));
    }

    #[test]
    fn test_env_log_level_overrides_config_file() {
        let config = AppConfig {
            log_level: Some("trace".into()),
            ..app_config("token", "42")
        };

        let logging = logging_config(&config, |key| {
            (key == "PAGE_POSTER_LOG_LEVEL").then(|| "error".to_string())
        });
        assert_eq!(logging.file_level, Level::ERROR);
        assert_eq!(logging.console_level, Level::ERROR);

        let logging = logging_config(&config, |_| None);
        assert_eq!(logging.file_level, Level::TRACE);
    }
}
