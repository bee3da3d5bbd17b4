use std::path::{Path, PathBuf};

use directories::BaseDirs;
use serde::{Deserialize, Serialize};

use crate::{
    client::ClientError,
    result::{AppError, Result},
};

pub const ACCESS_TOKEN_VAR: &str = "FACEBOOK_PAGE_ACCESS_TOKEN";
pub const PAGE_ID_VAR: &str = "FACEBOOK_PAGE_ID";
pub const GRAPH_URL_VAR: &str = "FACEBOOK_GRAPH_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Page Access Token used for every Graph API call
    pub access_token: String,
    /// Identifier of the page to post to
    pub page_id: String,
    /// Alternate Graph API root, e.g. a pinned version or a local mock
    pub graph_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Log level: Trace, Debug, Info, Warn, Error or Off
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            page_id: String::new(),
            graph_url: None,
            timeout_secs: 30,
            log_level: None,
        }
    }
}

impl AppConfig {
    /// Loads the config file if present, then applies environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            confy::load_path(path).map_err(AppError::ConfigFile)?
        } else {
            AppConfig::default()
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Overrides values with non-empty variables found through `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var(ACCESS_TOKEN_VAR) {
            self.access_token = token;
        }
        if let Some(page_id) = var(PAGE_ID_VAR) {
            self.page_id = page_id;
        }
        if let Some(url) = var(GRAPH_URL_VAR) {
            self.graph_url = Some(url);
        }
    }

    /// Fails when the token or page id is missing, naming what to set
    pub fn ensure_credentials(&self) -> std::result::Result<(), ClientError> {
        let missing: Vec<&str> = [
            (ACCESS_TOKEN_VAR, self.access_token.as_str()),
            (PAGE_ID_VAR, self.page_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::config(format!(
                "missing {}; export {ACCESS_TOKEN_VAR}='<page access token>' and \
                 {PAGE_ID_VAR}='<page id>'",
                missing.join(" and ")
            )))
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(dirs) = BaseDirs::new() {
        dirs.config_dir().join("page-poster.toml")
    } else {
        PathBuf::from("page-poster.toml")
    }
}
