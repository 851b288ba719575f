use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const SOURCE_URL_ENV: &str = "USER_ADMIN_SOURCE_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_url: String,
    pub page_size: usize,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

/// On-disk shape of `config.json`; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    source_url: Option<String>,
    page_size: Option<usize>,
    request_timeout_secs: Option<u64>,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "tsugumi-sys", "UserAdmin")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
}

/// Directory for the log file, created on demand.
pub fn data_dir() -> Result<PathBuf> {
    let dirs = project_dirs().context("failed to determine data directory")?;
    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

impl Config {
    /// Loads the config file (if any) and applies the environment override.
    ///
    /// Problems with the file are logged and the defaults are kept.
    pub fn load() -> Self {
        let mut config = match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("⚠️ Ignoring config at {}: {e:#}", path.display());
                Self::default()
            }),
            _ => Self::default(),
        };
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            config = config.with_source_url_override(Some(url));
        }
        config
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config in {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(text)?;
        let defaults = Self::default();
        let page_size = match file.page_size {
            Some(0) => {
                log::warn!("⚠️ page_size must be positive, using {DEFAULT_PAGE_SIZE}");
                DEFAULT_PAGE_SIZE
            }
            Some(size) => size,
            None => defaults.page_size,
        };
        Ok(Self {
            source_url: file.source_url.unwrap_or(defaults.source_url),
            page_size,
            request_timeout: file
                .request_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }

    fn with_source_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.source_url = url;
        }
        self
    }
}
